//! Core simulation types: inputs, hourly samples, and daily aggregates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Site profile selecting the ambient-cooling behavior of the air temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Tropical beach with high insolation and no extra night cooling.
    #[default]
    #[serde(alias = "kuta")]
    Standard,
    /// Windy coastal site where nights cool faster.
    #[serde(alias = "tanah_lot")]
    HighWind,
}

impl Location {
    /// All locations, in display order.
    pub const ALL: [Location; 2] = [Location::Standard, Location::HighWind];

    /// Site name shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Location::Standard => "Kuta",
            Location::HighWind => "Tanah Lot",
        }
    }

    /// Short description of the climate profile.
    pub fn description(self) -> &'static str {
        match self {
            Location::Standard => "High Insolation (Tropical)",
            Location::HighWind => "Windy Coastal Area (Cooler Nights)",
        }
    }

    /// Parses a location from its config name or site name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
            "standard" | "kuta" => Some(Location::Standard),
            "high_wind" | "highwind" | "tanah_lot" => Some(Location::HighWind),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical and economic parameter vector driving one simulation run.
///
/// The engine accepts any value here, including out-of-domain ones; range
/// checks happen only when a scenario file is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationInputs {
    /// Ambient-cooling profile.
    pub location: Location,
    /// Peak heat-source (sand) temperature, nominally 50–100 °C.
    pub sand_temp_peak: f64,
    /// Seebeck coefficient of the module (V/K), nominally 0.01–0.1.
    pub seebeck_coefficient: f64,
    /// Thermal conductivity used by the efficiency estimate (W/m·K).
    pub conductivity: f64,
    /// Capital cost of the full array.
    pub system_cost: f64,
    /// Discount rate (%). Carried for completeness, unused by the aggregates.
    pub discount_rate: f64,
    /// Amortization horizon (years).
    pub lifetime: u32,
    /// Number of modules scaling single-module output to system scale.
    pub module_count: u32,
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            location: Location::Standard,
            sand_temp_peak: 70.0,
            seebeck_coefficient: 0.05,
            conductivity: 1.5,
            system_cost: 15_000_000.0,
            discount_rate: 5.0,
            lifetime: 10,
            module_count: 2000,
        }
    }
}

impl SimulationInputs {
    /// Merges every field set in `patch` into these inputs.
    pub fn apply(&mut self, patch: &InputsPatch) {
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(v) = patch.sand_temp_peak {
            self.sand_temp_peak = v;
        }
        if let Some(v) = patch.seebeck_coefficient {
            self.seebeck_coefficient = v;
        }
        if let Some(v) = patch.conductivity {
            self.conductivity = v;
        }
        if let Some(v) = patch.system_cost {
            self.system_cost = v;
        }
        if let Some(v) = patch.discount_rate {
            self.discount_rate = v;
        }
        if let Some(v) = patch.lifetime {
            self.lifetime = v;
        }
        if let Some(v) = patch.module_count {
            self.module_count = v;
        }
    }
}

/// Partial update of [`SimulationInputs`]; unset fields are left untouched.
///
/// # Examples
///
/// ```
/// use cdth_sim::sim::types::{InputsPatch, Location, SimulationInputs};
///
/// let mut inputs = SimulationInputs::default();
/// inputs.apply(&InputsPatch::default().location(Location::HighWind).module_count(500));
/// assert_eq!(inputs.location, Location::HighWind);
/// assert_eq!(inputs.module_count, 500);
/// assert_eq!(inputs.sand_temp_peak, 70.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputsPatch {
    pub location: Option<Location>,
    pub sand_temp_peak: Option<f64>,
    pub seebeck_coefficient: Option<f64>,
    pub conductivity: Option<f64>,
    pub system_cost: Option<f64>,
    pub discount_rate: Option<f64>,
    pub lifetime: Option<u32>,
    pub module_count: Option<u32>,
}

impl InputsPatch {
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn sand_temp_peak(mut self, value: f64) -> Self {
        self.sand_temp_peak = Some(value);
        self
    }

    pub fn seebeck_coefficient(mut self, value: f64) -> Self {
        self.seebeck_coefficient = Some(value);
        self
    }

    pub fn conductivity(mut self, value: f64) -> Self {
        self.conductivity = Some(value);
        self
    }

    pub fn system_cost(mut self, value: f64) -> Self {
        self.system_cost = Some(value);
        self
    }

    pub fn discount_rate(mut self, value: f64) -> Self {
        self.discount_rate = Some(value);
        self
    }

    pub fn lifetime(mut self, value: u32) -> Self {
        self.lifetime = Some(value);
        self
    }

    pub fn module_count(mut self, value: u32) -> Self {
        self.module_count = Some(value);
        self
    }

    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One hourly sample of the diurnal cycle, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationDataPoint {
    /// Hour of day, 0 through 24 inclusive.
    pub time: u32,
    /// Sand (hot side) temperature (°C, 1 dp).
    pub temp_sand: f64,
    /// Air (cold side) temperature (°C, 1 dp).
    pub temp_air: f64,
    /// Open-circuit voltage magnitude (mV, 1 dp).
    pub voltage: f64,
    /// Power into the matched load (mW, 1 dp).
    pub power: f64,
}

impl fmt::Display for SimulationDataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>2}h | sand={:>5.1} °C  air={:>5.1} °C | V={:>7.1} mV  P={:>7.1} mW",
            self.time, self.temp_sand, self.temp_air, self.voltage, self.power,
        )
    }
}

/// Daily aggregates for the whole array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResults {
    /// System energy over one day (Wh, 2 dp).
    pub total_energy: f64,
    /// Mean of the hourly efficiency estimates (%, 2 dp).
    pub average_efficiency: f64,
    /// Daily electricity savings (currency, 2 dp).
    pub total_savings: f64,
    /// Levelized cost of energy over the lifetime (currency/kWh, 0 dp).
    pub lcoe: f64,
    /// Payback proxy: system cost over annual savings (years, 1 dp).
    pub roi: f64,
}

impl fmt::Display for SimulationResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Results ---")?;
        writeln!(f, "Total energy:        {:.2} Wh", self.total_energy)?;
        writeln!(f, "Average efficiency:  {:.2} %", self.average_efficiency)?;
        writeln!(f, "Daily savings:       {:.2}", self.total_savings)?;
        writeln!(f, "LCOE:                {:.0} /kWh", self.lcoe)?;
        write!(f, "Payback:             {:.1} years", self.roi)
    }
}

/// Rounds `value` to `decimals` places, half away from zero.
pub(crate) fn round_dp(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
