//! Simulation-wide physical and economic constants.

use serde::{Deserialize, Serialize};

/// Internal resistance of one thermoelectric module (Ω).
pub const DEFAULT_INTERNAL_RESISTANCE_OHM: f64 = 2.0;

/// Load resistance, matched to the internal resistance for maximum power (Ω).
pub const DEFAULT_LOAD_RESISTANCE_OHM: f64 = 2.0;

/// Active area of one module, 20 cm × 20 cm (m²).
pub const DEFAULT_DEVICE_AREA_M2: f64 = 0.04;

/// Retail electricity rate used to value harvested energy (Rp/kWh).
pub const DEFAULT_ELECTRICITY_RATE_PER_KWH: f64 = 1444.0;

/// Days used to annualize one simulated day.
pub const DEFAULT_DAYS_PER_YEAR: f64 = 365.0;

/// Fixed device and tariff parameters shared by every run.
///
/// Not user inputs: these only change through the `[constants]` table of a
/// scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConstants {
    /// Internal resistance of the module (Ω).
    pub internal_resistance_ohm: f64,
    /// External load resistance (Ω).
    pub load_resistance_ohm: f64,
    /// Module area used by the heat-flow estimate (m²).
    pub device_area_m2: f64,
    /// Electricity rate (currency per kWh).
    pub electricity_rate_per_kwh: f64,
    /// Days per year for annual figures.
    pub days_per_year: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            internal_resistance_ohm: DEFAULT_INTERNAL_RESISTANCE_OHM,
            load_resistance_ohm: DEFAULT_LOAD_RESISTANCE_OHM,
            device_area_m2: DEFAULT_DEVICE_AREA_M2,
            electricity_rate_per_kwh: DEFAULT_ELECTRICITY_RATE_PER_KWH,
            days_per_year: DEFAULT_DAYS_PER_YEAR,
        }
    }
}

impl ModelConstants {
    /// Series resistance seen by the module current (Ω).
    pub fn total_resistance_ohm(&self) -> f64 {
        self.internal_resistance_ohm + self.load_resistance_ohm
    }
}
