//! Daily energy and economic aggregation from accumulated hourly samples.

use std::fmt;

use super::constants::ModelConstants;
use super::types::{SimulationInputs, SimulationResults, round_dp};

/// Unrounded running sums collected by the engine over one day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyTotals {
    /// Sum of hourly single-module power samples (mW).
    pub power_mw: f64,
    /// Sum of hourly efficiency estimates (%).
    pub efficiency_pct: f64,
    /// Number of samples accumulated.
    pub samples: usize,
}

impl DailyTotals {
    /// Adds one hourly sample.
    pub fn push(&mut self, power_mw: f64, efficiency_pct: f64) {
        self.power_mw += power_mw;
        self.efficiency_pct += efficiency_pct;
        self.samples += 1;
    }
}

/// Full-precision energy and cost breakdown for the array.
///
/// Each hourly mW sample is treated as one hour of energy, so the daily sum
/// in mW maps directly to mWh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Economics {
    /// Single-module energy per day (Wh).
    pub module_energy_wh: f64,
    /// Array energy per day (Wh).
    pub system_energy_wh: f64,
    /// Array energy per year (Wh).
    pub annual_energy_wh: f64,
    /// Array energy over the lifetime (kWh).
    pub lifetime_energy_kwh: f64,
    /// Savings per day (currency).
    pub daily_savings: f64,
    /// Savings per year (currency).
    pub annual_savings: f64,
    /// Lifetime cost per kWh; 0 when no energy is produced.
    pub lcoe: f64,
    /// Years to recover the system cost; 0 when there are no savings.
    pub roi_years: f64,
    /// Mean hourly efficiency (%); 0 with no samples.
    pub average_efficiency_pct: f64,
}

impl Economics {
    /// Derives the full breakdown from daily totals and the run inputs.
    ///
    /// # Arguments
    ///
    /// * `totals` - Unrounded sums from the engine loop
    /// * `inputs` - Inputs of the run (module count, lifetime, cost)
    /// * `constants` - Tariff and annualization constants
    pub fn from_totals(
        totals: &DailyTotals,
        inputs: &SimulationInputs,
        constants: &ModelConstants,
    ) -> Self {
        let module_energy_wh = totals.power_mw / 1000.0;
        let system_energy_wh = module_energy_wh * f64::from(inputs.module_count);
        let annual_energy_wh = system_energy_wh * constants.days_per_year;

        let rate = constants.electricity_rate_per_kwh;
        let daily_savings = system_energy_wh / 1000.0 * rate;
        let annual_savings = annual_energy_wh / 1000.0 * rate;
        let lifetime_energy_kwh = annual_energy_wh / 1000.0 * f64::from(inputs.lifetime);

        let lcoe = if lifetime_energy_kwh > 0.0 {
            inputs.system_cost / lifetime_energy_kwh
        } else {
            0.0
        };
        let roi_years = if annual_savings > 0.0 {
            inputs.system_cost / annual_savings
        } else {
            0.0
        };
        let average_efficiency_pct = if totals.samples > 0 {
            totals.efficiency_pct / totals.samples as f64
        } else {
            0.0
        };

        Self {
            module_energy_wh,
            system_energy_wh,
            annual_energy_wh,
            lifetime_energy_kwh,
            daily_savings,
            annual_savings,
            lcoe,
            roi_years,
            average_efficiency_pct,
        }
    }

    /// Rounds the headline figures into the reported result set.
    pub fn to_results(&self) -> SimulationResults {
        SimulationResults {
            total_energy: round_dp(self.system_energy_wh, 2),
            average_efficiency: round_dp(self.average_efficiency_pct, 2),
            total_savings: round_dp(self.daily_savings, 2),
            lcoe: round_dp(self.lcoe, 0),
            roi: round_dp(self.roi_years, 1),
        }
    }
}

impl SimulationResults {
    /// Aggregates daily totals into rounded results.
    pub fn from_totals(
        totals: &DailyTotals,
        inputs: &SimulationInputs,
        constants: &ModelConstants,
    ) -> Self {
        Economics::from_totals(totals, inputs, constants).to_results()
    }
}

impl fmt::Display for Economics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Economics ---")?;
        writeln!(f, "Module energy:       {:.3} Wh/day", self.module_energy_wh)?;
        writeln!(f, "Annual energy:       {:.2} kWh", self.annual_energy_wh / 1000.0)?;
        writeln!(f, "Lifetime energy:     {:.2} kWh", self.lifetime_energy_kwh)?;
        write!(f, "Annual savings:      {:.2}", self.annual_savings)
    }
}
