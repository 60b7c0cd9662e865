//! Sensitivity sweeps: rerun the engine with one input varied over a range.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::constants::ModelConstants;
use super::engine::simulate_with;
use super::types::{SimulationInputs, round_dp};

/// Upper bound on iterations of a single sweep.
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// Numeric input varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepVariable {
    #[default]
    SandTempPeak,
    SeebeckCoefficient,
    Conductivity,
    SystemCost,
    DiscountRate,
    Lifetime,
    ModuleCount,
}

impl SweepVariable {
    pub const ALL: [SweepVariable; 7] = [
        SweepVariable::SandTempPeak,
        SweepVariable::SeebeckCoefficient,
        SweepVariable::Conductivity,
        SweepVariable::SystemCost,
        SweepVariable::DiscountRate,
        SweepVariable::Lifetime,
        SweepVariable::ModuleCount,
    ];

    /// Config-file name of the variable.
    pub fn name(self) -> &'static str {
        match self {
            SweepVariable::SandTempPeak => "sand_temp_peak",
            SweepVariable::SeebeckCoefficient => "seebeck_coefficient",
            SweepVariable::Conductivity => "conductivity",
            SweepVariable::SystemCost => "system_cost",
            SweepVariable::DiscountRate => "discount_rate",
            SweepVariable::Lifetime => "lifetime",
            SweepVariable::ModuleCount => "module_count",
        }
    }

    /// camelCase name used in export file names.
    pub fn camel_name(self) -> &'static str {
        match self {
            SweepVariable::SandTempPeak => "sandTempPeak",
            SweepVariable::SeebeckCoefficient => "seebeckCoefficient",
            SweepVariable::Conductivity => "conductivity",
            SweepVariable::SystemCost => "systemCost",
            SweepVariable::DiscountRate => "discountRate",
            SweepVariable::Lifetime => "lifetime",
            SweepVariable::ModuleCount => "moduleCount",
        }
    }

    /// Axis label with unit.
    pub fn label(self) -> &'static str {
        match self {
            SweepVariable::SandTempPeak => "Sand Peak Temp (°C)",
            SweepVariable::SeebeckCoefficient => "Seebeck Coefficient (V/K)",
            SweepVariable::Conductivity => "Conductivity (W/m·K)",
            SweepVariable::SystemCost => "System Cost (Rp)",
            SweepVariable::DiscountRate => "Discount Rate (%)",
            SweepVariable::Lifetime => "Lifetime (years)",
            SweepVariable::ModuleCount => "Module Count",
        }
    }

    /// Parses either the snake_case or camelCase name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == name || v.camel_name() == name)
    }

    /// Returns a copy of `base` with this variable set to `value`.
    ///
    /// Integer inputs take the rounded value, floored at 0.
    pub fn apply(self, base: &SimulationInputs, value: f64) -> SimulationInputs {
        let mut inputs = base.clone();
        match self {
            SweepVariable::SandTempPeak => inputs.sand_temp_peak = value,
            SweepVariable::SeebeckCoefficient => inputs.seebeck_coefficient = value,
            SweepVariable::Conductivity => inputs.conductivity = value,
            SweepVariable::SystemCost => inputs.system_cost = value,
            SweepVariable::DiscountRate => inputs.discount_rate = value,
            SweepVariable::Lifetime => inputs.lifetime = to_count(value),
            SweepVariable::ModuleCount => inputs.module_count = to_count(value),
        }
        inputs
    }
}

impl fmt::Display for SweepVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn to_count(value: f64) -> u32 {
    // `as` saturates, NaN becomes 0
    value.round().max(0.0) as u32
}

/// Inclusive range of sweep values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            start: 50.0,
            end: 100.0,
            step: 5.0,
        }
    }
}

impl SweepRange {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Values `start + i * step` up to and including `end`.
    ///
    /// Empty for a non-positive or non-finite step, non-finite bounds, or
    /// `start > end`. Truncated at [`MAX_SWEEP_POINTS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cdth_sim::sim::sweep::SweepRange;
    ///
    /// assert_eq!(SweepRange::new(1.0, 2.0, 0.5).values(), vec![1.0, 1.5, 2.0]);
    /// assert!(SweepRange::new(1.0, 2.0, 0.0).values().is_empty());
    /// ```
    pub fn values(&self) -> Vec<f64> {
        let Self { start, end, step } = *self;
        if step <= 0.0 || !step.is_finite() || !start.is_finite() || !end.is_finite() {
            return Vec::new();
        }
        if start > end {
            return Vec::new();
        }

        // Absorb representation error so `end` itself is included.
        let limit = end + step * 1e-9;
        let mut values = Vec::new();
        for i in 0..MAX_SWEEP_POINTS {
            let value = start + i as f64 * step;
            if value > limit {
                return values;
            }
            values.push(value);
        }
        if start + MAX_SWEEP_POINTS as f64 * step <= limit {
            warn!(
                start,
                end,
                step,
                max = MAX_SWEEP_POINTS,
                "sweep range truncated"
            );
        }
        values
    }
}

/// One sweep sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Swept input value (2 dp).
    pub value: f64,
    /// Average efficiency (%).
    pub efficiency: f64,
    /// Daily system energy (Wh).
    pub energy: f64,
    /// Daily savings (currency).
    pub savings: f64,
}

/// Runs the engine once per value in `range` with `variable` overridden.
pub fn run_sweep(
    base: &SimulationInputs,
    variable: SweepVariable,
    range: &SweepRange,
    constants: &ModelConstants,
) -> Vec<SweepPoint> {
    let points: Vec<SweepPoint> = range
        .values()
        .into_iter()
        .map(|value| {
            let out = simulate_with(&variable.apply(base, value), constants);
            SweepPoint {
                value: round_dp(value, 2),
                efficiency: out.results.average_efficiency,
                energy: out.results.total_energy,
                savings: out.results.total_savings,
            }
        })
        .collect();
    debug!(%variable, points = points.len(), "sweep complete");
    points
}
