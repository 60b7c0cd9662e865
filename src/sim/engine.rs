//! Closed-form diurnal model of a sand-to-air thermoelectric module.
//!
//! One call evaluates integer hours 0 through 24 (25 samples) and
//! aggregates them into daily energy and economic figures. The model is
//! total: any input yields finite numbers, degenerate cases collapse to 0.

use std::f64::consts::PI;

use serde::Serialize;
use tracing::debug;

use super::constants::ModelConstants;
use super::kpi::{DailyTotals, Economics};
use super::types::{
    Location, SimulationDataPoint, SimulationInputs, SimulationResults, round_dp,
};

/// Last hour evaluated; hours `0..=LAST_HOUR` are sampled.
pub const LAST_HOUR: u32 = 24;

/// Number of samples per run.
pub const SAMPLES_PER_DAY: usize = LAST_HOUR as usize + 1;

/// Sand sinusoid amplitude and the offset of its mean below the peak (°C).
const SAND_AMPLITUDE_C: f64 = 15.0;
/// Phase anchor of the sand wave: mean temperature, rising.
const SAND_PHASE_HOUR: f64 = 14.0;

/// Mean air temperature (°C).
const AIR_BASE_C: f64 = 28.0;
/// Air sinusoid amplitude (°C).
const AIR_AMPLITUDE_C: f64 = 5.0;
/// Phase anchor of the air wave: mean temperature, rising.
const AIR_PHASE_HOUR: f64 = 15.0;

/// Extra nocturnal air cooling at windy sites (°C).
const WIND_NIGHT_COOLING_C: f64 = 2.0;
/// Night is `hour < NIGHT_ENDS_HOUR || hour > NIGHT_STARTS_HOUR`.
const NIGHT_ENDS_HOUR: u32 = 6;
const NIGHT_STARTS_HOUR: u32 = 18;

/// Neither temperature is allowed below this floor (°C).
const TEMPERATURE_FLOOR_C: f64 = 20.0;

/// Output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutput {
    /// Hourly samples, ascending by `time`.
    pub data_points: Vec<SimulationDataPoint>,
    /// Rounded daily aggregates.
    pub results: SimulationResults,
    /// Full-precision breakdown behind `results`.
    #[serde(skip)]
    pub economics: Economics,
}

/// Unrounded electrical state of one module at one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyState {
    pub temp_sand_c: f64,
    pub temp_air_c: f64,
    /// Signed `temp_sand_c - temp_air_c`.
    pub delta_t_c: f64,
    pub voltage_v: f64,
    pub current_a: f64,
    pub power_w: f64,
    pub efficiency_pct: f64,
}

impl HourlyState {
    /// Rounds to the displayed sample (mV and mW, 1 dp).
    pub fn to_data_point(&self, hour: u32) -> SimulationDataPoint {
        SimulationDataPoint {
            time: hour,
            temp_sand: round_dp(self.temp_sand_c, 1),
            temp_air: round_dp(self.temp_air_c, 1),
            voltage: round_dp(self.voltage_v * 1000.0, 1),
            power: round_dp(self.power_w * 1000.0, 1),
        }
    }
}

/// Unit diurnal wave with a 24 h period, crossing zero upward at
/// `phase_hour` and reaching its maximum six hours later.
fn diurnal_wave(hour: u32, phase_hour: f64) -> f64 {
    ((f64::from(hour) - phase_hour) * PI / 12.0).sin()
}

/// Sand temperature before clamping: swings 15 °C around
/// `sand_temp_peak - 15`, at the mean at 14:00 and at `sand_temp_peak` at 20:00.
pub fn sand_temperature(sand_temp_peak: f64, hour: u32) -> f64 {
    (sand_temp_peak - SAND_AMPLITUDE_C) + SAND_AMPLITUDE_C * diurnal_wave(hour, SAND_PHASE_HOUR)
}

/// Air temperature before clamping, including the windy-night adjustment.
pub fn air_temperature(location: Location, hour: u32) -> f64 {
    let mut temp = AIR_BASE_C + AIR_AMPLITUDE_C * diurnal_wave(hour, AIR_PHASE_HOUR);
    if location == Location::HighWind && is_night(hour) {
        temp -= WIND_NIGHT_COOLING_C;
    }
    temp
}

/// Hours outside 06:00–18:00.
pub fn is_night(hour: u32) -> bool {
    hour < NIGHT_ENDS_HOUR || hour > NIGHT_STARTS_HOUR
}

/// Evaluates the module at one hour.
pub fn hourly_state(
    inputs: &SimulationInputs,
    constants: &ModelConstants,
    hour: u32,
) -> HourlyState {
    let temp_sand_c = sand_temperature(inputs.sand_temp_peak, hour).max(TEMPERATURE_FLOOR_C);
    let temp_air_c = air_temperature(inputs.location, hour).max(TEMPERATURE_FLOOR_C);
    let delta_t_c = temp_sand_c - temp_air_c;

    // Non-polar: reverse gradients at night still deliver power.
    let voltage_v = (inputs.seebeck_coefficient * delta_t_c).abs();

    let total_resistance = constants.total_resistance_ohm();
    let current_a = if total_resistance > 0.0 {
        voltage_v / total_resistance
    } else {
        0.0
    };
    let power_w = current_a * current_a * constants.load_resistance_ohm;

    let heat_flow_w = inputs.conductivity * constants.device_area_m2 * delta_t_c.abs();
    let efficiency_pct = if delta_t_c != 0.0 && heat_flow_w > 0.0 {
        power_w / heat_flow_w * 100.0
    } else {
        0.0
    };

    HourlyState {
        temp_sand_c,
        temp_air_c,
        delta_t_c,
        voltage_v,
        current_a,
        power_w,
        efficiency_pct,
    }
}

/// Runs one day with the default constants.
///
/// # Examples
///
/// ```
/// use cdth_sim::sim::{SimulationInputs, simulate};
///
/// let out = simulate(&SimulationInputs::default());
/// assert_eq!(out.data_points.len(), 25);
/// assert_eq!(out.data_points[14].temp_sand, 55.0);
/// assert_eq!(out.data_points[20].temp_sand, 70.0);
/// ```
pub fn simulate(inputs: &SimulationInputs) -> SimulationOutput {
    simulate_with(inputs, &ModelConstants::default())
}

/// Runs one day with explicit constants.
///
/// Accumulates unrounded power and efficiency; only the emitted samples and
/// the final results are rounded.
pub fn simulate_with(inputs: &SimulationInputs, constants: &ModelConstants) -> SimulationOutput {
    let mut data_points = Vec::with_capacity(SAMPLES_PER_DAY);
    let mut totals = DailyTotals::default();

    for hour in 0..=LAST_HOUR {
        let state = hourly_state(inputs, constants, hour);
        totals.push(state.power_w * 1000.0, state.efficiency_pct);
        data_points.push(state.to_data_point(hour));
    }

    let economics = Economics::from_totals(&totals, inputs, constants);
    let results = economics.to_results();

    debug!(
        location = %inputs.location,
        sand_temp_peak = inputs.sand_temp_peak,
        module_count = inputs.module_count,
        total_energy_wh = results.total_energy,
        average_efficiency_pct = results.average_efficiency,
        "simulated diurnal cycle"
    );

    SimulationOutput {
        data_points,
        results,
        economics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> SimulationInputs {
        SimulationInputs::default()
    }

    #[test]
    fn produces_25_ascending_samples() {
        let out = simulate(&inputs());
        assert_eq!(out.data_points.len(), SAMPLES_PER_DAY);
        for (i, p) in out.data_points.iter().enumerate() {
            assert_eq!(p.time as usize, i);
        }
    }

    #[test]
    fn sand_is_at_mean_at_hour_14() {
        assert_eq!(sand_temperature(70.0, 14), 55.0);
        let out = simulate(&inputs());
        assert_eq!(out.data_points[14].temp_sand, 55.0);
    }

    #[test]
    fn sand_extremes_six_hours_either_side() {
        assert!((sand_temperature(70.0, 20) - 70.0).abs() < 1e-12);
        assert!((sand_temperature(70.0, 8) - 40.0).abs() < 1e-12);
        assert!((sand_temperature(70.0, 2) - 55.0).abs() < 1e-12);
    }

    #[test]
    fn air_wave_anchored_at_hour_15() {
        assert_eq!(air_temperature(Location::Standard, 15), 28.0);
        assert!((air_temperature(Location::Standard, 21) - 33.0).abs() < 1e-12);
        assert!((air_temperature(Location::Standard, 9) - 23.0).abs() < 1e-12);
    }

    #[test]
    fn reference_hours_match_closed_form() {
        let out = simulate(&inputs());
        let at = |h: usize| (out.data_points[h].temp_sand, out.data_points[h].temp_air);
        assert_eq!(at(2), (55.0, 29.3));
        assert_eq!(at(8), (40.0, 23.2));
        assert_eq!(at(14), (55.0, 26.7));
        assert_eq!(at(20), (70.0, 32.8));
        assert_eq!(out.data_points[20].voltage, 1858.5);
        assert_eq!(out.data_points[20].power, 431.8);
    }

    #[test]
    fn high_wind_cools_only_at_night() {
        for hour in 0..=LAST_HOUR {
            let standard = air_temperature(Location::Standard, hour);
            let windy = air_temperature(Location::HighWind, hour);
            if is_night(hour) {
                assert!((standard - windy - 2.0).abs() < 1e-12, "hour {hour}");
            } else {
                assert_eq!(standard, windy, "hour {hour}");
            }
        }
    }

    #[test]
    fn night_window_boundaries() {
        assert!(is_night(0));
        assert!(is_night(5));
        assert!(!is_night(6));
        assert!(!is_night(18));
        assert!(is_night(19));
        assert!(is_night(24));
    }

    #[test]
    fn temperatures_are_clamped_at_floor() {
        let cold = SimulationInputs {
            sand_temp_peak: 0.0,
            ..inputs()
        };
        let out = simulate(&cold);
        for p in &out.data_points {
            assert!(p.temp_sand >= 20.0);
            assert!(p.temp_air >= 20.0);
        }
    }

    #[test]
    fn zero_seebeck_yields_zero_voltage_power_and_efficiency() {
        let zero_seebeck = SimulationInputs {
            seebeck_coefficient: 0.0,
            ..inputs()
        };
        let constants = ModelConstants::default();
        for hour in 0..=LAST_HOUR {
            let state = hourly_state(&zero_seebeck, &constants, hour);
            assert_eq!(state.voltage_v, 0.0);
            assert_eq!(state.power_w, 0.0);
            assert_eq!(state.efficiency_pct, 0.0);
        }
    }

    #[test]
    fn matched_load_power() {
        // sand 70 °C against air 28 + 5 sin(5π/12) at 20:00
        let constants = ModelConstants::default();
        let state = hourly_state(&inputs(), &constants, 20);
        let expected_v = 0.05 * state.delta_t_c.abs();
        assert!((state.voltage_v - expected_v).abs() < 1e-12);
        let expected_p = (expected_v / 4.0).powi(2) * 2.0;
        assert!((state.power_w - expected_p).abs() < 1e-12);
        let expected_eta = expected_p / (1.5 * 0.04 * state.delta_t_c.abs()) * 100.0;
        assert!((state.efficiency_pct - expected_eta).abs() < 1e-12);
    }

    #[test]
    fn voltage_is_never_negative() {
        let reversed = SimulationInputs {
            seebeck_coefficient: -0.05,
            ..inputs()
        };
        let out = simulate(&reversed);
        assert!(out.data_points.iter().all(|p| p.voltage >= 0.0));
    }

    #[test]
    fn zero_conductivity_does_not_produce_nan() {
        let degenerate = SimulationInputs {
            conductivity: 0.0,
            ..inputs()
        };
        let out = simulate(&degenerate);
        assert_eq!(out.results.average_efficiency, 0.0);
        assert!(out.results.total_energy.is_finite());
    }

    #[test]
    fn zero_resistance_does_not_produce_nan() {
        let constants = ModelConstants {
            internal_resistance_ohm: 0.0,
            load_resistance_ohm: 0.0,
            ..ModelConstants::default()
        };
        let out = simulate_with(&inputs(), &constants);
        assert!(out.data_points.iter().all(|p| p.power == 0.0));
        assert_eq!(out.results.total_energy, 0.0);
    }

    #[test]
    fn zero_modules_gives_zero_lcoe() {
        let none = SimulationInputs {
            module_count: 0,
            ..inputs()
        };
        let out = simulate(&none);
        assert_eq!(out.results.total_energy, 0.0);
        assert_eq!(out.results.lcoe, 0.0);
        assert_eq!(out.results.roi, 0.0);
    }

    #[test]
    fn accumulation_uses_unrounded_power() {
        let out = simulate(&inputs());
        let rounded_sum: f64 = out.data_points.iter().map(|p| p.power).sum();
        let exact_module_wh = out.economics.module_energy_wh;
        // Rounded samples differ from the exact sum but stay within 0.05 mW each.
        assert!((rounded_sum / 1000.0 - exact_module_wh).abs() <= 25.0 * 0.05 / 1000.0);
    }

    #[test]
    fn deterministic() {
        assert_eq!(simulate(&inputs()), simulate(&inputs()));
    }
}
