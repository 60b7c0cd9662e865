//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use cdth_sim::sim::types::{Location, SimulationInputs};

/// Reference scenario: Kuta, 70 °C peak, 0.05 V/K, 2000 modules over 10 years.
pub fn reference_inputs() -> SimulationInputs {
    SimulationInputs {
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

/// Reference scenario at the windy site.
pub fn windy_inputs() -> SimulationInputs {
    SimulationInputs {
        location: Location::HighWind,
        ..reference_inputs()
    }
}

/// Hours treated as night by the windy-site adjustment.
pub fn night_hours() -> impl Iterator<Item = u32> {
    (0..=5).chain(19..=24)
}

/// Unique scratch path under the system temp directory.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("cdth-sim-{}-{name}", std::process::id()))
}
