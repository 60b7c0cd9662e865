//! Coastal diurnal thermoelectric harvester (CDTH) simulator.

pub mod cli;
/// TOML scenario configuration and presets.
pub mod config;
pub mod io;
pub mod logging;
/// Simulation engine, session state, and parameter sweeps.
pub mod sim;
