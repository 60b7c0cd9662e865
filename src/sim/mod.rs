/// Time-of-day cursor and playback cadence.
pub mod clock;
pub mod constants;
pub mod engine;
pub mod kpi;
/// Owned session state around the engine.
pub mod session;
/// One-variable parameter sweeps.
pub mod sweep;
pub mod types;

pub use engine::{SimulationOutput, simulate, simulate_with};
pub use session::Session;
pub use types::{InputsPatch, Location, SimulationDataPoint, SimulationInputs, SimulationResults};
