/// CSV and JSON export of simulation and sweep results.
pub mod export;

pub use export::ExportError;
