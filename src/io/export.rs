//! CSV export of hourly samples and sweep points, JSON export of a full run.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::sim::sweep::{SweepPoint, SweepVariable};
use crate::sim::types::{SimulationDataPoint, SimulationInputs, SimulationResults};

/// Column header for the hourly sample export.
pub const DATA_HEADER: [&str; 5] = ["Time", "SandTemp", "AirTemp", "Voltage(mV)", "Power(mW)"];

/// Column header for the sweep export.
pub const SWEEP_HEADER: [&str; 4] = ["Value", "Efficiency (%)", "Energy (Wh)", "Savings (Rp)"];

/// Default file name for the hourly sample export.
pub const DATA_FILE_NAME: &str = "CDTH_Simulation_Full.csv";

/// Errors raised while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default file name for a sweep over `variable`.
pub fn sweep_file_name(variable: SweepVariable) -> String {
    format!("CDTH_Sweep_{}.csv", variable.camel_name())
}

/// Writes hourly samples as CSV, one row per sample after the header.
///
/// Every record, the last included, ends in `\n`. Numbers are written as
/// their shortest literal (`70`, `57.3`).
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_data_csv(points: &[SimulationDataPoint], writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(DATA_HEADER)?;
    for p in points {
        wtr.write_record(&[
            p.time.to_string(),
            p.temp_sand.to_string(),
            p.temp_air.to_string(),
            p.voltage.to_string(),
            p.power.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports hourly samples to a CSV file at `path`.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_data_csv(points: &[SimulationDataPoint], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_data_csv(points, io::BufWriter::new(file))
}

/// Writes sweep points as CSV.
///
/// An empty sweep writes nothing at all, not even the header.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_sweep_csv(points: &[SweepPoint], writer: impl Write) -> Result<(), ExportError> {
    if points.is_empty() {
        return Ok(());
    }
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SWEEP_HEADER)?;
    for p in points {
        wtr.write_record(&[
            p.value.to_string(),
            p.efficiency.to_string(),
            p.energy.to_string(),
            p.savings.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports sweep points to a CSV file at `path`. No file is created for an
/// empty sweep.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_sweep_csv(points: &[SweepPoint], path: &Path) -> Result<(), ExportError> {
    if points.is_empty() {
        return Ok(());
    }
    let file = File::create(path)?;
    write_sweep_csv(points, io::BufWriter::new(file))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport<'a> {
    inputs: &'a SimulationInputs,
    results: &'a SimulationResults,
    data_points: &'a [SimulationDataPoint],
}

/// Writes inputs, results, and samples as pretty-printed JSON.
///
/// # Errors
///
/// Returns an `ExportError` if serialization or writing fails.
pub fn write_results_json(
    inputs: &SimulationInputs,
    results: &SimulationResults,
    points: &[SimulationDataPoint],
    mut writer: impl Write,
) -> Result<(), ExportError> {
    let report = RunReport {
        inputs,
        results,
        data_points: points,
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Exports a run as JSON to `path`.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_results_json(
    inputs: &SimulationInputs,
    results: &SimulationResults,
    points: &[SimulationDataPoint],
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_results_json(inputs, results, points, io::BufWriter::new(file))
}
