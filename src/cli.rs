//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::sim::sweep::SweepVariable;
use crate::sim::types::{InputsPatch, Location};

/// Destination of an export flag given with or without a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Flag given bare; write to the export's standard file name.
    DefaultName,
    Path(PathBuf),
}

impl OutputTarget {
    /// Path to write, falling back to `default_name` in the working directory.
    pub fn resolve(&self, default_name: &str) -> PathBuf {
        match self {
            OutputTarget::DefaultName => PathBuf::from(default_name),
            OutputTarget::Path(path) => path.clone(),
        }
    }
}

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    /// Input overrides applied on top of the scenario.
    pub overrides: InputsPatch,
    /// Cursor position for the current-sample readout.
    pub time_of_day: Option<f64>,
    pub data_out: Option<OutputTarget>,
    pub json_out: Option<PathBuf>,
    pub sweep_out: Option<OutputTarget>,
    pub sweep_variable: Option<SweepVariable>,
    /// Animate the cursor with the configured playback.
    pub play: bool,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--location" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --location (expected kuta or tanah_lot)")?;
                let location = Location::parse(name)
                    .ok_or_else(|| format!("invalid value for --location: \"{name}\""))?;
                opts.overrides.location = Some(location);
            }
            "--sand-peak" => {
                i += 1;
                opts.overrides.sand_temp_peak = Some(parse_number(args, i, "--sand-peak")?);
            }
            "--seebeck" => {
                i += 1;
                opts.overrides.seebeck_coefficient = Some(parse_number(args, i, "--seebeck")?);
            }
            "--system-cost" => {
                i += 1;
                opts.overrides.system_cost = Some(parse_number(args, i, "--system-cost")?);
            }
            "--modules" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --modules (expected an unsigned integer)")?;
                let n = raw
                    .parse::<u32>()
                    .map_err(|_| format!("--modules value \"{raw}\" is not a valid u32"))?;
                opts.overrides.module_count = Some(n);
            }
            "--time" => {
                i += 1;
                opts.time_of_day = Some(parse_number(args, i, "--time")?);
            }
            "--data-out" => {
                opts.data_out = Some(output_target(args, &mut i));
            }
            "--json-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --json-out (expected a file path)")?;
                opts.json_out = Some(PathBuf::from(path));
            }
            "--sweep-out" => {
                opts.sweep_out = Some(output_target(args, &mut i));
            }
            "--sweep-variable" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --sweep-variable")?;
                let variable = SweepVariable::parse(name)
                    .ok_or_else(|| format!("invalid value for --sweep-variable: \"{name}\""))?;
                opts.sweep_variable = Some(variable);
            }
            "--play" => opts.play = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.scenario.is_none() && opts.preset.is_none() {
        opts.preset = Some("kuta".to_string());
    }

    Ok(opts)
}

/// Consumes the optional path after an export flag at `*i`.
fn output_target(args: &[String], i: &mut usize) -> OutputTarget {
    match args.get(*i + 1) {
        Some(next) if !next.starts_with('-') => {
            *i += 1;
            OutputTarget::Path(PathBuf::from(next))
        }
        _ => OutputTarget::DefaultName,
    }
}

fn parse_number(args: &[String], index: usize, flag: &str) -> Result<f64, String> {
    let raw = args.next_or_err(index, &format!("missing value for {flag} (expected a number)"))?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("{flag} value \"{raw}\" is not a number"))?;
    if !value.is_finite() {
        return Err(format!("{flag} value \"{raw}\" must be finite"));
    }
    Ok(value)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("cdth-sim - Coastal diurnal thermoelectric harvester simulator");
    eprintln!();
    eprintln!("Usage: cdth-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>          Load scenario from TOML config file");
    eprintln!("  --preset <name>            Use a built-in preset (kuta, tanah_lot)");
    eprintln!("  --location <name>          Override location (kuta, tanah_lot)");
    eprintln!("  --sand-peak <°C>           Override peak sand temperature");
    eprintln!("  --seebeck <V/K>            Override Seebeck coefficient");
    eprintln!("  --system-cost <amount>     Override system cost");
    eprintln!("  --modules <n>              Override module count");
    eprintln!("  --time <hours>             Time of day for the current-sample readout");
    eprintln!("  --data-out [path]          Export hourly samples to CSV");
    eprintln!("                             (default CDTH_Simulation_Full.csv)");
    eprintln!("  --json-out <path>          Export inputs, results, and samples to JSON");
    eprintln!("  --sweep-out [path]         Run the configured sweep and export it to CSV");
    eprintln!("                             (default CDTH_Sweep_<variable>.csv)");
    eprintln!("  --sweep-variable <name>    Override the swept input");
    eprintln!("  --play                     Animate the time cursor");
    eprintln!("  --help                     Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the kuta preset is used.");
}
