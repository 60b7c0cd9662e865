//! CDTH simulator entry point: CLI wiring and config-driven session construction.

use std::process;
use std::thread;

use tracing::{info, warn};

use cdth_sim::cli::{CliOptions, OutputTarget, parse_args, print_usage};
use cdth_sim::config::ScenarioConfig;
use cdth_sim::io::export::{
    DATA_FILE_NAME, export_data_csv, export_results_json, export_sweep_csv, sweep_file_name,
};
use cdth_sim::logging::init_logging;
use cdth_sim::sim::{Session, SimulationInputs};
use cdth_sim::sim::sweep::run_sweep;

/// Resolves the scenario from `--scenario`, `--preset`, and the input overrides.
fn load_scenario(cli: &CliOptions) -> Result<ScenarioConfig, String> {
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else {
        let name = cli.preset.as_deref().unwrap_or("kuta");
        ScenarioConfig::from_preset(name).map_err(|e| e.to_string())?
    };

    scenario.inputs.apply(&cli.overrides);
    if let Some(variable) = cli.sweep_variable {
        scenario.sweep.variable = variable;
    }
    if let Some(t) = cli.time_of_day {
        scenario.session.time_of_day = t;
    }
    Ok(scenario)
}

fn print_current(session: &Session) {
    let t = session.time_of_day();
    match session.current_data() {
        Some(point) => println!("[{t}] {point}"),
        None => println!("[{t}] no sample within tolerance"),
    }
}

fn main() {
    init_logging();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        print_usage();
        return;
    }

    let scenario = match load_scenario(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let mut session = scenario.session();
    let inputs = session.inputs();
    info!(
        location = %inputs.location,
        modules = inputs.module_count,
        "running {} ({})",
        inputs.location,
        inputs.location.description()
    );

    for point in session.data_points() {
        println!("{point}");
    }
    println!("\n{}", session.results());
    println!("\n{}", session.economics());
    println!();
    print_current(&session);

    if let Some(ref target) = cli.data_out {
        let path = target.resolve(DATA_FILE_NAME);
        if let Err(e) = export_data_csv(session.data_points(), &path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!("samples written to {}", path.display());
    }

    if let Some(ref path) = cli.json_out {
        if let Err(e) = export_results_json(
            session.inputs(),
            session.results(),
            session.data_points(),
            path,
        ) {
            eprintln!("error: failed to write JSON: {e}");
            process::exit(1);
        }
        info!("results written to {}", path.display());
    }

    if let Some(ref target) = cli.sweep_out {
        run_sweep_export(&scenario, session.inputs(), target);
    }

    if cli.play {
        let mut playback = scenario.playback.playback();
        info!(
            speed = playback.speed.label(),
            ticks = playback.remaining(),
            "playing time cursor"
        );
        while playback.tick().is_some() {
            session.advance_time(playback.step_hours);
            print_current(&session);
            thread::sleep(playback.speed.interval());
        }
    }
}

fn run_sweep_export(scenario: &ScenarioConfig, base: &SimulationInputs, target: &OutputTarget) {
    let variable = scenario.sweep.variable;
    let path = target.resolve(&sweep_file_name(variable));
    let points = run_sweep(base, variable, &scenario.sweep.range(), &scenario.constants);
    if points.is_empty() {
        warn!(%variable, "sweep produced no points; nothing exported");
        return;
    }

    println!("\n--- Sweep: {} ---", variable.label());
    for p in &points {
        println!(
            "{:>12} | eff={:.2} %  energy={:.2} Wh  savings={:.2}",
            p.value, p.efficiency, p.energy, p.savings
        );
    }

    if let Err(e) = export_sweep_csv(&points, &path) {
        eprintln!("error: failed to write sweep CSV: {e}");
        process::exit(1);
    }
    info!("sweep written to {}", path.display());
}
