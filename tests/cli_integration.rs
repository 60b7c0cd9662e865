//! End-to-end tests driving the `cdth-sim` binary.

mod common;

use std::fs;
use std::process::Command;

#[derive(Debug)]
struct Results {
    total_energy_wh: f64,
    average_efficiency_pct: f64,
    daily_savings: f64,
}

fn scenario_path(name: &str) -> String {
    format!("{}/scenarios/{name}.toml", env!("CARGO_MANIFEST_DIR"))
}

fn run(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_cdth-sim"))
        .args(args)
        .output()
        .expect("cdth-sim process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

fn run_scenario(name: &str) -> Results {
    parse_results(&run(&["--scenario", &scenario_path(name)]))
}

fn parse_results(stdout: &str) -> Results {
    Results {
        total_energy_wh: parse_metric(stdout, "Total energy:", "Wh"),
        average_efficiency_pct: parse_metric(stdout, "Average efficiency:", "%"),
        daily_savings: parse_metric(stdout, "Daily savings:", ""),
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("invalid numeric value `{numeric}` in line `{line}`"))
}

#[test]
fn kuta_scenario_runs_and_reports() {
    let results = run_scenario("kuta");
    assert!(results.total_energy_wh > 0.0, "{results:?}");
    assert!(results.average_efficiency_pct > 0.0, "{results:?}");
    assert!(results.daily_savings > 0.0, "{results:?}");
}

#[test]
fn scenario_file_matches_preset() {
    let from_file = run(&["--scenario", &scenario_path("kuta")]);
    let from_preset = run(&["--preset", "kuta"]);
    assert_eq!(
        parse_metric(&from_file, "Total energy:", "Wh"),
        parse_metric(&from_preset, "Total energy:", "Wh")
    );
}

#[test]
fn windy_site_changes_energy() {
    let kuta = run_scenario("kuta");
    let tanah_lot = run_scenario("tanah_lot");
    assert_ne!(kuta.total_energy_wh, tanah_lot.total_energy_wh);
}

#[test]
fn scenario_cursor_is_reported() {
    let stdout = run(&["--scenario", &scenario_path("tanah_lot")]);
    assert!(stdout.lines().any(|l| l.starts_with("[02:00] t= 2h")), "{stdout}");

    let stdout = run(&["--preset", "kuta", "--time", "12.5"]);
    assert!(
        stdout.lines().any(|l| l == "[12:30] no sample within tolerance"),
        "{stdout}"
    );
}

#[test]
fn module_override_scales_energy() {
    let base = parse_metric(&run(&["--preset", "kuta"]), "Total energy:", "Wh");
    let doubled = parse_metric(
        &run(&["--preset", "kuta", "--modules", "4000"]),
        "Total energy:",
        "Wh",
    );
    assert!((doubled - 2.0 * base).abs() <= 0.01, "{base} vs {doubled}");
}

#[test]
fn data_export_writes_full_day() {
    let path = common::temp_path("cli-data.csv");
    let path_str = path.to_string_lossy().into_owned();
    run(&["--preset", "kuta", "--data-out", &path_str]);
    let contents = fs::read_to_string(&path).expect("csv should be written");
    let _ = fs::remove_file(&path);
    assert_eq!(contents.lines().next(), Some("Time,SandTemp,AirTemp,Voltage(mV),Power(mW)"));
    assert_eq!(contents.lines().count(), 26);
}

#[test]
fn sweep_export_from_scenario() {
    let path = common::temp_path("cli-sweep.csv");
    let path_str = path.to_string_lossy().into_owned();
    let stdout = run(&["--scenario", &scenario_path("seebeck_sweep"), "--sweep-out", &path_str]);
    assert!(stdout.contains("--- Sweep:"), "{stdout}");
    let contents = fs::read_to_string(&path).expect("sweep csv should be written");
    let _ = fs::remove_file(&path);
    assert_eq!(contents.lines().count(), 11);
}

#[test]
fn invalid_inputs_are_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_cdth-sim"))
        .args(["--preset", "kuta", "--sand-peak", "150"])
        .output()
        .expect("cdth-sim process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("inputs.sand_temp_peak"), "{stderr}");
}

#[test]
fn unknown_flag_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_cdth-sim"))
        .arg("--bogus")
        .output()
        .expect("cdth-sim process should run");
    assert!(!output.status.success());
}

#[test]
fn bare_export_flags_use_standard_file_names() {
    let dir = common::temp_path("default-names");
    fs::create_dir_all(&dir).expect("temp dir should be created");

    let output = Command::new(env!("CARGO_BIN_EXE_cdth-sim"))
        .args([
            "--scenario",
            &scenario_path("seebeck_sweep"),
            "--data-out",
            "--sweep-out",
        ])
        .current_dir(&dir)
        .output()
        .expect("cdth-sim process should run");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let data = fs::read_to_string(dir.join("CDTH_Simulation_Full.csv"));
    let sweep = fs::read_to_string(dir.join("CDTH_Sweep_seebeckCoefficient.csv"));
    let _ = fs::remove_dir_all(&dir);

    assert_eq!(data.map(|c| c.lines().count()).ok(), Some(26));
    assert_eq!(sweep.map(|c| c.lines().count()).ok(), Some(11));
}
