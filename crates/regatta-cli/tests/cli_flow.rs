//! End-to-end tests for the `regatta` binary.
//!
//! Tests the full pipeline: time entry -> race file -> standings and
//! submission body, with configuration from a file and the environment.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn regatta_binary() -> String {
    env!("CARGO_BIN_EXE_regatta").to_string()
}

/// Runs the binary with an isolated home so no user config is picked up.
fn run_regatta(home: &Path, args: &[&str]) -> Output {
    Command::new(regatta_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run regatta")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "regatta should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

const HEAT_JSON: &str = r#"{
    "order": 7,
    "phase": "heat",
    "category": {"abbreviation": "JW", "gender": "women"},
    "boatClass": {"code": "1X", "weightClass": "open"},
    "lanes": [
        {"lane": 1, "time": "08:12.50", "athlete": "Maric"},
        {"lane": 2, "time": "08:12.50", "athlete": "Tomic"},
        {"lane": 3, "status": "dns", "time": "07:59.00", "athlete": "Lovric"},
        {"lane": 4, "time": "08:01.3", "athlete": "Pavic"}
    ]
}"#;

/// Test the time subcommands agree with each other.
#[test]
fn test_time_entry_flow() {
    let temp = TempDir::new().unwrap();

    let corrected = stdout_of(&run_regatta(temp.path(), &["time", "auto", "22360"]));
    assert_eq!(corrected, "02:23.60\n");

    let ms = stdout_of(&run_regatta(temp.path(), &["time", "parse", corrected.trim()]));
    assert_eq!(ms, "143600\n");

    let display = stdout_of(&run_regatta(temp.path(), &["time", "format", ms.trim()]));
    assert_eq!(display, "2:23.60\n");

    let invalid = stdout_of(&run_regatta(temp.path(), &["time", "parse", "1:61.00"]));
    assert_eq!(invalid, "-\n");
}

/// Test race codes from the command line.
#[test]
fn test_code_command() {
    let temp = TempDir::new().unwrap();

    let output = run_regatta(
        temp.path(),
        &["code", "--abbreviation", "SW", "--gender", "women", "--boat", "LW1X"],
    );
    assert_eq!(stdout_of(&output), "LW1X\n");

    let output = run_regatta(temp.path(), &["code", "--abbreviation", "SM", "--boat", "1X"]);
    assert_eq!(stdout_of(&output), "M1X\n");
}

/// Test ties and non-finishers in the standings table.
#[test]
fn test_results_table_resolves_ties_by_lane() {
    let temp = TempDir::new().unwrap();
    let race = temp.path().join("heat.json");
    std::fs::write(&race, HEAT_JSON).unwrap();

    let output = stdout_of(&run_regatta(temp.path(), &["results", race.to_str().unwrap()]));
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "Race 7 JW1X (heat)");
    assert!(lines[2].starts_with("1    4     Pavic"), "got {:?}", lines[2]);
    assert!(lines[3].starts_with("2    1     Maric"), "got {:?}", lines[3]);
    assert!(lines[4].starts_with("3    2     Tomic"), "got {:?}", lines[4]);
    assert!(lines[5].starts_with("-    3     Lovric"), "got {:?}", lines[5]);
    assert!(lines[5].ends_with("DNS"));
}

/// Test the submission body keeps the lane result invariant.
#[test]
fn test_results_submission() {
    let temp = TempDir::new().unwrap();
    let race = temp.path().join("heat.json");
    std::fs::write(&race, HEAT_JSON).unwrap();

    let output = stdout_of(&run_regatta(
        temp.path(),
        &["results", race.to_str().unwrap(), "--submission"],
    ));
    let body: serde_json::Value = serde_json::from_str(&output).unwrap();

    for lane in body.as_array().unwrap() {
        let result = &lane["result"];
        let ranked = !result["finishPosition"].is_null();
        let timed = !result["elapsedMs"].is_null();
        let ok = result["status"] == "ok";
        assert_eq!(ranked, ok && timed, "invariant broken for {lane}");
    }
    assert!(body[2]["result"]["elapsedMs"].is_null());
}

/// Test configuration from file and environment.
#[test]
fn test_points_scale_from_config_and_env() {
    let temp = TempDir::new().unwrap();
    let race = temp.path().join("heat.json");
    std::fs::write(&race, HEAT_JSON).unwrap();
    let config = temp.path().join("regatta.toml");
    std::fs::write(&config, "points_scale = [5, 3, 1]\n").unwrap();

    let output = stdout_of(&run_regatta(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "results",
            race.to_str().unwrap(),
            "--json",
        ],
    ));
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["lanes"][3]["points"], 5);
    assert_eq!(report["lanes"][0]["points"], 3);
    assert_eq!(report["lanes"][1]["points"], 1);

    let output = Command::new(regatta_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("REGATTA_RACE_CODE__DEFAULT_BOAT_CODE", "8+")
        .args(["code", "--abbreviation", "SM"])
        .output()
        .unwrap();
    assert_eq!(stdout_of(&output), "M8+\n");
}

/// Test a malformed race file fails with context.
#[test]
fn test_results_rejects_bad_file() {
    let temp = TempDir::new().unwrap();
    let race = temp.path().join("broken.json");
    std::fs::write(&race, "{ not json").unwrap();

    let output = run_regatta(temp.path(), &["results", race.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to decode race file"), "stderr: {stderr}");
}
