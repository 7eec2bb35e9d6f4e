// View Simulator - Command Line Tests
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::{Command, Output};

fn run(name: &str, args: &[&str]) -> Output {
    let config_home: PathBuf = std::env::temp_dir()
        .join(format!("view-simulator-cli-{}-{}", std::process::id(), name));
    std::fs::create_dir_all(&config_home).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_view-simulator"))
        .args(args)
        .env("XDG_CONFIG_HOME", &config_home)
        .env("HOME", &config_home)
        .env_remove("VIEW_SIM_TARGET")
        .env_remove("VIEW_SIM_RATE")
        .output()
        .unwrap();
    let _ = std::fs::remove_dir_all(&config_home);
    output
}

#[test]
fn test_json_output_is_parseable() {
    let output = run("json", &["--target", "2", "--rate", "6000", "--seed", "1", "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["state"]["progress"], 2);
    assert_eq!(snapshot["state"]["running"], false);
    assert_eq!(snapshot["state"]["phase"], "Completed");
    assert_eq!(snapshot["history"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["stats"]["total"], 2);
}

#[test]
fn test_report_includes_every_view_and_completion() {
    let output = run("report", &["--target", "5", "--rate", "6000", "--seed", "3"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    for n in 1..=5 {
        assert!(stdout.contains(&format!("[{}/5]", n)), "missing view {}: {}", n, stdout);
    }
    assert!(stdout.contains("Simulation Complete!: Successfully simulated 5 views"));
    assert!(stdout.contains("Progress: 5 / 5 (100%)"));
    assert!(!stdout.contains("INFO"));
}

#[test]
fn test_invalid_rate_is_rejected() {
    let output = run("invalid", &["--target", "5", "--rate", "0"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
