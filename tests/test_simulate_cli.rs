// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runs the `wongwang-simulate` binary in a scratch directory

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn simulate(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wongwang-simulate"))
        .current_dir(dir)
        .env_remove("WONGWANG_CONFIG_PATH")
        .env_remove("WONGWANG_DEBUG")
        .args(args)
        .output()
        .expect("failed to launch wongwang-simulate")
}

#[test]
fn test_basic_experiment_writes_csv_and_metadata() {
    let dir = tempdir().unwrap();
    let output = simulate(
        dir.path(),
        &[
            "--trials", "5", "--t-max", "600", "--coherences", "0,0.5", "--seed", "3", "--out",
            "data/results.csv",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let csv = fs::read_to_string(dir.path().join("data/results.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "coherence,p_correct,mean_rt_ms,decision_rate,rt_std");
    assert_eq!(lines.len(), 3);

    let metadata: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("data/results.json")).unwrap())
            .unwrap();
    assert_eq!(metadata["parameters"]["n_trials"], 5);
    assert_eq!(metadata["parameters"]["seed"], 3);
    assert_eq!(metadata["parameters"]["threshold"], 60.0);
    assert!(metadata["runtime_seconds"].as_f64().unwrap() >= 0.0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Quick summary"));
}

#[test]
fn test_sigma_sweep_adds_leading_column() {
    let dir = tempdir().unwrap();
    let output = simulate(
        dir.path(),
        &[
            "--trials", "3", "--t-max", "500", "--coherences", "0.256", "--seed", "1",
            "--sweep", "sigma", "--sweep-values", "0.02,0.04", "--out", "sigma_sweep.csv",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let csv = fs::read_to_string(dir.path().join("sigma_sweep.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[0].starts_with("sigma,coherence"));
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("0.02,0.256,"));
    assert!(lines[2].starts_with("0.04,0.256,"));

    let metadata: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("sigma_sweep.json")).unwrap())
            .unwrap();
    assert_eq!(metadata["parameters"]["threshold"], 60.0);
    assert_eq!(metadata["parameters"]["sweep"]["parameter"], "sigma");
}

#[test]
fn test_threshold_sweep_metadata_lists_only_swept_values() {
    let dir = tempdir().unwrap();
    let output = simulate(
        dir.path(),
        &[
            "--trials", "2", "--t-max", "500", "--coherences", "0.5", "--seed", "7", "--sweep",
            "threshold", "--sweep-values", "40,60", "--out", "threshold_sweep.csv",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let metadata: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("threshold_sweep.json")).unwrap(),
    )
    .unwrap();
    let parameters = &metadata["parameters"];
    assert!(parameters.get("threshold").is_none());
    assert_eq!(parameters["sweep"]["parameter"], "threshold");
    assert_eq!(parameters["sweep"]["values"], serde_json::json!([40.0, 60.0]));
}

#[test]
fn test_rejects_bad_arguments() {
    let dir = tempdir().unwrap();
    let output = simulate(dir.path(), &["--coherences", "0,abc"]);
    assert!(!output.status.success());

    let output = simulate(dir.path(), &["--trials", "2", "--coherences", "2.0"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("data/results.csv").exists());
}
