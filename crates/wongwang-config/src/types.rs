// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `wongwang_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WongWangConfig {
    pub network: NetworkConfig,
    pub trial: TrialSettings,
    pub sweep: SweepSettings,
    pub output: OutputConfig,
    pub logging: LoggingSettings,
}

/// Biophysical parameters of the two-pool circuit
///
/// Key names follow the model's conventional symbols (`w_I`, `I0`, `JA_ext`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(rename = "N_E1")]
    pub n_e1: u32,
    #[serde(rename = "N_E2")]
    pub n_e2: u32,
    #[serde(rename = "N_I")]
    pub n_i: u32,
    pub w_plus: f64,
    pub w_minus: f64,
    #[serde(rename = "w_I")]
    pub w_i: f64,
    pub tau_s: f64,
    #[serde(rename = "tau_NMDA")]
    pub tau_nmda: f64,
    #[serde(rename = "tau_AMPA")]
    pub tau_ampa: f64,
    #[serde(rename = "tau_GABA")]
    pub tau_gaba: f64,
    #[serde(rename = "I0")]
    pub i0: f64,
    #[serde(rename = "JA_ext")]
    pub ja_ext: f64,
    pub mu0: f64,
    pub a: f64,
    pub b: f64,
    pub d: f64,
    pub rate_cap: f64,
    pub sigma: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            n_e1: 240,
            n_e2: 240,
            n_i: 60,
            w_plus: 1.7,
            w_minus: 1.0,
            w_i: 1.0,
            tau_s: 100.0,
            tau_nmda: 100.0,
            tau_ampa: 2.0,
            tau_gaba: 10.0,
            i0: 0.3255,
            ja_ext: 0.00052,
            mu0: 40.0,
            a: 270.0,
            b: 108.0,
            d: 0.154,
            rate_cap: 1000.0,
            sigma: 0.02,
        }
    }
}

/// Time grid and decision rule for every trial
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrialSettings {
    pub t_max_ms: f64,
    pub dt_ms: f64,
    pub threshold_hz: f64,
    pub min_decision_time_ms: f64,
    pub tie_epsilon_hz: f64,
}

impl Default for TrialSettings {
    fn default() -> Self {
        Self {
            t_max_ms: 2000.0,
            dt_ms: 0.5,
            threshold_hz: 60.0, // batch experiments run at 60 Hz
            min_decision_time_ms: 300.0,
            tie_epsilon_hz: 5.0,
        }
    }
}

/// Coherence sweep settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SweepSettings {
    pub coherences: Vec<f64>,
    pub n_trials: usize,
    /// Master seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            coherences: vec![0.0, 0.064, 0.128, 0.256, 0.512],
            n_trials: 200,
            seed: None,
            parallel: false,
        }
    }
}

/// Where results go
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub results_path: PathBuf,
    /// Write a `.json` metadata file next to the results
    pub write_metadata: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from("data/results.csv"),
            write_metadata: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// trace, debug, info, warn or error
    pub level: String,
    /// JSON console output instead of human-readable text
    pub json: bool,
    pub file_logging: bool,
    pub log_dir: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_logging: false,
            log_dir: PathBuf::from("./logs"),
        }
    }
}
