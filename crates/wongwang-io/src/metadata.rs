// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Run metadata stored as pretty JSON beside the results table.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wongwang_neural::NetworkParameters;

use crate::error::PersistResult;

/// Settings the run was produced with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub n_trials: usize,
    /// Decision threshold (Hz); absent when the threshold itself was swept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Integration step (ms)
    pub dt: f64,
    pub coherences: Vec<f64>,
    /// Resolved master seed, even when the run drew it from entropy
    pub seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepMetadata>,
}

/// Present only for parameter sweeps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepMetadata {
    /// Column name of the swept parameter (`threshold`, `sigma`, `w_I`, `I0`)
    pub parameter: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Local time the run finished, RFC 3339
    pub timestamp: String,
    pub runtime_seconds: f64,
    pub parameters: RunParameters,
    pub network_parameters: NetworkParameters,
}

impl RunMetadata {
    /// Stamp a finished run with the current local time
    pub fn new(
        runtime: Duration,
        parameters: RunParameters,
        network_parameters: NetworkParameters,
    ) -> Self {
        RunMetadata {
            timestamp: chrono::Local::now().to_rfc3339(),
            runtime_seconds: runtime.as_secs_f64(),
            parameters,
            network_parameters,
        }
    }
}

/// `data/results.csv` -> `data/results.json`
pub fn metadata_path_for(results_path: &Path) -> PathBuf {
    results_path.with_extension("json")
}

pub fn write_metadata(path: &Path, metadata: &RunMetadata) -> PersistResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn read_metadata(path: &Path) -> PersistResult<RunMetadata> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
