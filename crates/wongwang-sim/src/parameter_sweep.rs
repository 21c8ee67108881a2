// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Sweeps over one model or decision parameter.
//!
//! Each value gets a full psychometric sweep. Value `k` runs under master seed
//! `derive_stream_seed(sweep_seed, k)`, so the whole parameter sweep is
//! reproducible from a single seed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;
use wongwang_neural::WongWangNetwork;

use crate::error::{SimError, SimResult};
use crate::seeding::{derive_stream_seed, resolve_master_seed};
use crate::stats::SweepRow;
use crate::sweep::{sweep_psychometric, SweepConfig};

/// Parameter varied across a parameter sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweptParameter {
    /// Decision threshold (Hz)
    Threshold,
    /// Noise intensity
    Sigma,
    /// Global inhibition strength `w_I`
    InhibitionWeight,
    /// Baseline current `I0`
    BaselineCurrent,
}

impl SweptParameter {
    /// Header of the leading column in sweep output
    pub fn column_name(self) -> &'static str {
        match self {
            SweptParameter::Threshold => "threshold",
            SweptParameter::Sigma => "sigma",
            SweptParameter::InhibitionWeight => "w_I",
            SweptParameter::BaselineCurrent => "I0",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Self> {
        match name {
            "threshold" => Some(SweptParameter::Threshold),
            "sigma" => Some(SweptParameter::Sigma),
            "w_I" => Some(SweptParameter::InhibitionWeight),
            "I0" => Some(SweptParameter::BaselineCurrent),
            _ => None,
        }
    }

    /// Values explored when the caller does not provide any
    pub fn default_values(self) -> Vec<f64> {
        match self {
            SweptParameter::Threshold => vec![20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0],
            SweptParameter::Sigma => vec![0.005, 0.01, 0.02, 0.04, 0.08],
            SweptParameter::InhibitionWeight => vec![0.2, 0.5, 1.0],
            SweptParameter::BaselineCurrent => vec![0.25, 0.325, 0.4],
        }
    }

    /// Network and sweep settings for one swept value
    fn apply(
        self,
        network: &WongWangNetwork,
        config: &SweepConfig,
        value: f64,
    ) -> SimResult<(WongWangNetwork, SweepConfig)> {
        let mut config = config.clone();
        let network = match self {
            SweptParameter::Threshold => {
                config.trial.rule.threshold_hz = value;
                network.clone()
            }
            SweptParameter::Sigma => network.with_params(|p| p.sigma = value)?,
            SweptParameter::InhibitionWeight => network.with_params(|p| p.w_i = value)?,
            SweptParameter::BaselineCurrent => network.with_params(|p| p.i0 = value)?,
        };
        Ok((network, config))
    }
}

impl fmt::Display for SweptParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for SweptParameter {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "threshold" | "thresh" => Ok(SweptParameter::Threshold),
            "sigma" | "noise" => Ok(SweptParameter::Sigma),
            "w_i" | "inhibition" => Ok(SweptParameter::InhibitionWeight),
            "i0" | "background" => Ok(SweptParameter::BaselineCurrent),
            other => Err(SimError::InvalidConfig(format!(
                "unknown swept parameter '{}' (expected threshold, sigma, w-i or i0)",
                other
            ))),
        }
    }
}

/// One psychometric row tagged with the swept value that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSweepRow {
    pub value: f64,
    pub row: SweepRow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSweepResult {
    pub parameter: SweptParameter,
    /// Grouped by swept value, then by coherence in input order
    pub rows: Vec<ParameterSweepRow>,
    pub master_seed: u64,
}

/// Run one psychometric sweep per value of `parameter`
pub fn run_parameter_sweep(
    network: &WongWangNetwork,
    parameter: SweptParameter,
    values: &[f64],
    config: &SweepConfig,
) -> SimResult<ParameterSweepResult> {
    if values.is_empty() {
        return Err(SimError::InvalidConfig(format!(
            "no values given for {} sweep",
            parameter
        )));
    }
    config.validate()?;
    let master_seed = resolve_master_seed(config.seed);

    let mut rows = Vec::with_capacity(values.len() * config.coherences.len());
    for (index, &value) in values.iter().enumerate() {
        info!(parameter = parameter.column_name(), value, "Running parameter sweep value");
        let (swept_network, mut swept_config) = parameter.apply(network, config, value)?;
        swept_config.seed = Some(derive_stream_seed(master_seed, index as u64));
        let result = sweep_psychometric(&swept_network, &swept_config)?;
        rows.extend(
            result
                .rows
                .into_iter()
                .map(|row| ParameterSweepRow { value, row }),
        );
    }

    Ok(ParameterSweepResult {
        parameter,
        rows,
        master_seed,
    })
}
