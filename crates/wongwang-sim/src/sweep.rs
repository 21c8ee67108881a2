// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Psychometric / Chronometric Sweep
//!
//! For every coherence, run `n_trials` independent trials and reduce them to
//! a [`SweepRow`]. Rows come back in the order the coherences were given.
//!
//! Trial `j` of coherence `i` is seeded with
//! `derive_trial_seed(master_seed, i, j)`. Outcomes of a bucket are collected
//! in trial order before reduction, so `parallel = true` (rayon) and the
//! serial path produce the same rows bit for bit.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};
use wongwang_neural::WongWangNetwork;

use crate::error::{SimError, SimResult};
use crate::seeding::{derive_trial_seed, resolve_master_seed};
use crate::stats::{summarize_outcomes, SweepRow};
use crate::trial::{validate_coherence, TrialConfig, TrialIntegrator, TrialOutcome};

/// Coherence levels swept by default
pub const DEFAULT_COHERENCES: [f64; 5] = [0.0, 0.064, 0.128, 0.256, 0.512];

/// Everything a sweep needs besides the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub coherences: Vec<f64>,
    pub n_trials: usize,
    pub trial: TrialConfig,
    /// Master seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Evaluate trials on the rayon pool
    pub parallel: bool,
}

impl SweepConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.coherences.is_empty() {
            return Err(SimError::InvalidConfig(
                "coherence sequence must not be empty".to_string(),
            ));
        }
        if self.n_trials == 0 {
            return Err(SimError::InvalidConfig(
                "n_trials must be at least 1".to_string(),
            ));
        }
        for &coherence in &self.coherences {
            validate_coherence(coherence)?;
        }
        self.trial.validate()
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            coherences: DEFAULT_COHERENCES.to_vec(),
            n_trials: 200,
            trial: TrialConfig::sweep_default(),
            seed: Some(0),
            parallel: false,
        }
    }
}

/// Rows of a completed sweep plus the seed that reproduces them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub rows: Vec<SweepRow>,
    pub master_seed: u64,
    pub trials_run: usize,
}

/// Run the psychometric sweep
pub fn sweep_psychometric(
    network: &WongWangNetwork,
    config: &SweepConfig,
) -> SimResult<SweepResult> {
    config.validate()?;
    let master_seed = resolve_master_seed(config.seed);
    if config.seed.is_none() {
        info!(master_seed, "No seed given, drew master seed from OS entropy");
    }

    info!(
        coherences = config.coherences.len(),
        n_trials = config.n_trials,
        threshold_hz = config.trial.rule.threshold_hz,
        dt_ms = config.trial.dt_ms,
        parallel = config.parallel,
        master_seed,
        "Starting psychometric sweep"
    );
    let started = Instant::now();

    let rows: Vec<SweepRow> = config
        .coherences
        .iter()
        .enumerate()
        .map(|(bucket, &coherence)| {
            let outcomes = run_bucket(network, config, master_seed, bucket as u64, coherence);
            let row = summarize_outcomes(coherence, &outcomes);
            debug!(
                coherence,
                p_correct = row.p_correct,
                mean_rt_ms = row.mean_rt_ms,
                decision_rate = row.decision_rate,
                rt_std = row.rt_std,
                "Coherence bucket complete"
            );
            row
        })
        .collect();

    let trials_run = config.coherences.len() * config.n_trials;
    info!(
        trials_run,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Psychometric sweep complete"
    );

    Ok(SweepResult {
        rows,
        master_seed,
        trials_run,
    })
}

fn run_bucket(
    network: &WongWangNetwork,
    config: &SweepConfig,
    master_seed: u64,
    bucket: u64,
    coherence: f64,
) -> Vec<TrialOutcome> {
    let simulate = |trial_index: usize| {
        let seed = derive_trial_seed(master_seed, bucket, trial_index as u64);
        let outcome =
            TrialIntegrator::new_unchecked(network, coherence, config.trial, seed).run_to_outcome();
        trace!(coherence, trial_index, ?outcome, "Trial finished");
        outcome
    };

    if config.parallel {
        (0..config.n_trials).into_par_iter().map(simulate).collect()
    } else {
        (0..config.n_trials).map(simulate).collect()
    }
}
