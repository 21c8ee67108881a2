// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Turning a loaded [`WongWangConfig`] into simulator inputs.

use std::path::PathBuf;

use wongwang_config::{LoggingSettings, NetworkConfig, TrialSettings, WongWangConfig};
use wongwang_neural::{NetworkParameters, WongWangNetwork};
use wongwang_observability::{LogFormat, LoggingConfig};
use wongwang_sim::{DecisionRule, SimResult, SweepConfig, TrialConfig};

/// Build a validated network from the `[network]` section
pub fn network_from_config(config: &NetworkConfig) -> SimResult<WongWangNetwork> {
    let params = NetworkParameters {
        n_e1: config.n_e1,
        n_e2: config.n_e2,
        n_i: config.n_i,
        w_plus: config.w_plus,
        w_minus: config.w_minus,
        w_i: config.w_i,
        tau_s: config.tau_s,
        tau_nmda: config.tau_nmda,
        tau_ampa: config.tau_ampa,
        tau_gaba: config.tau_gaba,
        i0: config.i0,
        ja_ext: config.ja_ext,
        mu0: config.mu0,
        a: config.a,
        b: config.b,
        d: config.d,
        rate_cap: config.rate_cap,
        sigma: config.sigma,
    };
    Ok(WongWangNetwork::new(params)?)
}

pub fn trial_config(settings: &TrialSettings) -> TrialConfig {
    TrialConfig {
        t_max_ms: settings.t_max_ms,
        dt_ms: settings.dt_ms,
        rule: DecisionRule {
            threshold_hz: settings.threshold_hz,
            min_decision_time_ms: settings.min_decision_time_ms,
            tie_epsilon_hz: settings.tie_epsilon_hz,
        },
    }
}

/// Sweep settings plus the trial section; validated when the sweep runs
pub fn sweep_config(config: &WongWangConfig) -> SweepConfig {
    SweepConfig {
        coherences: config.sweep.coherences.clone(),
        n_trials: config.sweep.n_trials,
        trial: trial_config(&config.trial),
        seed: config.sweep.seed,
        parallel: config.sweep.parallel,
    }
}

pub fn logging_config(settings: &LoggingSettings) -> LoggingConfig {
    LoggingConfig {
        level: settings.level.clone(),
        format: if settings.json {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        file_path: settings
            .file_logging
            .then(|| PathBuf::from(&settings.log_dir)),
        ..LoggingConfig::default()
    }
}
