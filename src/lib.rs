// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # wongwang - Two-Population Decision Circuit Simulator
//!
//! A reduced mean-field model of perceptual decision making: two excitatory
//! pools compete through shared inhibition, each integrates evidence for one
//! choice, and the first pool whose rate crosses a threshold wins the trial.
//! Sweeping stimulus coherence yields psychometric (accuracy) and
//! chronometric (reaction time) curves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wongwang::prelude::*;
//!
//! let network = WongWangNetwork::default();
//! let outcome = run_trial(&network, 0.256, &TrialConfig::default(), 42)?;
//! println!("{:?}", outcome);
//!
//! let result = sweep_psychometric(
//!     &network,
//!     &SweepConfig {
//!         coherences: vec![0.0, 0.128, 0.256],
//!         n_trials: 50,
//!         seed: Some(42),
//!         ..Default::default()
//!     },
//! )?;
//! print!("{}", format_summary(&result.rows));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Model: wongwang-neural                                 │
//! │  (parameters, transfer function, input currents)        │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Simulation: wongwang-sim                               │
//! │  (trial integrator, coherence + parameter sweeps)       │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  I/O: wongwang-io                                       │
//! │  (CSV tables, JSON run metadata, summaries)             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! `wongwang-config` and `wongwang-observability` cut across all layers.
//!
//! ## License
//!
//! Apache-2.0

pub mod setup;

// Re-export model + simulation
pub use wongwang_neural as neural;
pub use wongwang_sim as sim;

// Re-export infrastructure
pub use wongwang_config as config;
pub use wongwang_io as io;
pub use wongwang_observability as observability;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::neural::{NetworkParameters, Pool, WongWangNetwork};
    pub use crate::setup::{logging_config, network_from_config, sweep_config, trial_config};
    pub use crate::sim::{
        run_parameter_sweep, run_trial, run_trial_traced, sweep_psychometric, DecisionRule,
        SweepConfig, SweepResult, SweepRow, SweptParameter, TrialConfig, TrialOutcome,
    };
    pub use crate::io::{format_summary, write_results_csv};
}
