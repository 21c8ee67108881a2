// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Wong-Wang Trial Simulator & Sweep Engine
//!
//! - **Trial**: Euler-Maruyama integration of the two gating variables with a
//!   race-to-threshold decision rule ([`run_trial`], [`TrialIntegrator`])
//! - **Sweep**: Monte Carlo psychometric/chronometric sweep across coherence
//!   levels ([`sweep_psychometric`])
//! - **Parameter sweep**: one psychometric sweep per value of a swept model or
//!   decision parameter ([`run_parameter_sweep`])
//! - **Seeding**: counter-based derivation of per-trial seeds from one master
//!   seed, so serial and rayon-parallel sweeps agree bit for bit
//!
//! ## Example
//!
//! ```rust,no_run
//! use wongwang_neural::WongWangNetwork;
//! use wongwang_sim::{sweep_psychometric, SweepConfig};
//!
//! let network = WongWangNetwork::default();
//! let config = SweepConfig {
//!     coherences: vec![0.0, 0.128, 0.256],
//!     n_trials: 50,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let result = sweep_psychometric(&network, &config).unwrap();
//! for row in &result.rows {
//!     println!("{:.3} {:.3} {:.1}", row.coherence, row.p_correct, row.mean_rt_ms);
//! }
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod parameter_sweep;
pub mod seeding;
pub mod stats;
pub mod sweep;
pub mod trial;

pub use error::{SimError, SimResult};
pub use parameter_sweep::{
    run_parameter_sweep, ParameterSweepResult, ParameterSweepRow, SweptParameter,
};
pub use seeding::{derive_stream_seed, derive_trial_seed, resolve_master_seed};
pub use stats::{summarize_outcomes, SweepRow};
pub use sweep::{sweep_psychometric, SweepConfig, SweepResult};
pub use trial::{
    run_trial, run_trial_traced, DecisionRule, GatingState, StepSample, TrialConfig,
    TrialIntegrator, TrialOutcome, TrialTrace,
};

pub use wongwang_neural::Pool;
