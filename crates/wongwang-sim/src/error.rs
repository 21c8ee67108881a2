// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for simulation entry points

use wongwang_neural::ModelError;

/// Errors returned before any trial is simulated
///
/// Once a trial or sweep has started nothing can fail: divergent rates are
/// capped and undecided trials are ordinary outcomes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type SimResult<T> = Result<T, SimError>;
