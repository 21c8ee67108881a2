// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Traits shared by model parameter sets.

use crate::types::Result;

/// A parameter set that can check its own structural validity
pub trait ModelParameters {
    /// Reject non-finite or structurally invalid values
    fn validate(&self) -> Result<()>;

    /// Number of scalar parameters in the set
    fn parameter_count() -> usize;

    /// `(name, value)` pairs in a stable order, for logging and metadata
    fn named_values(&self) -> Vec<(&'static str, f64)>;
}
