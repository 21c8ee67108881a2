// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Wong-Wang Result Persistence
//!
//! - CSV tables of sweep rows, with an optional leading swept-parameter column
//! - JSON run metadata written next to the CSV
//! - Plain-text summary tables for the console
//!
//! NaN statistics (no decisions) are written as `nan` and read back as NaN.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod csv;
pub mod error;
pub mod metadata;
pub mod summary;

pub use csv::{
    read_parameter_sweep_csv, read_results_csv, write_parameter_sweep_csv, write_results_csv,
    RESULTS_HEADER,
};
pub use error::{PersistError, PersistResult};
pub use metadata::{
    metadata_path_for, read_metadata, write_metadata, RunMetadata, RunParameters, SweepMetadata,
};
pub use summary::{format_parameter_sweep_summary, format_summary};
