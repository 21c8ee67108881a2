// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Wong-Wang Decision Circuit Model
//!
//! The reduced two-population model of perceptual decision making:
//! - **Types**: pool identities and model errors
//! - **Transfer**: the rational current-to-rate nonlinearity
//! - **Models**: validated network parameters and the network itself
//!
//! Nothing in this crate holds simulation state. A [`WongWangNetwork`] is an
//! immutable parameter set plus the stateless transfer function, so it can be
//! shared by reference across any number of concurrently running trials.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod models;
pub mod transfer;
pub mod types;

pub use models::{ModelParameters, NetworkParameters, WongWangNetwork};
pub use transfer::{TransferFunction, DEFAULT_RATE_CAP_HZ};
pub use types::{ModelError, Pool, Result};
