// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Network Models
//!
//! A model is a parameter set that validates itself plus the stateless
//! functions the simulator needs from it. Only the reduced Wong-Wang circuit
//! exists today.

pub mod traits;
pub mod wong_wang;

pub use traits::ModelParameters;
pub use wong_wang::{NetworkParameters, WongWangNetwork};
