// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core type definitions shared by the model and the simulator.

pub mod error;
pub mod pool;

pub use error::{ModelError, Result};
pub use pool::Pool;
