// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # wongwang-observability
//!
//! Logging setup shared by the simulator crates and the command-line driver.
//!
//! Provides consistent `tracing` initialization with per-crate debug flag
//! support.
//!
//! ## Features
//! - `file-logging`: JSON log files in timestamped run folders (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Workspace crate names accepted by debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "wongwang",
    "wongwang-neural",
    "wongwang-sim",
    "wongwang-config",
    "wongwang-io",
    "wongwang-observability",
];

/// Tracing target for a crate name (`wongwang-sim` -> `wongwang_sim`)
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_target() {
        assert_eq!(crate_target("wongwang-sim"), "wongwang_sim");
        assert_eq!(crate_target("wongwang"), "wongwang");
    }
}
