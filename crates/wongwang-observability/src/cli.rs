// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug flags
//!
//! Built from the crate names given on the command line (`--debug a,b` or
//! `--debug all`) and the `WONGWANG_DEBUG` environment variable.

use std::collections::BTreeSet;
use std::env;

use crate::{crate_target, KNOWN_CRATES};

/// Environment variable holding extra crate names to debug
pub const DEBUG_ENV_VAR: &str = "WONGWANG_DEBUG";

/// Per-crate debug toggles
///
/// # Example
/// ```rust
/// use wongwang_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_crate_names(["wongwang-sim"]);
/// assert!(flags.is_enabled("wongwang-sim"));
/// assert_eq!(flags.to_filter_string("info"), "wongwang_sim=debug,info");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Build flags from plain crate names, e.g. the values of `--debug a,b`
    ///
    /// The name `all` enables every known crate.
    pub fn from_crate_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = CrateDebugFlags::default();
        for name in names {
            flags.enable(name.as_ref());
        }
        flags
    }

    /// Merge a `WONGWANG_DEBUG` style value (`all` or comma-separated names)
    pub fn merge_env_value(&mut self, value: &str) {
        for name in value.split(',') {
            self.enable(name);
        }
    }

    fn enable(&mut self, name: &str) {
        let name = name.trim();
        if name == "all" {
            self.enable_all();
        } else if !name.is_empty() {
            self.enabled_crates.insert(name.to_string());
        }
    }

    fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enabled_crates.insert(crate_name.to_string());
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Get log level for a crate
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create an `EnvFilter` directive string from the flags
    ///
    /// Format: `"wongwang_sim=debug,wongwang_io=debug,info"`, or just the base
    /// level when nothing is enabled.
    pub fn to_filter_string(&self, base_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|name| format!("{}=debug", crate_target(name)))
            .collect();
        filters.push(base_level.to_lowercase());
        filters.join(",")
    }
}

/// Debug flags for the given crate names plus whatever `WONGWANG_DEBUG` adds
pub fn parse_debug_flags<I, S>(names: I) -> CrateDebugFlags
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = CrateDebugFlags::from_crate_names(names);
    if let Ok(value) = env::var(DEBUG_ENV_VAR) {
        flags.merge_env_value(&value);
    }
    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug all                    Enable debug logging for all crates
  --debug {{crate-name}}[,...]     Enable debug logging for specific crates

Available crates:
  {}

Environment Variable:
  WONGWANG_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  WONGWANG_DEBUG=all                            Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}
