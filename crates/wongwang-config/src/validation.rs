// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that configuration values are finite and inside the ranges the
//! simulator accepts. All problems are collected before reporting.

use crate::{ConfigError, ConfigResult, WongWangConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate the complete configuration
///
/// Checks for:
/// - Finite network parameters with positive time constants
/// - A usable time grid and decision rule
/// - Non-empty coherence list inside [-1, 1]
/// - A known log level
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &WongWangConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Same checks as [`validate_config`], returned as a list
pub fn collect_errors(config: &WongWangConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_network(config, &mut errors);
    validate_trial(config, &mut errors);
    validate_sweep(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigValidationError {
    ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn validate_network(config: &WongWangConfig, errors: &mut Vec<ConfigValidationError>) {
    let n = &config.network;
    let values = [
        ("network.w_plus", n.w_plus),
        ("network.w_minus", n.w_minus),
        ("network.w_I", n.w_i),
        ("network.tau_s", n.tau_s),
        ("network.tau_NMDA", n.tau_nmda),
        ("network.tau_AMPA", n.tau_ampa),
        ("network.tau_GABA", n.tau_gaba),
        ("network.I0", n.i0),
        ("network.JA_ext", n.ja_ext),
        ("network.mu0", n.mu0),
        ("network.a", n.a),
        ("network.b", n.b),
        ("network.d", n.d),
        ("network.rate_cap", n.rate_cap),
        ("network.sigma", n.sigma),
    ];
    for (field, value) in values {
        if !value.is_finite() {
            errors.push(invalid(field, format!("must be finite, got {}", value)));
        }
    }

    if n.tau_s.is_finite() && n.tau_s <= 0.0 {
        errors.push(invalid("network.tau_s", "must be positive"));
    }
    if n.sigma.is_finite() && n.sigma < 0.0 {
        errors.push(invalid("network.sigma", "must be non-negative"));
    }
    if n.rate_cap.is_finite() && n.rate_cap <= 0.0 {
        errors.push(invalid("network.rate_cap", "must be positive"));
    }
}

fn validate_trial(config: &WongWangConfig, errors: &mut Vec<ConfigValidationError>) {
    let t = &config.trial;

    if !(t.dt_ms.is_finite() && t.dt_ms > 0.0) {
        errors.push(invalid("trial.dt_ms", format!("must be positive, got {}", t.dt_ms)));
    }
    if !(t.t_max_ms.is_finite() && t.t_max_ms > 0.0) {
        errors.push(invalid("trial.t_max_ms", format!("must be positive, got {}", t.t_max_ms)));
    }
    if !t.threshold_hz.is_finite() {
        errors.push(invalid("trial.threshold_hz", "must be finite"));
    }
    if !(t.min_decision_time_ms.is_finite() && t.min_decision_time_ms >= 0.0) {
        errors.push(invalid("trial.min_decision_time_ms", "must be non-negative"));
    }
    if !(t.tie_epsilon_hz.is_finite() && t.tie_epsilon_hz >= 0.0) {
        errors.push(invalid("trial.tie_epsilon_hz", "must be non-negative"));
    }
}

fn validate_sweep(config: &WongWangConfig, errors: &mut Vec<ConfigValidationError>) {
    let s = &config.sweep;

    if s.coherences.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "sweep.coherences".to_string(),
        });
    }
    for c in &s.coherences {
        if !(c.is_finite() && (-1.0..=1.0).contains(c)) {
            errors.push(invalid("sweep.coherences", format!("{} is outside [-1, 1]", c)));
        }
    }
    if s.n_trials == 0 {
        errors.push(invalid("sweep.n_trials", "must be at least 1"));
    }
}

fn validate_logging(config: &WongWangConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(invalid(
            "logging.level",
            format!("'{}' is not one of {}", config.logging.level, LOG_LEVELS.join(", ")),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WongWangConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_time_grid() {
        let mut config = WongWangConfig::default();
        config.trial.dt_ms = 0.0;
        config.trial.t_max_ms = f64::NAN;

        let errors = collect_errors(&config);
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ConfigValidationError::InvalidValue { field, .. } if field == "trial.dt_ms"));
    }

    #[test]
    fn test_coherence_out_of_range() {
        let mut config = WongWangConfig::default();
        config.sweep.coherences = vec![0.0, 1.5, -2.0];
        let errors = collect_errors(&config);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_empty_coherences_is_missing() {
        let mut config = WongWangConfig::default();
        config.sweep.coherences.clear();
        assert_eq!(
            collect_errors(&config),
            vec![ConfigValidationError::MissingRequired {
                field: "sweep.coherences".to_string()
            }]
        );
    }

    #[test]
    fn test_all_errors_are_reported() {
        let mut config = WongWangConfig::default();
        config.network.sigma = -0.1;
        config.network.tau_s = 0.0;
        config.sweep.n_trials = 0;
        config.logging.level = "loud".to_string();

        match validate_config(&config) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("network.sigma"));
                assert!(msg.contains("network.tau_s"));
                assert!(msg.contains("sweep.n_trials"));
                assert!(msg.contains("logging.level"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = WongWangConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
