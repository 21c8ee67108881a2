// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, WongWangConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no path is given
pub const CONFIG_FILE_NAME: &str = "wongwang_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `WONGWANG_CONFIG_PATH` environment variable
/// 2. Current working directory: `./wongwang_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("WONGWANG_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by WONGWANG_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet WONGWANG_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<WongWangConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let config: WongWangConfig = toml::from_str(&content)?;
    Ok(with_overrides(config, cli_args))
}

/// Like [`load_config`], but start from defaults when no file can be found
///
/// An explicit `config_path` that does not exist is still an error.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<WongWangConfig> {
    if config_path.is_some() {
        return load_config(config_path, cli_args);
    }
    match find_config_file() {
        Ok(path) => load_config(Some(&path), cli_args),
        Err(ConfigError::FileNotFound(_)) => Ok(with_overrides(WongWangConfig::default(), cli_args)),
        Err(e) => Err(e),
    }
}

fn with_overrides(
    mut config: WongWangConfig,
    cli_args: Option<&HashMap<String, String>>,
) -> WongWangConfig {
    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }
    config
}

/// Parse a comma-separated coherence list such as `"0,0.064,0.128"`
pub fn parse_coherence_list(value: &str) -> ConfigResult<Vec<f64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| ConfigError::InvalidValue(format!("coherence '{}' is not a number", s)))
        })
        .collect()
}

fn parse_bool(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower == "true" || lower == "1" || lower == "yes"
}

/// Apply one named override; unparseable values leave the field untouched
fn apply_override(config: &mut WongWangConfig, key: &str, value: &str) {
    match key {
        "trials" => {
            if let Ok(n) = value.parse::<usize>() {
                config.sweep.n_trials = n;
            }
        }
        "threshold" => {
            if let Ok(v) = value.parse::<f64>() {
                config.trial.threshold_hz = v;
            }
        }
        "dt" => {
            if let Ok(v) = value.parse::<f64>() {
                config.trial.dt_ms = v;
            }
        }
        "t_max" => {
            if let Ok(v) = value.parse::<f64>() {
                config.trial.t_max_ms = v;
            }
        }
        "seed" => {
            if let Ok(v) = value.parse::<u64>() {
                config.sweep.seed = Some(v);
            }
        }
        "sigma" => {
            if let Ok(v) = value.parse::<f64>() {
                config.network.sigma = v;
            }
        }
        "coherences" => {
            if let Ok(list) = parse_coherence_list(value) {
                config.sweep.coherences = list;
            }
        }
        "parallel" => config.sweep.parallel = parse_bool(value),
        "results_path" => config.output.results_path = PathBuf::from(value),
        "log_level" => config.logging.level = value.to_string(),
        _ => {}
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `WONGWANG_TRIALS` -> `sweep.n_trials`
/// - `WONGWANG_THRESHOLD` -> `trial.threshold_hz`
/// - `WONGWANG_DT` -> `trial.dt_ms`
/// - `WONGWANG_T_MAX` -> `trial.t_max_ms`
/// - `WONGWANG_SEED` -> `sweep.seed`
/// - `WONGWANG_SIGMA` -> `network.sigma`
/// - `WONGWANG_COHERENCES` -> `sweep.coherences` (comma-separated)
/// - `WONGWANG_PARALLEL` -> `sweep.parallel`
/// - `WONGWANG_RESULTS_PATH` -> `output.results_path`
/// - `WONGWANG_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut WongWangConfig) {
    const ENV_KEYS: &[(&str, &str)] = &[
        ("WONGWANG_TRIALS", "trials"),
        ("WONGWANG_THRESHOLD", "threshold"),
        ("WONGWANG_DT", "dt"),
        ("WONGWANG_T_MAX", "t_max"),
        ("WONGWANG_SEED", "seed"),
        ("WONGWANG_SIGMA", "sigma"),
        ("WONGWANG_COHERENCES", "coherences"),
        ("WONGWANG_PARALLEL", "parallel"),
        ("WONGWANG_RESULTS_PATH", "results_path"),
        ("WONGWANG_LOG_LEVEL", "log_level"),
    ];

    for (var, key) in ENV_KEYS {
        if let Ok(value) = env::var(var) {
            apply_override(config, key, &value);
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"trials": "500", "threshold": "60"}`)
pub fn apply_cli_overrides(config: &mut WongWangConfig, cli_args: &HashMap<String, String>) {
    for (key, value) in cli_args {
        apply_override(config, key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("WONGWANG_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("WONGWANG_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_missing_env_path_is_an_error() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("WONGWANG_CONFIG_PATH", "/definitely/not/here.toml");
        let result = find_config_file();
        env::remove_var("WONGWANG_CONFIG_PATH");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[network]").unwrap();
        writeln!(file, "sigma = 0.04").unwrap();
        writeln!(file, "w_I = 0.5").unwrap();
        writeln!(file, "[sweep]").unwrap();
        writeln!(file, "n_trials = 50").unwrap();
        writeln!(file, "seed = 42").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.network.sigma, 0.04);
        assert_eq!(config.network.w_i, 0.5);
        assert_eq!(config.network.i0, 0.3255);
        assert_eq!(config.sweep.n_trials, 50);
        assert_eq!(config.sweep.seed, Some(42));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[sweep\nn_trials = ").unwrap();
        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let result = load_config_or_default(Some(&dir.path().join("absent.toml")), None);
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = WongWangConfig::default();

        env::set_var("WONGWANG_TRIALS", "500");
        env::set_var("WONGWANG_COHERENCES", "0, 0.2 ,0.5");
        env::set_var("WONGWANG_DT", "not-a-number");

        apply_environment_overrides(&mut config);

        env::remove_var("WONGWANG_TRIALS");
        env::remove_var("WONGWANG_COHERENCES");
        env::remove_var("WONGWANG_DT");

        assert_eq!(config.sweep.n_trials, 500);
        assert_eq!(config.sweep.coherences, vec![0.0, 0.2, 0.5]);
        assert_eq!(config.trial.dt_ms, 0.5);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = WongWangConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("threshold".to_string(), "45".to_string());
        cli_args.insert("seed".to_string(), "7".to_string());
        cli_args.insert("parallel".to_string(), "yes".to_string());
        cli_args.insert("results_path".to_string(), "out/run.csv".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.trial.threshold_hz, 45.0);
        assert_eq!(config.sweep.seed, Some(7));
        assert!(config.sweep.parallel);
        assert_eq!(config.output.results_path, PathBuf::from("out/run.csv"));
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        // CLI overrides take precedence over environment variables
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[trial]").unwrap();
        writeln!(file, "threshold_hz = 50.0").unwrap();
        writeln!(file, "dt_ms = 1.0").unwrap();

        env::set_var("WONGWANG_THRESHOLD", "65");
        env::set_var("WONGWANG_DT", "0.25");

        let mut cli_args = HashMap::new();
        cli_args.insert("threshold".to_string(), "70".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("WONGWANG_THRESHOLD");
        env::remove_var("WONGWANG_DT");

        // CLI wins for threshold, env wins for dt (no CLI override)
        assert_eq!(config.trial.threshold_hz, 70.0);
        assert_eq!(config.trial.dt_ms, 0.25);
    }

    #[test]
    fn test_parse_coherence_list() {
        assert_eq!(parse_coherence_list("0,0.064, -0.128").unwrap(), vec![0.0, 0.064, -0.128]);
        assert!(parse_coherence_list("0,abc").is_err());
        assert!(parse_coherence_list("").unwrap().is_empty());
    }
}
