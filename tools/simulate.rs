// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Wong-Wang Simulation Driver

Runs a psychometric sweep over coherence levels, or one sweep per value of a
model or decision parameter, and writes the results as CSV plus a JSON
metadata file next to it.

Usage:
  cargo run --release --bin wongwang-simulate -- --trials 200 --thresh 60 --out data/results.csv
  cargo run --release --bin wongwang-simulate -- --sweep sigma --out data/noise_sweep.csv
  cargo run --release --bin wongwang-simulate -- --sweep threshold --sweep-values 40,60,80

Settings come from `wongwang_configuration.toml` (if found), then `WONGWANG_*`
environment variables, then the flags below.
*/

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use wongwang::config::{load_config_or_default, parse_coherence_list, validate_config, WongWangConfig};
use wongwang::io::{
    format_parameter_sweep_summary, format_summary, metadata_path_for, write_metadata,
    write_parameter_sweep_csv, write_results_csv, RunMetadata, RunParameters, SweepMetadata,
};
use wongwang::neural::WongWangNetwork;
use wongwang::observability::{debug_flags_help, init_logging, parse_debug_flags};
use wongwang::setup::{logging_config, network_from_config, sweep_config};
use wongwang::sim::{run_parameter_sweep, sweep_psychometric, SweepConfig, SweptParameter};

/// Wong-Wang decision circuit experiments
#[derive(Parser, Debug)]
#[command(name = "wongwang-simulate", version, author, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Configuration file (default: search for wongwang_configuration.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trials per coherence
    #[arg(long)]
    trials: Option<usize>,

    /// Decision threshold in Hz
    #[arg(long)]
    thresh: Option<f64>,

    /// Simulation time step in ms
    #[arg(long)]
    dt: Option<f64>,

    /// Maximum trial duration in ms
    #[arg(long)]
    t_max: Option<f64>,

    /// Comma-separated coherence values, e.g. "0,0.064,0.128"
    #[arg(long)]
    coherences: Option<String>,

    /// Output CSV path; metadata goes next to it with a .json extension
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Master seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials on all cores
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Sweep one parameter: threshold, sigma, w-i or i0
    #[arg(long, value_name = "PARAM")]
    sweep: Option<SweptParameter>,

    /// Comma-separated values for --sweep (default: built-in list per parameter)
    #[arg(long, value_delimiter = ',', requires = "sweep")]
    sweep_values: Vec<f64>,

    /// Enable debug logging for crates (comma-separated, or "all")
    #[arg(long, value_delimiter = ',')]
    debug: Vec<String>,

    /// Debug logging everywhere
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    /// Flags the user actually gave, keyed the way the config loader expects
    fn overrides(&self) -> Result<HashMap<String, String>> {
        let mut cli = HashMap::new();
        if let Some(trials) = self.trials {
            cli.insert("trials".to_string(), trials.to_string());
        }
        if let Some(thresh) = self.thresh {
            cli.insert("threshold".to_string(), thresh.to_string());
        }
        if let Some(dt) = self.dt {
            cli.insert("dt".to_string(), dt.to_string());
        }
        if let Some(t_max) = self.t_max {
            cli.insert("t_max".to_string(), t_max.to_string());
        }
        if let Some(coherences) = &self.coherences {
            parse_coherence_list(coherences).context("Invalid --coherences")?;
            cli.insert("coherences".to_string(), coherences.clone());
        }
        if let Some(out) = &self.out {
            cli.insert("results_path".to_string(), out.display().to_string());
        }
        if let Some(seed) = self.seed {
            cli.insert("seed".to_string(), seed.to_string());
        }
        if self.parallel {
            cli.insert("parallel".to_string(), "true".to_string());
        }
        if self.verbose {
            cli.insert("log_level".to_string(), "debug".to_string());
        }
        Ok(cli)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let cli = args.overrides()?;
    let config = load_config_or_default(args.config.as_deref(), Some(&cli))
        .context("Failed to load configuration")?;

    let debug_flags = parse_debug_flags(&args.debug);
    let _log_guard = init_logging(&debug_flags, &logging_config(&config.logging))?;

    validate_config(&config)?;
    let network = network_from_config(&config.network)?;
    let sweep = sweep_config(&config);

    match args.sweep {
        Some(parameter) => {
            let values = if args.sweep_values.is_empty() {
                parameter.default_values()
            } else {
                args.sweep_values.clone()
            };
            run_sweep_experiment(&config, &network, &sweep, parameter, &values)
        }
        None => run_basic_experiment(&config, &network, &sweep),
    }
}

/// Parameters recorded in the metadata; a swept threshold is listed only
/// under `sweep`, never as the base value
fn run_parameters(
    sweep: &SweepConfig,
    master_seed: u64,
    swept: Option<(SweptParameter, &[f64])>,
) -> RunParameters {
    let threshold = match swept {
        Some((SweptParameter::Threshold, _)) => None,
        _ => Some(sweep.trial.rule.threshold_hz),
    };
    RunParameters {
        n_trials: sweep.n_trials,
        threshold,
        dt: sweep.trial.dt_ms,
        coherences: sweep.coherences.clone(),
        seed: master_seed,
        sweep: swept.map(|(parameter, values)| SweepMetadata {
            parameter: parameter.column_name().to_string(),
            values: values.to_vec(),
        }),
    }
}

fn save_metadata(config: &WongWangConfig, results_path: &Path, metadata: &RunMetadata) -> Result<()> {
    if !config.output.write_metadata {
        return Ok(());
    }
    let path = metadata_path_for(results_path);
    write_metadata(&path, metadata)
        .with_context(|| format!("Failed to write metadata to {}", path.display()))?;
    info!("Metadata saved to {}", path.display());
    Ok(())
}

fn run_basic_experiment(
    config: &WongWangConfig,
    network: &WongWangNetwork,
    sweep: &SweepConfig,
) -> Result<()> {
    info!(
        "Running {} trials per coherence over {:?} (threshold {} Hz, dt {} ms)",
        sweep.n_trials, sweep.coherences, sweep.trial.rule.threshold_hz, sweep.trial.dt_ms
    );

    let start = Instant::now();
    let result = sweep_psychometric(network, sweep)?;
    let elapsed = start.elapsed();
    info!("Completed in {:.2}s (seed {})", elapsed.as_secs_f64(), result.master_seed);

    let results_path = &config.output.results_path;
    write_results_csv(results_path, &result.rows)
        .with_context(|| format!("Failed to write results to {}", results_path.display()))?;
    info!("Results saved to {}", results_path.display());

    let metadata = RunMetadata::new(
        elapsed,
        run_parameters(sweep, result.master_seed, None),
        *network.params(),
    );
    save_metadata(config, results_path, &metadata)?;

    if result.rows.iter().all(|row| !row.has_decisions()) {
        warn!("No trial reached a decision; consider a lower threshold or more noise");
    }

    println!("\nQuick summary:");
    print!("{}", format_summary(&result.rows));
    Ok(())
}

fn run_sweep_experiment(
    config: &WongWangConfig,
    network: &WongWangNetwork,
    sweep: &SweepConfig,
    parameter: SweptParameter,
    values: &[f64],
) -> Result<()> {
    info!("Running {} sweep over {:?}", parameter, values);

    let start = Instant::now();
    let result = run_parameter_sweep(network, parameter, values, sweep)?;
    let elapsed = start.elapsed();
    info!("Completed in {:.2}s (seed {})", elapsed.as_secs_f64(), result.master_seed);

    let results_path = &config.output.results_path;
    write_parameter_sweep_csv(results_path, parameter, &result.rows)
        .with_context(|| format!("Failed to write results to {}", results_path.display()))?;
    info!("{} sweep results saved to {}", parameter, results_path.display());

    let parameters = run_parameters(sweep, result.master_seed, Some((parameter, values)));
    let metadata = RunMetadata::new(elapsed, parameters, *network.params());
    save_metadata(config, results_path, &metadata)?;

    print!("{}", format_parameter_sweep_summary(parameter, &result.rows));
    Ok(())
}
