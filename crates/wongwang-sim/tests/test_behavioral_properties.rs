// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Behavioral properties of the decision circuit
//!
//! Statistical checks use generous tolerances and fixed seeds, so they are
//! deterministic and far from their failure boundary.

use wongwang_neural::{WongWangNetwork, DEFAULT_RATE_CAP_HZ};
use wongwang_sim::{
    run_trial, run_trial_traced, sweep_psychometric, DecisionRule, SweepConfig, TrialConfig,
    TrialOutcome,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Noisier network whose trials almost always decide within a second
fn decisive_network() -> WongWangNetwork {
    WongWangNetwork::default()
        .with_params(|p| p.sigma = 0.04)
        .unwrap()
}

fn short_trial(t_max_ms: f64) -> TrialConfig {
    TrialConfig {
        t_max_ms,
        ..TrialConfig::sweep_default()
    }
}

// ============================================================================
// Decision window
// ============================================================================

#[test]
fn test_trial_shorter_than_decision_window_never_decides() {
    let network = decisive_network();
    let config = TrialConfig {
        t_max_ms: 250.0,
        dt_ms: 0.5,
        rule: DecisionRule {
            min_decision_time_ms: 300.0,
            ..Default::default()
        },
    };
    for seed in 0..50 {
        for coherence in [-1.0, -0.256, 0.0, 0.512, 1.0] {
            let outcome = run_trial(&network, coherence, &config, seed).unwrap();
            assert_eq!(outcome, TrialOutcome::Undecided, "seed {seed}, c {coherence}");
        }
    }
}

#[test]
fn test_decision_times_respect_window() {
    let network = decisive_network();
    let config = short_trial(1500.0);
    let mut decided = 0;
    for seed in 0..100 {
        if let TrialOutcome::Decided { time_ms, .. } = run_trial(&network, 0.128, &config, seed).unwrap() {
            decided += 1;
            assert!(time_ms >= config.rule.min_decision_time_ms);
            assert!(time_ms < config.t_max_ms);
        }
    }
    assert!(decided > 0);
}

// ============================================================================
// Numerical guards
// ============================================================================

#[test]
fn test_divergent_currents_are_capped_without_nan() {
    // I0 far past the transfer function's pole for both pools
    let network = WongWangNetwork::default()
        .with_params(|p| p.i0 = 10.0)
        .unwrap();
    let (i1, i2) = network.input_currents(0.1, 0.1, 40.0, 40.0);
    assert!(network.transfer().is_divergent(i1));
    assert_eq!(network.rates_from_currents(i1, i2), (DEFAULT_RATE_CAP_HZ, DEFAULT_RATE_CAP_HZ));

    let config = short_trial(1000.0);
    let trace = run_trial_traced(&network, 0.0, &config, 42).unwrap();
    assert_eq!(trace.samples.len(), config.grid_len() - 1);
    for sample in &trace.samples {
        assert_eq!(sample.r1, DEFAULT_RATE_CAP_HZ);
        assert_eq!(sample.r2, DEFAULT_RATE_CAP_HZ);
        assert!(sample.state.s1.is_finite() && sample.state.s2.is_finite());
        assert!((0.0..=1.0).contains(&sample.state.s1));
        assert!((0.0..=1.0).contains(&sample.state.s2));
    }
    // Both pools pinned at the cap is a sustained tie
    assert_eq!(trace.outcome, TrialOutcome::Undecided);
}

#[test]
fn test_gating_bounded_under_heavy_noise() {
    let network = WongWangNetwork::default()
        .with_params(|p| p.sigma = 0.5)
        .unwrap();
    let config = short_trial(500.0);
    for seed in 0..10 {
        let trace = run_trial_traced(&network, 0.3, &config, seed).unwrap();
        for sample in &trace.samples {
            assert!((0.0..=1.0).contains(&sample.state.s1));
            assert!((0.0..=1.0).contains(&sample.state.s2));
        }
    }
}

// ============================================================================
// Psychometric behaviour
// ============================================================================

#[test]
fn test_zero_coherence_is_unbiased() {
    let network = decisive_network();
    let config = SweepConfig {
        coherences: vec![0.0],
        n_trials: 400,
        trial: short_trial(1000.0),
        seed: Some(2024),
        parallel: true,
    };
    let row = sweep_psychometric(&network, &config).unwrap().rows[0];
    assert!(row.decision_rate > 0.5, "decision rate {}", row.decision_rate);
    assert!(
        (row.p_correct - 0.5).abs() < 0.1,
        "p_correct {} deviates from chance",
        row.p_correct
    );
}

#[test]
fn test_decision_rate_grows_with_evidence() {
    let network = WongWangNetwork::default();
    let config = SweepConfig {
        coherences: vec![0.0, 0.512, 1.0],
        n_trials: 300,
        trial: TrialConfig::sweep_default(),
        seed: Some(7),
        parallel: true,
    };
    let rows = sweep_psychometric(&network, &config).unwrap().rows;
    for pair in rows.windows(2) {
        assert!(
            pair[0].decision_rate <= pair[1].decision_rate + 0.05,
            "decision rate fell from {} (c={}) to {} (c={})",
            pair[0].decision_rate,
            pair[0].coherence,
            pair[1].decision_rate,
            pair[1].coherence
        );
    }
    assert!(rows[2].decision_rate > rows[0].decision_rate);
}

#[test]
fn test_strong_evidence_is_accurate() {
    let network = decisive_network();
    let config = SweepConfig {
        coherences: vec![1.0, -1.0],
        n_trials: 100,
        trial: short_trial(1000.0),
        seed: Some(3),
        parallel: false,
    };
    let rows = sweep_psychometric(&network, &config).unwrap().rows;
    for row in rows {
        assert!(row.has_decisions());
        assert!(row.p_correct > 0.6, "p_correct {} at c={}", row.p_correct, row.coherence);
    }
}
