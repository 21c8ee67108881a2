// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Reduction of trial outcomes into psychometric/chronometric statistics.

use serde::{Deserialize, Serialize};
use wongwang_neural::Pool;

use crate::trial::TrialOutcome;

/// Summary of all trials run at one coherence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub coherence: f64,
    /// Fraction of decided trials won by the pool the coherence favours;
    /// 0 when nothing was decided
    pub p_correct: f64,
    /// Mean decision time of decided trials (ms); NaN when nothing was decided
    pub mean_rt_ms: f64,
    /// Fraction of trials that reached any decision
    pub decision_rate: f64,
    /// Population standard deviation of decision times (ms); NaN with fewer
    /// than two decisions
    pub rt_std: f64,
}

impl SweepRow {
    pub fn has_decisions(&self) -> bool {
        self.decision_rate > 0.0
    }

    /// Field values in CSV column order
    pub fn values(&self) -> [f64; 5] {
        [
            self.coherence,
            self.p_correct,
            self.mean_rt_ms,
            self.decision_rate,
            self.rt_std,
        ]
    }
}

/// Reduce one coherence bucket
///
/// `outcomes` must be in trial order; the reduction order is fixed so that
/// any execution strategy producing the same outcomes yields identical bits.
pub fn summarize_outcomes(coherence: f64, outcomes: &[TrialOutcome]) -> SweepRow {
    let correct_pool = Pool::correct_for(coherence);
    let mut decided = 0usize;
    let mut correct = 0usize;
    let mut rts = Vec::with_capacity(outcomes.len());

    for outcome in outcomes.iter().filter(|outcome| outcome.is_decided()) {
        decided += 1;
        if outcome.pool() == Some(correct_pool) {
            correct += 1;
        }
        rts.extend(outcome.decision_time_ms());
    }

    let p_correct = if decided > 0 {
        correct as f64 / decided as f64
    } else {
        0.0
    };
    let decision_rate = if outcomes.is_empty() {
        0.0
    } else {
        decided as f64 / outcomes.len() as f64
    };

    let mean_rt_ms = mean(&rts).unwrap_or(f64::NAN);
    let rt_std = if rts.len() > 1 {
        population_std(&rts, mean_rt_ms)
    } else {
        f64::NAN
    };

    SweepRow {
        coherence,
        p_correct,
        mean_rt_ms,
        decision_rate,
        rt_std,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
