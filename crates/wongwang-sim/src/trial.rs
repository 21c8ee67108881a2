// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Single-Trial Integrator
//!
//! ## Algorithm (per step, t_k = k·dt for k ≥ 1)
//! 1. Shared inhibition from the current gating state
//! 2. Net currents and rates through the transfer function
//! 3. Euler-Maruyama update of s1, s2 with independent N(0, σ²·dt) noise,
//!    clamped into [0, 1]
//! 4. From `min_decision_time_ms` on, apply the decision rule to the rates of
//!    step 2 and stop at the first winner
//!
//! Running out of time is not an error: the trial is reported as
//! [`TrialOutcome::Undecided`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use wongwang_neural::{Pool, WongWangNetwork};

use crate::error::{SimError, SimResult};

/// Gating value both pools start from; zero is a degenerate fixed point
pub const INITIAL_GATING: f64 = 0.1;

/// Upper bound on samples reserved up front by [`run_trial_traced`]
const TRACE_RESERVE_STEPS: usize = 1 << 16;

/// Race-to-threshold decision rule
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecisionRule {
    /// Firing rate a pool must reach to win (Hz)
    pub threshold_hz: f64,
    /// No decision is registered before this time (ms)
    pub min_decision_time_ms: f64,
    /// Rate gap needed to break a tie when both pools are above threshold (Hz)
    pub tie_epsilon_hz: f64,
}

impl DecisionRule {
    /// Winner for rates `(r1, r2)`, if any
    ///
    /// A pool wins when it is at or above threshold and the other is strictly
    /// below. With both above, the faster pool wins only if it leads by more
    /// than `tie_epsilon_hz`; otherwise integration continues.
    #[inline]
    pub fn decide(&self, r1: f64, r2: f64) -> Option<Pool> {
        let r1_high = r1 >= self.threshold_hz;
        let r2_high = r2 >= self.threshold_hz;
        match (r1_high, r2_high) {
            (true, false) => Some(Pool::E1),
            (false, true) => Some(Pool::E2),
            (true, true) if (r1 - r2).abs() > self.tie_epsilon_hz => {
                Some(if r1 > r2 { Pool::E1 } else { Pool::E2 })
            }
            _ => None,
        }
    }
}

impl Default for DecisionRule {
    fn default() -> Self {
        Self {
            threshold_hz: 70.0,
            min_decision_time_ms: 300.0,
            tie_epsilon_hz: 5.0,
        }
    }
}

/// Time grid and decision rule of one trial
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrialConfig {
    /// Simulated duration (ms); the grid covers [0, t_max)
    pub t_max_ms: f64,
    /// Integration step (ms)
    pub dt_ms: f64,
    pub rule: DecisionRule,
}

impl TrialConfig {
    /// Defaults used by psychometric sweeps (shorter trials)
    pub fn sweep_default() -> Self {
        Self {
            t_max_ms: 2000.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.dt_ms.is_finite() || self.dt_ms <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "dt_ms must be a positive finite number, got {}",
                self.dt_ms
            )));
        }
        if !self.t_max_ms.is_finite() || self.t_max_ms <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "t_max_ms must be a positive finite number, got {}",
                self.t_max_ms
            )));
        }
        if !self.rule.threshold_hz.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "threshold_hz must be finite, got {}",
                self.rule.threshold_hz
            )));
        }
        if !self.rule.min_decision_time_ms.is_finite() || self.rule.min_decision_time_ms < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "min_decision_time_ms must be a non-negative finite number, got {}",
                self.rule.min_decision_time_ms
            )));
        }
        if !self.rule.tie_epsilon_hz.is_finite() || self.rule.tie_epsilon_hz < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "tie_epsilon_hz must be a non-negative finite number, got {}",
                self.rule.tie_epsilon_hz
            )));
        }
        Ok(())
    }

    /// Number of grid points in [0, t_max), including t = 0
    pub fn grid_len(&self) -> usize {
        (self.t_max_ms / self.dt_ms).ceil() as usize
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            t_max_ms: 3000.0,
            dt_ms: 0.5,
            rule: DecisionRule::default(),
        }
    }
}

pub(crate) fn validate_coherence(coherence: f64) -> SimResult<()> {
    if !coherence.is_finite() || !(-1.0..=1.0).contains(&coherence) {
        return Err(SimError::InvalidConfig(format!(
            "coherence must lie in [-1, 1], got {}",
            coherence
        )));
    }
    Ok(())
}

/// Gating variables of E1 and E2, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatingState {
    pub s1: f64,
    pub s2: f64,
}

impl GatingState {
    pub fn initial() -> Self {
        Self {
            s1: INITIAL_GATING,
            s2: INITIAL_GATING,
        }
    }

    #[inline]
    fn advance(s: f64, increment: f64) -> f64 {
        (s + increment).clamp(0.0, 1.0)
    }
}

impl Default for GatingState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Result of one trial
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TrialOutcome {
    Decided { pool: Pool, time_ms: f64 },
    Undecided,
}

impl TrialOutcome {
    pub fn is_decided(&self) -> bool {
        matches!(self, TrialOutcome::Decided { .. })
    }

    pub fn pool(&self) -> Option<Pool> {
        match self {
            TrialOutcome::Decided { pool, .. } => Some(*pool),
            TrialOutcome::Undecided => None,
        }
    }

    pub fn decision_time_ms(&self) -> Option<f64> {
        match self {
            TrialOutcome::Decided { time_ms, .. } => Some(*time_ms),
            TrialOutcome::Undecided => None,
        }
    }
}

/// State after one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSample {
    pub time_ms: f64,
    /// Gating after the update of this step
    pub state: GatingState,
    /// Rates computed from the gating state at the start of this step
    pub r1: f64,
    pub r2: f64,
    /// Winner, if the decision window was open and the rule fired
    pub decision: Option<Pool>,
}

/// Step-by-step integrator for one trial
///
/// Owns the gating state and the trial's random generator. Each call to
/// [`TrialIntegrator::step`] advances one grid point; `None` means the time
/// budget is spent. The integrator keeps stepping after a decision if the
/// caller asks it to, which [`run_trial`] never does.
pub struct TrialIntegrator<'a> {
    network: &'a WongWangNetwork,
    config: TrialConfig,
    state: GatingState,
    nu1: f64,
    nu2: f64,
    noise_scale: f64,
    rng: StdRng,
    step_index: usize,
    grid_len: usize,
}

impl<'a> TrialIntegrator<'a> {
    pub fn new(
        network: &'a WongWangNetwork,
        coherence: f64,
        config: TrialConfig,
        seed: u64,
    ) -> SimResult<Self> {
        config.validate()?;
        validate_coherence(coherence)?;
        Ok(Self::new_unchecked(network, coherence, config, seed))
    }

    /// Caller has already validated `config` and `coherence`
    pub(crate) fn new_unchecked(
        network: &'a WongWangNetwork,
        coherence: f64,
        config: TrialConfig,
        seed: u64,
    ) -> Self {
        let (nu1, nu2) = network.external_rates(coherence);
        Self {
            network,
            noise_scale: network.noise_scale(config.dt_ms),
            grid_len: config.grid_len(),
            config,
            state: GatingState::initial(),
            nu1,
            nu2,
            rng: StdRng::seed_from_u64(seed),
            step_index: 0,
        }
    }

    pub fn state(&self) -> GatingState {
        self.state
    }

    /// Simulated time of the last completed step (ms)
    pub fn time_ms(&self) -> f64 {
        self.step_index as f64 * self.config.dt_ms
    }

    /// Advance one step, or `None` once t_max is reached
    pub fn step(&mut self) -> Option<StepSample> {
        let next = self.step_index + 1;
        if next >= self.grid_len {
            return None;
        }
        self.step_index = next;
        let time_ms = next as f64 * self.config.dt_ms;
        let dt = self.config.dt_ms;

        let GatingState { s1, s2 } = self.state;
        let (i1, i2) = self.network.input_currents(s1, s2, self.nu1, self.nu2);
        let (r1, r2) = self.network.rates_from_currents(i1, i2);

        let ds1 = self.network.gating_derivative(s1, r1);
        let ds2 = self.network.gating_derivative(s2, r2);
        let noise1: f64 = self.rng.sample(StandardNormal);
        let noise2: f64 = self.rng.sample(StandardNormal);

        self.state = GatingState {
            s1: GatingState::advance(s1, dt * ds1 + self.noise_scale * noise1),
            s2: GatingState::advance(s2, dt * ds2 + self.noise_scale * noise2),
        };

        let decision = if time_ms < self.config.rule.min_decision_time_ms {
            None
        } else {
            self.config.rule.decide(r1, r2)
        };

        Some(StepSample {
            time_ms,
            state: self.state,
            r1,
            r2,
            decision,
        })
    }

    /// Integrate until a decision or until time runs out
    pub fn run_to_outcome(&mut self) -> TrialOutcome {
        while let Some(sample) = self.step() {
            if let Some(pool) = sample.decision {
                return TrialOutcome::Decided {
                    pool,
                    time_ms: sample.time_ms,
                };
            }
        }
        TrialOutcome::Undecided
    }
}

/// Full trajectory of one trial, ending at its decision (inclusive)
#[derive(Debug, Clone)]
pub struct TrialTrace {
    pub samples: Vec<StepSample>,
    pub outcome: TrialOutcome,
}

/// Simulate one trial
pub fn run_trial(
    network: &WongWangNetwork,
    coherence: f64,
    config: &TrialConfig,
    seed: u64,
) -> SimResult<TrialOutcome> {
    let mut integrator = TrialIntegrator::new(network, coherence, *config, seed)?;
    Ok(integrator.run_to_outcome())
}

/// Simulate one trial and keep every step
///
/// Produces the same outcome as [`run_trial`] for the same inputs.
pub fn run_trial_traced(
    network: &WongWangNetwork,
    coherence: f64,
    config: &TrialConfig,
    seed: u64,
) -> SimResult<TrialTrace> {
    let mut integrator = TrialIntegrator::new(network, coherence, *config, seed)?;
    let mut samples = Vec::with_capacity(config.grid_len().min(TRACE_RESERVE_STEPS));
    let mut outcome = TrialOutcome::Undecided;
    while let Some(sample) = integrator.step() {
        samples.push(sample);
        if let Some(pool) = sample.decision {
            outcome = TrialOutcome::Decided {
                pool,
                time_ms: sample.time_ms,
            };
            break;
        }
    }
    Ok(TrialTrace { samples, outcome })
}
