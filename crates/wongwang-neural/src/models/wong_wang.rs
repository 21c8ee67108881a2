// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Reduced Wong-Wang Decision Circuit
//!
//! Two selective excitatory pools (E1, E2) compete through self-excitation,
//! cross-pool suppression and a shared inhibitory drive.
//!
//! ## Model Dynamics
//!
//! ```text
//! External drive (constant over a trial):
//!     ν1 = μ0·(1 + c)        ν2 = μ0·(1 − c)
//!
//! Net input current:
//!     s_I = (s1 + s2) / 2
//!     I1  = I0 + J_ext·ν1 + w₊·s1 − w₋·s2 − w_I·s_I
//!     I2  = I0 + J_ext·ν2 + w₊·s2 − w₋·s1 − w_I·s_I
//!
//! Gating dynamics (τ_s in ms, rates in Hz):
//!     ds/dt = (−s + 0.001·r·(1 − s)) / (0.001·τ_s)
//! ```
//!
//! Population sizes and the NMDA/AMPA/GABA time constants are carried for
//! documentation and metadata only; `tau_s` is the one time constant the
//! dynamics use.

use super::traits::ModelParameters;
use crate::transfer::{TransferFunction, DEFAULT_RATE_CAP_HZ};
use crate::types::{ModelError, Result};

/// Converts Hz to events per ms and ms to s in the gating equation
const MS_PER_S_SCALE: f64 = 0.001;

/// Biophysical parameters of the two-pool circuit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkParameters {
    #[cfg_attr(feature = "serde", serde(rename = "N_E1"))]
    pub n_e1: u32,
    #[cfg_attr(feature = "serde", serde(rename = "N_E2"))]
    pub n_e2: u32,
    #[cfg_attr(feature = "serde", serde(rename = "N_I"))]
    pub n_i: u32,

    /// Same-pool recurrent excitation
    pub w_plus: f64,
    /// Cross-pool suppression
    pub w_minus: f64,
    /// Global inhibition strength
    #[cfg_attr(feature = "serde", serde(rename = "w_I"))]
    pub w_i: f64,

    /// Synaptic gating decay (ms)
    pub tau_s: f64,
    #[cfg_attr(feature = "serde", serde(rename = "tau_NMDA"))]
    pub tau_nmda: f64,
    #[cfg_attr(feature = "serde", serde(rename = "tau_AMPA"))]
    pub tau_ampa: f64,
    #[cfg_attr(feature = "serde", serde(rename = "tau_GABA"))]
    pub tau_gaba: f64,

    /// Baseline current (nA)
    #[cfg_attr(feature = "serde", serde(rename = "I0"))]
    pub i0: f64,
    /// External synaptic efficacy (nA/Hz)
    #[cfg_attr(feature = "serde", serde(rename = "JA_ext"))]
    pub ja_ext: f64,
    /// Baseline external input rate (Hz)
    pub mu0: f64,

    pub a: f64,
    pub b: f64,
    pub d: f64,
    pub rate_cap: f64,

    /// Noise intensity, applied as `sigma·sqrt(dt)` per step
    pub sigma: f64,
}

impl Default for NetworkParameters {
    fn default() -> Self {
        Self {
            n_e1: 240,
            n_e2: 240,
            n_i: 60,
            w_plus: 1.7,
            w_minus: 1.0,
            w_i: 1.0,
            tau_s: 100.0,
            tau_nmda: 100.0,
            tau_ampa: 2.0,
            tau_gaba: 10.0,
            i0: 0.3255,
            ja_ext: 0.00052,
            mu0: 40.0,
            a: 270.0,
            b: 108.0,
            d: 0.154,
            rate_cap: DEFAULT_RATE_CAP_HZ,
            sigma: 0.02,
        }
    }
}

impl ModelParameters for NetworkParameters {
    fn validate(&self) -> Result<()> {
        for (name, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ModelError::invalid(name, value, "must be finite"));
            }
        }
        if self.tau_s <= 0.0 {
            return Err(ModelError::invalid("tau_s", self.tau_s, "must be positive"));
        }
        if self.sigma < 0.0 {
            return Err(ModelError::invalid("sigma", self.sigma, "must be non-negative"));
        }
        if self.rate_cap <= 0.0 {
            return Err(ModelError::invalid(
                "rate_cap",
                self.rate_cap,
                "must be positive",
            ));
        }
        Ok(())
    }

    fn parameter_count() -> usize {
        18
    }

    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("N_E1", f64::from(self.n_e1)),
            ("N_E2", f64::from(self.n_e2)),
            ("N_I", f64::from(self.n_i)),
            ("w_plus", self.w_plus),
            ("w_minus", self.w_minus),
            ("w_I", self.w_i),
            ("tau_s", self.tau_s),
            ("tau_NMDA", self.tau_nmda),
            ("tau_AMPA", self.tau_ampa),
            ("tau_GABA", self.tau_gaba),
            ("I0", self.i0),
            ("JA_ext", self.ja_ext),
            ("mu0", self.mu0),
            ("a", self.a),
            ("b", self.b),
            ("d", self.d),
            ("rate_cap", self.rate_cap),
            ("sigma", self.sigma),
        ]
    }
}

/// Validated, immutable Wong-Wang network
///
/// Construction goes through [`WongWangNetwork::new`], which rejects invalid
/// parameter sets. There is no way to mutate a network afterwards; derive a
/// new one with [`WongWangNetwork::with_params`].
#[derive(Debug, Clone, PartialEq)]
pub struct WongWangNetwork {
    params: NetworkParameters,
    transfer: TransferFunction,
}

impl WongWangNetwork {
    pub fn new(params: NetworkParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            transfer: TransferFunction::new(params.a, params.b, params.d, params.rate_cap),
            params,
        })
    }

    /// Build a sibling network with some parameters changed
    pub fn with_params(&self, edit: impl FnOnce(&mut NetworkParameters)) -> Result<Self> {
        let mut params = self.params;
        edit(&mut params);
        Self::new(params)
    }

    pub fn params(&self) -> &NetworkParameters {
        &self.params
    }

    pub fn transfer(&self) -> &TransferFunction {
        &self.transfer
    }

    /// Firing rates (Hz) of E1 and E2 for their input currents
    #[inline]
    pub fn rates_from_currents(&self, current_e1: f64, current_e2: f64) -> (f64, f64) {
        self.transfer.rates(current_e1, current_e2)
    }

    /// External input rates `(ν1, ν2)` for a coherence
    #[inline]
    pub fn external_rates(&self, coherence: f64) -> (f64, f64) {
        (
            self.params.mu0 * (1.0 + coherence),
            self.params.mu0 * (1.0 - coherence),
        )
    }

    /// Net input currents `(I1, I2)` for gating state `(s1, s2)` and external
    /// rates `(ν1, ν2)`
    #[inline]
    pub fn input_currents(&self, s1: f64, s2: f64, nu1: f64, nu2: f64) -> (f64, f64) {
        let p = &self.params;
        let shared_inhibition = 0.5 * (s1 + s2);
        let i1 = p.i0 + p.ja_ext * nu1 + p.w_plus * s1 - p.w_minus * s2 - p.w_i * shared_inhibition;
        let i2 = p.i0 + p.ja_ext * nu2 + p.w_plus * s2 - p.w_minus * s1 - p.w_i * shared_inhibition;
        (i1, i2)
    }

    /// Deterministic part of `ds/dt` (per ms) for one pool
    #[inline]
    pub fn gating_derivative(&self, s: f64, rate: f64) -> f64 {
        (-s + rate * MS_PER_S_SCALE * (1.0 - s)) / (self.params.tau_s * MS_PER_S_SCALE)
    }

    /// Standard deviation of the per-step noise increment
    #[inline]
    pub fn noise_scale(&self, dt: f64) -> f64 {
        self.params.sigma * dt.sqrt()
    }
}

impl Default for WongWangNetwork {
    fn default() -> Self {
        let params = NetworkParameters::default();
        Self {
            transfer: TransferFunction::new(params.a, params.b, params.d, params.rate_cap),
            params,
        }
    }
}
