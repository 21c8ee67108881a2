// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Rate Transfer Function
//!
//! Static nonlinearity mapping a pool's net input current to its firing rate.
//!
//! ```text
//! x = a·I − b
//! r = 0                  if x ≤ 0          (sub-threshold)
//! r = x / (1 − d·x)      if 1 − d·x > 0
//! r = rate_cap           otherwise          (divergent branch of the rational form)
//! ```
//!
//! The cap is a numerical guard. It keeps `inf`/NaN out of the gating
//! dynamics when a current pushes the rational approximation past its pole.

/// Rate returned when the transfer function's denominator is non-positive
pub const DEFAULT_RATE_CAP_HZ: f64 = 1000.0;

/// Shape parameters of the rational transfer function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferFunction {
    /// Gain (Hz/nA)
    pub a: f64,
    /// Offset (Hz)
    pub b: f64,
    /// Saturation curvature (s)
    pub d: f64,
    /// Rate reported in the divergent regime (Hz)
    pub rate_cap: f64,
}

impl TransferFunction {
    pub fn new(a: f64, b: f64, d: f64, rate_cap: f64) -> Self {
        Self { a, b, d, rate_cap }
    }

    /// Firing rate (Hz) for input current `current` (nA)
    #[inline]
    pub fn rate(&self, current: f64) -> f64 {
        let x = self.a * current - self.b;
        if x <= 0.0 {
            return 0.0;
        }
        let denom = 1.0 - self.d * x;
        if denom <= 0.0 {
            return self.rate_cap;
        }
        x / denom
    }

    /// Whether `current` lands in the capped, divergent regime
    pub fn is_divergent(&self, current: f64) -> bool {
        let x = self.a * current - self.b;
        x > 0.0 && 1.0 - self.d * x <= 0.0
    }

    /// Rates for both pools, evaluated independently
    #[inline]
    pub fn rates(&self, current_e1: f64, current_e2: f64) -> (f64, f64) {
        (self.rate(current_e1), self.rate(current_e2))
    }
}

impl Default for TransferFunction {
    fn default() -> Self {
        Self {
            a: 270.0,
            b: 108.0,
            d: 0.154,
            rate_cap: DEFAULT_RATE_CAP_HZ,
        }
    }
}
