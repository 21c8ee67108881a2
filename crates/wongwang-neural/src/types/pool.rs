// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity of the two evidence-accumulating excitatory pools.

use core::fmt;

/// One of the two selective excitatory populations.
///
/// `E1` receives the larger external drive for positive coherence, `E2` for
/// negative coherence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pool {
    E1,
    E2,
}

impl Pool {
    /// The pool favoured by the sign of the coherence. Zero coherence counts
    /// as favouring `E1`.
    pub fn correct_for(coherence: f64) -> Self {
        if coherence >= 0.0 {
            Pool::E1
        } else {
            Pool::E2
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pool::E1 => "E1",
            Pool::E2 => "E2",
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_pool_follows_coherence_sign() {
        assert_eq!(Pool::correct_for(0.256), Pool::E1);
        assert_eq!(Pool::correct_for(0.0), Pool::E1);
        assert_eq!(Pool::correct_for(-0.0), Pool::E1);
        assert_eq!(Pool::correct_for(-0.064), Pool::E2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Pool::E1.to_string(), "E1");
        assert_eq!(Pool::E2.to_string(), "E2");
    }
}
