// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Counter-based seed derivation.
//!
//! A trial's seed is a pure function of `(master_seed, stream, counter)`.
//! Nothing is drawn sequentially from a shared generator, so the order in
//! which trials execute cannot change the seed any trial receives.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer
#[inline]
pub fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of an independent stream (one coherence bucket, one swept value)
#[inline]
pub fn derive_stream_seed(master_seed: u64, stream: u64) -> u64 {
    splitmix64(master_seed ^ splitmix64(stream))
}

/// Seed of trial `trial_index` within bucket `stream`
#[inline]
pub fn derive_trial_seed(master_seed: u64, stream: u64, trial_index: u64) -> u64 {
    splitmix64(derive_stream_seed(master_seed, stream).wrapping_add(trial_index.wrapping_mul(GOLDEN_GAMMA)))
}

/// Use the caller's seed, or draw one from OS entropy
pub fn resolve_master_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
