// Deterministic, portable pseudo-random number generator.
//
// Implements Mulberry32 (Ettinger, 2017), a 32-bit state generator chosen
// because every random decision in the corpus pipeline is derived from a
// uniform float in [0, 1) — mode rolls, table picks, word counts, shuffle
// indices — and Mulberry32 produces exactly one such float per step with
// no buffering. This is a hand-rolled implementation with zero external
// dependencies, guaranteeing identical output across all platforms.
//
// This crate is the single PRNG used across the entire Glyphloom project:
// `glyphloom_lang` (word synthesis) and `glyphloom_corpus` (phrase
// assembly, sampling, presentation shuffles). By sharing one PRNG we avoid
// depending on external RNG crates and guarantee deterministic,
// reproducible corpora given the same seed.
//
// **Critical constraint: determinism.** Every method on `StreamRng` must
// produce identical output given the same prior state, regardless of
// platform, compiler version, or optimization level. The core generator is
// pure integer arithmetic; floats appear only in the final [0, 1) mapping,
// which is exact (a 32-bit integer divided by 2^32 fits an f64 mantissa).

use serde::{Deserialize, Serialize};

/// XOR salt for deriving the sampling/presentation stream from a run seed.
///
/// Sampling decisions and display-order shuffles draw from
/// `StreamRng::sampling(seed)` rather than the main generation stream, so
/// reordering output for presentation can never perturb which candidates
/// were generated or selected.
pub const SAMPLE_STREAM_SALT: u32 = 0x9e37_79b9;

/// Mulberry32 PRNG — the project's sole source of randomness.
///
/// All random decisions across word synthesis, phrase assembly, and pool
/// sampling draw from instances of this generator. Each pipeline stage that
/// needs an independent stream owns its own `StreamRng`, seeded
/// deterministically, ensuring reproducible output streams.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamRng {
    state: u32,
}

impl StreamRng {
    /// Create a new PRNG from a 32-bit seed.
    ///
    /// Two `StreamRng` instances created with the same seed produce
    /// identical output sequences.
    pub fn new(seed: u32) -> Self {
        StreamRng { state: seed }
    }

    /// Create the derived sampling/presentation stream for a run seed.
    pub fn sampling(seed: u32) -> Self {
        StreamRng::new(seed ^ SAMPLE_STREAM_SALT)
    }

    /// Generate the next `u32` in the sequence.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Generate a uniform `f64` in [0, 1).
    ///
    /// Every derived draw below goes through this method, so one pipeline
    /// decision always consumes exactly one generator step.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Pick a uniform element from a non-empty slice.
    ///
    /// Panics if `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "pick: empty slice");
        let idx = (self.next_f64() * items.len() as f64) as usize;
        &items[idx]
    }

    /// Generate a uniform random `usize` in `[low, high]` (both inclusive).
    ///
    /// Panics if `low > high`.
    pub fn range_usize_inclusive(&mut self, low: usize, high: usize) -> usize {
        assert!(low <= high, "range_usize_inclusive: low must be <= high");
        let span = (high - low + 1) as f64;
        low + (self.next_f64() * span) as usize
    }

    /// Return `true` with probability `p`, `false` otherwise.
    ///
    /// `p <= 0.0` always returns false, `p >= 1.0` always returns true.
    pub fn random_bool(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Fisher–Yates shuffle, in place.
    ///
    /// Iterates from the last index down, swapping with a uniform index in
    /// `[0, i]`. Consumes exactly `len - 1` generator steps.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        if items.len() < 2 {
            return;
        }
        for i in (1..items.len()).rev() {
            let j = (self.next_f64() * (i + 1) as f64) as usize;
            items.swap(i, j);
        }
    }
}
