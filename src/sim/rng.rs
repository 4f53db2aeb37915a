//! Injectable randomness for the simulation.
//!
//! Every random decision in the crate goes through [`RandomSource`], so a
//! seeded [`SimRng`] reproduces a run exactly and tests can script the draws.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

/// A source of uniform random numbers.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[0, n)`. `n` must be non-zero.
    fn next_below(&mut self, n: u32) -> u32 {
        ((self.next_f64() * n as f64) as u32).min(n.saturating_sub(1))
    }

    /// Returns true with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl<R: Rng> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_below(&mut self, n: u32) -> u32 {
        self.gen_range(0..n)
    }
}

/// Deterministic RNG used by the dashboard.
///
/// Wraps `ChaCha8Rng` so identical seeds give identical runs on every platform.
#[derive(Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    fn next_f64(&mut self) -> f64 {
        self.0.next_f64()
    }

    fn next_below(&mut self, n: u32) -> u32 {
        self.0.next_below(n)
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
///
/// Intended for tests that need to force a particular branch.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted rng needs at least one value");
        Self { values, cursor: 0 }
    }

    /// A source that returns the same draw forever.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
