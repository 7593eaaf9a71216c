//! Injectable random source
//!
//! Pipe placement is the only gameplay randomness. The simulation asks a
//! `RandomSource` for it so tests can script exact gap positions while the
//! game runs on a seeded PCG stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniformly distributed integers
pub trait RandomSource {
    /// Uniform integer in the half-open range `[low, high)`. Requires `low < high`.
    fn range_u32(&mut self, low: u32, high: u32) -> u32;
}

/// Seeded PCG stream used by the real game
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the platform entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        debug_assert!(low < high, "empty random range {low}..{high}");
        self.rng.random_range(low..high)
    }
}

/// Replays a fixed script of values, cycling when exhausted.
///
/// Values outside the requested range are clamped into it.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns the same value
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRng {
    fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        let value = if self.values.is_empty() {
            low
        } else {
            let v = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            v
        };
        value.clamp(low, high.saturating_sub(1).max(low))
    }
}
