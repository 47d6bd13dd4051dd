//! RNG module - seeded randomness for the match
//!
//! The computer's fallback move and the "random" first-player option are the
//! only consumers. Everything goes through [`MatchRng`] so a fixed seed
//! reproduces a whole series.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8
#[derive(Debug, Clone)]
pub struct MatchRng {
    inner: ChaCha8Rng,
}

impl MatchRng {
    /// Create a new RNG with the given seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Choose a random element from a slice
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Random boolean with the given probability of true
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }
}
