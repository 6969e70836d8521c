//! Seeded random source
//!
//! Everything procedural (cave shape, pillars, crash particles) draws from a
//! single [`RandomSource`] owned by the simulation. Same seed and same call
//! sequence always produce the same values.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic uniform source in `[0, 1)`
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u32,
    rng: Pcg32,
}

impl RandomSource {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed as u64),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Next uniform value in `[0, 1)`
    pub fn next(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform value in `[-amplitude, amplitude]`
    pub fn signed_noise(&mut self, amplitude: f32) -> f32 {
        (self.next() - 0.5) * 2.0 * amplitude
    }

    /// Uniform value in `[min, max)`
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }

    /// True with probability `p`; values above 1 always pass, values at or below 0 never do
    pub fn chance(&mut self, p: f32) -> bool {
        self.next() < p
    }
}
