//! Injectable randomness
//!
//! Every draw the simulation makes goes through [`RandomSource`], so a seeded
//! generator reproduces a run exactly.

use rand::{Rng, RngCore};

/// Capability the spawner and color policy draw from
pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn next_uniform(&mut self) -> f64;

    /// Uniform integer in [0, 100)
    fn next_percentile(&mut self) -> u32;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_percentile(&mut self) -> u32 {
        self.random_range(0..100)
    }
}
