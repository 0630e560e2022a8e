//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! Each run (epoch) owns one `SimRng`, seeded by:
//!
//!   seed = global_seed XOR (stream * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio, so
//! consecutive epoch numbers land far apart in seed space.  Runs therefore
//! share no RNG state and can execute on any thread in any order while still
//! producing identical tapes.
//!
//! Within a run the draw order is fixed: the arrival tape consumes the
//! stream first (gap, client, commission, service per arrival), then any
//! stochastic policy samples from what remains.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::Exp;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded random source for one simulation run.
///
/// The type is `Send` but not shared: each run holds its own.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Independent stream `stream` derived from `global_seed`.
    ///
    /// Used to give every epoch its own generator without threading a
    /// parent RNG through the (possibly parallel) epoch loop.
    pub fn for_stream(global_seed: u64, stream: u64) -> Self {
        let seed = global_seed ^ stream.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Exponentially distributed duration with the given mean, rounded to
    /// the nearest whole second.
    ///
    /// A non-positive or non-finite mean yields 0 without consuming a draw.
    pub fn exponential_secs(&mut self, mean_secs: f64) -> u64 {
        if !(mean_secs > 0.0) || !mean_secs.is_finite() {
            return 0;
        }
        match Exp::new(1.0 / mean_secs) {
            Ok(exp) => exp.sample(&mut self.0).round() as u64,
            Err(_) => 0,
        }
    }

    /// Uniform index in `0..n`.  `n` must be non-zero.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Sample an index with probability proportional to `weights`.
    ///
    /// Returns `None` if the weights are empty, negative, or sum to zero.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        WeightedIndex::new(weights)
            .ok()
            .map(|dist| dist.sample(&mut self.0))
    }
}
