use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer source consumed by the engine.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`.  `bound` is always at least 1.
    fn random_int(&mut self, bound: u32) -> u32;
}

/// `RandomSource` backed by any `rand` generator.
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn random_int(&mut self, bound: u32) -> u32 {
        self.0.gen_range(0..bound)
    }
}
