//! Configuration for an encounter tracker.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for the owner of an encounter.
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    /// RNG seed for reproducible initiative rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl TrackerConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the random source used for initiative rolls.
    pub fn build_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
