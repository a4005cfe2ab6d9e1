//! Entropy sources for session targets.
//!
//! Both sources feed raw 32-bit words into
//! [`hilo_engine::sample_target`], which owns the unbiased mapping onto
//! `1..=100`.

use std::convert::Infallible;

use hilo_engine::{GameError, TargetSource, sample_target};
use parking_lot::Mutex;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng, TryRngCore};

/// Algorithm name reported for seeded runs.
pub const SEEDED_RNG_ALGORITHM: &str = "StdRng";

/// Draws targets from the operating system's entropy source.
///
/// Stateless, so concurrent draws need no coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsTargetSource;

impl TargetSource for OsTargetSource {
    fn draw_target(&self) -> Result<u32, GameError> {
        sample_target(|| OsRng.try_next_u32()).map_err(GameError::entropy_unavailable)
    }
}

/// Deterministic target sequence from a `u64` seed.
///
/// Draws are serialized through a mutex; the sequence is reproducible for a
/// given seed but the interleaving between concurrent callers is not.
#[derive(Debug)]
pub struct SeededTargetSource {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl SeededTargetSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TargetSource for SeededTargetSource {
    fn draw_target(&self) -> Result<u32, GameError> {
        let mut rng = self.rng.lock();
        sample_target(|| Ok::<_, Infallible>(rng.next_u32())).map_err(|never| match never {})
    }
}
