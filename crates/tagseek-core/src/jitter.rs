//! Random jitter sources for retry and deletion delays.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed extra delay.
pub trait JitterSource {
    /// Sample a delay in `[0, max]`.
    fn sample(&mut self, max: Duration) -> Duration;
}

/// Jitter drawn from a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngJitter<R> {
    rng: R,
}

pub type StdJitter = RngJitter<StdRng>;

impl<R: Rng> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngJitter<StdRng> {
    /// Seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> JitterSource for RngJitter<R> {
    fn sample(&mut self, max: Duration) -> Duration {
        if max.is_zero() {
            return Duration::ZERO;
        }
        // random::<f64>() is in [0, 1)
        scale(max, self.rng.random::<f64>())
    }
}

/// Always returns the same fraction of `max`. Useful for deterministic runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter {
    fraction: f64,
}

impl FixedJitter {
    pub fn new(fraction: f64) -> Self {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { fraction }
    }

    pub fn none() -> Self {
        Self::new(0.0)
    }

    pub fn full() -> Self {
        Self::new(1.0)
    }
}

impl JitterSource for FixedJitter {
    fn sample(&mut self, max: Duration) -> Duration {
        scale(max, self.fraction)
    }
}

/// `max * fraction`, never above `max` even where f64 rounding would overflow.
fn scale(max: Duration, fraction: f64) -> Duration {
    Duration::try_from_secs_f64(max.as_secs_f64() * fraction).map_or(max, |scaled| scaled.min(max))
}
