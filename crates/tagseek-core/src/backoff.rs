//! Linear-capped backoff with additive jitter.
//!
//! Paces every attempt of the guild loop, not only retries: a clean cycle
//! resets the failure count so the steady-state wait is the base interval
//! plus jitter.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::jitter::JitterSource;

/// Growth of the multiplier per consecutive failure.
const MULTIPLIER_STEP: f64 = 0.5;

/// Longest accepted base interval.
pub const MAX_BASE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Largest accepted multiplier cap.
pub const MAX_MULTIPLIER_CAP: f64 = 1_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Wait between attempts when nothing has failed.
    pub base_interval: Duration,
    /// Cap on the multiplier applied to `base_interval`.
    pub max_backoff_multiplier: f64,
    /// Upper bound of the uniform extra delay added to every wait.
    pub max_additional_jitter: Duration,
    /// Fixed part of the wait between a discard decision and the delete call.
    pub delete_delay: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_secs(120),
            max_backoff_multiplier: 5.0,
            max_additional_jitter: Duration::from_secs(5),
            delete_delay: Duration::from_secs(2),
        }
    }
}

impl BackoffConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_backoff_multiplier.is_finite() || self.max_backoff_multiplier < 1.0 {
            return Err(ConfigError::Invalid {
                name: "max_backoff_multiplier",
                reason: format!("must be >= 1, got {}", self.max_backoff_multiplier),
            });
        }
        if self.max_backoff_multiplier > MAX_MULTIPLIER_CAP {
            return Err(ConfigError::Invalid {
                name: "max_backoff_multiplier",
                reason: format!(
                    "must be <= {}, got {}",
                    MAX_MULTIPLIER_CAP, self.max_backoff_multiplier
                ),
            });
        }
        if self.base_interval > MAX_BASE_INTERVAL {
            return Err(ConfigError::Invalid {
                name: "base_interval",
                reason: format!(
                    "must be <= {}s, got {}s",
                    MAX_BASE_INTERVAL.as_secs(),
                    self.base_interval.as_secs()
                ),
            });
        }
        Ok(())
    }

    /// `min(max_backoff_multiplier, 1 + failures * 0.5)`.
    pub fn multiplier(&self, failure_count: u32) -> f64 {
        let grown = 1.0 + f64::from(failure_count) * MULTIPLIER_STEP;
        grown.min(self.max_backoff_multiplier)
    }
}

/// Computes waits from a [`BackoffConfig`] and a jitter source.
#[derive(Debug, Clone)]
pub struct BackoffPolicy<J> {
    config: BackoffConfig,
    jitter: J,
}

impl<J: JitterSource> BackoffPolicy<J> {
    pub fn new(config: BackoffConfig, jitter: J) -> Self {
        Self { config, jitter }
    }

    pub fn config(&self) -> &BackoffConfig {
        &self.config
    }

    /// Wait before the next attempt. Jitter is resampled on every call.
    ///
    /// Saturates at `Duration::MAX` for configs that skipped validation.
    pub fn next_delay(&mut self, failure_count: u32) -> Duration {
        let scaled_secs =
            self.config.base_interval.as_secs_f64() * self.config.multiplier(failure_count);
        let scaled = Duration::try_from_secs_f64(scaled_secs).unwrap_or(Duration::MAX);
        scaled.saturating_add(self.jitter.sample(self.config.max_additional_jitter))
    }

    /// Wait before deleting a discarded guild; unaffected by failures.
    pub fn delete_delay(&mut self) -> Duration {
        self.config
            .delete_delay
            .saturating_add(self.jitter.sample(self.config.max_additional_jitter))
    }
}
