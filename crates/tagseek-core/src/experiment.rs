//! Experiment membership by hashed bucket.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hash::murmur3_32_str;

/// Number of buckets an identifier can hash into.
pub const BUCKET_MODULUS: u32 = 10_000;

/// Half-open bucket range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRange {
    pub min: u32,
    pub max: u32,
}

impl BucketRange {
    pub fn new(min: u32, max: u32) -> Result<Self, ConfigError> {
        if min >= max || max > BUCKET_MODULUS {
            return Err(ConfigError::InvalidRange {
                min,
                max,
                modulus: BUCKET_MODULUS,
            });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, bucket: u32) -> bool {
        bucket >= self.min && bucket < self.max
    }
}

impl fmt::Display for BucketRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}

/// Parses `min-max`, e.g. `60-100`.
impl FromStr for BucketRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::Invalid {
            name: "bucket range",
            reason: format!("expected MIN-MAX, got {:?}", s),
        };
        let (min, max) = s.trim().split_once('-').ok_or_else(invalid)?;
        let min = min.trim().parse().map_err(|_| invalid())?;
        let max = max.trim().parse().map_err(|_| invalid())?;
        Self::new(min, max)
    }
}

/// Parse a comma-separated list of ranges such as `10-20,60-100`.
pub fn parse_ranges(s: &str) -> Result<Vec<BucketRange>, ConfigError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(BucketRange::from_str)
        .collect()
}

/// Seed and bucket ranges describing one experiment rollout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Prefix concatenated in front of the id before hashing.
    pub seed: String,
    pub ranges: Vec<BucketRange>,
}

impl ExperimentConfig {
    pub fn new(seed: impl Into<String>, ranges: Vec<BucketRange>) -> Result<Self, ConfigError> {
        if ranges.is_empty() {
            return Err(ConfigError::NoRanges);
        }
        for range in &ranges {
            BucketRange::new(range.min, range.max)?;
        }
        Ok(Self {
            seed: seed.into(),
            ranges,
        })
    }

    /// Bucket in `[0, BUCKET_MODULUS)` for `id` under this seed.
    pub fn bucket(&self, id: &str) -> u32 {
        let mut key = String::with_capacity(self.seed.len() + id.len());
        key.push_str(&self.seed);
        key.push_str(id);
        murmur3_32_str(&key) % BUCKET_MODULUS
    }

    pub fn contains_bucket(&self, bucket: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(bucket))
    }

    pub fn in_experiment(&self, id: &str) -> bool {
        self.contains_bucket(self.bucket(id))
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: "2025-02_skill_trees:".to_string(),
            ranges: vec![
                BucketRange { min: 10, max: 20 },
                BucketRange { min: 60, max: 100 },
            ],
        }
    }
}
