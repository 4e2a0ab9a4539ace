//! Error types shared by the core, the Discord client and the runner.

use thiserror::Error;

/// Startup configuration problems. Any of these aborts the process before
/// the first cycle runs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("bucket range [{min}, {max}) is empty or exceeds the modulus {modulus}")]
    InvalidRange { min: u32, max: u32, modulus: u32 },
    #[error("experiment has no bucket ranges")]
    NoRanges,
}

/// Guild API failures the lifecycle controller cares to tell apart.
#[derive(Debug, Error)]
pub enum GuildError {
    #[error("guild created without an id")]
    MissingId,
    #[error("guild API returned {status}: {body}")]
    Status { status: u16, body: String },
}
