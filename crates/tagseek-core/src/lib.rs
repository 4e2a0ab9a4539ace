pub mod api;
pub mod backoff;
pub mod error;
pub mod experiment;
pub mod hash;
pub mod jitter;
pub mod models;
pub mod state;

pub use api::GuildApi;
pub use backoff::{BackoffConfig, BackoffPolicy};
pub use error::{ConfigError, GuildError};
pub use experiment::{parse_ranges, BucketRange, ExperimentConfig, BUCKET_MODULUS};
pub use hash::{murmur3_32, murmur3_32_str};
pub use jitter::{FixedJitter, JitterSource, RngJitter, StdJitter};
pub use models::{CreateGuildRequest, Guild, GuildTemplate};
pub use state::{CycleOutcome, RunState, RunSummary, StopHandle};
