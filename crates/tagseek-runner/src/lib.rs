//! Shared library surface for the tagseek runner and its tests.

pub mod config;
pub mod lifecycle;
pub mod loops;
pub mod sleeper;

pub use config::Config;
pub use lifecycle::Lifecycle;
pub use loops::guild_loop::run_guild_loop;
pub use sleeper::{Sleeper, TokioSleeper};
