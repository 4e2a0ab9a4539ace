//! Timed suspension used between steps of the guild loop.

use std::future::Future;
use std::time::Duration;

/// Suspends the current task for at least `duration`.
///
/// Cancellation is never preempted: callers check their stop flag after the
/// sleep resolves.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
