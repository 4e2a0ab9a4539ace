//! Guild hunting loop.
//!
//! Runs lifecycle cycles back to back, one at a time, pacing them with the
//! backoff policy until a match stops the run, the stop handle fires, or the
//! attempt limit is reached.

use tagseek_core::{GuildApi, JitterSource, RunState, RunSummary, StopHandle};

use crate::lifecycle::Lifecycle;
use crate::sleeper::Sleeper;

/// Start the guild loop. The first cycle runs immediately.
///
/// `stop` is polled before each wait and before each cycle; an in-flight
/// API call or wait is always allowed to finish.
pub async fn run_guild_loop<A, S, J>(
    lifecycle: &mut Lifecycle<A, S, J>,
    stop: &StopHandle,
    max_attempts: Option<u64>,
) -> RunSummary
where
    A: GuildApi,
    S: Sleeper,
    J: JitterSource,
{
    log_banner(lifecycle, max_attempts);

    let mut state = RunState::new();
    let mut summary = RunSummary::new();

    loop {
        if !should_continue(&mut state, stop) {
            break;
        }

        let outcome = lifecycle.run_cycle(&mut state).await;
        summary.record(&outcome);

        if let Some(limit) = max_attempts {
            if summary.attempts >= limit {
                tracing::info!("Reached attempt limit of {}", limit);
                state.stop();
            }
        }

        if !should_continue(&mut state, stop) {
            break;
        }

        let delay = lifecycle.next_delay(state.failure_count());
        tracing::info!("Next attempt in {:.1}s", delay.as_secs_f64());
        lifecycle.sleep(delay).await;
    }

    summary.finish();
    tracing::info!(
        "Guild loop stopped after {} attempts ({} matched, {} discarded, {} create failures)",
        summary.attempts,
        summary.matched.len(),
        summary.discarded.len(),
        summary.create_failures
    );
    summary
}

fn should_continue(state: &mut RunState, stop: &StopHandle) -> bool {
    if stop.is_stopped() && state.keep_running() {
        tracing::info!("Stop requested, ending guild loop");
        state.stop();
    }
    state.keep_running()
}

fn log_banner<A, S, J>(lifecycle: &Lifecycle<A, S, J>, max_attempts: Option<u64>)
where
    A: GuildApi,
    S: Sleeper,
    J: JitterSource,
{
    let backoff = lifecycle.backoff().config();
    let experiment = lifecycle.experiment();
    let ranges: Vec<String> = experiment.ranges.iter().map(ToString::to_string).collect();

    tracing::info!("===== Guild loop =====");
    tracing::info!(" Base interval : {:.1}s", backoff.base_interval.as_secs_f64());
    tracing::info!(" Max jitter    : {:.1}s", backoff.max_additional_jitter.as_secs_f64());
    tracing::info!(" Max backoff   : x{}", backoff.max_backoff_multiplier);
    tracing::info!(" Experiment    : {:?} {}", experiment.seed, ranges.join(" "));
    tracing::info!(" Stop on found : {}", lifecycle.stop_on_found());
    if let Some(limit) = max_attempts {
        tracing::info!(" Max attempts  : {}", limit);
    }
}
