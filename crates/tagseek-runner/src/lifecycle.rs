//! One create → test → keep-or-delete cycle.

use std::time::Duration;

use anyhow::anyhow;
use tagseek_core::{
    BackoffPolicy, CreateGuildRequest, CycleOutcome, ExperimentConfig, GuildApi, GuildError,
    JitterSource, RunState,
};

use crate::sleeper::Sleeper;

/// Drives single guild attempts against a [`GuildApi`].
pub struct Lifecycle<A, S, J> {
    api: A,
    sleeper: S,
    backoff: BackoffPolicy<J>,
    experiment: ExperimentConfig,
    request: CreateGuildRequest,
    stop_on_found: bool,
}

impl<A, S, J> Lifecycle<A, S, J>
where
    A: GuildApi,
    S: Sleeper,
    J: JitterSource,
{
    pub fn new(
        api: A,
        sleeper: S,
        backoff: BackoffPolicy<J>,
        experiment: ExperimentConfig,
        request: CreateGuildRequest,
        stop_on_found: bool,
    ) -> Self {
        Self {
            api,
            sleeper,
            backoff,
            experiment,
            request,
            stop_on_found,
        }
    }

    pub fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    pub fn backoff(&self) -> &BackoffPolicy<J> {
        &self.backoff
    }

    pub fn stop_on_found(&self) -> bool {
        self.stop_on_found
    }

    /// Wait before the next cycle given the current failure streak.
    pub fn next_delay(&mut self, failure_count: u32) -> Duration {
        self.backoff.next_delay(failure_count)
    }

    pub async fn sleep(&self, duration: Duration) {
        self.sleeper.sleep(duration).await;
    }

    /// Run one cycle and update `state`.
    ///
    /// Exactly one create call is made; a delete call is made only for a
    /// guild outside the experiment, and only once for that guild.
    pub async fn run_cycle(&mut self, state: &mut RunState) -> CycleOutcome {
        tracing::info!("Creating a new guild...");
        let created = match self.api.create_guild(&self.request).await {
            Ok(guild) if guild.id.trim().is_empty() => Err(anyhow!(GuildError::MissingId)),
            other => other,
        };

        let guild = match created {
            Ok(guild) => guild,
            Err(err) => {
                state.record_failure();
                tracing::warn!(
                    "Guild creation failed: {:#} (failure streak {})",
                    err,
                    state.failure_count()
                );
                return CycleOutcome::Failed {
                    reason: format!("{:#}", err),
                };
            }
        };
        tracing::info!("Created guild {}", guild.id);

        let bucket = self.experiment.bucket(&guild.id);
        if self.experiment.contains_bucket(bucket) {
            tracing::info!(
                "Guild {} is in the experiment (bucket {}), keeping it",
                guild.id,
                bucket
            );
            state.record_resolved();
            if self.stop_on_found {
                state.stop();
            }
            return CycleOutcome::Matched { guild_id: guild.id };
        }

        let delay = self.backoff.delete_delay();
        tracing::info!(
            "Guild {} is outside the experiment (bucket {}), deleting in {:.1}s",
            guild.id,
            bucket,
            delay.as_secs_f64()
        );
        self.sleeper.sleep(delay).await;

        // Delete failures are logged only; they never count against backoff.
        let deleted = match self.api.delete_guild(&guild.id).await {
            Ok(()) => {
                tracing::info!("Deleted guild {}", guild.id);
                true
            }
            Err(err) => {
                tracing::warn!("Failed to delete guild {}: {:#}", guild.id, err);
                false
            }
        };
        state.record_resolved();

        CycleOutcome::Discarded {
            guild_id: guild.id,
            deleted,
        }
    }
}
