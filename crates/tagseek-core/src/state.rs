//! Run state, cycle outcomes and the end-of-run summary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutable state for one invocation of the guild loop.
///
/// Owned by the loop and passed down by `&mut`; nothing else touches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    keep_running: bool,
    failure_count: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            keep_running: true,
            failure_count: 0,
        }
    }

    pub fn keep_running(&self) -> bool {
        self.keep_running
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    pub fn stop(&mut self) {
        self.keep_running = false;
    }

    /// A create-phase error.
    pub fn record_failure(&mut self) {
        self.failure_count = self.failure_count.saturating_add(1);
    }

    /// A cycle that reached a match or a completed discard.
    pub fn record_resolved(&mut self) {
        self.failure_count = 0;
    }
}

/// Cooperative cancellation flag shared with signal handlers.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// How one create→test→dispose cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Id landed in the experiment; the guild is kept.
    Matched { guild_id: String },
    /// Id missed; the delete call was issued.
    Discarded { guild_id: String, deleted: bool },
    /// Create failed or returned no id.
    Failed { reason: String },
}

impl CycleOutcome {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, CycleOutcome::Failed { .. })
    }
}

/// Totals reported when the loop exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub attempts: u64,
    pub matched: Vec<String>,
    pub discarded: Vec<String>,
    pub create_failures: u64,
    pub delete_failures: u64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            attempts: 0,
            matched: Vec::new(),
            discarded: Vec::new(),
            create_failures: 0,
            delete_failures: 0,
        }
    }

    pub fn record(&mut self, outcome: &CycleOutcome) {
        self.attempts += 1;
        match outcome {
            CycleOutcome::Matched { guild_id } => self.matched.push(guild_id.clone()),
            CycleOutcome::Discarded { guild_id, deleted } => {
                self.discarded.push(guild_id.clone());
                if !deleted {
                    self.delete_failures += 1;
                }
            }
            CycleOutcome::Failed { .. } => self.create_failures += 1,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
