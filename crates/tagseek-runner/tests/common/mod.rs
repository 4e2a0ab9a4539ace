//! Test doubles for driving the lifecycle without a network or a clock.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use tagseek_core::{
    BackoffConfig, BackoffPolicy, CreateGuildRequest, ExperimentConfig, FixedJitter, Guild,
    GuildApi, StopHandle,
};
use tagseek_runner::{Lifecycle, Sleeper};

pub const BASE_MS: u64 = 1_000;
pub const DELETE_DELAY_MS: u64 = 200;
pub const JITTER_MS: u64 = 500;

/// What the fake API does on one create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Match,
    Miss,
    Fail,
    MissingId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Created(String),
    CreateFailed,
    Deleted(String),
    Slept(Duration),
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

pub fn events(log: &EventLog) -> Vec<Event> {
    log.lock().unwrap().clone()
}

pub fn sleeps(log: &EventLog) -> Vec<Duration> {
    events(log)
        .into_iter()
        .filter_map(|event| match event {
            Event::Slept(duration) => Some(duration),
            _ => None,
        })
        .collect()
}

pub fn deleted_ids(log: &EventLog) -> Vec<String> {
    events(log)
        .into_iter()
        .filter_map(|event| match event {
            Event::Deleted(id) => Some(id),
            _ => None,
        })
        .collect()
}

pub fn created_ids(log: &EventLog) -> Vec<String> {
    events(log)
        .into_iter()
        .filter_map(|event| match event {
            Event::Created(id) => Some(id),
            _ => None,
        })
        .collect()
}

/// In-memory guild API handing out snowflake-like ids with known membership.
pub struct FakeGuildApi {
    log: EventLog,
    experiment: ExperimentConfig,
    script: Mutex<VecDeque<Step>>,
    default_step: Step,
    next_candidate: AtomicU64,
    fail_deletes: bool,
}

impl FakeGuildApi {
    pub fn new(log: EventLog, default_step: Step) -> Self {
        Self {
            log,
            experiment: ExperimentConfig::default(),
            script: Mutex::new(VecDeque::new()),
            default_step,
            next_candidate: AtomicU64::new(1_300_000_000_000_000_000),
            fail_deletes: false,
        }
    }

    /// Steps consumed in order before falling back to the default step.
    pub fn with_script(self, steps: &[Step]) -> Self {
        *self.script.lock().unwrap() = steps.iter().copied().collect();
        self
    }

    pub fn with_failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    fn next_step(&self) -> Step {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default_step)
    }

    /// Next unused id whose membership equals `want_match`.
    fn next_id(&self, want_match: bool) -> String {
        loop {
            let candidate = self.next_candidate.fetch_add(1, Ordering::SeqCst).to_string();
            if self.experiment.in_experiment(&candidate) == want_match {
                return candidate;
            }
        }
    }
}

impl GuildApi for FakeGuildApi {
    async fn create_guild(&self, _request: &CreateGuildRequest) -> Result<Guild> {
        let step = self.next_step();
        let guild = match step {
            Step::Match => Guild::new(self.next_id(true)),
            Step::Miss => Guild::new(self.next_id(false)),
            Step::MissingId => Guild::new(""),
            Step::Fail => {
                self.log.lock().unwrap().push(Event::CreateFailed);
                return Err(anyhow!("create rejected"));
            }
        };
        let event = if guild.id.is_empty() {
            Event::CreateFailed
        } else {
            Event::Created(guild.id.clone())
        };
        self.log.lock().unwrap().push(event);
        Ok(guild)
    }

    async fn delete_guild(&self, guild_id: &str) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(Event::Deleted(guild_id.to_string()));
        if self.fail_deletes {
            return Err(anyhow!("delete rejected"));
        }
        Ok(())
    }
}

/// Records every requested sleep and returns immediately.
pub struct RecordingSleeper {
    log: EventLog,
    stop_on_sleep: Option<StopHandle>,
}

impl RecordingSleeper {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            stop_on_sleep: None,
        }
    }

    /// Fire `stop` whenever a sleep starts, as if Ctrl-C arrived mid-wait.
    pub fn stopping(log: EventLog, stop: StopHandle) -> Self {
        Self {
            log,
            stop_on_sleep: Some(stop),
        }
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.log.lock().unwrap().push(Event::Slept(duration));
        if let Some(stop) = &self.stop_on_sleep {
            stop.stop();
        }
        std::future::ready(())
    }
}

pub fn backoff_config() -> BackoffConfig {
    BackoffConfig {
        base_interval: Duration::from_millis(BASE_MS),
        max_backoff_multiplier: 5.0,
        max_additional_jitter: Duration::from_millis(JITTER_MS),
        delete_delay: Duration::from_millis(DELETE_DELAY_MS),
    }
}

pub type TestLifecycle = Lifecycle<FakeGuildApi, RecordingSleeper, FixedJitter>;

pub fn lifecycle(
    api: FakeGuildApi,
    sleeper: RecordingSleeper,
    jitter: FixedJitter,
    stop_on_found: bool,
) -> TestLifecycle {
    Lifecycle::new(
        api,
        sleeper,
        BackoffPolicy::new(backoff_config(), jitter),
        ExperimentConfig::default(),
        CreateGuildRequest::new("Tag server"),
        stop_on_found,
    )
}

pub fn new_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}
