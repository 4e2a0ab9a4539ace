//! Single-cycle lifecycle tests.

mod common;

use common::*;
use tagseek_core::{CycleOutcome, ExperimentConfig, FixedJitter, RunState};

#[tokio::test]
async fn test_matching_guild_is_kept_and_stops_run() {
    let log = new_log();
    let mut lifecycle = lifecycle(
        FakeGuildApi::new(log.clone(), Step::Match),
        RecordingSleeper::new(log.clone()),
        FixedJitter::none(),
        true,
    );
    let mut state = RunState::new();

    let outcome = lifecycle.run_cycle(&mut state).await;

    let guild_id = match outcome {
        CycleOutcome::Matched { guild_id } => guild_id,
        other => panic!("expected a match, got {:?}", other),
    };
    assert!(ExperimentConfig::default().in_experiment(&guild_id));
    assert!(!state.keep_running());
    assert_eq!(events(&log), vec![Event::Created(guild_id)]);
}

#[tokio::test]
async fn test_matching_guild_without_stop_on_found_resolves() {
    let log = new_log();
    let mut lifecycle = lifecycle(
        FakeGuildApi::new(log.clone(), Step::Match).with_script(&[Step::Fail, Step::Fail]),
        RecordingSleeper::new(log.clone()),
        FixedJitter::none(),
        false,
    );
    let mut state = RunState::new();

    lifecycle.run_cycle(&mut state).await;
    lifecycle.run_cycle(&mut state).await;
    assert_eq!(state.failure_count(), 2);

    let outcome = lifecycle.run_cycle(&mut state).await;
    assert!(matches!(outcome, CycleOutcome::Matched { .. }));
    assert!(state.keep_running());
    assert_eq!(state.failure_count(), 0);
    assert!(deleted_ids(&log).is_empty());
}

#[tokio::test]
async fn test_missing_guild_is_deleted_after_delay() {
    let log = new_log();
    let mut lifecycle = lifecycle(
        FakeGuildApi::new(log.clone(), Step::Miss),
        RecordingSleeper::new(log.clone()),
        FixedJitter::full(),
        true,
    );
    let mut state = RunState::new();

    let outcome = lifecycle.run_cycle(&mut state).await;

    let created = created_ids(&log);
    assert_eq!(created.len(), 1);
    assert!(!ExperimentConfig::default().in_experiment(&created[0]));
    assert_eq!(
        outcome,
        CycleOutcome::Discarded {
            guild_id: created[0].clone(),
            deleted: true,
        }
    );
    assert_eq!(
        events(&log),
        vec![
            Event::Created(created[0].clone()),
            Event::Slept(ms(DELETE_DELAY_MS + JITTER_MS)),
            Event::Deleted(created[0].clone()),
        ]
    );
    assert!(state.keep_running());
    assert_eq!(state.failure_count(), 0);
}

#[tokio::test]
async fn test_failing_create_increments_failure_count() {
    let log = new_log();
    let mut lifecycle = lifecycle(
        FakeGuildApi::new(log.clone(), Step::Fail),
        RecordingSleeper::new(log.clone()),
        FixedJitter::none(),
        true,
    );
    let mut state = RunState::new();

    for expected in 1..=10 {
        let outcome = lifecycle.run_cycle(&mut state).await;
        assert!(!outcome.is_resolved());
        assert_eq!(state.failure_count(), expected);
        assert!(state.keep_running());
    }
    assert!(deleted_ids(&log).is_empty());
    assert!(sleeps(&log).is_empty());
}

#[tokio::test]
async fn test_empty_id_counts_as_create_failure() {
    let log = new_log();
    let mut lifecycle = lifecycle(
        FakeGuildApi::new(log.clone(), Step::MissingId),
        RecordingSleeper::new(log.clone()),
        FixedJitter::none(),
        true,
    );
    let mut state = RunState::new();

    let outcome = lifecycle.run_cycle(&mut state).await;

    match outcome {
        CycleOutcome::Failed { reason } => assert!(reason.contains("without an id")),
        other => panic!("expected a failure, got {:?}", other),
    }
    assert_eq!(state.failure_count(), 1);
    assert!(deleted_ids(&log).is_empty());
}

#[tokio::test]
async fn test_delete_failure_is_not_counted() {
    let log = new_log();
    let mut lifecycle = lifecycle(
        FakeGuildApi::new(log.clone(), Step::Miss)
            .with_script(&[Step::Fail])
            .with_failing_deletes(),
        RecordingSleeper::new(log.clone()),
        FixedJitter::none(),
        true,
    );
    let mut state = RunState::new();

    lifecycle.run_cycle(&mut state).await;
    assert_eq!(state.failure_count(), 1);

    let outcome = lifecycle.run_cycle(&mut state).await;
    assert!(matches!(
        outcome,
        CycleOutcome::Discarded { deleted: false, .. }
    ));
    assert_eq!(state.failure_count(), 0);
    assert_eq!(deleted_ids(&log).len(), 1);
}
