//! Integration tests for bounded status polling

mod common;

use common::{collaborator, fast_budget, Call, ScriptedEngine, StatusStep};
use fraudshare::adapters::data_engine::StatusSample;
use fraudshare::core::poller::{wait_for_status, PollBudget};
use fraudshare::domain::LifecycleError;
use std::time::Duration;

#[tokio::test]
async fn test_status_already_reached() {
    let engine = ScriptedEngine::new().with_statuses("prov-a", vec!["mounted"]);
    let api = engine.client();

    let outcome = wait_for_status(api.as_ref(), &collaborator("prov-a"), "mounted", fast_budget(10))
        .await
        .unwrap();

    assert_eq!(outcome.status, "mounted");
    assert_eq!(outcome.tries, 0);
    assert_eq!(engine.count(&Call::Status("prov-a".to_string())), 1);
}

#[tokio::test]
async fn test_status_reached_after_two_repolls() {
    let engine =
        ScriptedEngine::new().with_statuses("prov-a", vec!["pending", "pending", "mounted"]);
    let api = engine.client();

    let outcome = wait_for_status(api.as_ref(), &collaborator("prov-a"), "mounted", fast_budget(10))
        .await
        .unwrap();

    assert_eq!(outcome.tries, 2);
    assert_eq!(engine.count(&Call::Status("prov-a".to_string())), 3);
}

#[tokio::test]
async fn test_error_status_stops_immediately() {
    let engine = ScriptedEngine::new().with_statuses("prov-a", vec!["pending", "error", "mounted"]);
    let api = engine.client();

    let err = wait_for_status(api.as_ref(), &collaborator("prov-a"), "mounted", fast_budget(10))
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleError::ErrorState { .. }));
    assert_eq!(engine.count(&Call::Status("prov-a".to_string())), 2);
}

#[tokio::test]
async fn test_error_on_first_read() {
    let engine = ScriptedEngine::new().with_statuses("prov-a", vec!["error"]);
    let api = engine.client();

    let err = wait_for_status(api.as_ref(), &collaborator("prov-a"), "exported", fast_budget(10))
        .await
        .unwrap_err();

    match err {
        LifecycleError::ErrorState {
            collaborator_id,
            expected,
        } => {
            assert_eq!(collaborator_id, "prov-a");
            assert_eq!(expected, "exported");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(engine.count(&Call::Status("prov-a".to_string())), 1);
}

#[tokio::test]
async fn test_error_on_last_allowed_read() {
    let engine = ScriptedEngine::new().with_statuses("prov-a", vec!["pending", "error"]);
    let api = engine.client();

    let err = wait_for_status(api.as_ref(), &collaborator("prov-a"), "mounted", fast_budget(1))
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleError::ErrorState { .. }));
}

#[tokio::test]
async fn test_budget_exhausted() {
    let engine = ScriptedEngine::new().with_statuses("prov-a", vec!["pending"]);
    let api = engine.client();

    let err = wait_for_status(api.as_ref(), &collaborator("prov-a"), "mounted", fast_budget(3))
        .await
        .unwrap_err();

    match err {
        LifecycleError::RetriesExhausted {
            tries, last_status, ..
        } => {
            assert_eq!(tries, 3);
            assert_eq!(last_status.as_deref(), Some("pending"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // initial read plus one per re-poll
    assert_eq!(engine.count(&Call::Status("prov-a".to_string())), 4);
}

#[tokio::test]
async fn test_zero_budget_reads_once() {
    let engine = ScriptedEngine::new().with_statuses("prov-a", vec!["pending", "mounted"]);
    let api = engine.client();

    let err = wait_for_status(api.as_ref(), &collaborator("prov-a"), "mounted", fast_budget(0))
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleError::RetriesExhausted { tries: 0, .. }));
    assert_eq!(engine.count(&Call::Status("prov-a".to_string())), 1);
}

#[tokio::test]
async fn test_unreadable_samples_count_as_polls() {
    let engine = ScriptedEngine::new().with_statuses(
        "prov-a",
        vec![
            StatusStep::Sample(StatusSample::unreadable(503, "unavailable")),
            StatusStep::TransportError,
            "mounted".into(),
        ],
    );
    let api = engine.client();

    let outcome = wait_for_status(api.as_ref(), &collaborator("prov-a"), "mounted", fast_budget(5))
        .await
        .unwrap();

    assert_eq!(outcome.tries, 2);
}

#[tokio::test]
async fn test_unreadable_until_exhausted() {
    let engine = ScriptedEngine::new().with_statuses(
        "prov-a",
        vec![StatusStep::Sample(StatusSample::unreadable(500, "boom"))],
    );
    let api = engine.client();

    let err = wait_for_status(api.as_ref(), &collaborator("prov-a"), "mounted", fast_budget(2))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LifecycleError::RetriesExhausted {
            last_status: None,
            tries: 2,
            ..
        }
    ));
}

#[tokio::test]
async fn test_sleeps_between_repolls() {
    let engine = ScriptedEngine::new().with_statuses("prov-a", vec!["pending", "pending", "mounted"]);
    let api = engine.client();
    let budget = PollBudget::new(10, Duration::from_millis(20));

    let start = std::time::Instant::now();
    wait_for_status(api.as_ref(), &collaborator("prov-a"), "mounted", budget)
        .await
        .unwrap();

    assert!(start.elapsed() >= Duration::from_millis(40));
}

#[tokio::test(start_paused = true)]
async fn test_one_sleep_per_repoll() {
    let engine = ScriptedEngine::new()
        .with_statuses("prov-a", vec!["pending", "pending", "pending", "mounted"]);
    let api = engine.client();
    let interval = Duration::from_secs(1);

    let start = tokio::time::Instant::now();
    let outcome = wait_for_status(
        api.as_ref(),
        &collaborator("prov-a"),
        "mounted",
        PollBudget::new(10, interval),
    )
    .await
    .unwrap();

    assert_eq!(outcome.tries, 3);
    assert_eq!(start.elapsed(), interval * 3);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_budget_sleeps_max_tries_times() {
    let engine = ScriptedEngine::new().with_statuses("prov-a", vec!["pending"]);
    let api = engine.client();
    let interval = Duration::from_secs(2);

    let start = tokio::time::Instant::now();
    let err = wait_for_status(
        api.as_ref(),
        &collaborator("prov-a"),
        "mounted",
        PollBudget::new(4, interval),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LifecycleError::RetriesExhausted { tries: 4, .. }));
    assert_eq!(start.elapsed(), interval * 4);
}

#[tokio::test(start_paused = true)]
async fn test_error_status_never_sleeps() {
    let engine = ScriptedEngine::new().with_statuses("prov-a", vec!["error"]);
    let api = engine.client();

    let start = tokio::time::Instant::now();
    let err = wait_for_status(
        api.as_ref(),
        &collaborator("prov-a"),
        "mounted",
        PollBudget::new(10, Duration::from_secs(5)),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LifecycleError::ErrorState { .. }));
    assert_eq!(start.elapsed(), Duration::ZERO);
}
