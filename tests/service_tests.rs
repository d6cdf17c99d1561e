//! Integration tests for the timer service loop.
//!
//! These tests run the real `IntervalTicker` with a short tick period and
//! observe the service through `TimerHandle` only.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{timeout, Duration};

use study_timer::sound::MockAlertPlayer;
use study_timer::timer::{
    CompletionPolicy, ServiceOptions, TimerError, TimerEvent, TimerHandle, TimerService,
};
use study_timer::types::{TimerMode, TimerSettings, TimerState, TimerStatus};

// ============================================================================
// Test Helpers
// ============================================================================

fn options(policy: CompletionPolicy) -> ServiceOptions {
    ServiceOptions {
        tick_period: Duration::from_millis(1),
        completion_policy: policy,
    }
}

fn short_cycle() -> TimerSettings {
    TimerSettings {
        focus_minutes: 1,
        short_break_minutes: 1,
        long_break_minutes: 1,
        rounds_per_cycle: 2,
    }
}

async fn wait_until(
    handle: &TimerHandle,
    predicate: impl FnMut(&TimerState) -> bool,
) -> TimerState {
    let mut rx: watch::Receiver<TimerState> = handle.subscribe();
    let state = timeout(Duration::from_secs(10), rx.wait_for(predicate))
        .await
        .expect("state reached within timeout")
        .expect("service alive")
        .clone();
    state
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_full_cycle_through_handle() {
    let alert = Arc::new(MockAlertPlayer::new());
    let (service, handle, mut events) = TimerService::new(
        short_cycle(),
        alert.clone(),
        options(CompletionPolicy::AutoContinue),
    );
    let task = tokio::spawn(service.run());

    handle.start().unwrap();
    let state = wait_until(&handle, |s| s.status == TimerStatus::Completed).await;
    assert_eq!(state.mode, TimerMode::ShortBreak);

    handle.acknowledge_completion().unwrap();
    let state = wait_until(&handle, |s| {
        s.status == TimerStatus::Completed && s.mode == TimerMode::Focus
    })
    .await;
    assert_eq!(state.current_round, 2);

    handle.acknowledge_completion().unwrap();
    let state = wait_until(&handle, |s| {
        s.status == TimerStatus::Completed && s.mode == TimerMode::LongBreak
    })
    .await;
    assert_eq!(state.current_round, 2);

    handle.shutdown().unwrap();
    task.await.unwrap();

    let mut completed = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let TimerEvent::Completed { finished, .. } = event {
            completed.push(finished);
        }
    }
    assert_eq!(
        completed,
        vec![TimerMode::Focus, TimerMode::ShortBreak, TimerMode::Focus]
    );
    assert_eq!(alert.play_count(), 3);
}

#[tokio::test]
async fn test_return_to_idle_waits_for_start() {
    let (service, handle, _events) = TimerService::new(
        short_cycle(),
        Arc::new(MockAlertPlayer::new()),
        options(CompletionPolicy::ReturnToIdle),
    );
    let task = tokio::spawn(service.run());

    handle.start().unwrap();
    wait_until(&handle, |s| s.status == TimerStatus::Completed).await;

    handle.acknowledge_completion().unwrap();
    let state = wait_until(&handle, |s| s.status == TimerStatus::Idle).await;
    assert_eq!(state.mode, TimerMode::ShortBreak);
    assert_eq!(state.remaining_seconds, 60);

    handle.shutdown().unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_mode_change_while_running() {
    let (service, handle, _events) = TimerService::new(
        TimerSettings::default(),
        Arc::new(MockAlertPlayer::new()),
        options(CompletionPolicy::AutoContinue),
    );
    let task = tokio::spawn(service.run());

    handle.start().unwrap();
    wait_until(&handle, |s| s.remaining_seconds < 25 * 60).await;
    handle.change_mode(TimerMode::ShortBreak).unwrap();

    let state = wait_until(&handle, |s| s.mode == TimerMode::ShortBreak).await;
    assert_eq!(state.status, TimerStatus::Idle);
    assert_eq!(state.remaining_seconds, 5 * 60);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(handle.state().remaining_seconds, 5 * 60);

    handle.shutdown().unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_shutdown_resets_countdown() {
    let (service, handle, _events) = TimerService::new(
        TimerSettings::default(),
        Arc::new(MockAlertPlayer::new()),
        options(CompletionPolicy::AutoContinue),
    );
    let task = tokio::spawn(service.run());

    handle.start().unwrap();
    wait_until(&handle, |s| s.remaining_seconds < 25 * 60 - 2).await;

    handle.shutdown().unwrap();
    task.await.unwrap();

    let state = handle.state();
    assert_eq!(state.status, TimerStatus::Idle);
    assert_eq!(handle.snapshot().await, Err(TimerError::ServiceStopped));
    assert_eq!(state.formatted_remaining(), "25:00");
    assert_eq!(handle.pause(), Err(TimerError::ServiceStopped));
}
