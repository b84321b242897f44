// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn retry_config(max_attempts: u32, base_ms: u64, max_ms: u64) -> WatchConfig {
    WatchConfig {
        retry: RetryPolicy {
            max_attempts,
            base: Duration::from_millis(base_ms),
            max: Duration::from_millis(max_ms),
        },
        ..WatchConfig::default()
    }
}

/// Feed `n` fresh failures, returning the retry delay armed by each.
fn fail_times(watcher: &mut BuildWatcher, n: u64) -> Vec<Option<Duration>> {
    (1..=n)
        .map(|revision| {
            let effects = watcher.observe(&failed(revision, "unavailable"));
            armed(&effects).into_iter().find(|(id, _)| *id == retry_timer()).map(|(_, d)| d)
        })
        .collect()
}

#[test]
fn fresh_failure_arms_retry() {
    let mut watcher = setup(false);
    let effects = watcher.observe(&failed(1, "unavailable"));

    assert_eq!(effects, vec![Effect::SetTimer { id: retry_timer(), duration: Duration::from_secs(1) }]);
    assert_eq!(
        watcher.lookup(),
        &BuildLookup::Failed { error: "unavailable".to_string(), attempts: 1 }
    );
    assert!(watcher.is_retry_armed());
}

#[test]
fn stale_failure_is_ignored() {
    let mut watcher = setup(false);
    watcher.observe(&failed(1, "unavailable"));

    assert!(watcher.observe(&failed(1, "unavailable")).is_empty());
    assert_eq!(watcher.failures(), 1);
}

#[test]
fn backoff_doubles_until_attempts_run_out() {
    let mut watcher = setup(false);
    let secs = |s| Some(Duration::from_secs(s));
    assert_eq!(fail_times(&mut watcher, 6), vec![secs(1), secs(2), secs(4), secs(8), secs(16), None]);
    assert_eq!(watcher.failures(), 6);
}

#[test]
fn backoff_is_capped() {
    let mut watcher = setup_with(false, retry_config(10, 1_000, 5_000));
    let delays: Vec<u64> =
        fail_times(&mut watcher, 5).into_iter().flatten().map(|d| d.as_millis() as u64).collect();
    assert_eq!(delays, [1_000, 2_000, 4_000, 5_000, 5_000]);
}

#[test]
fn zero_attempts_never_retries() {
    let mut watcher = setup_with(false, retry_config(0, 1_000, 5_000));
    assert_eq!(fail_times(&mut watcher, 2), vec![None, None]);
    assert!(!watcher.is_retry_armed());
    assert!(watcher.lookup().is_failed());
}

#[test]
fn retry_fire_refreshes() {
    let mut watcher = setup(false);
    watcher.observe(&failed(1, "unavailable"));

    let effects = watcher.on_timer(&retry_timer());
    assert_eq!(effects, vec![Effect::Dispatch { action: BuildAction::refresh(&widgets_target()) }]);
    assert!(!watcher.is_retry_armed());
}

#[test]
fn success_resets_attempts_and_cancels_retry() {
    let mut watcher = setup(false);
    watcher.observe(&failed(1, "unavailable"));
    watcher.observe(&failed(2, "unavailable"));

    let effects = watcher.observe(&loaded(3, vec![]));
    assert_eq!(cancelled(&effects), vec![retry_timer()]);
    assert_eq!(watcher.failures(), 0);
    assert!(watcher.lookup().is_empty());

    // Counting restarts from one
    assert_eq!(fail_times_from(&mut watcher, 4), Some(Duration::from_secs(1)));
}

fn fail_times_from(watcher: &mut BuildWatcher, revision: u64) -> Option<Duration> {
    armed(&watcher.observe(&failed(revision, "unavailable"))).first().map(|(_, d)| *d)
}

#[test]
fn target_change_cancels_pending_retry() {
    let mut watcher = setup(false);
    watcher.observe(&failed(1, "unavailable"));

    let effects = watcher.set_target(WatchTarget::new("acme/widgets", "def456"));
    assert_eq!(cancelled(&effects), vec![retry_timer()]);
    assert_eq!(watcher.failures(), 0);
    assert!(watcher.lookup().is_loading());
}

#[test]
fn failure_keeps_poll_timer() {
    let mut watcher = observed(false, vec![running_build(1, &widgets_target(), 10)]);

    let effects = watcher.observe(&failed(2, "unavailable"));
    assert!(cancelled(&effects).is_empty());
    assert_eq!(watcher.poll_interval(), Some(Duration::from_secs(5)));
    assert_eq!(watcher.indicator(), Indicator::NotAvailable);
}

#[test]
fn returning_to_failed_target_ignores_old_failure() {
    let mut watcher = setup(false);
    watcher.observe(&failed(3, "old outage"));
    let next = WatchTarget::new("acme/widgets", "def456");
    watcher.set_target(next);
    watcher.observe(&loaded(1, vec![]));

    let effects = watcher.set_target(widgets_target());
    assert_eq!(refreshes(&effects), 1);

    // Same entry as before the switch: still waiting on the new refresh
    assert!(watcher.observe(&failed(3, "old outage")).is_empty());
    assert!(watcher.lookup().is_loading());
    assert!(!watcher.is_retry_armed());
    assert_eq!(watcher.failures(), 0);

    // A failure written after the switch still counts
    let effects = watcher.observe(&failed(4, "unavailable"));
    assert_eq!(armed(&effects), vec![(retry_timer(), Duration::from_secs(1))]);
    assert_eq!(watcher.failures(), 1);
}
