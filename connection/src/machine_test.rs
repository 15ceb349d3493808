use super::*;

use ConnectionAction as A;
use ConnectionEvent as E;

const ALL_EVENTS: [ConnectionEvent; 6] = [E::Start, E::Opened, E::Closed, E::Errored, E::RetryElapsed, E::Shutdown];

fn started() -> ConnectionMachine {
    let mut m = ConnectionMachine::default();
    assert_eq!(m.handle(E::Start), vec![A::Open]);
    m
}

fn connected() -> ConnectionMachine {
    let mut m = started();
    assert!(m.handle(E::Opened).is_empty());
    m
}

fn retry(attempt: u32) -> ConnectionAction {
    A::ScheduleRetry { delay: DEFAULT_RETRY_DELAY, attempt }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_policy_is_five_retries_three_seconds() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_retries, 5);
    assert_eq!(policy.delay, Duration::from_secs(3));
}

#[test]
fn new_machine_is_idle_and_disconnected() {
    let m = ConnectionMachine::default();
    assert_eq!(m.phase(), Phase::Idle);
    assert_eq!(m.status(), ConnectionStatus::Disconnected);
    assert_eq!(m.retry_count(), 0);
    assert!(!m.is_connected());
}

#[test]
fn status_labels() {
    assert_eq!(ConnectionStatus::Connected.label(), "Connected");
    assert_eq!(ConnectionStatus::Connecting.label(), "Connecting...");
    assert_eq!(ConnectionStatus::Disconnected.label(), "Disconnected");
}

// =============================================================
// Happy path
// =============================================================

#[test]
fn start_requests_open_and_reports_connecting() {
    let m = started();
    assert_eq!(m.phase(), Phase::Connecting);
    assert_eq!(m.status(), ConnectionStatus::Connecting);
    assert!(!m.is_connected());
}

#[test]
fn opened_marks_connected() {
    let m = connected();
    assert_eq!(m.phase(), Phase::Connected);
    assert!(m.is_connected());
}

#[test]
fn start_while_connected_is_ignored() {
    let mut m = connected();
    assert!(m.handle(E::Start).is_empty());
    assert!(m.is_connected());
}

// =============================================================
// Loss and retry
// =============================================================

#[test]
fn close_while_connected_schedules_first_retry() {
    let mut m = connected();
    assert_eq!(m.handle(E::Closed), vec![A::Release, retry(1)]);
    assert_eq!(m.phase(), Phase::Backoff);
    assert_eq!(m.retry_count(), 1);
    assert!(!m.is_connected());
}

#[test]
fn error_closes_transport_before_scheduling() {
    let mut m = connected();
    assert_eq!(m.handle(E::Errored), vec![A::Close, retry(1)]);
    assert!(!m.is_connected());
}

#[test]
fn close_after_error_does_not_schedule_twice() {
    let mut m = connected();
    m.handle(E::Errored);
    assert!(m.handle(E::Closed).is_empty());
    assert_eq!(m.retry_count(), 1);
}

#[test]
fn retry_elapsed_reopens() {
    let mut m = connected();
    m.handle(E::Closed);
    assert_eq!(m.handle(E::RetryElapsed), vec![A::Open]);
    assert_eq!(m.phase(), Phase::Connecting);
    assert_eq!(m.retry_count(), 1);
}

#[test]
fn retry_elapsed_outside_backoff_is_ignored() {
    let mut m = connected();
    assert!(m.handle(E::RetryElapsed).is_empty());
    assert!(m.is_connected());
}

#[test]
fn successful_reopen_resets_retry_count() {
    let mut m = connected();
    m.handle(E::Closed);
    m.handle(E::RetryElapsed);
    m.handle(E::Opened);
    assert_eq!(m.retry_count(), 0);
    assert!(m.is_connected());
}

#[test]
fn retries_stop_after_five_attempts() {
    let mut m = connected();
    let mut scheduled = Vec::new();

    for _ in 0..10 {
        for action in m.handle(E::Closed) {
            if let A::ScheduleRetry { delay, attempt } = action {
                assert_eq!(delay, DEFAULT_RETRY_DELAY);
                scheduled.push(attempt);
            }
        }
        m.handle(E::RetryElapsed);
    }

    assert_eq!(scheduled, vec![1, 2, 3, 4, 5]);
    assert_eq!(m.phase(), Phase::Exhausted);
    assert_eq!(m.retry_count(), 5);
    assert_eq!(m.status(), ConnectionStatus::Disconnected);
}

#[test]
fn failed_initial_connect_also_retries() {
    let mut m = started();
    assert_eq!(m.handle(E::Errored), vec![A::Close, retry(1)]);
}

#[test]
fn custom_policy_is_honoured() {
    let policy = RetryPolicy { max_retries: 1, delay: Duration::from_millis(10) };
    let mut m = ConnectionMachine::new(policy);
    m.handle(E::Start);
    assert_eq!(
        m.handle(E::Closed),
        vec![A::Release, A::ScheduleRetry { delay: Duration::from_millis(10), attempt: 1 }]
    );
    m.handle(E::RetryElapsed);
    assert_eq!(m.handle(E::Closed), vec![A::Release]);
    assert_eq!(m.phase(), Phase::Exhausted);
}

#[test]
fn start_after_exhaustion_restarts_with_fresh_count() {
    let policy = RetryPolicy { max_retries: 0, delay: DEFAULT_RETRY_DELAY };
    let mut m = ConnectionMachine::new(policy);
    m.handle(E::Start);
    m.handle(E::Closed);
    assert_eq!(m.phase(), Phase::Exhausted);

    assert_eq!(m.handle(E::Start), vec![A::Open]);
    assert_eq!(m.phase(), Phase::Connecting);
    assert_eq!(m.retry_count(), 0);
}

// =============================================================
// Shutdown
// =============================================================

#[test]
fn shutdown_while_connected_closes_once() {
    let mut m = connected();
    assert_eq!(m.handle(E::Shutdown), vec![A::Close]);
    assert!(m.handle(E::Shutdown).is_empty());
    assert_eq!(m.phase(), Phase::Stopped);
}

#[test]
fn shutdown_during_backoff_cancels_timer() {
    let mut m = connected();
    m.handle(E::Closed);
    assert_eq!(m.handle(E::Shutdown), vec![A::CancelRetry]);
}

#[test]
fn stopped_absorbs_every_event() {
    let mut m = connected();
    m.handle(E::Shutdown);
    for event in ALL_EVENTS {
        assert!(m.handle(event).is_empty(), "{event:?} should be ignored");
    }
    assert_eq!(m.phase(), Phase::Stopped);
}

// =============================================================
// Exhaustive event sequences
// =============================================================

fn for_each_sequence(len: usize, f: &mut impl FnMut(&[ConnectionEvent])) {
    let mut seq = Vec::with_capacity(len);
    walk(len, &mut seq, f);
}

fn walk(remaining: usize, seq: &mut Vec<ConnectionEvent>, f: &mut impl FnMut(&[ConnectionEvent])) {
    f(seq);
    if remaining == 0 {
        return;
    }
    for event in ALL_EVENTS {
        seq.push(event);
        walk(remaining - 1, seq, f);
        seq.pop();
    }
}

#[test]
fn connected_only_between_open_and_close_or_error() {
    for_each_sequence(6, &mut |seq| {
        let mut m = ConnectionMachine::default();
        let mut was_connected = false;
        for &event in seq {
            m.handle(event);
            let now = m.is_connected();
            if now && !was_connected {
                assert_eq!(event, E::Opened, "became connected on {event:?} in {seq:?}");
            }
            if matches!(event, E::Closed | E::Errored | E::Shutdown) {
                assert!(!now, "still connected after {event:?} in {seq:?}");
            }
            if was_connected && !now {
                assert!(matches!(event, E::Closed | E::Errored | E::Shutdown), "dropped on {event:?} in {seq:?}");
            }
            was_connected = now;
        }
    });
}

#[test]
fn retry_count_is_capped_and_monotonic_between_opens() {
    for_each_sequence(7, &mut |seq| {
        let mut m = ConnectionMachine::new(RetryPolicy { max_retries: 2, delay: DEFAULT_RETRY_DELAY });
        let mut previous = 0;
        let mut scheduled_since_open = 0;
        for &event in seq {
            let actions = m.handle(event);
            scheduled_since_open += actions.iter().filter(|a| matches!(a, A::ScheduleRetry { .. })).count();
            if m.is_connected() || m.retry_count() < previous {
                assert_eq!(m.retry_count(), 0, "reset outside open/start in {seq:?}");
                scheduled_since_open = 0;
            }
            assert!(m.retry_count() <= 2, "cap exceeded in {seq:?}");
            assert!(scheduled_since_open <= 2, "too many retries in {seq:?}");
            previous = m.retry_count();
        }
    });
}
