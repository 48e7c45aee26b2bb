//! Bounded, cancellable polling of device status.
//!
//! Both waits on the driver are the same two-state machine: sleep, read one
//! status byte, and stop once the byte no longer reports "in progress". The
//! loop lives here so the stopping rules (attempt limit, deadline,
//! cancellation) are shared; the driver supplies the single-poll step.
//!
//! The default [`PollPolicy`] has no limit and no deadline, which blocks
//! until the device finishes. A device that never clears its flag hangs the
//! caller under that policy.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{TicError, TicResult};

/// Delay before every status poll unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Which device activity a wait is blocked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitKind {
    Homing,
    Movement,
}

impl fmt::Display for WaitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Homing => f.write_str("homing"),
            Self::Movement => f.write_str("movement"),
        }
    }
}

/// Stopping rules for a status wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Sleep before each poll.
    pub interval: Duration,
    /// Give up after this many polls.
    pub max_attempts: Option<u32>,
    /// Give up once this much time has passed. The sleep before a poll is
    /// cut short at the deadline, and no poll starts after it.
    pub timeout: Option<Duration>,
}

impl PollPolicy {
    /// Poll forever at `interval`.
    pub const fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.max_attempts.is_some() || self.timeout.is_some()
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::unbounded(DEFAULT_POLL_INTERVAL)
    }
}

/// Shared cancellation flag for a wait running on another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Result of a wait that saw the device finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSummary {
    /// Number of status polls issued, including the final one.
    pub attempts: u32,
    pub elapsed: Duration,
}

/// Repeat `still_waiting` until it returns `Ok(false)`.
///
/// Each round sleeps `policy.interval` (or until the deadline, if sooner)
/// and then calls the step once. The step's errors end the wait immediately
/// and are returned unchanged.
///
/// # Errors
///
/// Returns the step's error, or [`TicError::WaitExhausted`],
/// [`TicError::WaitTimedOut`] or [`TicError::WaitCancelled`] when the policy
/// or the token stops the wait first.
pub fn poll_until<E, F>(
    kind: WaitKind,
    policy: &PollPolicy,
    cancel: Option<&CancelToken>,
    mut still_waiting: F,
) -> TicResult<PollSummary, E>
where
    F: FnMut() -> TicResult<bool, E>,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;
    let cancelled = || cancel.is_some_and(CancelToken::is_cancelled);

    loop {
        if cancelled() {
            warn!("Wait for {} cancelled after {} polls", kind, attempts);
            return Err(TicError::WaitCancelled { kind, attempts });
        }

        if let Some(max_attempts) = policy.max_attempts {
            if attempts >= max_attempts {
                warn!("Gave up waiting for {} after {} polls", kind, attempts);
                return Err(TicError::WaitExhausted { kind, attempts });
            }
        }

        if let Some(elapsed) = deadline_passed(policy, started) {
            return Err(timed_out(kind, attempts, elapsed));
        }

        // Never sleep past the deadline.
        let nap = match policy.timeout {
            Some(timeout) => policy
                .interval
                .min(timeout.saturating_sub(started.elapsed())),
            None => policy.interval,
        };
        thread::sleep(nap);

        if cancelled() {
            warn!("Wait for {} cancelled after {} polls", kind, attempts);
            return Err(TicError::WaitCancelled { kind, attempts });
        }

        if let Some(elapsed) = deadline_passed(policy, started) {
            return Err(timed_out(kind, attempts, elapsed));
        }

        attempts = attempts.saturating_add(1);
        if !still_waiting()? {
            let elapsed = started.elapsed();
            info!("{} complete after {} polls ({:?})", kind, attempts, elapsed);
            return Ok(PollSummary { attempts, elapsed });
        }
        debug!("{} still in progress (poll {})", kind, attempts);
    }
}

/// Elapsed time, if the policy has a deadline and it has passed.
fn deadline_passed(policy: &PollPolicy, started: Instant) -> Option<Duration> {
    let timeout = policy.timeout?;
    let elapsed = started.elapsed();
    (elapsed >= timeout).then_some(elapsed)
}

fn timed_out<E>(kind: WaitKind, attempts: u32, elapsed: Duration) -> TicError<E> {
    warn!(
        "Timed out waiting for {} after {} polls ({:?})",
        kind, attempts, elapsed
    );
    TicError::WaitTimedOut {
        kind,
        attempts,
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Never = std::convert::Infallible;

    fn fast() -> PollPolicy {
        PollPolicy::unbounded(Duration::ZERO)
    }

    #[test]
    fn test_default_policy_is_unbounded() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_millis(500));
        assert!(!policy.is_bounded());
    }

    #[test]
    fn test_stops_when_step_reports_done() -> Result<(), TicError<Never>> {
        let mut remaining = 2;
        let summary = poll_until::<Never, _>(WaitKind::Homing, &fast(), None, || {
            let waiting = remaining > 0;
            remaining -= 1;
            Ok(waiting)
        })?;
        assert_eq!(summary.attempts, 3);
        Ok(())
    }

    #[test]
    fn test_attempt_limit() {
        let policy = fast().with_max_attempts(4);
        let mut calls = 0;
        let result = poll_until::<Never, _>(WaitKind::Movement, &policy, None, || {
            calls += 1;
            Ok(true)
        });
        assert!(matches!(
            result,
            Err(TicError::WaitExhausted {
                kind: WaitKind::Movement,
                attempts: 4
            })
        ));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_zero_timeout_never_polls() {
        let policy = fast().with_timeout(Duration::ZERO);
        let mut calls = 0;
        let result = poll_until::<Never, _>(WaitKind::Homing, &policy, None, || {
            calls += 1;
            Ok(true)
        });
        assert!(matches!(
            result,
            Err(TicError::WaitTimedOut { attempts: 0, .. })
        ));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_timeout_after_some_polls() {
        let policy = PollPolicy::unbounded(Duration::from_millis(5))
            .with_timeout(Duration::from_millis(30));
        let result = poll_until::<Never, _>(WaitKind::Homing, &policy, None, || Ok(true));
        assert!(matches!(result, Err(TicError::WaitTimedOut { .. })));
        if let Err(TicError::WaitTimedOut {
            attempts, elapsed, ..
        }) = result
        {
            assert!(attempts >= 1);
            assert!(elapsed >= Duration::from_millis(30));
        }
    }

    #[test]
    fn test_deadline_shorter_than_interval() {
        let policy = PollPolicy::unbounded(Duration::from_millis(500))
            .with_timeout(Duration::from_millis(40));
        let mut calls = 0;
        let result = poll_until::<Never, _>(WaitKind::Homing, &policy, None, || {
            calls += 1;
            Ok(false)
        });
        assert!(matches!(
            result,
            Err(TicError::WaitTimedOut { attempts: 0, .. })
        ));
        if let Err(TicError::WaitTimedOut { elapsed, .. }) = result {
            assert!(elapsed >= Duration::from_millis(40));
            assert!(elapsed < Duration::from_millis(400));
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_cancelled_before_first_poll() {
        let token = CancelToken::new();
        token.cancel();
        let result =
            poll_until::<Never, _>(WaitKind::Movement, &fast(), Some(&token), || Ok(true));
        assert!(matches!(
            result,
            Err(TicError::WaitCancelled { attempts: 0, .. })
        ));
    }

    #[test]
    fn test_cancel_from_step() {
        let token = CancelToken::new();
        let inner = token.clone();
        let mut calls = 0;
        let result = poll_until::<Never, _>(WaitKind::Movement, &fast(), Some(&token), || {
            calls += 1;
            if calls == 2 {
                inner.cancel();
            }
            Ok(true)
        });
        assert!(matches!(
            result,
            Err(TicError::WaitCancelled { attempts: 2, .. })
        ));
    }

    #[test]
    fn test_step_error_propagates() {
        let result = poll_until::<std::io::Error, _>(WaitKind::Homing, &fast(), None, || {
            Err(TicError::Transport(std::io::Error::other("nack")))
        });
        assert!(matches!(result, Err(TicError::Transport(_))));
    }
}
