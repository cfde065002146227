//! Cancellable timed retry.
//!
//! `poll_until` samples a fallible condition at a fixed interval until it
//! yields a value, the deadline passes, or the caller cancels. The first sample
//! happens one interval after the call, mirroring a browser `setInterval`.

use std::{future::Future, time::Duration};

use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{event, Level};

const MIN_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
  pub interval: Duration,
  pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
  Ready(T),
  TimedOut,
  Cancelled,
}

/// Calls `sample` every `policy.interval` until it returns `Some`.
///
/// Stops with `TimedOut` once `policy.timeout` has elapsed since the call, and
/// with `Cancelled` as soon as `cancel` fires. A sample still in flight when
/// either happens is dropped.
#[allow(clippy::redundant_pub_crate)] // Select macro propagates this
pub async fn poll_until<T, F, Fut>(
  policy: PollPolicy,
  cancel: &CancellationToken,
  mut sample: F,
) -> PollOutcome<T>
where
  T: Send,
  F: FnMut() -> Fut + Send,
  Fut: Future<Output = Option<T>> + Send,
{
  // `interval_at` panics on a zero period.
  let period = policy.interval.max(MIN_INTERVAL);
  let start = Instant::now();
  let deadline = start + policy.timeout;
  let mut ticker = interval_at(start + period, period);
  ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

  let mut samples: u32 = 0;
  loop {
    tokio::select! {
      biased;
      () = cancel.cancelled() => return PollOutcome::Cancelled,
      () = sleep_until(deadline) => {
        event!(Level::DEBUG, "Polling timed out after {samples} samples.");
        return PollOutcome::TimedOut;
      },
      _ = ticker.tick() => {},
    }

    samples += 1;
    tokio::select! {
      biased;
      () = cancel.cancelled() => return PollOutcome::Cancelled,
      () = sleep_until(deadline) => return PollOutcome::TimedOut,
      found = sample() => {
        if let Some(value) = found {
          return PollOutcome::Ready(value);
        }
      },
    }
  }
}
