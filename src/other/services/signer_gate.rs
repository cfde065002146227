//! Walks a delegated key from creation to approval.
//!
//! `None -> Creating -> PendingApproval -> Approved | Expired | Rejected`.
//! Only `Approved` leaves anything behind for the caller to persist: the
//! signer UUID.

use std::{fmt, future::Future};

use neynar::{lookup_signer, Neynar};
use tokio_util::sync::CancellationToken;
use tracing::{event, Level};
use types::{
  entities::signer::{Signer, SignerStatus},
  Fid,
};
use utils::poll::{poll_until, PollOutcome, PollPolicy};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerState {
  None,
  Creating,
  PendingApproval {
    signer_uuid: Uuid,
    approval_url: String,
  },
  Approved {
    signer_uuid: Uuid,
  },
  Expired,
  Rejected {
    reason: String,
  },
}

impl fmt::Display for SignerState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::None => f.write_str("no signer"),
      Self::Creating => f.write_str("creating signer"),
      Self::PendingApproval { signer_uuid, .. } => write!(f, "signer {signer_uuid} pending approval"),
      Self::Approved { signer_uuid } => write!(f, "signer {signer_uuid} approved"),
      Self::Expired => f.write_str("signer approval expired"),
      Self::Rejected { reason } => write!(f, "signer rejected: {reason}"),
    }
  }
}

/// Where the gate reads signer status from.
pub trait SignerStatusSource {
  fn signer_status(&self, signer_uuid: Uuid) -> impl Future<Output = neynar::Result<Signer>> + Send;
}

impl SignerStatusSource for Neynar {
  async fn signer_status(&self, signer_uuid: Uuid) -> neynar::Result<Signer> {
    lookup_signer::act(self, signer_uuid).await
  }
}

/// Re-validates a previously approved signer. Anything but an approval bound
/// to `expected_fid` sends the caller back to `None`, and so does a signer
/// Neynar no longer knows about.
///
/// # Errors
///
/// Any other lookup failure. The signer's status is unknown then, so the
/// caller should keep it.
pub async fn resume<S: SignerStatusSource + Sync>(
  source: &S,
  signer_uuid: Uuid,
  expected_fid: Fid,
) -> neynar::Result<SignerState> {
  match source.signer_status(signer_uuid).await {
    Ok(signer) if signer.is_approved_for(expected_fid) => Ok(SignerState::Approved { signer_uuid }),
    Ok(signer) => {
      event!(
        Level::INFO,
        "Stored signer {signer_uuid} is {}, discarding it.",
        signer.status
      );
      Ok(SignerState::None)
    }
    Err(neynar::Error::NotFound(_)) => {
      event!(Level::INFO, "Stored signer {signer_uuid} no longer exists, discarding it.");
      Ok(SignerState::None)
    }
    Err(e) => {
      event!(Level::WARN, "Could not re-validate signer {signer_uuid}: {e}");
      Err(e)
    }
  }
}

/// Polls a pending signer until it is approved by `expected_fid`.
///
/// Lookup failures are logged and retried on the next tick. A revoked signer,
/// or one approved by another account, is `Rejected`. Running out of time is
/// `Expired` and cancellation leaves the gate at `None`.
pub async fn await_approval<S: SignerStatusSource + Sync>(
  source: &S,
  signer_uuid: Uuid,
  expected_fid: Fid,
  policy: PollPolicy,
  cancel: &CancellationToken,
) -> SignerState {
  let outcome = poll_until(policy, cancel, || async move {
    let signer = match source.signer_status(signer_uuid).await {
      Ok(signer) => signer,
      Err(e) => {
        event!(Level::DEBUG, "Signer status lookup failed, retrying: {e}");
        return None;
      }
    };

    match signer.status {
      SignerStatus::Approved if signer.is_approved_for(expected_fid) => {
        Some(SignerState::Approved { signer_uuid })
      }
      SignerStatus::Approved => Some(SignerState::Rejected {
        reason: format!(
          "approved by {} instead of {expected_fid}",
          signer.fid.unwrap_or_default()
        ),
      }),
      SignerStatus::Revoked => Some(SignerState::Rejected {
        reason: "revoked".to_string(),
      }),
      SignerStatus::Generated | SignerStatus::PendingApproval => None,
    }
  })
  .await;

  let state = match outcome {
    PollOutcome::Ready(state) => state,
    PollOutcome::TimedOut => SignerState::Expired,
    PollOutcome::Cancelled => SignerState::None,
  };
  event!(Level::INFO, "Signer gate settled: {state}.");
  state
}

#[cfg(test)]
mod tests {
  use std::{
    collections::VecDeque,
    sync::{
      atomic::{AtomicU32, Ordering},
      Mutex,
    },
    time::Duration,
  };

  use tokio::time::Instant;

  use super::*;

  const FID: Fid = 42;
  const POLICY: PollPolicy = PollPolicy {
    interval: Duration::from_secs(2),
    timeout: Duration::from_secs(120),
  };

  fn signer(status: SignerStatus, fid: Option<Fid>) -> neynar::Result<Signer> {
    Ok(Signer {
      signer_uuid: Uuid::nil(),
      public_key: "0x3f1e".to_string(),
      status,
      signer_approval_url: None,
      fid,
    })
  }

  /// Replays `script`, then answers `pending_approval` forever.
  struct Scripted {
    script: Mutex<VecDeque<neynar::Result<Signer>>>,
    calls: AtomicU32,
  }

  impl Scripted {
    fn new(script: impl IntoIterator<Item = neynar::Result<Signer>>) -> Self {
      Self {
        script: Mutex::new(script.into_iter().collect()),
        calls: AtomicU32::new(0),
      }
    }

    fn calls(&self) -> u32 {
      self.calls.load(Ordering::SeqCst)
    }
  }

  impl SignerStatusSource for Scripted {
    async fn signer_status(&self, _: Uuid) -> neynar::Result<Signer> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      let next = self.script.lock().unwrap().pop_front();
      next.unwrap_or_else(|| signer(SignerStatus::PendingApproval, None))
    }
  }

  #[tokio::test(start_paused = true)]
  async fn approves_on_the_third_sample() {
    let source = Scripted::new([
      signer(SignerStatus::PendingApproval, None),
      signer(SignerStatus::PendingApproval, None),
      signer(SignerStatus::Approved, Some(FID)),
    ]);
    let start = Instant::now();

    let state = await_approval(&source, Uuid::nil(), FID, POLICY, &CancellationToken::new()).await;

    assert_eq!(state, SignerState::Approved { signer_uuid: Uuid::nil() });
    assert_eq!(source.calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(6));

    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(source.calls(), 3);
  }

  #[tokio::test(start_paused = true)]
  async fn expires_when_never_approved() {
    let source = Scripted::new([]);
    let start = Instant::now();

    let state = await_approval(&source, Uuid::nil(), FID, POLICY, &CancellationToken::new()).await;

    assert_eq!(state, SignerState::Expired);
    assert_eq!(source.calls(), 59);
    assert_eq!(start.elapsed(), POLICY.timeout);
  }

  #[tokio::test(start_paused = true)]
  async fn lookup_failures_are_retried() {
    let source = Scripted::new([
      Err(neynar::Error::RateLimited),
      Err(neynar::Error::Api {
        status: None,
        message: "connection reset".to_string(),
      }),
      signer(SignerStatus::Approved, Some(FID)),
    ]);

    let state = await_approval(&source, Uuid::nil(), FID, POLICY, &CancellationToken::new()).await;

    assert_eq!(state, SignerState::Approved { signer_uuid: Uuid::nil() });
    assert_eq!(source.calls(), 3);
  }

  #[tokio::test(start_paused = true)]
  async fn approval_by_someone_else_is_rejected() {
    let source = Scripted::new([signer(SignerStatus::Approved, Some(7))]);

    let state = await_approval(&source, Uuid::nil(), FID, POLICY, &CancellationToken::new()).await;

    assert!(matches!(state, SignerState::Rejected { .. }));
  }

  #[tokio::test(start_paused = true)]
  async fn revoked_is_rejected() {
    let source = Scripted::new([signer(SignerStatus::Revoked, None)]);

    let state = await_approval(&source, Uuid::nil(), FID, POLICY, &CancellationToken::new()).await;

    assert_eq!(
      state,
      SignerState::Rejected {
        reason: "revoked".to_string()
      }
    );
  }

  #[tokio::test(start_paused = true)]
  async fn cancellation_resets_the_gate() {
    let source = Scripted::new([]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let state = await_approval(&source, Uuid::nil(), FID, POLICY, &cancel).await;

    assert_eq!(state, SignerState::None);
    assert_eq!(source.calls(), 0);
  }

  #[tokio::test]
  async fn resume_keeps_only_matching_approvals() {
    let approved = Scripted::new([signer(SignerStatus::Approved, Some(FID))]);
    assert_eq!(
      resume(&approved, Uuid::nil(), FID).await,
      Ok(SignerState::Approved { signer_uuid: Uuid::nil() })
    );

    let revoked = Scripted::new([signer(SignerStatus::Revoked, Some(FID))]);
    assert_eq!(resume(&revoked, Uuid::nil(), FID).await, Ok(SignerState::None));

    let elsewhere = Scripted::new([signer(SignerStatus::Approved, Some(7))]);
    assert_eq!(resume(&elsewhere, Uuid::nil(), FID).await, Ok(SignerState::None));

    let missing = Scripted::new([Err(neynar::Error::NotFound("Signer not found".to_string()))]);
    assert_eq!(resume(&missing, Uuid::nil(), FID).await, Ok(SignerState::None));
  }

  #[tokio::test]
  async fn resume_surfaces_transient_failures() {
    let flaky = Scripted::new([Err(neynar::Error::Api {
      status: Some(502),
      message: "Bad Gateway".to_string(),
    })]);

    assert_eq!(
      resume(&flaky, Uuid::nil(), FID).await,
      Err(neynar::Error::Api {
        status: Some(502),
        message: "Bad Gateway".to_string(),
      })
    );
  }
}
