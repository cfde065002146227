use std::collections::HashSet;

use neynar::{delete_follow, Neynar};
use serde::Serialize;
use thiserror::Error as ThisError;
use tracing::{event, Level};
use types::Fid;
use uuid::Uuid;

pub const MAX_BATCH: usize = 50;

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("No target FIDs given")]
  Empty,
  #[error("Cannot unfollow {0} accounts at once, the limit is {MAX_BATCH}")]
  TooMany(usize),
  #[error("FID {0} is listed more than once")]
  Duplicate(Fid),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
  pub succeeded: Vec<Fid>,
  pub failed: Vec<Fid>,
}

impl Outcome {
  #[must_use]
  pub fn is_complete_success(&self) -> bool {
    self.failed.is_empty()
  }
}

/// Checks a batch before anything is sent.
///
/// # Errors
///
/// When `targets` is empty, longer than `MAX_BATCH`, or repeats a FID.
pub fn validate(targets: &[Fid]) -> Result<(), Error> {
  if targets.is_empty() {
    return Err(Error::Empty);
  }
  if targets.len() > MAX_BATCH {
    return Err(Error::TooMany(targets.len()));
  }

  let mut seen = HashSet::with_capacity(targets.len());
  for &fid in targets {
    if !seen.insert(fid) {
      return Err(Error::Duplicate(fid));
    }
  }
  Ok(())
}

/// Unfollows every target once through `signer_uuid`.
///
/// A failure for one target does not stop the others. Every target ends up in
/// exactly one of `succeeded` or `failed`.
///
/// # Errors
///
/// Only when the batch fails validation, in which case nothing was sent.
pub async fn act(client: &Neynar, signer_uuid: Uuid, targets: &[Fid]) -> Result<Outcome, Error> {
  validate(targets)?;

  let mut outcome = Outcome::default();
  for &target in targets {
    match delete_follow::act(client, signer_uuid, vec![target]).await {
      Ok(output) if output.succeeded_for(target) => outcome.succeeded.push(target),
      Ok(_) => {
        event!(Level::WARN, "Neynar reported failure unfollowing {target}.");
        outcome.failed.push(target);
      }
      Err(e) => {
        event!(Level::WARN, "Failed to unfollow {target}: {e}");
        outcome.failed.push(target);
      }
    }
  }

  event!(
    Level::INFO,
    "Unfollow batch done: {} succeeded, {} failed.",
    outcome.succeeded.len(),
    outcome.failed.len()
  );
  Ok(outcome)
}
