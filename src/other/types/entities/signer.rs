use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Fid;

/// Lifecycle of a delegated key as reported by Neynar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerStatus {
  Generated,
  PendingApproval,
  Approved,
  Revoked,
}

impl SignerStatus {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Generated => "generated",
      Self::PendingApproval => "pending_approval",
      Self::Approved => "approved",
      Self::Revoked => "revoked",
    }
  }
}

impl Display for SignerStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
  pub signer_uuid: Uuid,
  pub public_key: String,
  pub status: SignerStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub signer_approval_url: Option<String>,
  /// Account that approved the key. Only present once approved.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fid: Option<Fid>,
}

impl Signer {
  /// Whether the key is approved and, when the approving account is known,
  /// whether it is `fid`.
  #[must_use]
  pub fn is_approved_for(&self, fid: Fid) -> bool {
    self.status == SignerStatus::Approved && self.fid.is_none_or(|f| f == fid)
  }
}
