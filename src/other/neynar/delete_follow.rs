use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use types::Fid;
use uuid::Uuid;

use crate::{Neynar, NeynarReq, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputData {
  pub success: bool,
  #[serde(default)]
  pub details: Vec<Detail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Detail {
  pub success: bool,
  pub target_fid: Fid,
  #[serde(default)]
  pub hash: Option<String>,
}

impl OutputData {
  /// Whether Neynar reports `target` as unfollowed. Falls back to the overall
  /// flag when no per-target detail was returned.
  #[must_use]
  pub fn succeeded_for(&self, target: Fid) -> bool {
    self
      .details
      .iter()
      .find(|d| d.target_fid == target)
      .map_or(self.success, |d| d.success)
  }
}

/// Removes the follow from the signer's account to each of `target_fids`.
///
/// # Errors
///
/// Will return any unhandled request errors. A signer that is not approved
/// yields `Error::Unauthorized`.
pub async fn act(client: &Neynar, signer_uuid: Uuid, target_fids: Vec<Fid>) -> Result<OutputData> {
  Request {
    input: Input {
      signer_uuid,
      target_fids,
    },
  }
  .act(client)
  .await
}

#[derive(Debug, Serialize)]
struct Input {
  signer_uuid: Uuid,
  target_fids: Vec<Fid>,
}

struct Request {
  input: Input,
}
impl NeynarReq for Request {
  type ReqOutput = OutputData;

  fn build(self, client: &Neynar) -> RequestBuilder {
    client
      .request(Method::DELETE, "/v2/farcaster/user/follow")
      .json(&self.input)
  }
}
