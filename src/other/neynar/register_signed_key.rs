use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use types::{entities::signer::Signer, Fid};
use uuid::Uuid;

use crate::{Neynar, NeynarReq, Result};

/// A signed key request, produced offline by the app's operator account.
#[derive(Debug, Clone, Serialize)]
pub struct SignedKey {
  pub signer_uuid: Uuid,
  pub app_fid: Fid,
  pub deadline: u64,
  /// `0x`-prefixed EIP-712 signature.
  pub signature: String,
}

/// Registers the signed key request, moving the signer to `pending_approval`
/// and yielding the deep link the user has to open to approve it.
///
/// # Errors
///
/// Will return any unhandled request errors.
pub async fn act(client: &Neynar, signed_key: SignedKey) -> Result<Signer> {
  Request { signed_key }.act(client).await
}

struct Request {
  signed_key: SignedKey,
}
impl NeynarReq for Request {
  type ReqOutput = Signer;

  fn build(self, client: &Neynar) -> RequestBuilder {
    client
      .request(Method::POST, "/v2/farcaster/signer/signed_key")
      .json(&self.signed_key)
  }
}
