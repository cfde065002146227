use reqwest::{Method, RequestBuilder};
use types::entities::signer::Signer;

use crate::{Neynar, NeynarReq, Result};

/// Generates a fresh delegated key held by Neynar. The key stays in
/// `generated` until a signed key request is registered for it.
///
/// # Errors
///
/// Will return any unhandled request errors.
pub async fn act(client: &Neynar) -> Result<Signer> {
  Request.act(client).await
}

struct Request;
impl NeynarReq for Request {
  type ReqOutput = Signer;

  fn build(self, client: &Neynar) -> RequestBuilder {
    client.request(Method::POST, "/v2/farcaster/signer")
  }
}
