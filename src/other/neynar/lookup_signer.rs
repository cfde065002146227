use reqwest::{Method, RequestBuilder};
use types::entities::signer::Signer;
use uuid::Uuid;

use crate::{Neynar, NeynarReq, Result};

/// Current state of a signer. Unknown UUIDs come back as `Error::NotFound`.
///
/// # Errors
///
/// Will return any unhandled request errors.
pub async fn act(client: &Neynar, signer_uuid: Uuid) -> Result<Signer> {
  Request { signer_uuid }.act(client).await
}

struct Request {
  signer_uuid: Uuid,
}
impl NeynarReq for Request {
  type ReqOutput = Signer;

  fn build(self, client: &Neynar) -> RequestBuilder {
    client
      .request(Method::GET, "/v2/farcaster/signer")
      .query(&[("signer_uuid", self.signer_uuid.to_string())])
  }
}
