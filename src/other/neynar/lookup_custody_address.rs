use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use types::entities::user::User;

use crate::{wire::WireUser, Neynar, NeynarReq, Result};

/// The account whose custody address is `custody_address`.
///
/// # Errors
///
/// Will return any unhandled request errors. An address with no account
/// yields `Error::NotFound`.
pub async fn act(client: &Neynar, custody_address: &str) -> Result<User> {
  let OutputData { user } = Request {
    custody_address: custody_address.to_string(),
  }
  .act(client)
  .await?;
  Ok(User::from(user))
}

#[derive(Debug, Deserialize)]
struct OutputData {
  user: WireUser,
}

struct Request {
  custody_address: String,
}
impl NeynarReq for Request {
  type ReqOutput = OutputData;

  fn build(self, client: &Neynar) -> RequestBuilder {
    client
      .request(Method::GET, "/v2/farcaster/user/custody-address")
      .query(&[("custody_address", self.custody_address)])
  }
}
