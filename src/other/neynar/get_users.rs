use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use types::{entities::user::User, Fid};

use crate::{wire::WireUser, Neynar, NeynarReq, Result, ViewerContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
  pub user: User,
  /// Present when a viewer was given.
  pub viewer_context: Option<ViewerContext>,
}

/// Bulk profile lookup. With a `viewer`, each profile carries whether the
/// viewer follows it and is followed by it.
///
/// # Errors
///
/// Will return any unhandled request errors.
pub async fn act(client: &Neynar, fids: &[Fid], viewer: Option<Fid>) -> Result<Vec<UserView>> {
  if fids.is_empty() {
    return Ok(Vec::new());
  }

  let OutputData { users } = Request {
    fids: fids.to_vec(),
    viewer,
  }
  .act(client)
  .await?;

  Ok(
    users
      .into_iter()
      .map(|mut wire| UserView {
        viewer_context: wire.viewer_context.take(),
        user: User::from(wire),
      })
      .collect(),
  )
}

#[derive(Debug, Deserialize)]
struct OutputData {
  users: Vec<WireUser>,
}

struct Request {
  fids: Vec<Fid>,
  viewer: Option<Fid>,
}
impl NeynarReq for Request {
  type ReqOutput = OutputData;

  fn build(self, client: &Neynar) -> RequestBuilder {
    let fids = self
      .fids
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join(",");
    let mut query = vec![("fids", fids)];
    if let Some(viewer) = self.viewer {
      query.push(("viewer_fid", viewer.to_string()));
    }
    client
      .request(Method::GET, "/v2/farcaster/user/bulk")
      .query(&query)
  }
}
