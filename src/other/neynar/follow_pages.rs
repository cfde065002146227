use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use tracing::{event, Level};
use types::{entities::user::User, Fid};

use crate::{wire::WireUser, Neynar, NeynarReq, Result};

/// Largest page Neynar serves for follow lists.
static PAGE_SIZE: u8 = 100;

/// Walks the cursor of a follow list until it runs out or `max_pages` pages
/// were read. Truncation is logged.
pub async fn collect(
  client: &Neynar,
  path: &'static str,
  fid: Fid,
  max_pages: u32,
) -> Result<Vec<User>> {
  let mut curr_cursor = None;
  let mut all_users = Vec::new();
  for page in 1..=max_pages.max(1) {
    let OutputData { users, next } = Request {
      path,
      fid,
      curr_cursor,
    }
    .act(client)
    .await?;
    all_users.extend(users.into_iter().map(|entry| User::from(entry.user)));

    curr_cursor = next.and_then(|n| n.cursor).filter(|c| !c.is_empty());
    if curr_cursor.is_none() {
      return Ok(all_users);
    }
    event!(Level::DEBUG, "Fetched page {page} of {path} for {fid}.");
  }

  event!(
    Level::WARN,
    "(Notice) {path} for {fid} has more than {max_pages} pages, the rest is ignored."
  );
  Ok(all_users)
}

#[derive(Debug, Deserialize)]
struct OutputData {
  users: Vec<FollowEntry>,
  #[serde(default)]
  next: Option<Next>,
}

#[derive(Debug, Deserialize)]
struct FollowEntry {
  user: WireUser,
}

#[derive(Debug, Deserialize)]
struct Next {
  #[serde(default)]
  cursor: Option<String>,
}

struct Request {
  path: &'static str,
  fid: Fid,
  curr_cursor: Option<String>,
}
impl NeynarReq for Request {
  type ReqOutput = OutputData;

  fn build(self, client: &Neynar) -> RequestBuilder {
    let mut query = vec![
      ("fid", self.fid.to_string()),
      ("limit", PAGE_SIZE.to_string()),
    ];
    if let Some(cursor) = self.curr_cursor {
      query.push(("cursor", cursor));
    }
    client.request(Method::GET, self.path).query(&query)
  }
}
