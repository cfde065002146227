use types::{entities::user::User, Fid};

use crate::{follow_pages, Neynar, Result};

/// Accounts `fid` follows, most recent first.
///
/// # Errors
///
/// Will return any unhandled request errors.
pub async fn act(client: &Neynar, fid: Fid, max_pages: u32) -> Result<Vec<User>> {
  follow_pages::collect(client, "/v2/farcaster/following", fid, max_pages).await
}
