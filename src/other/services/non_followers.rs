use neynar::{get_followers, get_following, Neynar};
use tracing::{event, Level};
use types::{entities::user::User, Fid};

use crate::follow_graph;

/// Fetches both sides of `fid`'s follow graph and keeps the accounts that do
/// not follow back.
///
/// # Errors
///
/// Will return any unhandled request errors from either list.
pub async fn act(client: &Neynar, fid: Fid, max_pages: u32) -> neynar::Result<Vec<User>> {
  let (following, followers) = tokio::try_join!(
    get_following::act(client, fid, max_pages),
    get_followers::act(client, fid, max_pages),
  )?;

  let following_count = following.len();
  let ghosts = follow_graph::non_followers(following, &followers);
  event!(
    Level::DEBUG,
    "{fid} follows {following_count}, followed by {}, {} not following back.",
    followers.len(),
    ghosts.len()
  );

  Ok(ghosts)
}
