use std::collections::HashSet;

use types::{entities::user::User, Fid};

/// Accounts in `following` that are absent from `followers`, in `following`'s
/// order.
#[must_use]
pub fn non_followers(following: Vec<User>, followers: &[User]) -> Vec<User> {
  let followed_back: HashSet<Fid> = followers.iter().map(|u| u.fid).collect();
  following
    .into_iter()
    .filter(|u| !followed_back.contains(&u.fid))
    .collect()
}
