use serde::{Deserialize, Serialize};

use crate::Fid;

/// A Farcaster account as shown in the non-follower list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub fid: Fid, // PK
  pub username: String,
  #[serde(default)]
  pub display_name: String,
  #[serde(default)]
  pub pfp_url: Option<String>,
  #[serde(default)]
  pub bio: String,
  #[serde(default)]
  pub follower_count: u64,
  #[serde(default)]
  pub following_count: u64,
}
