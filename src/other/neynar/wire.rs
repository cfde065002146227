//! Raw Neynar response shapes. Everything leaving this crate is converted into
//! the entities from `types`.

use serde::{Deserialize, Serialize};
use types::{entities::user::User, Fid};

#[derive(Debug, Deserialize)]
pub struct WireUser {
  fid: Fid,
  username: String,
  #[serde(default)]
  display_name: Option<String>,
  #[serde(default)]
  pfp_url: Option<String>,
  #[serde(default)]
  profile: Option<WireProfile>,
  #[serde(default)]
  follower_count: u64,
  #[serde(default)]
  following_count: u64,
  #[serde(default)]
  pub viewer_context: Option<ViewerContext>,
}

#[derive(Debug, Deserialize)]
struct WireProfile {
  #[serde(default)]
  bio: Option<WireBio>,
}

#[derive(Debug, Deserialize)]
struct WireBio {
  #[serde(default)]
  text: Option<String>,
}

/// How the viewer relates to a user, present when a `viewer_fid` was given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
  #[serde(default)]
  pub following: bool,
  #[serde(default)]
  pub followed_by: bool,
}

impl From<WireUser> for User {
  fn from(user: WireUser) -> Self {
    Self {
      fid: user.fid,
      username: user.username,
      display_name: user.display_name.unwrap_or_default(),
      pfp_url: user.pfp_url.filter(|url| !url.is_empty()),
      bio: user
        .profile
        .and_then(|p| p.bio)
        .and_then(|b| b.text)
        .unwrap_or_default(),
      follower_count: user.follower_count,
      following_count: user.following_count,
    }
  }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  #[serde(default)]
  message: Option<String>,
}

/// Extracts the human readable message from a Neynar error body, if any.
pub fn error_message(body: &str) -> Option<String> {
  serde_json::from_str::<ErrorBody>(body)
    .ok()?
    .message
    .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flattens_profile_bio() {
    let wire: WireUser = serde_json::from_str(
      r#"{
        "object": "user",
        "fid": 3,
        "username": "dwr",
        "display_name": "Dan",
        "pfp_url": "",
        "custody_address": "0x6b0bda3f2ffed5efc83fa8c024acff1dd45793f1",
        "profile": { "bio": { "text": "Working on Farcaster" } },
        "follower_count": 10,
        "following_count": 20
      }"#,
    )
    .unwrap();
    let user = User::from(wire);

    assert_eq!(user.fid, 3);
    assert_eq!(user.display_name, "Dan");
    assert_eq!(user.pfp_url, None);
    assert_eq!(user.bio, "Working on Farcaster");
    assert_eq!(user.following_count, 20);
  }

  #[test]
  fn reads_error_messages() {
    assert_eq!(
      error_message(r#"{"code":"NotFound","message":"Signer not found"}"#),
      Some("Signer not found".to_string())
    );
    assert_eq!(error_message("<html>bad gateway</html>"), None);
  }
}
