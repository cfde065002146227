use environment::GateConfig;
use neynar::{get_users, Neynar};
use tracing::{event, Level};
use types::Fid;

/// Whether a viewer follows the account the app is gated behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowGate {
  required_fid: Fid,
  admin_fid: Option<Fid>,
}

impl FollowGate {
  #[must_use]
  pub const fn new(config: &GateConfig) -> Self {
    Self {
      required_fid: config.required_fid,
      admin_fid: config.admin_fid,
    }
  }

  #[must_use]
  pub const fn required_fid(&self) -> Fid {
    self.required_fid
  }

  /// The admin always passes without asking Neynar. Any failure to find out
  /// counts as not following.
  pub async fn is_following(&self, client: &Neynar, viewer: Fid) -> bool {
    if self.admin_fid == Some(viewer) {
      event!(Level::DEBUG, "Admin {viewer} bypasses the follow gate.");
      return true;
    }

    match get_users::act(client, &[self.required_fid], Some(viewer)).await {
      Ok(views) => views
        .into_iter()
        .find(|v| v.user.fid == self.required_fid)
        .and_then(|v| v.viewer_context)
        .is_some_and(|ctx| ctx.following),
      Err(e) => {
        event!(
          Level::WARN,
          "Could not check whether {viewer} follows {}: {e}",
          self.required_fid
        );
        false
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use environment::NeynarConfig;
  use httpmock::prelude::*;
  use serde_json::json;

  use super::*;

  const REQUIRED: Fid = 977_233;
  const ADMIN: Fid = 1;

  fn gate() -> FollowGate {
    FollowGate::new(&GateConfig {
      required_fid: REQUIRED,
      admin_fid: Some(ADMIN),
    })
  }

  fn client(server: &MockServer) -> Neynar {
    Neynar::new(&NeynarConfig {
      api_key: "test-key".to_string(),
      client_id: None,
      base_url: server.base_url(),
    })
    .unwrap()
  }

  async fn viewer_follows(server: &MockServer, viewer: Fid, following: bool) -> httpmock::Mock<'_> {
    server
      .mock_async(|when, then| {
        when
          .method(GET)
          .path("/v2/farcaster/user/bulk")
          .query_param("fids", REQUIRED.to_string())
          .query_param("viewer_fid", viewer.to_string());
        then.status(200).json_body(json!({
          "users": [{
            "fid": REQUIRED,
            "username": "dev",
            "viewer_context": { "following": following, "followed_by": false }
          }]
        }));
      })
      .await
  }

  #[tokio::test]
  async fn admin_skips_the_network() {
    let server = MockServer::start_async().await;
    let any = server
      .mock_async(|when, then| {
        when.any_request();
        then.status(500);
      })
      .await;

    assert!(gate().is_following(&client(&server), ADMIN).await);
    assert_eq!(any.calls_async().await, 0);
  }

  #[tokio::test]
  async fn mirrors_neynar_when_following() {
    let server = MockServer::start_async().await;
    let mock = viewer_follows(&server, 42, true).await;

    assert!(gate().is_following(&client(&server), 42).await);
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn mirrors_neynar_when_not_following() {
    let server = MockServer::start_async().await;
    let mock = viewer_follows(&server, 42, false).await;

    assert!(!gate().is_following(&client(&server), 42).await);
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn failure_is_not_following() {
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(GET).path("/v2/farcaster/user/bulk");
        then.status(500).json_body(json!({ "message": "down" }));
      })
      .await;

    assert!(!gate().is_following(&client(&server), 42).await);
  }

  #[tokio::test]
  async fn missing_viewer_context_is_not_following() {
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(GET).path("/v2/farcaster/user/bulk");
        then
          .status(200)
          .json_body(json!({ "users": [{ "fid": REQUIRED, "username": "dev" }] }));
      })
      .await;

    assert!(!gate().is_following(&client(&server), 42).await);
  }
}
