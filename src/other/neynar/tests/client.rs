use environment::NeynarConfig;
use httpmock::prelude::*;
use neynar::{
  create_signer, delete_follow, get_following, get_users, lookup_custody_address, lookup_signer,
  register_signed_key, Error, Neynar, ViewerContext,
};
use serde_json::json;
use types::entities::signer::SignerStatus;
use uuid::Uuid;

const SIGNER: &str = "7f3c2a10-5b8e-4d2a-9c41-0f6e2d8b1a77";

fn client(server: &MockServer) -> Neynar {
  Neynar::new(&NeynarConfig {
    api_key: "test-key".to_string(),
    client_id: None,
    base_url: server.base_url(),
  })
  .unwrap()
}

fn follow(fid: u64) -> serde_json::Value {
  json!({
    "object": "follow",
    "user": { "object": "user", "fid": fid, "username": format!("user{fid}") }
  })
}

#[tokio::test]
async fn following_walks_the_cursor() {
  let server = MockServer::start_async().await;
  let first = server
    .mock_async(|when, then| {
      when
        .method(GET)
        .path("/v2/farcaster/following")
        .query_param("fid", "42")
        .query_param("limit", "100")
        .query_param_missing("cursor")
        .header("x-api-key", "test-key");
      then
        .status(200)
        .json_body(json!({ "users": [follow(1), follow(2)], "next": { "cursor": "page-2" } }));
    })
    .await;
  let second = server
    .mock_async(|when, then| {
      when
        .method(GET)
        .path("/v2/farcaster/following")
        .query_param("cursor", "page-2");
      then
        .status(200)
        .json_body(json!({ "users": [follow(3)], "next": { "cursor": null } }));
    })
    .await;

  let users = get_following::act(&client(&server), 42, 10).await.unwrap();

  first.assert_async().await;
  second.assert_async().await;
  let fids: Vec<_> = users.iter().map(|u| u.fid).collect();
  assert_eq!(fids, vec![1, 2, 3]);
  assert_eq!(users[0].username, "user1");
}

#[tokio::test]
async fn following_stops_at_the_page_cap() {
  let server = MockServer::start_async().await;
  let pages = server
    .mock_async(|when, then| {
      when.method(GET).path("/v2/farcaster/following");
      then
        .status(200)
        .json_body(json!({ "users": [follow(1)], "next": { "cursor": "again" } }));
    })
    .await;

  let users = get_following::act(&client(&server), 42, 2).await.unwrap();

  assert_eq!(pages.calls_async().await, 2);
  assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn bulk_users_carry_viewer_context() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(GET)
        .path("/v2/farcaster/user/bulk")
        .query_param("fids", "977233")
        .query_param("viewer_fid", "42");
      then.status(200).json_body(json!({
        "users": [{
          "fid": 977_233,
          "username": "dev",
          "display_name": "Developer",
          "viewer_context": { "following": true, "followed_by": false }
        }]
      }));
    })
    .await;

  let views = get_users::act(&client(&server), &[977_233], Some(42))
    .await
    .unwrap();

  mock.assert_async().await;
  assert_eq!(views.len(), 1);
  assert_eq!(views[0].user.display_name, "Developer");
  assert_eq!(
    views[0].viewer_context,
    Some(ViewerContext {
      following: true,
      followed_by: false
    })
  );
}

#[tokio::test]
async fn signer_creation_and_registration() {
  let server = MockServer::start_async().await;
  let create = server
    .mock_async(|when, then| {
      when.method(POST).path("/v2/farcaster/signer");
      then.status(200).json_body(json!({
        "signer_uuid": SIGNER,
        "public_key": "0xabcdef",
        "status": "generated"
      }));
    })
    .await;
  let register = server
    .mock_async(|when, then| {
      when
        .method(POST)
        .path("/v2/farcaster/signer/signed_key")
        .json_body(json!({
          "signer_uuid": SIGNER,
          "app_fid": 9,
          "deadline": 1_700_000_000_u64,
          "signature": "0xsig"
        }));
      then.status(200).json_body(json!({
        "signer_uuid": SIGNER,
        "public_key": "0xabcdef",
        "status": "pending_approval",
        "signer_approval_url": "https://client.warpcast.com/deeplinks/signed-key-request?token=0x1"
      }));
    })
    .await;

  let client = client(&server);
  let signer = create_signer::act(&client).await.unwrap();
  assert_eq!(signer.status, SignerStatus::Generated);

  let pending = register_signed_key::act(
    &client,
    register_signed_key::SignedKey {
      signer_uuid: signer.signer_uuid,
      app_fid: 9,
      deadline: 1_700_000_000,
      signature: "0xsig".to_string(),
    },
  )
  .await
  .unwrap();

  create.assert_async().await;
  register.assert_async().await;
  assert_eq!(pending.status, SignerStatus::PendingApproval);
  assert!(pending
    .signer_approval_url
    .unwrap()
    .contains("signed-key-request"));
}

#[tokio::test]
async fn unknown_signer_is_not_found() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when
        .method(GET)
        .path("/v2/farcaster/signer")
        .query_param("signer_uuid", SIGNER);
      then
        .status(404)
        .json_body(json!({ "code": "NotFound", "message": "Signer not found" }));
    })
    .await;

  let err = lookup_signer::act(&client(&server), Uuid::parse_str(SIGNER).unwrap())
    .await
    .unwrap_err();

  assert_eq!(err, Error::NotFound("Signer not found".to_string()));
}

#[tokio::test]
async fn forbidden_maps_to_unauthorized() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(DELETE).path("/v2/farcaster/user/follow");
      then
        .status(403)
        .json_body(json!({ "message": "Signer is not approved" }));
    })
    .await;

  let err = delete_follow::act(&client(&server), Uuid::parse_str(SIGNER).unwrap(), vec![5])
    .await
    .unwrap_err();

  assert_eq!(err, Error::Unauthorized("Signer is not approved".to_string()));
}

#[tokio::test]
async fn server_errors_surface_the_upstream_message() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(POST).path("/v2/farcaster/signer");
      then
        .status(500)
        .json_body(json!({ "message": "Something broke" }));
    })
    .await;

  let err = create_signer::act(&client(&server)).await.unwrap_err();

  assert_eq!(
    err,
    Error::Api {
      status: Some(500),
      message: "Something broke".to_string()
    }
  );
  assert_eq!(err.to_string(), "Something broke");
}

#[tokio::test]
async fn unexpected_shapes_are_flagged() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/v2/farcaster/signer");
      then.status(200).json_body(json!({
        "signer_uuid": SIGNER,
        "public_key": "0xabcdef",
        "status": "somewhere_in_between"
      }));
    })
    .await;

  let err = lookup_signer::act(&client(&server), Uuid::parse_str(SIGNER).unwrap())
    .await
    .unwrap_err();

  assert!(matches!(err, Error::NeynarBug(_)));
}

#[tokio::test]
async fn persistent_rate_limit_gives_up() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(GET).path("/v2/farcaster/user/custody-address");
      then.status(429);
    })
    .await;

  let err = lookup_custody_address::act(&client(&server), "0x01")
    .await
    .unwrap_err();

  assert_eq!(err, Error::RateLimited);
  assert_eq!(mock.calls_async().await, 4);
}

#[tokio::test]
async fn unfollow_sends_signer_and_targets() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(DELETE)
        .path("/v2/farcaster/user/follow")
        .json_body(json!({ "signer_uuid": SIGNER, "target_fids": [5] }));
      then.status(200).json_body(json!({
        "success": true,
        "details": [{ "success": true, "target_fid": 5, "hash": "0xfeed" }]
      }));
    })
    .await;

  let output = delete_follow::act(&client(&server), Uuid::parse_str(SIGNER).unwrap(), vec![5])
    .await
    .unwrap();

  mock.assert_async().await;
  assert!(output.succeeded_for(5));
}
