//! Older single-target and registration-less variants, still served.

use axum::{
  extract::{rejection::JsonRejection, State},
  Json,
};
use neynar::create_signer;
use serde::{Deserialize, Serialize};
use services::unfollow;
use types::{entities::signer::SignerStatus, Fid};
use uuid::Uuid;

use super::unfollow::Output as UnfollowOutput;
use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfollowInput {
  target_fid: Option<Fid>,
}

/// Unfollows one account through the signer configured in `SIGNER_UUID`.
pub async fn unfollow(
  State(state): State<AppState>,
  input: Result<Json<UnfollowInput>, JsonRejection>,
) -> Result<Json<UnfollowOutput>, ApiError> {
  let Json(input) = input?;
  let target = input.target_fid.ok_or_else(|| ApiError::missing("targetFid"))?;

  let configured = state
    .config
    .legacy_signer_uuid
    .as_deref()
    .ok_or_else(|| ApiError::Internal("SIGNER_UUID is not configured".to_string()))?;
  let signer_uuid = Uuid::parse_str(configured)
    .map_err(|_| ApiError::Internal("SIGNER_UUID is not a valid UUID".to_string()))?;

  let outcome = unfollow::act(&state.neynar, signer_uuid, &[target]).await?;
  Ok(Json(UnfollowOutput::from(outcome)))
}

#[derive(Debug, Serialize)]
pub struct CreateSignerOutput {
  signer_uuid: Uuid,
  public_key: String,
  status: SignerStatus,
}

/// Creates a signer without registering a signed key request for it.
pub async fn create_signer(State(state): State<AppState>) -> Result<Json<CreateSignerOutput>, ApiError> {
  let signer = create_signer::act(&state.neynar).await?;
  Ok(Json(CreateSignerOutput {
    signer_uuid: signer.signer_uuid,
    public_key: signer.public_key,
    status: signer.status,
  }))
}
