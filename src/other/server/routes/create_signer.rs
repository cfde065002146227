use axum::{
  extract::{rejection::JsonRejection, State},
  Json,
};
use serde::{Deserialize, Serialize};
use services::signer;
use tracing::{event, Level};
use types::{entities::signer::SignerStatus, Fid};
use uuid::Uuid;

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct Input {
  fid: Option<Fid>,
}

#[derive(Debug, Serialize)]
pub struct Output {
  signer_uuid: Uuid,
  signer_approval_url: String,
  status: SignerStatus,
}

pub async fn act(
  State(state): State<AppState>,
  input: Result<Json<Input>, JsonRejection>,
) -> Result<Json<Output>, ApiError> {
  let Json(input) = input?;
  let fid = input.fid.ok_or_else(|| ApiError::missing("fid"))?;

  let operator = state.operator().await?;
  let pending = signer::create(&state.neynar, operator).await?;
  event!(
    Level::INFO,
    "Signer {} awaiting approval from {fid}.",
    pending.signer_uuid
  );

  Ok(Json(Output {
    signer_uuid: pending.signer_uuid,
    signer_approval_url: pending.signer_approval_url.unwrap_or_default(),
    status: pending.status,
  }))
}
