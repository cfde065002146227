use axum::{
  extract::{rejection::QueryRejection, Query, State},
  Json,
};
use serde::{Deserialize, Serialize};
use services::signer;
use types::entities::{signer::SignerStatus, user::User};

use crate::{routes::parse_signer_uuid, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct Params {
  signer_uuid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Output {
  authenticated: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  user: Option<User>,
  status: SignerStatus,
}

pub async fn act(
  State(state): State<AppState>,
  params: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Output>, ApiError> {
  let Query(params) = params?;
  let signer_uuid = parse_signer_uuid("signer_uuid", params.signer_uuid.as_deref())?;

  let check = signer::check(&state.neynar, signer_uuid).await?;
  Ok(Json(Output {
    authenticated: check.authenticated,
    user: check.user,
    status: check.status,
  }))
}
