use axum::{
  extract::{rejection::QueryRejection, Query, State},
  Json,
};
use serde::{Deserialize, Serialize};
use types::Fid;

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct Params {
  fid: Option<Fid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
  is_following: bool,
}

pub async fn act(
  State(state): State<AppState>,
  params: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Output>, ApiError> {
  let Query(params) = params?;
  let fid = params.fid.ok_or_else(|| ApiError::missing("fid"))?;

  let is_following = state.follow_gate.is_following(&state.neynar, fid).await;
  Ok(Json(Output { is_following }))
}
