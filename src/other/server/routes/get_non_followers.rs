use axum::{
  extract::{rejection::JsonRejection, State},
  Json,
};
use serde::{Deserialize, Serialize};
use services::non_followers;
use types::{entities::user::User, Fid};

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct Input {
  fid: Option<Fid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
  non_followers: Vec<User>,
  total: usize,
}

pub async fn act(
  State(state): State<AppState>,
  input: Result<Json<Input>, JsonRejection>,
) -> Result<Json<Output>, ApiError> {
  let Json(input) = input?;
  let fid = input.fid.ok_or_else(|| ApiError::missing("fid"))?;

  let non_followers =
    non_followers::act(&state.neynar, fid, state.config.follow_graph_max_pages).await?;
  Ok(Json(Output {
    total: non_followers.len(),
    non_followers,
  }))
}
