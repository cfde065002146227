use axum::{extract::State, Json};
use serde::Serialize;
use types::Fid;

use crate::AppState;

/// What a frontend needs to render sign-in and the follow gate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
  client_id: Option<String>,
  required_fid: Fid,
}

pub async fn act(State(state): State<AppState>) -> Json<Output> {
  Json(Output {
    client_id: state.config.neynar.client_id.clone(),
    required_fid: state.follow_gate.required_fid(),
  })
}
