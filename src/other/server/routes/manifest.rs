use axum::{extract::State, Json};
use services::manifest::Manifest;

use crate::AppState;

pub async fn act(State(state): State<AppState>) -> Json<Manifest> {
  Json(Manifest::clone(&state.manifest))
}
