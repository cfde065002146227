use axum::{body::Bytes, Json};
use serde_json::{json, Value};
use services::webhook;

use crate::ApiError;

pub async fn act(body: Bytes) -> Result<Json<Value>, ApiError> {
  let received = webhook::parse(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
  webhook::record(&received);
  Ok(Json(json!({ "success": true })))
}
