use axum::Json;
use serde_json::{json, Value};

pub async fn act() -> Json<Value> {
  Json(json!({ "status": "ok" }))
}
