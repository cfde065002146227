use axum::{
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use services::{operator, signer, unfollow};
use thiserror::Error as ThisError;
use tracing::{event, Level};

/// Every route error answers `{"error": message}`.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),
  #[error("{0}")]
  Forbidden(String),
  #[error("{0}")]
  NotFound(String),
  #[error("{0}")]
  Internal(String),
}

impl ApiError {
  #[must_use]
  pub fn missing(field: &str) -> Self {
    Self::BadRequest(format!("{field} is required"))
  }

  const fn status(&self) -> StatusCode {
    match self {
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::Forbidden(_) => StatusCode::FORBIDDEN,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      event!(Level::ERROR, "Request failed: {self}");
    } else {
      event!(Level::DEBUG, "Request rejected ({status}): {self}");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

impl From<neynar::Error> for ApiError {
  fn from(e: neynar::Error) -> Self {
    match e {
      neynar::Error::Unauthorized(message) => Self::Forbidden(message),
      neynar::Error::NotFound(message) => Self::NotFound(message),
      e @ (neynar::Error::Api { .. } | neynar::Error::RateLimited | neynar::Error::NeynarBug(_)) => {
        Self::Internal(e.to_string())
      }
    }
  }
}

impl From<operator::Error> for ApiError {
  fn from(e: operator::Error) -> Self {
    match e {
      operator::Error::Lookup(e) => Self::from(e),
      e => Self::Internal(e.to_string()),
    }
  }
}

impl From<signer::Error> for ApiError {
  fn from(e: signer::Error) -> Self {
    match e {
      signer::Error::Operator(e) => Self::from(e),
      signer::Error::Neynar(e) => Self::from(e),
    }
  }
}

impl From<unfollow::Error> for ApiError {
  fn from(e: unfollow::Error) -> Self {
    Self::BadRequest(e.to_string())
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}
