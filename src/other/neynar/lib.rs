use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error as ThisError;
use tokio::time::sleep;
use tracing::{event, Level};

mod client;
mod follow_pages;
mod wire;

pub mod create_signer;
pub mod delete_follow;
pub mod get_followers;
pub mod get_following;
pub mod get_users;
pub mod lookup_custody_address;
pub mod lookup_signer;
pub mod register_signed_key;

pub use client::Neynar;
pub use wire::ViewerContext;

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("{message}")]
  Api {
    status: Option<u16>,
    message: String,
  },
  #[error("{0}")]
  Unauthorized(String),
  #[error("{0}")]
  NotFound(String),
  #[error("Rate limited by Neynar")]
  RateLimited,
  #[error("Invalid Neynar data: {0}")]
  NeynarBug(String),
}

pub type Result<T> = core::result::Result<T, Error>;

static PER_REQ_RATE_LIMIT_RETRIES: u32 = 3;
static RATE_LIMIT_BACKOFF: u64 = 500; // 500 Milliseconds

trait NeynarReq {
  type ReqOutput: DeserializeOwned;

  fn build(self, client: &Neynar) -> RequestBuilder;

  /// Issues the request once, plus up to `PER_REQ_RATE_LIMIT_RETRIES` resends
  /// when Neynar answers 429. A rate-limited request was never executed
  /// upstream, so resending it does not repeat its side effects.
  async fn act(self, client: &Neynar) -> Result<Self::ReqOutput>
  where
    Self: Sized,
  {
    let request = self.build(client);
    client.minimum_delay().await;

    let mut rate_limited = 0;
    loop {
      let Some(attempt) = request.try_clone() else {
        return Err(Error::Api {
          status: None,
          message: "Request body cannot be resent".to_string(),
        });
      };

      match send::<Self::ReqOutput>(attempt).await {
        Err(Error::RateLimited) if rate_limited < PER_REQ_RATE_LIMIT_RETRIES => {
          rate_limited += 1;
          event!(
            Level::DEBUG,
            "Rate limited, retrying ({rate_limited}/{PER_REQ_RATE_LIMIT_RETRIES})"
          );
          sleep(Duration::from_millis(
            RATE_LIMIT_BACKOFF * u64::from(rate_limited),
          ))
          .await;
        }
        res => return res,
      }
    }
  }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
  let response = request.send().await.map_err(|e| {
    event!(Level::WARN, "Failed to issue request, API Error: {e}");
    Error::Api {
      status: None,
      message: e.to_string(),
    }
  })?;

  let status = response.status();
  let body = response.text().await.map_err(|e| {
    event!(Level::WARN, "Failed to read response body, API Error: {e}");
    Error::Api {
      status: Some(status.as_u16()),
      message: e.to_string(),
    }
  })?;

  if status.is_success() {
    return serde_json::from_str(&body).map_err(|e| {
      event!(
        Level::WARN,
        "(Notice) Received unexpected response shape: {e}. Body: {body}"
      );
      Error::NeynarBug(e.to_string())
    });
  }

  let message = wire::error_message(&body)
    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
  let err = match status {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized(message),
    StatusCode::NOT_FOUND => Error::NotFound(message),
    StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
    _ => {
      event!(
        Level::WARN,
        "Failed to issue request, API Error. Status Code: {status}. Error: {message}."
      );
      Error::Api {
        status: Some(status.as_u16()),
        message,
      }
    }
  };
  Err(err)
}
