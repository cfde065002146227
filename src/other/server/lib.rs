mod error;
mod routes;
mod state;

use std::future::Future;

use anyhow::Context;
use axum::{
  routing::{get, post},
  Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{event, Level};

pub use error::ApiError;
pub use state::AppState;

#[must_use]
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(routes::health::act))
    .route("/api/app-config", get(routes::app_config::act))
    .route("/api/check-follow", get(routes::check_follow::act))
    .route("/api/get-non-followers", post(routes::get_non_followers::act))
    .route("/api/create-signer", post(routes::create_signer::act))
    .route("/api/check-signer", get(routes::check_signer::act))
    .route("/api/unfollow", post(routes::unfollow::act))
    .route("/api/unfollow-legacy", post(routes::legacy::unfollow))
    .route("/api/create-signer-legacy", post(routes::legacy::create_signer))
    .route("/api/webhook", post(routes::webhook::act))
    .route("/.well-known/farcaster.json", get(routes::manifest::act))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}

/// Serves the API on the configured address until `shutdown` resolves.
///
/// # Errors
///
/// When the address cannot be bound or the server fails.
pub async fn serve<F>(state: AppState, shutdown: F) -> anyhow::Result<()>
where
  F: Future<Output = ()> + Send + 'static,
{
  let address = state.config.bind_address;
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("Failed to bind {address}"))?;
  event!(
    Level::INFO,
    "Listening on {address}, gated behind {}.",
    state.config.gate
  );

  axum::serve(listener, router(state))
    .with_graceful_shutdown(shutdown)
    .await
    .context("Server error")
}
