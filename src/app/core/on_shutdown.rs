use tokio::signal;
use tracing::{event, Level};

/// Resolves once the process is asked to stop.
pub async fn graceful_shutdown() {
  let received = shutdown_signal().await;
  event!(
    Level::INFO,
    "Received {received}, shutting down! Finishing in-flight requests..."
  );
}

/// # Panics
///
/// Will panic if fails to install any of the signal handlers.
#[allow(clippy::redundant_pub_crate)] // Select macro propagates this
async fn shutdown_signal() -> &'static str {
  let ctrl_c = async {
    signal::ctrl_c()
      .await
      .unwrap_or_else(|e| panic!("Failed to install Ctrl+C handler! {e}"));
    "Ctrl+C"
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .unwrap_or_else(|e| panic!("Failed to install SIGTERM handler! {e}"))
      .recv()
      .await;
    "SIGTERM"
  };

  #[cfg(windows)]
  let terminate = async {
    signal::windows::ctrl_close()
      .unwrap_or_else(|e| panic!("Failed to install Windows close handler! {e}"))
      .recv()
      .await;
    "close request"
  };

  tokio::select! {
    name = ctrl_c => name,
    name = terminate => name,
  }
}
