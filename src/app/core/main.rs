mod on_shutdown;

use anyhow::Context;
use environment::{Config, WORKSPACE_DIR};
use on_shutdown::graceful_shutdown;
use server::AppState;
use tracing::{event, Level};

#[cfg(unix)]
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv::from_filename(WORKSPACE_DIR.join(".env")).ok();
  // Logging - The variables are needed for the lifetime of the program
  let _log_guards = utils::init_logging("Server.log").await;

  let config = Config::from_env().context("Invalid configuration")?;
  let state = AppState::new(config)?;

  event!(Level::INFO, "Server starting!");
  server::serve(state, graceful_shutdown()).await?;
  event!(Level::INFO, "Server stopped.");
  Ok(())
}
