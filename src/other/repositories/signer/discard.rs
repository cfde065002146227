use tokio::fs;
use tracing::{event, Level};

use super::SignerStore;

impl SignerStore {
  /// Removes the store file whatever it holds. Used when its contents can no
  /// longer be read, so `clear` has nothing to work with.
  ///
  /// # Errors
  ///
  /// When the file exists but cannot be removed.
  pub async fn discard(&self) -> anyhow::Result<()> {
    match fs::remove_file(&self.path).await {
      Ok(()) => {
        event!(Level::INFO, "Discarded {}.", self.path.display());
        Ok(())
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}
