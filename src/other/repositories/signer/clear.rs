use tokio::fs;
use tracing::{event, Level};

use super::{SignerStore, SIGNER_KEY};

impl SignerStore {
  /// Forgets the stored signer. The file goes away once nothing else is in it.
  ///
  /// # Errors
  ///
  /// When the store cannot be read, written or removed.
  pub async fn clear(&self) -> anyhow::Result<()> {
    let mut entries = self.read_entries().await?;
    if entries.remove(SIGNER_KEY).is_none() {
      return Ok(());
    }

    if entries.is_empty() {
      fs::remove_file(&self.path).await?;
    } else {
      self.write_entries(&entries).await?;
    }
    event!(Level::INFO, "Cleared stored signer.");
    Ok(())
  }
}
