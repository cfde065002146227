use serde_json::Value;
use tracing::{event, Level};
use uuid::Uuid;

use super::{SignerStore, SIGNER_KEY};

impl SignerStore {
  /// Remembers `signer_uuid` as the approved signer.
  ///
  /// # Errors
  ///
  /// When the store cannot be read or written.
  pub async fn save(&self, signer_uuid: Uuid) -> anyhow::Result<()> {
    let mut entries = self.read_entries().await?;
    entries.insert(SIGNER_KEY.to_string(), Value::String(signer_uuid.to_string()));
    self.write_entries(&entries).await?;

    event!(
      Level::INFO,
      "Stored signer {signer_uuid} in {}.",
      self.path.display()
    );
    Ok(())
  }
}
