use anyhow::Context;
use tracing::{event, Level};
use uuid::Uuid;

use super::{SignerStore, SIGNER_KEY};
use crate::Loadable;

impl SignerStore {
  /// # Errors
  ///
  /// When the store cannot be read or holds something other than a UUID.
  pub async fn load(&self) -> Loadable<Uuid> {
    let entries = self.read_entries().await?;
    let Some(stored) = entries.get(SIGNER_KEY) else {
      return Ok(None);
    };

    let raw = stored
      .as_str()
      .with_context(|| format!("{SIGNER_KEY} is not a string: {stored}"))?;
    let signer_uuid =
      Uuid::parse_str(raw).with_context(|| format!("{SIGNER_KEY} is not a UUID: {raw}"))?;

    event!(Level::DEBUG, "Loaded stored signer {signer_uuid}.");
    Ok(Some(signer_uuid))
  }
}
