//! Local persistence of the approved signer.
//!
//! The store is a small JSON object on disk. Only the approved signer UUID is
//! kept, under `SIGNER_KEY`; other keys in the file are left alone.

mod clear;
mod discard;
mod load;
mod save;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};
use tokio::fs;

pub static SIGNER_KEY: &str = "farcaster_ghosts_signer_uuid";

#[derive(Debug, Clone)]
pub struct SignerStore {
  path: PathBuf,
}

impl SignerStore {
  #[must_use]
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  #[must_use]
  pub fn path(&self) -> &Path {
    &self.path
  }

  async fn read_entries(&self) -> anyhow::Result<Map<String, Value>> {
    let raw = match fs::read(&self.path).await {
      Ok(raw) => raw,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
      Err(e) => return Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
    };
    serde_json::from_slice(&raw)
      .with_context(|| format!("{} is not a JSON object", self.path.display()))
  }

  async fn write_entries(&self, entries: &Map<String, Value>) -> anyhow::Result<()> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)
        .await
        .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    // Staged beside the target, then renamed over it.
    let staging = self.path.with_extension("json.tmp");
    fs::write(&staging, serde_json::to_vec_pretty(entries)?)
      .await
      .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, &self.path)
      .await
      .with_context(|| format!("Failed to replace {}", self.path.display()))
  }
}
