use std::sync::Arc;

use anyhow::Context;
use environment::Config;
use neynar::Neynar;
use services::{follow_gate::FollowGate, manifest::Manifest, operator::Operator};
use tokio::sync::OnceCell;

#[derive(Debug, Clone)]
pub struct AppState {
  pub config: Arc<Config>,
  pub neynar: Neynar,
  pub follow_gate: FollowGate,
  pub manifest: Arc<Manifest>,
  operator: Arc<OnceCell<Operator>>,
}

impl AppState {
  /// # Errors
  ///
  /// When the Neynar client cannot be built.
  pub fn new(config: Config) -> anyhow::Result<Self> {
    let neynar = Neynar::new(&config.neynar).context("Failed to build Neynar client")?;
    Ok(Self {
      follow_gate: FollowGate::new(&config.gate),
      manifest: Arc::new(Manifest::new(&config.manifest)),
      config: Arc::new(config),
      neynar,
      operator: Arc::new(OnceCell::new()),
    })
  }

  /// The operator account, resolved on first use. A failed resolution is
  /// retried on the next call.
  pub async fn operator(&self) -> Result<&Operator, services::operator::Error> {
    self
      .operator
      .get_or_try_init(|| Operator::resolve(&self.neynar, &self.config.operator))
      .await
  }
}
