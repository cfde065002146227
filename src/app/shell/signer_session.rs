use anyhow::{bail, Context};
use environment::Config;
use neynar::Neynar;
use repositories::signer::SignerStore;
use services::{
  operator::Operator,
  signer,
  signer_gate::{self, SignerState, SignerStatusSource},
};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{event, Level};
use types::Fid;
use utils::poll::PollPolicy;
use uuid::Uuid;

/// Returns an approved signer for `fid`, reusing the stored one when it still
/// checks out and otherwise walking the user through approving a new one.
pub async fn establish(client: &Neynar, config: &Config, fid: Fid) -> anyhow::Result<Uuid> {
  let store = SignerStore::new(&config.signer_store_path);
  if let Some(signer_uuid) = reuse_stored(&store, client, fid).await? {
    return Ok(signer_uuid);
  }

  event!(Level::INFO, "{}", SignerState::Creating);
  let operator = Operator::resolve(client, &config.operator).await?;
  let pending = signer::create(client, &operator).await?;
  let approval_url = pending.signer_approval_url.unwrap_or_default();
  event!(
    Level::INFO,
    "{}",
    SignerState::PendingApproval {
      signer_uuid: pending.signer_uuid,
      approval_url: approval_url.clone(),
    }
  );
  println!("Approve this app in Warpcast to continue:\n\n  {approval_url}\n");
  println!(
    "Waiting up to {}s for approval (Ctrl-C to give up)...",
    config.polling.timeout.as_secs()
  );

  let cancel = CancellationToken::new();
  let on_ctrl_c = cancel.clone();
  let ctrl_c = tokio::spawn(async move {
    if signal::ctrl_c().await.is_ok() {
      on_ctrl_c.cancel();
    }
  });

  let policy = PollPolicy {
    interval: config.polling.interval,
    timeout: config.polling.timeout,
  };
  let settled =
    signer_gate::await_approval(client, pending.signer_uuid, fid, policy, &cancel).await;
  ctrl_c.abort();

  remember(&store, &settled).await
}

/// Returns the stored signer when it is still approved for `fid`. A signer
/// that no longer checks out is cleared, and an unreadable store is removed.
async fn reuse_stored<S: SignerStatusSource + Sync>(
  store: &SignerStore,
  source: &S,
  fid: Fid,
) -> anyhow::Result<Option<Uuid>> {
  let stored = match store.load().await {
    Ok(stored) => stored,
    Err(e) => {
      event!(Level::WARN, "Stored signer is unreadable, discarding it: {e:#}");
      store.discard().await?;
      None
    }
  };
  let Some(stored) = stored else {
    return Ok(None);
  };

  let state = signer_gate::resume(source, stored, fid)
    .await
    .with_context(|| format!("Could not check stored signer {stored}. It was kept, try again"))?;
  if let SignerState::Approved { signer_uuid } = state {
    return Ok(Some(signer_uuid));
  }
  store.clear().await?;
  Ok(None)
}

async fn remember(store: &SignerStore, settled: &SignerState) -> anyhow::Result<Uuid> {
  match settled {
    SignerState::Approved { signer_uuid } => {
      store
        .save(*signer_uuid)
        .await
        .context("Approved, but failed to remember the signer")?;
      println!("Signer approved.");
      Ok(*signer_uuid)
    }
    SignerState::Expired => bail!("Approval timed out. Run the command again to retry."),
    SignerState::None => bail!("Cancelled."),
    other => bail!("Could not get a signer: {other}"),
  }
}
