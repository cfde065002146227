mod selection;
mod signer_session;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use environment::{Config, WORKSPACE_DIR};
use neynar::Neynar;
use services::{
  follow_gate::FollowGate,
  non_followers,
  unfollow::{self, MAX_BATCH},
};
use tracing::{event, Level};
use types::{entities::user::User, Fid};

#[cfg(unix)]
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

/// Lists the accounts you follow that do not follow you back, and unfollows
/// them.
#[derive(Debug, Parser)]
#[command(name = "shell", version)]
struct Cli {
  /// Your Farcaster ID.
  #[arg(long)]
  fid: Fid,
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Print every account that does not follow back.
  List,
  /// Unfollow the given accounts, or all of them with `--all`.
  Unfollow {
    #[arg(required_unless_present = "all")]
    fids: Vec<Fid>,
    #[arg(long, conflicts_with = "fids")]
    all: bool,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  dotenv::from_filename(WORKSPACE_DIR.join(".env")).ok();
  // Logging - The variables are needed for the lifetime of the program
  let _log_guards = utils::init_logging("Shell.log").await;

  let config = Config::from_env().context("Invalid configuration")?;
  let client = Neynar::new(&config.neynar).context("Failed to build Neynar client")?;

  let gate = FollowGate::new(&config.gate);
  if !gate.is_following(&client, cli.fid).await {
    bail!(
      "FID {} does not follow FID {}. Follow it first, then try again.",
      cli.fid,
      gate.required_fid()
    );
  }

  let signer_uuid = signer_session::establish(&client, &config, cli.fid).await?;

  println!("Loading your follow graph...");
  let ghosts = non_followers::act(&client, cli.fid, config.follow_graph_max_pages).await?;

  match cli.command {
    Command::List => print_ghosts(&ghosts),
    Command::Unfollow { fids, all } => {
      let selection = if all {
        selection::Selection::everyone(&ghosts)
      } else {
        selection::Selection::pick(&ghosts, &fids)
      };
      for skipped in &selection.skipped {
        println!("Skipping {skipped}: not in your non-follower list.");
      }
      if selection.targets.is_empty() {
        println!("Nothing to unfollow.");
        return Ok(());
      }

      let mut failed = 0;
      for (n, batch) in selection.targets.chunks(MAX_BATCH).enumerate() {
        let outcome = unfollow::act(&client, signer_uuid, batch).await?;
        println!(
          "Batch {}: unfollowed {}, failed {}.",
          n + 1,
          outcome.succeeded.len(),
          outcome.failed.len()
        );
        for fid in &outcome.failed {
          println!("  could not unfollow {fid}");
        }
        failed += outcome.failed.len();
      }
      event!(
        Level::INFO,
        "Unfollow finished for {}: {} targets, {failed} failed.",
        cli.fid,
        selection.targets.len()
      );
    }
  }

  Ok(())
}

fn print_ghosts(ghosts: &[User]) {
  if ghosts.is_empty() {
    println!("Everyone you follow follows you back.");
    return;
  }

  println!("{} accounts do not follow you back:", ghosts.len());
  for user in ghosts {
    if user.display_name.is_empty() {
      println!("{:>10}  @{}", user.fid, user.username);
    } else {
      println!("{:>10}  @{} ({})", user.fid, user.username, user.display_name);
    }
  }
}
