use neynar::{create_signer, get_users, lookup_signer, register_signed_key, Neynar};
use thiserror::Error as ThisError;
use tracing::{event, Level};
use types::entities::{
  signer::{Signer, SignerStatus},
  user::User,
};
use uuid::Uuid;

use crate::operator::{self, Operator};

#[derive(ThisError, Debug)]
pub enum Error {
  #[error(transparent)]
  Operator(#[from] operator::Error),
  #[error(transparent)]
  Neynar(#[from] neynar::Error),
}

/// Creates a delegated key and registers a signed key request for it.
///
/// The returned signer is `pending_approval` and carries the deep link the
/// user has to open to approve it.
///
/// # Errors
///
/// When Neynar refuses either call, when the operator cannot sign, or when
/// Neynar answers the registration without an approval URL.
pub async fn create(client: &Neynar, operator: &Operator) -> Result<Signer, Error> {
  let generated = create_signer::act(client).await?;
  event!(
    Level::INFO,
    "Created signer {} ({}).",
    generated.signer_uuid,
    generated.status
  );

  let signed = operator.sign_key_request(&generated.public_key)?;
  let pending = register_signed_key::act(
    client,
    register_signed_key::SignedKey {
      signer_uuid: generated.signer_uuid,
      app_fid: signed.app_fid,
      deadline: signed.deadline,
      signature: signed.signature,
    },
  )
  .await?;

  if pending.signer_approval_url.is_none() {
    return Err(
      neynar::Error::NeynarBug(format!(
        "Signer {} registered without an approval URL",
        pending.signer_uuid
      ))
      .into(),
    );
  }
  Ok(pending)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerCheck {
  pub authenticated: bool,
  pub status: SignerStatus,
  /// The approving account, when approved and Neynar knows it.
  pub user: Option<User>,
  pub signer: Signer,
}

/// Looks up a signer and, once approved, the account that approved it.
///
/// # Errors
///
/// When the signer lookup fails. Unknown signers are `neynar::Error::NotFound`.
/// A failed profile lookup only leaves `user` empty.
pub async fn check(client: &Neynar, signer_uuid: Uuid) -> neynar::Result<SignerCheck> {
  let signer = lookup_signer::act(client, signer_uuid).await?;
  let authenticated = signer.status == SignerStatus::Approved;

  let user = match signer.fid {
    Some(fid) if authenticated => match get_users::act(client, &[fid], None).await {
      Ok(views) => views.into_iter().next().map(|v| v.user),
      Err(e) => {
        event!(Level::WARN, "Failed to fetch profile of {fid}: {e}");
        None
      }
    },
    _ => None,
  };

  Ok(SignerCheck {
    authenticated,
    status: signer.status,
    user,
    signer,
  })
}
