use axum::{
  extract::{rejection::JsonRejection, State},
  Json,
};
use neynar::lookup_signer;
use serde::{Deserialize, Serialize};
use services::unfollow::{self, Outcome};
use types::{entities::signer::SignerStatus, Fid};

use crate::{routes::parse_signer_uuid, ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
  signer_uuid: Option<String>,
  target_fids: Option<Vec<Fid>>,
}

#[derive(Debug, Serialize)]
pub struct Output {
  success: bool,
  message: String,
  succeeded: Vec<Fid>,
  failed: Vec<Fid>,
}

impl From<Outcome> for Output {
  fn from(outcome: Outcome) -> Self {
    let attempted = outcome.succeeded.len() + outcome.failed.len();
    let message = if outcome.is_complete_success() {
      format!("Unfollowed {attempted} account(s)")
    } else {
      format!(
        "Unfollowed {} of {attempted} account(s)",
        outcome.succeeded.len()
      )
    };
    Self {
      success: outcome.is_complete_success(),
      message,
      succeeded: outcome.succeeded,
      failed: outcome.failed,
    }
  }
}

pub async fn act(
  State(state): State<AppState>,
  input: Result<Json<Input>, JsonRejection>,
) -> Result<Json<Output>, ApiError> {
  let Json(input) = input?;
  let signer_uuid = parse_signer_uuid("signerUuid", input.signer_uuid.as_deref())?;
  let targets = input
    .target_fids
    .ok_or_else(|| ApiError::missing("targetFids"))?;
  unfollow::validate(&targets)?;

  let signer = lookup_signer::act(&state.neynar, signer_uuid).await?;
  if signer.status != SignerStatus::Approved {
    return Err(ApiError::Forbidden(format!(
      "Signer {signer_uuid} is {}, not approved",
      signer.status
    )));
  }

  let outcome = unfollow::act(&state.neynar, signer_uuid, &targets).await?;
  Ok(Json(Output::from(outcome)))
}
