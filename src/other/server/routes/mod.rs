pub mod app_config;
pub mod check_follow;
pub mod check_signer;
pub mod create_signer;
pub mod get_non_followers;
pub mod health;
pub mod legacy;
pub mod manifest;
pub mod unfollow;
pub mod webhook;

use uuid::Uuid;

use crate::ApiError;

fn parse_signer_uuid(field: &str, raw: Option<&str>) -> Result<Uuid, ApiError> {
  let raw = raw.ok_or_else(|| ApiError::missing(field))?;
  Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("{field} is not a valid UUID")))
}
