//! Mini-app lifecycle events posted by Farcaster clients.
//!
//! Clients post either the bare event or a JSON Farcaster Signature envelope
//! whose header and payload are base64url JSON. Events are only logged.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error as ThisError;
use tracing::{event, Level};
use types::Fid;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("Webhook body is not JSON: {0}")]
  NotJson(#[from] serde_json::Error),
  #[error("Webhook {part} is not base64url: {source}")]
  Encoding {
    part: &'static str,
    source: base64::DecodeError,
  },
  #[error("Webhook body carries no event")]
  NoEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationDetails {
  pub url: String,
  pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
  #[serde(rename = "frame_added", alias = "miniapp_added")]
  Added {
    #[serde(default, rename = "notificationDetails")]
    notification_details: Option<NotificationDetails>,
  },
  #[serde(rename = "app_uninstalled", alias = "frame_removed", alias = "miniapp_removed")]
  Uninstalled,
  #[serde(rename = "notifications_enabled")]
  NotificationsEnabled {
    #[serde(default, rename = "notificationDetails")]
    notification_details: Option<NotificationDetails>,
  },
  #[serde(rename = "notifications_disabled")]
  NotificationsDisabled,
  #[serde(other)]
  Unknown,
}

/// A decoded webhook call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
  /// The event name as sent.
  pub name: String,
  pub event: Event,
  /// The account that signed the envelope, when there was one.
  pub fid: Option<Fid>,
}

#[derive(Deserialize)]
struct Envelope {
  header: String,
  payload: String,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
  fid: Fid,
}

/// Decodes a webhook body.
///
/// # Errors
///
/// When the body, or the envelope's payload, is not JSON carrying an `event`.
pub fn parse(body: &[u8]) -> Result<Received, Error> {
  let value: Value = serde_json::from_slice(body)?;

  let (payload, fid) = if value.get("event").is_some() {
    (value, None)
  } else if value.get("header").is_some() && value.get("payload").is_some() {
    let envelope: Envelope = serde_json::from_value(value)?;
    let header: EnvelopeHeader = serde_json::from_slice(&decode("header", &envelope.header)?)?;
    let payload: Value = serde_json::from_slice(&decode("payload", &envelope.payload)?)?;
    (payload, Some(header.fid))
  } else {
    return Err(Error::NoEvent);
  };

  let name = payload
    .get("event")
    .and_then(Value::as_str)
    .ok_or(Error::NoEvent)?
    .to_string();
  let event = serde_json::from_value(payload)?;
  Ok(Received { name, event, fid })
}

fn decode(part: &'static str, encoded: &str) -> Result<Vec<u8>, Error> {
  URL_SAFE_NO_PAD
    .decode(encoded.trim_end_matches('='))
    .map_err(|source| Error::Encoding { part, source })
}

/// Logs a received event. No state changes on any event.
pub fn record(received: &Received) {
  let who = received
    .fid
    .map_or_else(|| "unsigned".to_string(), |fid| format!("fid {fid}"));
  match &received.event {
    Event::Added {
      notification_details,
    } => event!(
      Level::INFO,
      "Mini app added ({who}), notifications {}.",
      if notification_details.is_some() { "on" } else { "off" }
    ),
    Event::Uninstalled => event!(Level::INFO, "Mini app removed ({who})."),
    Event::NotificationsEnabled {
      notification_details: Some(details),
    } => event!(
      Level::INFO,
      "Notifications enabled ({who}) via {}.",
      details.url
    ),
    Event::NotificationsEnabled {
      notification_details: None,
    } => event!(Level::INFO, "Notifications enabled ({who})."),
    Event::NotificationsDisabled => event!(Level::INFO, "Notifications disabled ({who})."),
    Event::Unknown => event!(
      Level::WARN,
      "Unknown webhook event `{}` ({who}).",
      received.name
    ),
  }
}
