use std::{fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error as ThisError;

use crate::{lookup_env, WORKSPACE_DIR};

pub const DEFAULT_NEYNAR_API_URL: &str = "https://api.neynar.com";
/// Optimism mainnet, where the Farcaster key registry lives.
pub const DEFAULT_KEY_GATEWAY_CHAIN_ID: u64 = 10;
pub const DEFAULT_SIGNED_KEY_REQUEST_VALIDATOR: &str = "0x00000000FC700472606ED4fA22623Acf62c60553";

#[derive(ThisError, Debug, PartialEq, Eq)]
pub enum Error {
  #[error("Missing required environment variable {0}")]
  Missing(&'static str),
  #[error("Couldn't parse environment variable {name} (value: {value:?})")]
  Invalid { name: &'static str, value: String },
}

/// Everything the service and the shell need, read once at startup and handed
/// down explicitly to each component.
#[derive(Debug, Clone)]
pub struct Config {
  pub neynar: NeynarConfig,
  pub operator: OperatorConfig,
  pub gate: GateConfig,
  pub polling: PollingConfig,
  pub manifest: ManifestConfig,
  /// Signer used by the legacy single-target unfollow route.
  pub legacy_signer_uuid: Option<String>,
  pub follow_graph_max_pages: u32,
  pub bind_address: SocketAddr,
  pub signer_store_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct NeynarConfig {
  pub api_key: String,
  pub client_id: Option<String>,
  pub base_url: String,
}

/// The developer account that co-signs every signed key request.
#[derive(Clone)]
pub struct OperatorConfig {
  pub mnemonic: Option<String>,
  pub app_fid: Option<u64>,
  pub chain_id: u64,
  pub signed_key_request_validator: String,
  pub deadline: Duration,
}

// Keeps the mnemonic out of logs.
impl std::fmt::Debug for OperatorConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OperatorConfig")
      .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
      .field("app_fid", &self.app_fid)
      .field("chain_id", &self.chain_id)
      .field(
        "signed_key_request_validator",
        &self.signed_key_request_validator,
      )
      .field("deadline", &self.deadline)
      .finish()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
  /// Account every viewer has to follow before using the app.
  pub required_fid: u64,
  /// Account that skips the follow check altogether.
  pub admin_fid: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
  pub interval: Duration,
  pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestConfig {
  pub app_url: String,
  pub name: String,
  pub icon_url: String,
  pub image_url: String,
  pub splash_image_url: String,
  pub splash_background_color: String,
  pub button_title: String,
  pub primary_category: String,
  pub tags: Vec<String>,
  pub account_association: Option<AccountAssociation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAssociation {
  pub header: String,
  pub payload: String,
  pub signature: String,
}

impl Config {
  /// Reads the configuration from the process environment.
  ///
  /// # Errors
  ///
  /// When a required variable is missing or any variable fails to parse.
  pub fn from_env() -> Result<Self, Error> {
    Self::from_lookup(lookup_env)
  }

  /// Reads the configuration from an arbitrary variable source.
  ///
  /// # Errors
  ///
  /// When a required variable is missing or any variable fails to parse.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
  where
    F: Fn(&str) -> Option<String>,
  {
    let vars = Vars { lookup };

    let app_url: String = vars.or("APP_URL", "http://localhost:3000".to_string())?;
    let app_url = app_url.trim_end_matches('/').to_string();

    let account_association = match (
      vars.opt::<String>("ACCOUNT_ASSOCIATION_HEADER")?,
      vars.opt::<String>("ACCOUNT_ASSOCIATION_PAYLOAD")?,
      vars.opt::<String>("ACCOUNT_ASSOCIATION_SIGNATURE")?,
    ) {
      (Some(header), Some(payload), Some(signature)) => Some(AccountAssociation {
        header,
        payload,
        signature,
      }),
      _ => None,
    };

    let tags = vars
      .opt::<String>("APP_TAGS")?
      .unwrap_or_else(|| "farcaster,social,unfollow".to_string())
      .split(',')
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(String::from)
      .collect();

    Ok(Self {
      neynar: NeynarConfig {
        api_key: vars.required("NEYNAR_API_KEY")?,
        client_id: vars.opt("NEYNAR_CLIENT_ID")?,
        base_url: vars
          .or("NEYNAR_API_URL", DEFAULT_NEYNAR_API_URL.to_string())?
          .trim_end_matches('/')
          .to_string(),
      },
      operator: OperatorConfig {
        mnemonic: vars.opt("FARCASTER_DEVELOPER_MNEMONIC")?,
        app_fid: vars.opt("APP_FID")?,
        chain_id: vars.or("KEY_GATEWAY_CHAIN_ID", DEFAULT_KEY_GATEWAY_CHAIN_ID)?,
        signed_key_request_validator: vars.or(
          "SIGNED_KEY_REQUEST_VALIDATOR",
          DEFAULT_SIGNED_KEY_REQUEST_VALIDATOR.to_string(),
        )?,
        deadline: Duration::from_secs(vars.or("SIGNED_KEY_DEADLINE_SECS", 86_400)?),
      },
      gate: GateConfig {
        required_fid: vars.required("REQUIRED_FID")?,
        admin_fid: vars.opt("ADMIN_FID")?,
      },
      polling: PollingConfig {
        interval: Duration::from_secs(vars.or("SIGNER_POLL_INTERVAL_SECS", 2)?),
        timeout: Duration::from_secs(vars.or("SIGNER_POLL_TIMEOUT_SECS", 120)?),
      },
      manifest: ManifestConfig {
        name: vars.or("APP_NAME", "Farcaster Ghosts".to_string())?,
        icon_url: vars.or("APP_ICON_URL", format!("{app_url}/icon.png"))?,
        image_url: vars.or("APP_IMAGE_URL", format!("{app_url}/image.png"))?,
        splash_image_url: vars.or("APP_SPLASH_IMAGE_URL", format!("{app_url}/splash.png"))?,
        splash_background_color: vars.or(
          "APP_SPLASH_BACKGROUND_COLOR",
          "#0b0b0f".to_string(),
        )?,
        button_title: vars.or("APP_BUTTON_TITLE", "Find ghosts".to_string())?,
        primary_category: vars.or("APP_PRIMARY_CATEGORY", "social".to_string())?,
        tags,
        account_association,
        app_url,
      },
      legacy_signer_uuid: vars.opt("SIGNER_UUID")?,
      follow_graph_max_pages: vars.or("FOLLOW_GRAPH_MAX_PAGES", 50)?,
      bind_address: vars.or(
        "BIND_ADDRESS",
        SocketAddr::from(([0, 0, 0, 0], 3000)),
      )?,
      signer_store_path: vars.opt("SIGNER_STORE_PATH")?.unwrap_or_else(|| {
        WORKSPACE_DIR.join("signer.json")
      }),
    })
  }
}

struct Vars<F> {
  lookup: F,
}
impl<F: Fn(&str) -> Option<String>> Vars<F> {
  fn opt<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, Error> {
    match (self.lookup)(name).filter(|s| !s.trim().is_empty()) {
      None => Ok(None),
      Some(value) => value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| Error::Invalid { name, value }),
    }
  }

  fn or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, Error> {
    Ok(self.opt(name)?.unwrap_or(default))
  }

  fn required<T: FromStr>(&self, name: &'static str) -> Result<T, Error> {
    self.opt(name)?.ok_or(Error::Missing(name))
  }
}

impl Display for GateConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.admin_fid {
      Some(admin) => write!(f, "required fid {} (admin {admin})", self.required_fid),
      None => write!(f, "required fid {}", self.required_fid),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
      .collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn minimal_environment_uses_defaults() {
    let config = Config::from_lookup(lookup(&[
      ("NEYNAR_API_KEY", "key"),
      ("REQUIRED_FID", "977233"),
      ("SIGNER_STORE_PATH", "/tmp/signer.json"),
    ]))
    .unwrap();

    assert_eq!(config.neynar.api_key, "key");
    assert_eq!(config.neynar.base_url, DEFAULT_NEYNAR_API_URL);
    assert_eq!(config.gate.required_fid, 977_233);
    assert_eq!(config.gate.admin_fid, None);
    assert_eq!(config.polling.interval, Duration::from_secs(2));
    assert_eq!(config.polling.timeout, Duration::from_secs(120));
    assert_eq!(config.operator.chain_id, 10);
    assert_eq!(config.operator.deadline, Duration::from_secs(86_400));
    assert_eq!(config.follow_graph_max_pages, 50);
    assert_eq!(config.bind_address.port(), 3000);
    assert_eq!(config.manifest.icon_url, "http://localhost:3000/icon.png");
    assert_eq!(config.manifest.tags, vec!["farcaster", "social", "unfollow"]);
    assert!(config.manifest.account_association.is_none());
  }

  #[test]
  fn missing_api_key_is_reported() {
    let err = Config::from_lookup(lookup(&[("REQUIRED_FID", "1")])).unwrap_err();
    assert_eq!(err, Error::Missing("NEYNAR_API_KEY"));
  }

  #[test]
  fn malformed_fid_is_reported() {
    let err = Config::from_lookup(lookup(&[
      ("NEYNAR_API_KEY", "key"),
      ("REQUIRED_FID", "not-a-number"),
      ("SIGNER_STORE_PATH", "/tmp/signer.json"),
    ]))
    .unwrap_err();
    assert_eq!(
      err,
      Error::Invalid {
        name: "REQUIRED_FID",
        value: "not-a-number".to_string()
      }
    );
  }

  #[test]
  fn blank_values_count_as_unset() {
    let config = Config::from_lookup(lookup(&[
      ("NEYNAR_API_KEY", "key"),
      ("REQUIRED_FID", "1"),
      ("ADMIN_FID", "  "),
      ("NEYNAR_API_URL", "http://127.0.0.1:9000/"),
      ("APP_URL", "https://ghosts.example/"),
      ("APP_TAGS", "a, b,,c"),
      ("SIGNER_STORE_PATH", "/tmp/signer.json"),
    ]))
    .unwrap();
    assert_eq!(config.gate.admin_fid, None);
    assert_eq!(config.neynar.base_url, "http://127.0.0.1:9000");
    assert_eq!(config.manifest.app_url, "https://ghosts.example");
    assert_eq!(config.manifest.tags, vec!["a", "b", "c"]);
  }

  #[test]
  fn account_association_needs_all_three_parts() {
    let partial = Config::from_lookup(lookup(&[
      ("NEYNAR_API_KEY", "key"),
      ("REQUIRED_FID", "1"),
      ("ACCOUNT_ASSOCIATION_HEADER", "h"),
      ("SIGNER_STORE_PATH", "/tmp/signer.json"),
    ]))
    .unwrap();
    assert!(partial.manifest.account_association.is_none());

    let full = Config::from_lookup(lookup(&[
      ("NEYNAR_API_KEY", "key"),
      ("REQUIRED_FID", "1"),
      ("ACCOUNT_ASSOCIATION_HEADER", "h"),
      ("ACCOUNT_ASSOCIATION_PAYLOAD", "p"),
      ("ACCOUNT_ASSOCIATION_SIGNATURE", "s"),
      ("SIGNER_STORE_PATH", "/tmp/signer.json"),
    ]))
    .unwrap();
    assert_eq!(
      full.manifest.account_association,
      Some(AccountAssociation {
        header: "h".to_string(),
        payload: "p".to_string(),
        signature: "s".to_string(),
      })
    );
  }

  #[test]
  fn operator_debug_hides_mnemonic() {
    let config = Config::from_lookup(lookup(&[
      ("NEYNAR_API_KEY", "key"),
      ("REQUIRED_FID", "1"),
      ("FARCASTER_DEVELOPER_MNEMONIC", "test test test"),
      ("SIGNER_STORE_PATH", "/tmp/signer.json"),
    ]))
    .unwrap();
    let debug = format!("{:?}", config.operator);
    assert!(!debug.contains("test test"));
    assert!(debug.contains("<redacted>"));
  }
}
