//! The app's own Farcaster account, which vouches for every signer it hands
//! out by signing a `SignedKeyRequest` for the key registry.

use std::{str::FromStr, time::Duration};

use alloy::{
  hex,
  primitives::{Address, Bytes, U256},
  signers::{
    local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
    SignerSync,
  },
  sol_types::{eip712_domain, Eip712Domain},
};
use chrono::{DateTime, Utc};
use environment::OperatorConfig;
use neynar::{lookup_custody_address, Neynar};
use thiserror::Error as ThisError;
use tracing::{event, Level};
use types::Fid;

use typed::SignedKeyRequest;

#[allow(clippy::pedantic, clippy::nursery)]
mod typed {
  alloy::sol! {
    struct SignedKeyRequest {
      uint256 requestFid;
      bytes key;
      uint256 deadline;
    }
  }
}

static DOMAIN_NAME: &str = "Farcaster SignedKeyRequestValidator";
static DOMAIN_VERSION: &str = "1";

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("Operator not configured: set FARCASTER_DEVELOPER_MNEMONIC")]
  NotConfigured,
  #[error("Invalid operator mnemonic: {0}")]
  Mnemonic(String),
  #[error("Invalid signed key request validator address: {0}")]
  Validator(String),
  #[error("Invalid signer public key: {0}")]
  PublicKey(String),
  #[error("Failed to sign key request: {0}")]
  Signing(String),
  #[error("Failed to resolve the operator's FID: {0}")]
  Lookup(#[from] neynar::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

/// A signed key request ready to be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRequestSignature {
  pub app_fid: Fid,
  pub deadline: u64,
  pub signature: String,
}

#[derive(Debug, Clone)]
pub struct Operator {
  signer: PrivateKeySigner,
  fid: Fid,
  domain: Eip712Domain,
  deadline_ttl: Duration,
}

impl Operator {
  /// Derives the operator key and works out its FID, asking Neynar for the
  /// account behind the custody address when `APP_FID` is not set.
  ///
  /// # Errors
  ///
  /// When no mnemonic is configured, when the mnemonic or validator address
  /// is malformed, or when the custody address lookup fails.
  pub async fn resolve(client: &Neynar, config: &OperatorConfig) -> Result<Self> {
    let signer = derive_signer(config)?;
    let fid = match config.app_fid {
      Some(fid) => fid,
      None => {
        let address = signer.address().to_string();
        event!(Level::INFO, "Looking up operator FID for {address}.");
        lookup_custody_address::act(client, &address).await?.fid
      }
    };
    Self::new(signer, fid, config)
  }

  /// # Errors
  ///
  /// When the validator address in `config` is malformed.
  pub fn new(signer: PrivateKeySigner, fid: Fid, config: &OperatorConfig) -> Result<Self> {
    let verifying_contract = Address::from_str(&config.signed_key_request_validator)
      .map_err(|e| Error::Validator(format!("{}: {e}", config.signed_key_request_validator)))?;
    let domain = eip712_domain! {
      name: DOMAIN_NAME,
      version: DOMAIN_VERSION,
      chain_id: config.chain_id,
      verifying_contract: verifying_contract,
    };

    Ok(Self {
      signer,
      fid,
      domain,
      deadline_ttl: config.deadline,
    })
  }

  #[must_use]
  pub const fn fid(&self) -> Fid {
    self.fid
  }

  #[must_use]
  pub fn address(&self) -> Address {
    self.signer.address()
  }

  /// Signs a request for `public_key` that expires `deadline_ttl` from now.
  ///
  /// # Errors
  ///
  /// When `public_key` is not hex or signing fails.
  pub fn sign_key_request(&self, public_key: &str) -> Result<KeyRequestSignature> {
    self.sign_key_request_at(public_key, Utc::now())
  }

  fn sign_key_request_at(&self, public_key: &str, now: DateTime<Utc>) -> Result<KeyRequestSignature> {
    let deadline = deadline_after(now, self.deadline_ttl);
    let request = self.key_request(public_key, deadline)?;
    let signature = self
      .signer
      .sign_typed_data_sync(&request, &self.domain)
      .map_err(|e| Error::Signing(e.to_string()))?;

    Ok(KeyRequestSignature {
      app_fid: self.fid,
      deadline,
      signature: hex::encode_prefixed(signature.as_bytes()),
    })
  }

  fn key_request(&self, public_key: &str, deadline: u64) -> Result<SignedKeyRequest> {
    let key = Bytes::from_str(public_key).map_err(|e| Error::PublicKey(format!("{public_key}: {e}")))?;
    Ok(SignedKeyRequest {
      requestFid: U256::from(self.fid),
      key,
      deadline: U256::from(deadline),
    })
  }
}

fn derive_signer(config: &OperatorConfig) -> Result<PrivateKeySigner> {
  let phrase = config.mnemonic.as_deref().ok_or(Error::NotConfigured)?;
  MnemonicBuilder::<English>::default()
    .phrase(phrase)
    .build()
    .map_err(|e| Error::Mnemonic(e.to_string()))
}

/// Unix seconds `ttl` after `now`.
fn deadline_after(now: DateTime<Utc>, ttl: Duration) -> u64 {
  let now = u64::try_from(now.timestamp()).unwrap_or_default();
  now.saturating_add(ttl.as_secs())
}
