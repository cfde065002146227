use environment::ManifestConfig;
use serde::Serialize;

static MANIFEST_VERSION: &str = "1";
static WEBHOOK_PATH: &str = "/api/webhook";

/// `/.well-known/farcaster.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub account_association: Option<AccountAssociation>,
  pub frame: Frame,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountAssociation {
  pub header: String,
  pub payload: String,
  pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
  pub version: &'static str,
  pub name: String,
  pub home_url: String,
  pub icon_url: String,
  pub image_url: String,
  pub button_title: String,
  pub splash_image_url: String,
  pub splash_background_color: String,
  pub webhook_url: String,
  pub primary_category: String,
  pub tags: Vec<String>,
}

impl Manifest {
  #[must_use]
  pub fn new(config: &ManifestConfig) -> Self {
    Self {
      account_association: config
        .account_association
        .as_ref()
        .map(|a| AccountAssociation {
          header: a.header.clone(),
          payload: a.payload.clone(),
          signature: a.signature.clone(),
        }),
      frame: Frame {
        version: MANIFEST_VERSION,
        name: config.name.clone(),
        home_url: config.app_url.clone(),
        icon_url: config.icon_url.clone(),
        image_url: config.image_url.clone(),
        button_title: config.button_title.clone(),
        splash_image_url: config.splash_image_url.clone(),
        splash_background_color: config.splash_background_color.clone(),
        webhook_url: format!("{}{WEBHOOK_PATH}", config.app_url),
        primary_category: config.primary_category.clone(),
        tags: config.tags.clone(),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use environment::AccountAssociation as Association;
  use serde_json::json;

  use super::*;

  fn config() -> ManifestConfig {
    ManifestConfig {
      app_url: "https://ghosts.example".to_string(),
      name: "Farcaster Ghosts".to_string(),
      icon_url: "https://ghosts.example/icon.png".to_string(),
      image_url: "https://ghosts.example/image.png".to_string(),
      splash_image_url: "https://ghosts.example/splash.png".to_string(),
      splash_background_color: "#0b0b0f".to_string(),
      button_title: "Find ghosts".to_string(),
      primary_category: "social".to_string(),
      tags: vec!["farcaster".to_string(), "unfollow".to_string()],
      account_association: None,
    }
  }

  #[test]
  fn serializes_the_frame() {
    let value = serde_json::to_value(Manifest::new(&config())).unwrap();

    assert_eq!(
      value,
      json!({
        "frame": {
          "version": "1",
          "name": "Farcaster Ghosts",
          "homeUrl": "https://ghosts.example",
          "iconUrl": "https://ghosts.example/icon.png",
          "imageUrl": "https://ghosts.example/image.png",
          "buttonTitle": "Find ghosts",
          "splashImageUrl": "https://ghosts.example/splash.png",
          "splashBackgroundColor": "#0b0b0f",
          "webhookUrl": "https://ghosts.example/api/webhook",
          "primaryCategory": "social",
          "tags": ["farcaster", "unfollow"]
        }
      })
    );
  }

  #[test]
  fn includes_the_account_association() {
    let config = ManifestConfig {
      account_association: Some(Association {
        header: "aGVhZGVy".to_string(),
        payload: "cGF5bG9hZA".to_string(),
        signature: "c2ln".to_string(),
      }),
      ..config()
    };

    let value = serde_json::to_value(Manifest::new(&config)).unwrap();

    assert_eq!(
      value["accountAssociation"],
      json!({ "header": "aGVhZGVy", "payload": "cGF5bG9hZA", "signature": "c2ln" })
    );
  }
}
