use std::{fmt, sync::Arc, time::Duration};

use environment::NeynarConfig;
use reqwest::{Client, Method, RequestBuilder};
use tokio::{
  sync::Mutex,
  time::{sleep, Instant},
};

static MINIMUM_DELAY: u64 = 10; // 10 Milliseconds
static REQUEST_TIMEOUT: u64 = 30; // 30 Seconds

/// Authenticated handle on the Neynar v2 API.
///
/// Cheap to clone: clones share the connection pool and the request pacing.
#[derive(Clone)]
pub struct Neynar {
  http: Client,
  base_url: Arc<str>,
  api_key: Arc<str>,
  last_action: Arc<Mutex<Option<Instant>>>,
}

impl Neynar {
  /// # Errors
  ///
  /// When the underlying HTTP client cannot be built (TLS backend failure).
  pub fn new(config: &NeynarConfig) -> Result<Self, reqwest::Error> {
    let http = Client::builder()
      .timeout(Duration::from_secs(REQUEST_TIMEOUT))
      .user_agent(concat!("farcaster-ghosts/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self {
      http,
      base_url: Arc::from(config.base_url.trim_end_matches('/')),
      api_key: Arc::from(config.api_key.as_str()),
      last_action: Arc::new(Mutex::new(None)),
    })
  }

  pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
    self
      .http
      .request(method, format!("{}{path}", self.base_url))
      .header("x-api-key", &*self.api_key)
      .header("accept", "application/json")
  }

  /// Keeps at least `MINIMUM_DELAY` between two requests leaving this client.
  pub(crate) async fn minimum_delay(&self) {
    let mut last_action = self.last_action.lock().await;
    let now = Instant::now();
    if let Some(previous) = *last_action {
      let elapsed = now.duration_since(previous);
      let minimum = Duration::from_millis(MINIMUM_DELAY);
      if elapsed < minimum {
        sleep(minimum - elapsed).await;
      }
    }
    *last_action = Some(Instant::now());
  }
}

impl fmt::Debug for Neynar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Neynar")
      .field("base_url", &self.base_url)
      .finish_non_exhaustive()
  }
}
