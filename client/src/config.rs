// catalog_client/src/config.rs

use std::env;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
  /// API root, e.g. `http://localhost:5000/api`. Product routes hang off it.
  pub base_url: String,
  pub timeout: Duration,
  pub debounce: Duration,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout: DEFAULT_TIMEOUT,
      debounce: DEFAULT_DEBOUNCE,
    }
  }
}

impl ClientConfig {
  pub fn from_env() -> ClientResult<Self> {
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Reads `CATALOG_API_URL`, `CATALOG_TIMEOUT_SECS` and `CATALOG_DEBOUNCE_MS`,
  /// falling back to the defaults for anything unset.
  pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();
    if let Some(url) = lookup("CATALOG_API_URL") {
      config.base_url = url;
    }
    if let Some(secs) = lookup("CATALOG_TIMEOUT_SECS") {
      let secs = secs
        .parse::<u64>()
        .map_err(|e| ClientError::Config(format!("Invalid CATALOG_TIMEOUT_SECS: {}", e)))?;
      config.timeout = Duration::from_secs(secs);
    }
    if let Some(millis) = lookup("CATALOG_DEBOUNCE_MS") {
      let millis = millis
        .parse::<u64>()
        .map_err(|e| ClientError::Config(format!("Invalid CATALOG_DEBOUNCE_MS: {}", e)))?;
      config.debounce = Duration::from_millis(millis);
    }
    Ok(config)
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }
}
