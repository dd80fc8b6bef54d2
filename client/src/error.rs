// catalog_client/src/error.rs

use serde::Deserialize;
use thiserror::Error;

/// One rejected field as reported by a 400 validation response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiFieldError {
  pub field: String,
  pub message: String,
}

#[derive(Debug, Clone, Error)]
pub enum ClientError {
  #[error("Invalid client configuration: {0}")]
  Config(String),

  #[error("Request timed out: {0}")]
  Timeout(String),

  #[error("Transport error: {0}")]
  Transport(String),

  /// Non-2xx answer from the API, with the body's `error` message.
  #[error("Server responded with {status}: {message}")]
  Api {
    status: u16,
    message: String,
    fields: Vec<ApiFieldError>,
  },

  #[error("Invalid response body: {0}")]
  Decode(String),
}

impl ClientError {
  pub fn status(&self) -> Option<u16> {
    match self {
      ClientError::Api { status, .. } => Some(*status),
      _ => None,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.status() == Some(404)
  }
}

impl From<reqwest::Error> for ClientError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      ClientError::Timeout(err.to_string())
    } else if err.is_decode() {
      ClientError::Decode(err.to_string())
    } else {
      ClientError::Transport(err.to_string())
    }
  }
}

pub type ClientResult<T, E = ClientError> = std::result::Result<T, E>;
