// catalog_core/src/search/mod.rs

//! Product search.
//!
//! Two modes share one entry point:
//!  - **Basic**: case-insensitive substring match against name or description,
//!    ordered by name. Always available.
//!  - **Advanced**: an AND-of-terms full-text match over the search document
//!    (name weighted above description), ordered by relevance, newest first on ties.
//!
//! A raw query is normalized into a [`SearchQuery`] before it reaches any store.
//! A query with no alphanumeric content is *empty*: the service rejects it,
//! the client treats it as "no filter".

pub mod basic;
pub mod fulltext;
pub mod tsquery;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use basic::{filter_basic, matches_basic};
pub use tsquery::TsQuery;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
  #[default]
  Basic,
  Advanced,
}

impl SearchMode {
  pub fn from_advanced_flag(advanced: bool) -> Self {
    if advanced {
      SearchMode::Advanced
    } else {
      SearchMode::Basic
    }
  }

  pub fn is_advanced(self) -> bool {
    self == SearchMode::Advanced
  }
}

impl fmt::Display for SearchMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SearchMode::Basic => f.write_str("basic"),
      SearchMode::Advanced => f.write_str("advanced"),
    }
  }
}

impl FromStr for SearchMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "basic" => Ok(SearchMode::Basic),
      "advanced" => Ok(SearchMode::Advanced),
      other => Err(format!("unknown search mode '{}'", other)),
    }
  }
}

/// A trimmed, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
  /// Returns `None` when the query is empty after normalization.
  pub fn parse(raw: &str) -> Option<Self> {
    let trimmed = raw.trim();
    if trimmed.chars().any(char::is_alphanumeric) {
      Some(SearchQuery(trimmed.to_string()))
    } else {
      None
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Lowercased needle used by the basic matcher.
  pub fn needle(&self) -> String {
    self.0.to_lowercase()
  }
}

impl fmt::Display for SearchQuery {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
