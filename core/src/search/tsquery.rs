// catalog_core/src/search/tsquery.rs

//! Free text → structured AND-of-terms expression for PostgreSQL `to_tsquery`.
//!
//! Terms are the maximal runs of alphanumeric characters, lowercased. Every
//! other character, including the tsquery operators `& | ! ( ) : * < >` and
//! quotes, only separates terms and never reaches the storage engine. Each term
//! is rendered as a quoted lexeme so the output stays well-formed even if the
//! term rules are loosened later.

use std::fmt;

use super::SearchQuery;

/// Most distinct terms a single query may carry. Longer queries are rejected
/// rather than truncated, since dropping a term would widen the AND match.
pub const MAX_TERMS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsQuery {
  terms: Vec<String>,
}

impl TsQuery {
  /// Returns `None` when the text contains no terms.
  pub fn parse(text: &str) -> Option<Self> {
    let mut terms: Vec<String> = Vec::new();
    for term in text
      .split(|c: char| !c.is_alphanumeric())
      .filter(|t| !t.is_empty())
      .map(str::to_lowercase)
    {
      if !terms.contains(&term) {
        terms.push(term);
      }
    }
    if terms.is_empty() {
      None
    } else {
      Some(TsQuery { terms })
    }
  }

  pub fn from_query(query: &SearchQuery) -> Option<Self> {
    Self::parse(query.as_str())
  }

  pub fn terms(&self) -> &[String] {
    &self.terms
  }

  pub fn exceeds_term_limit(&self) -> bool {
    self.terms.len() > MAX_TERMS
  }

  /// Renders the `to_tsquery` input, e.g. `'blue' & 'mug'`.
  pub fn to_tsquery_string(&self) -> String {
    self
      .terms
      .iter()
      .map(|t| quote_lexeme(t))
      .collect::<Vec<_>>()
      .join(" & ")
  }
}

impl fmt::Display for TsQuery {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_tsquery_string())
  }
}

fn quote_lexeme(term: &str) -> String {
  let mut quoted = String::with_capacity(term.len() + 2);
  quoted.push('\'');
  for c in term.chars() {
    match c {
      '\'' => quoted.push_str("''"),
      '\\' => quoted.push_str("\\\\"),
      other => quoted.push(other),
    }
  }
  quoted.push('\'');
  quoted
}
