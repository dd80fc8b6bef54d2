// catalog_core/src/error.rs
use anyhow::Error as AnyhowError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::model::ProductId;

/// A single rejected input field, surfaced to callers as field-level detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
  pub field: &'static str,
  pub message: String,
}

impl FieldViolation {
  pub fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self {
      field,
      message: message.into(),
    }
  }
}

impl fmt::Display for FieldViolation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Validation failed: {}", join_violations(.0))]
  Validation(Vec<FieldViolation>),

  #[error("Product with ID {id} not found.")]
  NotFound { id: ProductId },

  /// The full-text path failed (missing index or extension, rejected query).
  /// Callers may recover by falling back to basic search.
  #[error("Advanced search failed. Source: {source}")]
  Search {
    #[source]
    source: AnyhowError,
  },

  #[error("Storage operation failed. Source: {source}")]
  Storage {
    #[source]
    source: AnyhowError,
  },
}

impl CatalogError {
  pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
    CatalogError::Validation(vec![FieldViolation::new(field, message)])
  }

  pub fn storage(source: impl Into<AnyhowError>) -> Self {
    CatalogError::Storage { source: source.into() }
  }

  pub fn search(source: impl Into<AnyhowError>) -> Self {
    CatalogError::Search { source: source.into() }
  }

  /// Validation and not-found errors are deterministic and safe to show verbatim.
  pub fn is_client_error(&self) -> bool {
    matches!(self, CatalogError::Validation(_) | CatalogError::NotFound { .. })
  }
}

fn join_violations(violations: &[FieldViolation]) -> String {
  violations
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

// Opaque errors coming out of a store are storage failures unless they already
// carry a CatalogError.
impl From<AnyhowError> for CatalogError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<CatalogError>() {
      Ok(catalog_err) => catalog_err,
      Err(other) => CatalogError::Storage { source: other },
    }
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
