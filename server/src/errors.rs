// catalog_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use catalog::{CatalogError, FieldViolation};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0:?}")]
  Validation(Vec<FieldViolation>),

  /// Malformed path, query string or JSON body.
  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Search Error")]
  Search { detail: Option<String> },

  #[error("Storage Error")]
  Storage { detail: Option<String> },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Maps a domain error onto the HTTP taxonomy. Storage and search details are
  /// kept only when `expose_detail` is set (development mode).
  pub fn from_catalog(err: CatalogError, expose_detail: bool) -> Self {
    match err {
      CatalogError::Validation(violations) => AppError::Validation(violations),
      CatalogError::NotFound { id } => AppError::NotFound(format!("Product with ID {} not found.", id)),
      CatalogError::Search { source } => AppError::Search {
        detail: expose_detail.then(|| format!("{:#}", source)),
      },
      CatalogError::Storage { source } => AppError::Storage {
        detail: expose_detail.then(|| format!("{:#}", source)),
      },
    }
  }
}

fn internal_body(message: &str, detail: Option<&String>) -> serde_json::Value {
  match detail {
    Some(d) => json!({"error": message, "detail": d}),
    None => json!({"error": message}),
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = ?self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with client error");
    }

    let body = match self {
      AppError::Validation(fields) => json!({"error": "Validation failed", "fields": fields}),
      AppError::BadRequest(m) | AppError::NotFound(m) => json!({"error": m}),
      AppError::Search { detail } => internal_body("Server error while searching products", detail.as_ref()),
      AppError::Storage { detail } => internal_body("Server error while accessing products", detail.as_ref()),
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => {
        json!({"error": "An internal error occurred"})
      }
    };
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
