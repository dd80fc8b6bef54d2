// src/lib.rs

//! Catalog core: the product domain shared by the HTTP server and the client.
//!
//!  - `model`: the `Product` record and its draft/validated inputs.
//!  - `validation`: the one validation policy for product fields.
//!  - `search`: query normalization, basic substring matching, the tsquery
//!    builder and an in-process full-text ranker.
//!  - `store`: the `ProductRepository` seam and an in-memory implementation.
//!  - `service`: `ProductService`, validation in front of a repository.

pub mod error;
pub mod model;
pub mod search;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// --- Re-exports for the Public API ---

pub use crate::error::{CatalogError, CatalogResult, FieldViolation};
pub use crate::model::{NewProduct, Product, ProductDraft, ProductId};
pub use crate::search::{SearchMode, SearchQuery, TsQuery};
pub use crate::service::ProductService;
pub use crate::store::{InMemoryProductRepository, Page, ProductRepository};
