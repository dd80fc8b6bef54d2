// catalog_core/src/store/mod.rs

//! The Product Store seam. The server plugs in PostgreSQL; tests and local
//! runs use [`memory::InMemoryProductRepository`].

pub mod memory;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::CatalogResult;
use crate::model::{NewProduct, Product, ProductId};
use crate::search::{SearchQuery, TsQuery};

pub use memory::InMemoryProductRepository;

pub const MAX_PAGE_LIMIT: u32 = 100;

/// Optional window over a result set. The default returns every row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
  pub limit: Option<u32>,
  #[serde(default)]
  pub offset: u32,
}

impl Page {
  pub fn new(limit: u32, offset: u32) -> Self {
    Page {
      limit: Some(limit.clamp(1, MAX_PAGE_LIMIT)),
      offset,
    }
  }

  pub fn is_unbounded(&self) -> bool {
    self.limit.is_none() && self.offset == 0
  }

  /// Limit clamped into `1..=MAX_PAGE_LIMIT`.
  pub fn effective_limit(&self) -> Option<u32> {
    self.limit.map(|l| l.clamp(1, MAX_PAGE_LIMIT))
  }

  pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
    if self.is_unbounded() {
      return items;
    }
    let iter = items.into_iter().skip(self.offset as usize);
    match self.effective_limit() {
      Some(limit) => iter.take(limit as usize).collect(),
      None => iter.collect(),
    }
  }
}

/// Storage operations over the `products` table. Every method touches at most
/// one row when writing; implementations rely on the backend's single-row
/// atomicity.
#[async_trait]
pub trait ProductRepository: Send + Sync {
  /// All products, newest first (`created_at` desc, `id` desc).
  async fn list(&self, page: Page) -> CatalogResult<Vec<Product>>;

  async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>>;

  async fn insert(&self, product: NewProduct) -> CatalogResult<Product>;

  /// Returns `None` when no row has `id`.
  async fn update(&self, id: ProductId, product: NewProduct) -> CatalogResult<Option<Product>>;

  /// Returns `false` when no row has `id`.
  async fn delete(&self, id: ProductId) -> CatalogResult<bool>;

  async fn count(&self) -> CatalogResult<u64>;

  /// Substring match on name or description, ordered by name ascending.
  async fn search_basic(&self, query: &SearchQuery, page: Page) -> CatalogResult<Vec<Product>>;

  /// Full-text AND match, ordered by rank descending then newest first.
  /// Fails with `CatalogError::Search` when the full-text machinery is unavailable.
  async fn search_advanced(&self, query: &TsQuery, page: Page) -> CatalogResult<Vec<Product>>;

  /// Cheap liveness probe.
  async fn ping(&self) -> CatalogResult<()> {
    self.count().await.map(|_| ())
  }
}
