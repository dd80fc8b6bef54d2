// catalog_core/src/store/memory.rs

//! A process-local Product Store.
//!
//! Lock guards are `parking_lot` guards and are never held across `.await`.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tracing::{debug, instrument};

use super::{Page, ProductRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::model::{NewProduct, Product, ProductId};
use crate::search::{basic, fulltext, SearchQuery, TsQuery};

#[derive(Debug)]
pub struct InMemoryProductRepository {
  rows: RwLock<BTreeMap<ProductId, Product>>,
  next_id: AtomicI64,
  full_text_enabled: AtomicBool,
}

impl Default for InMemoryProductRepository {
  fn default() -> Self {
    Self::new()
  }
}

impl InMemoryProductRepository {
  pub fn new() -> Self {
    Self {
      rows: RwLock::new(BTreeMap::new()),
      next_id: AtomicI64::new(1),
      full_text_enabled: AtomicBool::new(true),
    }
  }

  /// Toggles the advanced path. When disabled, `search_advanced` fails the way
  /// a database without the text-search index or extension would.
  pub fn set_full_text_enabled(&self, enabled: bool) {
    self.full_text_enabled.store(enabled, Ordering::SeqCst);
  }

  /// Inserts an already-built row, keeping its timestamps. Used for seeding
  /// fixtures with controlled `created_at` values.
  pub fn insert_row(&self, mut product: Product) -> Product {
    let id = self.next_id.fetch_add(1, Ordering::SeqCst);
    product.id = id;
    self.rows.write().insert(id, product.clone());
    product
  }

  fn snapshot(&self) -> Vec<Product> {
    self.rows.read().values().cloned().collect()
  }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
  async fn list(&self, page: Page) -> CatalogResult<Vec<Product>> {
    let mut all = self.snapshot();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
    Ok(page.apply(all))
  }

  async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>> {
    Ok(self.rows.read().get(&id).cloned())
  }

  #[instrument(name = "memory_store::insert", skip(self, product))]
  async fn insert(&self, product: NewProduct) -> CatalogResult<Product> {
    let now = Utc::now();
    let id = self.next_id.fetch_add(1, Ordering::SeqCst);
    let stored = product.into_product(id, now, now);
    self.rows.write().insert(id, stored.clone());
    debug!(product_id = id, "Inserted product.");
    Ok(stored)
  }

  async fn update(&self, id: ProductId, product: NewProduct) -> CatalogResult<Option<Product>> {
    let mut rows = self.rows.write();
    let Some(existing) = rows.get_mut(&id) else {
      return Ok(None);
    };
    let updated = product.into_product(id, existing.created_at, Utc::now());
    *existing = updated.clone();
    Ok(Some(updated))
  }

  async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
    Ok(self.rows.write().remove(&id).is_some())
  }

  async fn count(&self) -> CatalogResult<u64> {
    Ok(self.rows.read().len() as u64)
  }

  async fn search_basic(&self, query: &SearchQuery, page: Page) -> CatalogResult<Vec<Product>> {
    let rows = self.rows.read();
    let found = basic::filter_basic(rows.values(), query);
    drop(rows);
    Ok(page.apply(found))
  }

  async fn search_advanced(&self, query: &TsQuery, page: Page) -> CatalogResult<Vec<Product>> {
    if !self.full_text_enabled.load(Ordering::SeqCst) {
      return Err(CatalogError::search(anyhow::anyhow!(
        "text search configuration is unavailable"
      )));
    }
    let rows = self.rows.read();
    let found = fulltext::search_ranked(rows.values(), query);
    drop(rows);
    Ok(page.apply(found))
  }
}
