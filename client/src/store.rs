// catalog_client/src/store.rs

//! The shared product cache.
//!
//! `ProductStore` is a cheap, cloneable handle: every clone sees the same
//! cached list and the same last error. Locks are never held across `.await`.

use catalog::search::filter_basic;
use catalog::{Product, ProductDraft, ProductId, SearchMode, SearchQuery};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::ClientResult;
use crate::transport::CatalogTransport;

/// Where a search result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
  /// Empty query: the cached list as-is.
  Cache,
  Remote,
  /// The remote search failed; the cache was filtered with basic search.
  LocalFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
  pub query: String,
  pub mode: SearchMode,
  pub products: Vec<Product>,
  pub source: SearchSource,
}

#[derive(Debug, Default)]
struct CacheState {
  products: Vec<Product>,
  loaded: bool,
  last_error: Option<String>,
}

#[derive(Clone)]
pub struct ProductStore {
  transport: Arc<dyn CatalogTransport>,
  cache: Arc<RwLock<CacheState>>,
}

impl ProductStore {
  pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
    Self {
      transport,
      cache: Arc::new(RwLock::new(CacheState::default())),
    }
  }

  pub fn products(&self) -> Vec<Product> {
    self.cache.read().products.clone()
  }

  pub fn is_loaded(&self) -> bool {
    self.cache.read().loaded
  }

  /// Message of the last failed list fetch or mutation, cleared by the next
  /// successful fetch.
  pub fn last_error(&self) -> Option<String> {
    self.cache.read().last_error.clone()
  }

  /// Fetches the list once; later calls are served from the cache.
  pub async fn ensure_loaded(&self) -> ClientResult<()> {
    if self.is_loaded() {
      return Ok(());
    }
    self.refresh().await
  }

  #[instrument(name = "product_store::refresh", skip(self))]
  pub async fn refresh(&self) -> ClientResult<()> {
    match self.transport.list().await {
      Ok(products) => {
        info!("Loaded {} products.", products.len());
        let mut cache = self.cache.write();
        cache.products = products;
        cache.loaded = true;
        cache.last_error = None;
        Ok(())
      }
      Err(e) => {
        warn!(error = %e, "Failed to load products.");
        self.cache.write().last_error = Some(e.to_string());
        Err(e)
      }
    }
  }

  #[instrument(name = "product_store::create", skip(self, draft))]
  pub async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
    let product = self.record(self.transport.create(draft).await)?;
    self.cache.write().products.push(product.clone());
    Ok(product)
  }

  #[instrument(name = "product_store::update", skip(self, draft))]
  pub async fn update(&self, id: ProductId, draft: &ProductDraft) -> ClientResult<Product> {
    let product = self.record(self.transport.update(id, draft).await)?;
    if let Some(slot) = self.cache.write().products.iter_mut().find(|p| p.id == id) {
      *slot = product.clone();
    }
    Ok(product)
  }

  /// Removes the product from the cache once the server confirms the delete.
  #[instrument(name = "product_store::delete", skip(self))]
  pub async fn delete(&self, id: ProductId) -> ClientResult<()> {
    self.record(self.transport.delete(id).await)?;
    self.cache.write().products.retain(|p| p.id != id);
    Ok(())
  }

  /// Searches remotely; an empty query returns the whole cached list and a
  /// failed remote search falls back to basic filtering of the cache. The
  /// fallback is silent: `last_error` is left untouched. A cold cache is loaded
  /// first in both cases, and only when that load fails is an error returned
  /// (and recorded).
  #[instrument(name = "product_store::search", skip(self))]
  pub async fn search(&self, query: &str, mode: SearchMode) -> ClientResult<SearchOutcome> {
    let outcome = |products: Vec<Product>, source: SearchSource| SearchOutcome {
      query: query.to_string(),
      mode,
      products,
      source,
    };

    let Some(parsed) = SearchQuery::parse(query) else {
      self.ensure_loaded().await?;
      return Ok(outcome(self.products(), SearchSource::Cache));
    };

    match self.transport.search(parsed.as_str(), mode).await {
      Ok(products) => Ok(outcome(products, SearchSource::Remote)),
      Err(e) => {
        warn!(error = %e, %mode, "Remote search failed, filtering cached products.");
        self.ensure_loaded().await?;
        let products = filter_basic(self.cache.read().products.iter(), &parsed);
        Ok(outcome(products, SearchSource::LocalFallback))
      }
    }
  }

  fn record<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
    if let Err(e) = &result {
      warn!(error = %e, "Catalog request failed.");
      self.cache.write().last_error = Some(e.to_string());
    }
    result
  }
}
