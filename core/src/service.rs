// catalog_core/src/service.rs

//! Product Service: validation in front of a [`ProductRepository`].

use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductDraft, ProductId};
use crate::search::tsquery::MAX_TERMS;
use crate::search::{SearchMode, SearchQuery, TsQuery};
use crate::store::{Page, ProductRepository};
use crate::validation::validate_draft;

#[derive(Clone)]
pub struct ProductService {
  repo: Arc<dyn ProductRepository>,
}

impl ProductService {
  pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
    Self { repo }
  }

  #[instrument(name = "product_service::create", skip(self, draft), err(Display))]
  pub async fn create(&self, draft: ProductDraft) -> CatalogResult<Product> {
    let fields = validate_draft(draft)?;
    let product = self.repo.insert(fields).await.map_err(log_storage("create"))?;
    info!(product_id = product.id, "Product created.");
    Ok(product)
  }

  #[instrument(name = "product_service::get_by_id", skip(self), err(Display))]
  pub async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product> {
    match self.repo.get(id).await.map_err(log_storage("get_by_id"))? {
      Some(product) => Ok(product),
      None => {
        warn!(product_id = id, "Product not found.");
        Err(CatalogError::NotFound { id })
      }
    }
  }

  #[instrument(name = "product_service::list", skip(self), err(Display))]
  pub async fn list(&self, page: Page) -> CatalogResult<Vec<Product>> {
    let products = self.repo.list(page).await.map_err(log_storage("list"))?;
    info!(count = products.len(), "Products listed.");
    Ok(products)
  }

  #[instrument(name = "product_service::update", skip(self, draft), err(Display))]
  pub async fn update(&self, id: ProductId, draft: ProductDraft) -> CatalogResult<Product> {
    let fields = validate_draft(draft)?;
    match self.repo.update(id, fields).await.map_err(log_storage("update"))? {
      Some(product) => {
        info!(product_id = id, "Product updated.");
        Ok(product)
      }
      None => {
        warn!(product_id = id, "Update target not found.");
        Err(CatalogError::NotFound { id })
      }
    }
  }

  #[instrument(name = "product_service::delete", skip(self), err(Display))]
  pub async fn delete(&self, id: ProductId) -> CatalogResult<()> {
    if self.repo.delete(id).await.map_err(log_storage("delete"))? {
      info!(product_id = id, "Product deleted.");
      Ok(())
    } else {
      warn!(product_id = id, "Delete target not found.");
      Err(CatalogError::NotFound { id })
    }
  }

  /// Rejects an empty query instead of returning every product.
  #[instrument(name = "product_service::search", skip(self), err(Display))]
  pub async fn search(&self, raw_query: &str, mode: SearchMode, page: Page) -> CatalogResult<Vec<Product>> {
    let query = SearchQuery::parse(raw_query).ok_or_else(|| CatalogError::validation("query", "Search query is required"))?;

    let found = match mode {
      SearchMode::Basic => self.repo.search_basic(&query, page).await,
      SearchMode::Advanced => match TsQuery::from_query(&query) {
        Some(ts_query) if ts_query.exceeds_term_limit() => Err(CatalogError::validation(
          "query",
          format!("Search query has more than {} distinct terms", MAX_TERMS),
        )),
        Some(ts_query) => self.repo.search_advanced(&ts_query, page).await,
        None => Err(CatalogError::validation("query", "Search query has no searchable terms")),
      },
    }
    .map_err(log_storage("search"))?;

    info!(%mode, results = found.len(), "Search completed.");
    Ok(found)
  }

  pub async fn count(&self) -> CatalogResult<u64> {
    self.repo.count().await
  }

  pub async fn ping(&self) -> CatalogResult<()> {
    self.repo.ping().await
  }
}

// Storage and search failures are logged with full detail here; callers only
// ever show a generic message.
fn log_storage(operation: &'static str) -> impl Fn(CatalogError) -> CatalogError {
  move |err| {
    if !err.is_client_error() {
      error!(operation, error = ?err, "Product store failure.");
    }
    err
  }
}
