// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset of these helpers

use async_trait::async_trait;
use catalog::search::fulltext::search_ranked;
use catalog::search::filter_basic;
use catalog::{Product, ProductDraft, ProductId, SearchMode, SearchQuery, TsQuery};
use catalog_client::{CatalogTransport, ClientError, ClientResult, ProductStore};
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

fn server_error(message: &str) -> ClientError {
  ClientError::Api {
    status: 500,
    message: message.to_string(),
    fields: Vec::new(),
  }
}

/// In-process stand-in for the API. Searches behave like the server's
/// in-memory store unless told to fail.
#[derive(Default)]
pub struct FakeTransport {
  products: Mutex<Vec<Product>>,
  fail_search: AtomicBool,
  fail_list: AtomicBool,
  search_calls: Mutex<Vec<String>>,
  list_calls: Mutex<usize>,
  search_delays: Mutex<HashMap<String, Duration>>,
}

impl FakeTransport {
  pub fn with_products(products: Vec<Product>) -> Arc<Self> {
    let fake = Self::default();
    *fake.products.lock() = products;
    Arc::new(fake)
  }

  pub fn fail_search(&self, fail: bool) {
    self.fail_search.store(fail, Ordering::SeqCst);
  }

  pub fn fail_list(&self, fail: bool) {
    self.fail_list.store(fail, Ordering::SeqCst);
  }

  pub fn delay_search(&self, query: &str, delay: Duration) {
    self.search_delays.lock().insert(query.to_string(), delay);
  }

  pub fn search_calls(&self) -> Vec<String> {
    self.search_calls.lock().clone()
  }

  pub fn list_calls(&self) -> usize {
    *self.list_calls.lock()
  }
}

#[async_trait]
impl CatalogTransport for FakeTransport {
  async fn list(&self) -> ClientResult<Vec<Product>> {
    *self.list_calls.lock() += 1;
    if self.fail_list.load(Ordering::SeqCst) {
      return Err(ClientError::Transport("connection refused".into()));
    }
    Ok(self.products.lock().clone())
  }

  async fn get(&self, id: ProductId) -> ClientResult<Product> {
    self
      .products
      .lock()
      .iter()
      .find(|p| p.id == id)
      .cloned()
      .ok_or_else(|| ClientError::Api {
        status: 404,
        message: format!("Product with ID {} not found.", id),
        fields: Vec::new(),
      })
  }

  async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
    let mut products = self.products.lock();
    let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let now = Utc::now();
    let product = Product {
      id,
      name: draft.name.clone().unwrap_or_default(),
      price: draft.price.unwrap_or_default(),
      description: draft.description.clone().unwrap_or_default(),
      image_url: draft.image_url.clone(),
      created_at: now,
      updated_at: now,
    };
    products.push(product.clone());
    Ok(product)
  }

  async fn update(&self, id: ProductId, draft: &ProductDraft) -> ClientResult<Product> {
    let mut products = self.products.lock();
    let product = products.iter_mut().find(|p| p.id == id).ok_or_else(|| server_error("missing"))?;
    if let Some(name) = &draft.name {
      product.name = name.clone();
    }
    Ok(product.clone())
  }

  async fn delete(&self, id: ProductId) -> ClientResult<()> {
    let mut products = self.products.lock();
    let before = products.len();
    products.retain(|p| p.id != id);
    if products.len() == before {
      return Err(ClientError::Api {
        status: 404,
        message: format!("Product with ID {} not found.", id),
        fields: Vec::new(),
      });
    }
    Ok(())
  }

  async fn search(&self, query: &str, mode: SearchMode) -> ClientResult<Vec<Product>> {
    self.search_calls.lock().push(query.to_string());
    let delay = self.search_delays.lock().get(query).copied();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    if self.fail_search.load(Ordering::SeqCst) {
      return Err(server_error("Server error while searching products"));
    }

    let products = self.products.lock().clone();
    let found = match mode {
      SearchMode::Basic => SearchQuery::parse(query)
        .map(|q| filter_basic(products.iter(), &q))
        .unwrap_or_default(),
      SearchMode::Advanced => TsQuery::parse(query)
        .map(|q| search_ranked(products.iter(), &q))
        .unwrap_or_default(),
    };
    Ok(found)
  }
}

/// "Blue Mug" (id 1) and "Red Plate" (id 2), both ceramic.
pub fn mug_and_plate() -> Vec<Product> {
  let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).single().expect("valid timestamp");
  let product = |id: i64, name: &str, description: &str| Product {
    id,
    name: name.to_string(),
    price: rust_decimal::Decimal::new(1000, 2),
    description: description.to_string(),
    image_url: None,
    created_at: at,
    updated_at: at,
  };
  vec![product(1, "Blue Mug", "ceramic mug"), product(2, "Red Plate", "ceramic plate")]
}

pub fn store_over(fake: &Arc<FakeTransport>) -> ProductStore {
  ProductStore::new(fake.clone())
}

pub fn names(products: &[Product]) -> Vec<&str> {
  products.iter().map(|p| p.name.as_str()).collect()
}
