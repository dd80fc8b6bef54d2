// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset of these helpers

use catalog::{InMemoryProductRepository, Product, ProductDraft, ProductService};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
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

pub fn draft(name: &str, cents: i64, description: &str) -> ProductDraft {
  ProductDraft::new(name, Decimal::new(cents, 2)).with_description(description)
}

pub fn service_with_repo() -> (ProductService, Arc<InMemoryProductRepository>) {
  let repo = Arc::new(InMemoryProductRepository::new());
  (ProductService::new(repo.clone()), repo)
}

fn base_time() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).single().expect("valid timestamp")
}

/// A row with a controlled creation time, `minutes` after a fixed base.
pub fn row_at(name: &str, description: &str, minutes: i64) -> Product {
  let created = base_time() + Duration::minutes(minutes);
  Product {
    id: 0,
    name: name.to_string(),
    price: Decimal::new(1000, 2),
    description: description.to_string(),
    image_url: None,
    created_at: created,
    updated_at: created,
  }
}

/// Scenario catalog: "Blue Mug" and "Red Plate", both ceramic.
pub fn seed_mug_and_plate(repo: &InMemoryProductRepository) {
  repo.insert_row(row_at("Blue Mug", "ceramic mug", 0));
  repo.insert_row(row_at("Red Plate", "ceramic plate", 1));
}

pub fn names(products: &[Product]) -> Vec<&str> {
  products.iter().map(|p| p.name.as_str()).collect()
}
