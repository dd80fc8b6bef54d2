// catalog_server/src/db/seed.rs

//! Reseeds the products table from the embedded fixture file.

use catalog::validation::validate_draft;
use catalog::{NewProduct, ProductDraft};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::errors::{AppError, Result};

const SEED_PRODUCTS: &str = include_str!("../../seed/products.json");

/// Parses and validates the embedded seed products.
pub fn seed_products() -> Result<Vec<NewProduct>> {
  let drafts: Vec<ProductDraft> =
    serde_json::from_str(SEED_PRODUCTS).map_err(|e| AppError::Internal(format!("Invalid seed file: {}", e)))?;
  drafts
    .into_iter()
    .enumerate()
    .map(|(i, draft)| {
      validate_draft(draft).map_err(|e| AppError::Internal(format!("Seed product #{} is invalid: {}", i, e)))
    })
    .collect()
}

/// Truncates `products` (restarting the id sequence) and inserts the seed
/// products, all in one transaction.
#[instrument(name = "seed::seed_database", skip(pool), err(Display))]
pub async fn seed_database(pool: &PgPool) -> Result<usize> {
  let products = seed_products()?;
  let mut tx = pool.begin().await?;

  sqlx::query("TRUNCATE TABLE products RESTART IDENTITY")
    .execute(&mut *tx)
    .await?;

  for product in &products {
    sqlx::query("INSERT INTO products (name, price, description, image_url) VALUES ($1, $2, $3, $4)")
      .bind(&product.name)
      .bind(product.price)
      .bind(&product.description)
      .bind(&product.image_url)
      .execute(&mut *tx)
      .await?;
  }

  tx.commit().await?;
  info!("Database seeded with {} products.", products.len());
  Ok(products.len())
}
