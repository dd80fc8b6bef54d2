// catalog_server/src/db/postgres.rs

//! `ProductRepository` over PostgreSQL using runtime-checked sqlx queries.

use async_trait::async_trait;
use catalog::{CatalogError, CatalogResult, NewProduct, Page, Product, ProductId, ProductRepository, SearchQuery, TsQuery};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};

use crate::config::AppConfig;

const PRODUCT_COLUMNS: &str = "id, name, price, description, image_url, created_at, updated_at";

/// The weighted search document; must match the expression of the GIN index
/// in the migrations so the planner can use it.
const SEARCH_DOCUMENT: &str = "(setweight(to_tsvector('english', name), 'A') || \
   setweight(to_tsvector('english', description), 'B'))";

#[derive(Debug, FromRow)]
struct ProductRow {
  id: i64,
  name: String,
  price: Decimal,
  description: String,
  image_url: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: row.id,
      name: row.name,
      price: row.price,
      description: row.description,
      image_url: row.image_url,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[derive(Clone)]
pub struct PgProductRepository {
  pool: PgPool,
}

impl PgProductRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

pub async fn connect_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
  PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .acquire_timeout(config.db_acquire_timeout)
    .connect_with(config.database.clone())
    .await
}

fn storage_error(operation: &'static str) -> impl Fn(sqlx::Error) -> CatalogError {
  move |e| {
    error!(operation, error = %e, "Database error.");
    CatalogError::storage(e)
  }
}

/// Escapes `%`, `_` and `\` so the query is matched literally by `ILIKE`.
pub fn like_pattern(query: &SearchQuery) -> String {
  let mut pattern = String::with_capacity(query.as_str().len() + 2);
  pattern.push('%');
  for c in query.as_str().chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

// NULL limit means "no limit" in PostgreSQL.
fn page_binds(page: Page) -> (Option<i64>, i64) {
  (page.effective_limit().map(i64::from), i64::from(page.offset))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
  #[instrument(name = "pg_store::list", skip(self))]
  async fn list(&self, page: Page) -> CatalogResult<Vec<Product>> {
    let (limit, offset) = page_binds(page);
    let rows: Vec<ProductRow> = sqlx::query_as(&format!(
      "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(&self.pool)
    .await
    .map_err(storage_error("list"))?;

    debug!("Fetched {} products.", rows.len());
    Ok(rows.into_iter().map(Product::from).collect())
  }

  #[instrument(name = "pg_store::get", skip(self))]
  async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage_error("get"))?;
    Ok(row.map(Product::from))
  }

  #[instrument(name = "pg_store::insert", skip(self, product))]
  async fn insert(&self, product: NewProduct) -> CatalogResult<Product> {
    let row: ProductRow = sqlx::query_as(&format!(
      "INSERT INTO products (name, price, description, image_url) VALUES ($1, $2, $3, $4) RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .bind(&product.image_url)
    .fetch_one(&self.pool)
    .await
    .map_err(storage_error("insert"))?;
    Ok(row.into())
  }

  #[instrument(name = "pg_store::update", skip(self, product))]
  async fn update(&self, id: ProductId, product: NewProduct) -> CatalogResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!(
      "UPDATE products SET name = $1, price = $2, description = $3, image_url = $4, updated_at = NOW() \
       WHERE id = $5 RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .bind(&product.image_url)
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(storage_error("update"))?;
    Ok(row.map(Product::from))
  }

  #[instrument(name = "pg_store::delete", skip(self))]
  async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(storage_error("delete"))?;
    Ok(result.rows_affected() > 0)
  }

  async fn count(&self) -> CatalogResult<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
      .fetch_one(&self.pool)
      .await
      .map_err(storage_error("count"))?;
    Ok(count.max(0) as u64)
  }

  #[instrument(name = "pg_store::search_basic", skip(self, query), fields(query = %query))]
  async fn search_basic(&self, query: &SearchQuery, page: Page) -> CatalogResult<Vec<Product>> {
    let (limit, offset) = page_binds(page);
    let rows: Vec<ProductRow> = sqlx::query_as(&format!(
      "SELECT {PRODUCT_COLUMNS} FROM products \
       WHERE name ILIKE $1 ESCAPE '\\' OR description ILIKE $1 ESCAPE '\\' \
       ORDER BY name ASC, id ASC LIMIT $2 OFFSET $3"
    ))
    .bind(like_pattern(query))
    .bind(limit)
    .bind(offset)
    .fetch_all(&self.pool)
    .await
    .map_err(storage_error("search_basic"))?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  #[instrument(name = "pg_store::search_advanced", skip(self, query), fields(tsquery = %query))]
  async fn search_advanced(&self, query: &TsQuery, page: Page) -> CatalogResult<Vec<Product>> {
    let (limit, offset) = page_binds(page);
    let rows: Vec<ProductRow> = sqlx::query_as(&format!(
      "SELECT {PRODUCT_COLUMNS} FROM products \
       WHERE {SEARCH_DOCUMENT} @@ to_tsquery('english', $1) \
       ORDER BY ts_rank({SEARCH_DOCUMENT}, to_tsquery('english', $1)) DESC, created_at DESC, id DESC \
       LIMIT $2 OFFSET $3"
    ))
    .bind(query.to_tsquery_string())
    .bind(limit)
    .bind(offset)
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      error!(error = %e, "Full-text search failed.");
      CatalogError::search(e)
    })?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  async fn ping(&self) -> CatalogResult<()> {
    sqlx::query("SELECT 1")
      .execute(&self.pool)
      .await
      .map(|_| ())
      .map_err(storage_error("ping"))
  }
}
