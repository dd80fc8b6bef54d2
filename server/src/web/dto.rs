// catalog_server/src/web/dto.rs

//! Wire shapes of the products API.
//!
//! The canonical external field name is `image_url`. Requests still accept the
//! legacy `imageUrl` spelling; that alias is the only place the two names meet.

use catalog::{Page, Product, ProductDraft, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
  pub name: Option<String>,
  #[serde(default, with = "rust_decimal::serde::float_option")]
  pub price: Option<Decimal>,
  pub description: Option<String>,
  #[serde(alias = "imageUrl")]
  pub image_url: Option<String>,
}

impl From<ProductPayload> for ProductDraft {
  fn from(payload: ProductPayload) -> Self {
    ProductDraft {
      name: payload.name,
      price: payload.price,
      description: payload.description,
      image_url: payload.image_url,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductResponse {
  pub id: ProductId,
  pub name: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  pub description: String,
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
  fn from(product: Product) -> Self {
    ProductResponse {
      id: product.id,
      name: product.name,
      price: product.price,
      description: product.description,
      image_url: product.image_url,
      created_at: product.created_at,
      updated_at: product.updated_at,
    }
  }
}

pub fn to_responses(products: Vec<Product>) -> Vec<ProductResponse> {
  products.into_iter().map(ProductResponse::from).collect()
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
  pub limit: Option<u32>,
  pub offset: Option<u32>,
}

impl From<PageParams> for Page {
  fn from(params: PageParams) -> Self {
    Page {
      limit: params.limit,
      offset: params.offset.unwrap_or(0),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
  pub query: Option<String>,
  #[serde(default)]
  pub advanced: bool,
  pub limit: Option<u32>,
  pub offset: Option<u32>,
}

impl SearchParams {
  pub fn page(&self) -> Page {
    PageParams {
      limit: self.limit,
      offset: self.offset,
    }
    .into()
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
  pub message: String,
}
