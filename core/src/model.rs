// catalog_core/src/model.rs

//! Product records as the store holds them, plus the unvalidated and validated
//! inputs that flow into it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProductId = i64;

/// A stored product. `id` and the timestamps are owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  pub description: String,
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Caller-supplied product fields before validation. Every field may be missing
/// so that validation can report all problems at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
  pub name: Option<String>,
  #[serde(default, with = "rust_decimal::serde::float_option")]
  pub price: Option<Decimal>,
  pub description: Option<String>,
  pub image_url: Option<String>,
}

impl ProductDraft {
  pub fn new(name: impl Into<String>, price: Decimal) -> Self {
    Self {
      name: Some(name.into()),
      price: Some(price),
      ..Default::default()
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
    self.image_url = Some(image_url.into());
    self
  }
}

/// Fields that passed validation and are ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
  pub name: String,
  pub price: Decimal,
  pub description: String,
  pub image_url: Option<String>,
}

impl NewProduct {
  pub(crate) fn into_product(self, id: ProductId, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Product {
    Product {
      id,
      name: self.name,
      price: self.price,
      description: self.description,
      image_url: self.image_url,
      created_at,
      updated_at,
    }
  }
}
