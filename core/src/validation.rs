// catalog_core/src/validation.rs

//! The single validation policy for product input.
//!
//! - `name`: required, trimmed, at most [`MAX_NAME_LEN`] characters.
//! - `price`: required, greater than zero, at most two decimal places,
//!   below [`MAX_PRICE`] (fits `NUMERIC(10,2)`).
//! - `description`: optional; a missing description is stored as `""`.
//! - `image_url`: optional; when present and non-blank it must be an absolute
//!   `http` or `https` URL.

use rust_decimal::Decimal;
use tracing::debug;
use url::Url;

use crate::error::{CatalogError, CatalogResult, FieldViolation};
use crate::model::{NewProduct, ProductDraft};

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

pub fn validate_draft(draft: ProductDraft) -> CatalogResult<NewProduct> {
  let mut violations = Vec::new();

  let name = match draft.name.as_deref().map(str::trim) {
    Some(name) if !name.is_empty() => {
      if name.chars().count() > MAX_NAME_LEN {
        violations.push(FieldViolation::new(
          "name",
          format!("Product name must be at most {} characters", MAX_NAME_LEN),
        ));
      }
      name.to_string()
    }
    _ => {
      violations.push(FieldViolation::new("name", "Product name is required"));
      String::new()
    }
  };

  let price = match draft.price {
    Some(price) => {
      if let Err(violation) = check_price(price) {
        violations.push(violation);
      }
      price.normalize()
    }
    None => {
      violations.push(FieldViolation::new("price", "Price is required"));
      Decimal::ZERO
    }
  };

  let description = draft.description.map(|d| d.trim().to_string()).unwrap_or_default();

  let image_url = match draft.image_url.as_deref().map(str::trim) {
    Some(raw) if !raw.is_empty() => match check_image_url(raw) {
      Ok(()) => Some(raw.to_string()),
      Err(violation) => {
        violations.push(violation);
        None
      }
    },
    _ => None,
  };

  if !violations.is_empty() {
    debug!(violations = violations.len(), "Product draft rejected.");
    return Err(CatalogError::Validation(violations));
  }

  Ok(NewProduct {
    name,
    price,
    description,
    image_url,
  })
}

fn check_price(price: Decimal) -> Result<(), FieldViolation> {
  if price <= Decimal::ZERO {
    return Err(FieldViolation::new("price", "Price must be greater than zero"));
  }
  if price.normalize().scale() > 2 {
    return Err(FieldViolation::new("price", "Price must have at most two decimal places"));
  }
  if price >= MAX_PRICE {
    return Err(FieldViolation::new("price", format!("Price must be less than {}", MAX_PRICE)));
  }
  Ok(())
}

fn check_image_url(raw: &str) -> Result<(), FieldViolation> {
  match Url::parse(raw) {
    Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
    Ok(_) => Err(FieldViolation::new("image_url", "Image URL must use http or https")),
    Err(e) => Err(FieldViolation::new("image_url", format!("Image URL is not a valid URL: {}", e))),
  }
}
