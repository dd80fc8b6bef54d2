// catalog_core/src/testing.rs

//! Basic-search contract suite, shared by every implementation of basic
//! search (the stores and the client-side fallback). Enabled with the
//! `test-support` feature.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use std::future::Future;

use crate::model::Product;

/// One query and the names it must return, in order.
#[derive(Debug, Clone)]
pub struct BasicSearchCase {
  pub query: &'static str,
  pub expected: &'static [&'static str],
}

pub const BASIC_SEARCH_CASES: &[BasicSearchCase] = &[
  BasicSearchCase {
    query: "ceramic",
    expected: &["Blue Mug", "Red Plate"],
  },
  BasicSearchCase {
    query: "MUG",
    expected: &["Blue Mug", "Travel Mug"],
  },
  BasicSearchCase {
    query: "100%",
    expected: &["Cotton Tee"],
  },
  BasicSearchCase {
    query: "  lamp  ",
    expected: &["Desk Lamp"],
  },
  BasicSearchCase {
    query: "e m",
    expected: &["Blue Mug"],
  },
  BasicSearchCase {
    query: "no-such-product",
    expected: &[],
  },
];

fn epoch() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().unwrap_or_else(Utc::now)
}

fn fixture_product(id: i64, name: &str, cents: i64, description: &str) -> Product {
  let created = epoch() + Duration::minutes(id);
  Product {
    id,
    name: name.to_string(),
    price: Decimal::new(cents, 2),
    description: description.to_string(),
    image_url: None,
    created_at: created,
    updated_at: created,
  }
}

/// The catalog every contract case runs against. Ids start at 1 in insertion
/// order so stores that assign their own ids end up with the same values.
pub fn contract_catalog() -> Vec<Product> {
  vec![
    fixture_product(1, "Red Plate", 899, "ceramic plate"),
    fixture_product(2, "Blue Mug", 1299, "ceramic mug"),
    fixture_product(3, "Travel Mug", 2450, "Insulated steel tumbler"),
    fixture_product(4, "Cotton Tee", 1500, "100% organic cotton"),
    fixture_product(5, "Desk Lamp", 3999, ""),
  ]
}

/// Runs every [`BASIC_SEARCH_CASES`] entry through `search`, which must already
/// be backed by [`contract_catalog`].
///
/// # Panics
/// When an implementation returns the wrong products or order.
pub async fn assert_basic_search_contract<F, Fut>(mut search: F)
where
  F: FnMut(String) -> Fut,
  Fut: Future<Output = Vec<Product>>,
{
  for case in BASIC_SEARCH_CASES {
    let found = search(case.query.to_string()).await;
    let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, case.expected, "basic search for {:?}", case.query);

    let needle = case.query.trim().to_lowercase();
    for product in &found {
      assert!(
        product.name.to_lowercase().contains(&needle) || product.description.to_lowercase().contains(&needle),
        "{:?} does not contain {:?}",
        product.name,
        needle
      );
    }
  }
}
