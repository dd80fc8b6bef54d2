// catalog_core/src/search/basic.rs

//! Basic search: case-insensitive substring match over name and description.
//!
//! The in-memory store and the client-side fallback both go through
//! [`filter_basic`], so the two cannot drift apart.

use std::cmp::Ordering;

use super::SearchQuery;
use crate::model::Product;

pub fn matches_basic(product: &Product, query: &SearchQuery) -> bool {
  let needle = query.needle();
  contains_folded(&product.name, &needle) || contains_folded(&product.description, &needle)
}

/// Returns the matching products ordered by name ascending; ties keep
/// ascending `id` (the store's natural order).
pub fn filter_basic<'a, I>(products: I, query: &SearchQuery) -> Vec<Product>
where
  I: IntoIterator<Item = &'a Product>,
{
  let needle = query.needle();
  let mut matched: Vec<Product> = products
    .into_iter()
    .filter(|p| contains_folded(&p.name, &needle) || contains_folded(&p.description, &needle))
    .cloned()
    .collect();
  matched.sort_by(compare_by_name);
  matched
}

pub fn compare_by_name(a: &Product, b: &Product) -> Ordering {
  a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
}

fn contains_folded(haystack: &str, lowered_needle: &str) -> bool {
  haystack.to_lowercase().contains(lowered_needle)
}
