// catalog_core/src/search/fulltext.rs

//! In-process approximation of the PostgreSQL `english` text-search setup used
//! by the advanced mode: tokenize, drop stopwords, stem, then rank by weighted
//! term frequency with name weighted above description.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::TsQuery;
use crate::model::Product;

/// Weight of a name lexeme (`setweight(..., 'A')`).
pub const NAME_WEIGHT: f32 = 1.0;
/// Weight of a description lexeme (`setweight(..., 'B')`).
pub const DESCRIPTION_WEIGHT: f32 = 0.4;

const STOPWORDS: &[&str] = &[
  "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "in", "into", "is", "it",
  "its", "of", "on", "or", "so", "than", "that", "the", "their", "then", "there", "these", "they", "this", "to",
  "was", "were", "will", "with",
];

pub fn is_stopword(word: &str) -> bool {
  STOPWORDS.contains(&word)
}

/// Light suffix stemmer: enough to fold simple plurals onto their singular.
pub fn stem(word: &str) -> String {
  if word.chars().count() <= 3 {
    return word.to_string();
  }
  if let Some(base) = word.strip_suffix("ies") {
    return format!("{}y", base);
  }
  if word.ends_with("sses") {
    return word[..word.len() - 2].to_string();
  }
  if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
    return word.to_string();
  }
  match word.strip_suffix('s') {
    Some(base) => base.to_string(),
    None => word.to_string(),
  }
}

/// Lexemes of a text field, in order, with stopwords removed.
pub fn lexemes(text: &str) -> Vec<String> {
  text
    .split(|c: char| !c.is_alphanumeric())
    .filter(|t| !t.is_empty())
    .map(str::to_lowercase)
    .filter(|t| !is_stopword(t))
    .map(|t| stem(&t))
    .collect()
}

/// The weighted lexeme bag of a product's search document.
#[derive(Debug, Default)]
pub struct SearchDocument {
  weights: HashMap<String, f32>,
}

impl SearchDocument {
  pub fn of(product: &Product) -> Self {
    let mut weights: HashMap<String, f32> = HashMap::new();
    for lexeme in lexemes(&product.name) {
      *weights.entry(lexeme).or_insert(0.0) += NAME_WEIGHT;
    }
    for lexeme in lexemes(&product.description) {
      *weights.entry(lexeme).or_insert(0.0) += DESCRIPTION_WEIGHT;
    }
    SearchDocument { weights }
  }

  /// `None` when some query lexeme is absent; otherwise the summed weight of
  /// the query lexemes.
  pub fn rank(&self, query_lexemes: &[String]) -> Option<f32> {
    if query_lexemes.is_empty() {
      return None;
    }
    query_lexemes
      .iter()
      .map(|l| self.weights.get(l).copied())
      .sum::<Option<f32>>()
  }
}

/// Query lexemes after the same normalization the documents get. Stopword-only
/// queries yield an empty list and therefore match nothing.
pub fn query_lexemes(query: &TsQuery) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  for term in query.terms().iter().filter(|t| !is_stopword(t)) {
    let lexeme = stem(term);
    if !out.contains(&lexeme) {
      out.push(lexeme);
    }
  }
  out
}

/// Matches every product containing all query lexemes, ordered by rank
/// descending, then `created_at` descending, then `id` descending.
pub fn search_ranked<'a, I>(products: I, query: &TsQuery) -> Vec<Product>
where
  I: IntoIterator<Item = &'a Product>,
{
  let wanted = query_lexemes(query);
  let mut ranked: Vec<(f32, &Product)> = products
    .into_iter()
    .filter_map(|p| SearchDocument::of(p).rank(&wanted).map(|rank| (rank, p)))
    .collect();
  ranked.sort_by(|(ra, a), (rb, b)| {
    rb.partial_cmp(ra)
      .unwrap_or(Ordering::Equal)
      .then_with(|| b.created_at.cmp(&a.created_at))
      .then_with(|| b.id.cmp(&a.id))
  });
  ranked.into_iter().map(|(_, p)| p.clone()).collect()
}
