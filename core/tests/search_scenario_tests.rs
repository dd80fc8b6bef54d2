// tests/search_scenario_tests.rs
mod common;

use catalog::testing::{assert_basic_search_contract, contract_catalog};
use catalog::{CatalogError, InMemoryProductRepository, Page, ProductRepository, SearchMode, SearchQuery};
use common::*;

#[tokio::test]
async fn basic_search_orders_ceramic_items_by_name() {
  setup_tracing();
  let (svc, repo) = service_with_repo();
  // Insert in reverse name order so the ordering comes from the search.
  repo.insert_row(row_at("Red Plate", "ceramic plate", 0));
  repo.insert_row(row_at("Blue Mug", "ceramic mug", 1));

  let found = svc.search("ceramic", SearchMode::Basic, Page::default()).await.unwrap();
  assert_eq!(names(&found), vec!["Blue Mug", "Red Plate"]);
}

#[tokio::test]
async fn advanced_search_requires_every_term() {
  setup_tracing();
  let (svc, repo) = service_with_repo();
  seed_mug_and_plate(&repo);

  let found = svc.search("blue mug", SearchMode::Advanced, Page::default()).await.unwrap();
  assert_eq!(names(&found), vec!["Blue Mug"]);
}

#[tokio::test]
async fn advanced_search_survives_operator_characters() {
  setup_tracing();
  let (svc, repo) = service_with_repo();
  seed_mug_and_plate(&repo);

  let found = svc.search("blue & mug:*", SearchMode::Advanced, Page::default()).await.unwrap();
  assert_eq!(names(&found), vec!["Blue Mug"]);

  let found = svc.search("(ceramic) | !plate'", SearchMode::Advanced, Page::default()).await.unwrap();
  assert_eq!(names(&found), vec!["Red Plate"]);
}

#[tokio::test]
async fn empty_query_is_rejected_in_both_modes() {
  setup_tracing();
  let (svc, repo) = service_with_repo();
  seed_mug_and_plate(&repo);

  for mode in [SearchMode::Basic, SearchMode::Advanced] {
    let err = svc.search("", mode, Page::default()).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "mode {mode}");
  }
}

#[tokio::test]
async fn delete_of_unknown_id_keeps_row_count() {
  setup_tracing();
  let (svc, repo) = service_with_repo();
  seed_mug_and_plate(&repo);

  let before = repo.count().await.unwrap();
  let err = svc.delete(12345).await.unwrap_err();
  assert!(matches!(err, CatalogError::NotFound { id: 12345 }));
  assert_eq!(repo.count().await.unwrap(), before);
}

#[tokio::test]
async fn every_name_term_finds_its_product() {
  setup_tracing();
  let (svc, repo) = service_with_repo();
  let catalog = contract_catalog();
  for product in &catalog {
    repo.insert_row(product.clone());
  }

  for product in &catalog {
    for term in product.name.split_whitespace() {
      let found = svc.search(term, SearchMode::Advanced, Page::default()).await.unwrap();
      assert!(
        found.iter().any(|p| p.name == product.name),
        "advanced search for {term:?} missed {:?}",
        product.name
      );
    }
    let found = svc.search(&product.name, SearchMode::Advanced, Page::default()).await.unwrap();
    assert!(found.iter().any(|p| p.name == product.name));
  }
}

#[tokio::test]
async fn basic_search_results_always_contain_the_query() {
  setup_tracing();
  let (svc, repo) = service_with_repo();
  for product in contract_catalog() {
    repo.insert_row(product);
  }

  for q in ["a", "MUG", "cot", "%", "_", "e", "plate ", "zzz"] {
    let found = svc.search(q, SearchMode::Basic, Page::default()).await;
    // "%" and "_" carry no alphanumerics: they are empty queries.
    if SearchQuery::parse(q).is_none() {
      assert!(found.is_err());
      continue;
    }
    let needle = q.trim().to_lowercase();
    for p in found.unwrap() {
      assert!(p.name.to_lowercase().contains(&needle) || p.description.to_lowercase().contains(&needle));
    }
  }
}

#[tokio::test]
async fn search_pages_are_windows_of_the_full_result() {
  setup_tracing();
  let (svc, repo) = service_with_repo();
  for i in 0..7 {
    repo.insert_row(row_at(&format!("Mug {i}"), "ceramic", i));
  }

  let all = svc.search("mug", SearchMode::Basic, Page::default()).await.unwrap();
  let page = svc.search("mug", SearchMode::Basic, Page::new(3, 2)).await.unwrap();
  assert_eq!(page, all[2..5].to_vec());
}

#[tokio::test]
async fn in_memory_store_meets_basic_contract() {
  setup_tracing();
  let repo = InMemoryProductRepository::new();
  for product in contract_catalog() {
    repo.insert_row(product);
  }

  assert_basic_search_contract(|q| {
    let repo = &repo;
    async move {
      let query = SearchQuery::parse(&q).expect("contract queries are non-empty");
      repo.search_basic(&query, Page::default()).await.expect("basic search never fails")
    }
  })
  .await;
}

#[tokio::test]
async fn advanced_query_over_the_term_limit_is_rejected_not_truncated() {
  setup_tracing();
  let (svc, repo) = service_with_repo();
  let words: Vec<String> = (0..32).map(|i| format!("w{i}")).collect();
  repo.insert_row(row_at("Blue Mug", &words.join(" "), 0));

  let at_limit = words.join(" ");
  let found = svc.search(&at_limit, SearchMode::Advanced, Page::default()).await.unwrap();
  assert_eq!(names(&found), vec!["Blue Mug"]);

  let over = format!("{at_limit} absentterm");
  let err = svc.search(&over, SearchMode::Advanced, Page::default()).await.unwrap_err();
  match err {
    CatalogError::Validation(fields) => assert_eq!(fields[0].field, "query"),
    other => panic!("expected a validation error, got {other:?}"),
  }
}
