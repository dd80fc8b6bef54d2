// tests/debounce_tests.rs

mod common;

use catalog::SearchMode;
use catalog_client::{ClientConfig, DebouncedSearch, SearchSource};
use common::{mug_and_plate, names, store_over, FakeTransport};
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(300);

#[tokio::test(start_paused = true)]
async fn keystrokes_inside_the_window_collapse_into_one_search() {
  let fake = FakeTransport::with_products(mug_and_plate());
  let search = DebouncedSearch::new(store_over(&fake), DEBOUNCE);

  let first = search.submit("m", SearchMode::Basic);
  tokio::time::sleep(Duration::from_millis(100)).await;
  let second = search.submit("mu", SearchMode::Basic);
  tokio::time::sleep(Duration::from_millis(100)).await;
  let last = search.submit("mug", SearchMode::Basic);

  first.await.unwrap();
  second.await.unwrap();
  last.await.unwrap();

  assert_eq!(fake.search_calls(), vec!["mug"]);
  let outcome = search.latest().expect("published outcome").expect("search succeeded");
  assert_eq!(outcome.query, "mug");
  assert_eq!(names(&outcome.products), vec!["Blue Mug"]);
}

#[tokio::test(start_paused = true)]
async fn nothing_is_searched_before_the_delay() {
  let fake = FakeTransport::with_products(mug_and_plate());
  let search = DebouncedSearch::from_config(store_over(&fake), &ClientConfig::default());
  let mut updates = search.subscribe();

  let handle = search.submit("plate", SearchMode::Basic);
  tokio::time::sleep(Duration::from_millis(299)).await;
  assert!(fake.search_calls().is_empty());

  handle.await.unwrap();
  updates.changed().await.unwrap();
  let outcome = updates.borrow().clone().expect("published outcome").expect("search succeeded");
  assert_eq!(outcome.source, SearchSource::Remote);
  assert_eq!(names(&outcome.products), vec!["Red Plate"]);
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_never_overwrites_a_newer_one() {
  let fake = FakeTransport::with_products(mug_and_plate());
  fake.delay_search("ceramic", Duration::from_secs(2));
  let search = DebouncedSearch::new(store_over(&fake), DEBOUNCE);

  let stale = search.submit("ceramic", SearchMode::Basic);
  // Past the debounce: the "ceramic" request is in flight.
  tokio::time::sleep(Duration::from_millis(400)).await;
  let fresh = search.submit("plate", SearchMode::Basic);

  fresh.await.unwrap();
  stale.await.unwrap();

  assert_eq!(fake.search_calls(), vec!["ceramic", "plate"]);
  let outcome = search.latest().expect("published outcome").expect("search succeeded");
  assert_eq!(outcome.query, "plate");
  assert_eq!(names(&outcome.products), vec!["Red Plate"]);
}

#[tokio::test(start_paused = true)]
async fn failure_of_the_newest_query_replaces_older_results() {
  let fake = FakeTransport::with_products(mug_and_plate());
  let search = DebouncedSearch::new(store_over(&fake), DEBOUNCE);

  search.submit("mug", SearchMode::Basic).await.unwrap();
  assert!(matches!(search.latest(), Some(Ok(_))));

  // Neither the remote search nor the cold-cache load can succeed.
  fake.fail_search(true);
  fake.fail_list(true);
  search.submit("plate", SearchMode::Basic).await.unwrap();
  assert!(matches!(search.latest(), Some(Err(_))));
}
