// catalog_client/src/debounce.rs

//! Debounced, last-write-wins search.
//!
//! Each `submit` bumps a generation counter and spawns a task that sleeps for
//! the debounce delay. The task only searches if it is still the newest
//! submission when it wakes, and only publishes if it is still the newest when
//! the search returns. A failed search is published too, so a subscriber never
//! keeps showing the results of an older query.

use catalog::SearchMode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::store::{ProductStore, SearchOutcome};

pub struct DebouncedSearch {
  store: ProductStore,
  delay: Duration,
  generation: Arc<AtomicU64>,
  results: Arc<watch::Sender<Option<ClientResult<SearchOutcome>>>>,
}

impl DebouncedSearch {
  pub fn new(store: ProductStore, delay: Duration) -> Self {
    let (results, _) = watch::channel(None);
    Self {
      store,
      delay,
      generation: Arc::new(AtomicU64::new(0)),
      results: Arc::new(results),
    }
  }

  pub fn from_config(store: ProductStore, config: &ClientConfig) -> Self {
    Self::new(store, config.debounce)
  }

  pub fn subscribe(&self) -> watch::Receiver<Option<ClientResult<SearchOutcome>>> {
    self.results.subscribe()
  }

  /// The most recently published outcome.
  pub fn latest(&self) -> Option<ClientResult<SearchOutcome>> {
    self.results.borrow().clone()
  }

  /// Must be called from within a tokio runtime.
  pub fn submit(&self, query: impl Into<String>, mode: SearchMode) -> JoinHandle<()> {
    let query = query.into();
    let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
    let generation = Arc::clone(&self.generation);
    let store = self.store.clone();
    let results = Arc::clone(&self.results);
    let delay = self.delay;

    tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      if generation.load(Ordering::SeqCst) != mine {
        debug!(%query, "Superseded before searching.");
        return;
      }

      let outcome = store.search(&query, mode).await;
      if generation.load(Ordering::SeqCst) != mine {
        debug!(%query, "Superseded while searching, dropping result.");
        return;
      }
      results.send_replace(Some(outcome));
    })
  }
}
