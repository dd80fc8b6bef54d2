// src/lib.rs

//! Client data layer for the product catalog API.
//!
//!  - `transport`: the `CatalogTransport` seam and its reqwest implementation.
//!  - `store`: `ProductStore`, a cloneable handle to the shared product cache,
//!    with remote search and a local basic-search fallback.
//!  - `debounce`: `DebouncedSearch`, last-write-wins search on top of the store.

pub mod config;
pub mod debounce;
pub mod error;
pub mod store;
pub mod transport;

pub use crate::config::ClientConfig;
pub use crate::debounce::DebouncedSearch;
pub use crate::error::{ApiFieldError, ClientError, ClientResult};
pub use crate::store::{ProductStore, SearchOutcome, SearchSource};
pub use crate::transport::{CatalogTransport, HttpTransport};
