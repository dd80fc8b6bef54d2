// catalog_server/src/test_support.rs

//! Helpers for handler tests: an in-memory backed app and JSON body reading.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, App, Error};
use catalog::{InMemoryProductRepository, ProductDraft, ProductService};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::web;

pub fn test_config() -> AppConfig {
  let vars: HashMap<&str, &str> = HashMap::from([("DATABASE_URL", "postgres://localhost/catalog_test")]);
  AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).expect("test config")
}

pub fn state_for(repo: Arc<InMemoryProductRepository>) -> AppState {
  AppState::new(ProductService::new(repo), Arc::new(test_config()))
}

/// State over a store holding "Blue Mug" (id 1) and "Red Plate" (id 2).
pub async fn seeded_state() -> (AppState, Arc<InMemoryProductRepository>) {
  let repo = Arc::new(InMemoryProductRepository::new());
  let state = state_for(repo.clone());
  for (name, cents, description) in [("Blue Mug", 1299, "ceramic mug"), ("Red Plate", 899, "ceramic plate")] {
    state
      .product_service
      .create(ProductDraft::new(name, Decimal::new(cents, 2)).with_description(description))
      .await
      .expect("seed product");
  }
  (state, repo)
}

pub fn catalog_app() -> App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<impl MessageBody>,
    Error = Error,
    InitError = (),
  >,
> {
  web::catalog_app(state_for(Arc::new(InMemoryProductRepository::new())))
}

pub fn catalog_app_with(
  state: AppState,
) -> App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<impl MessageBody>,
    Error = Error,
    InitError = (),
  >,
> {
  web::catalog_app(state)
}

pub async fn read_json<T: DeserializeOwned>(resp: ServiceResponse<impl MessageBody>) -> T {
  test::read_body_json(resp).await
}
