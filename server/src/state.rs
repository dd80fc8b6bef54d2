// catalog_server/src/state.rs
use crate::config::AppConfig;
use crate::errors::AppError;
use catalog::{CatalogError, ProductService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub product_service: ProductService,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(product_service: ProductService, config: Arc<AppConfig>) -> Self {
    Self {
      product_service,
      config,
    }
  }

  pub fn app_error(&self, err: CatalogError) -> AppError {
    AppError::from_catalog(err, self.config.expose_error_detail())
  }
}
