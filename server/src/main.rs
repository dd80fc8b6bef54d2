// catalog_server/src/main.rs

// Declare modules for the application
mod config;
mod db;
mod errors;
mod state;
mod web;

#[cfg(test)]
mod test_support;

use crate::config::{AppConfig, LogFormat};
use crate::state::AppState;

use actix_web::HttpServer;
use catalog::ProductService;
use std::io;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

fn init_tracing(format: LogFormat) {
  let builder = tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE);

  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Text => builder.init(),
  }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
  tracing::error!(error = %err, "{}", context);
  io::Error::other(format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  // Config decides the log format, so it is loaded before tracing exists.
  let loaded = AppConfig::from_env();
  init_tracing(loaded.as_ref().map(|c| c.log_format).unwrap_or(LogFormat::Text));

  tracing::info!("Starting product catalog server...");

  let app_config = Arc::new(loaded.map_err(|e| startup_error("Failed to load application configuration.", e))?);
  tracing::info!(environment = ?app_config.environment, "Configuration loaded.");

  let db_pool = db::connect_pool(&app_config)
    .await
    .map_err(|e| startup_error("Failed to connect to the database.", e))?;
  tracing::info!("Successfully connected to the database.");

  db::MIGRATOR
    .run(&db_pool)
    .await
    .map_err(|e| startup_error("Failed to apply database migrations.", e))?;
  tracing::info!("Database migrations applied.");

  if app_config.seed_db {
    db::seed::seed_database(&db_pool)
      .await
      .map_err(|e| startup_error("Failed to seed database.", e))?;
  }

  let repository = Arc::new(db::PgProductRepository::new(db_pool));
  let app_state = AppState::new(ProductService::new(repository), app_config.clone());

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || web::catalog_app(app_state.clone()))
    .bind(&server_address)?
    .run()
    .await
}
