// catalog_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
  Development,
  Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Text,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database: PgConnectOptions,
  pub db_max_connections: u32,
  pub db_acquire_timeout: Duration,
  pub environment: Environment,
  pub cors_allow_origin: String,
  pub log_format: LogFormat,

  // Optional: truncate and reseed the products table on startup
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. `from_env` passes the process
  /// environment; tests pass a map.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = get_or("SERVER_PORT", "5000")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let database = match lookup("DATABASE_URL") {
      Some(url) => {
        PgConnectOptions::from_str(&url).map_err(|e| AppError::Config(format!("Invalid DATABASE_URL: {}", e)))?
      }
      None => database_from_parts(&lookup)?,
    };

    let db_max_connections = get_or("DB_MAX_CONNECTIONS", "10")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;
    let db_acquire_timeout = get_or("DB_ACQUIRE_TIMEOUT_SECS", "5")
      .parse::<u64>()
      .map(Duration::from_secs)
      .map_err(|e| AppError::Config(format!("Invalid DB_ACQUIRE_TIMEOUT_SECS: {}", e)))?;

    let environment = match get_or("APP_ENV", "production").to_ascii_lowercase().as_str() {
      "development" | "dev" => Environment::Development,
      "production" | "prod" => Environment::Production,
      other => return Err(AppError::Config(format!("Invalid APP_ENV value: {}", other))),
    };

    let cors_allow_origin = get_or("CORS_ALLOW_ORIGIN", "*");

    let log_format = match get_or("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
      "text" => LogFormat::Text,
      "json" => LogFormat::Json,
      other => return Err(AppError::Config(format!("Invalid LOG_FORMAT value: {}", other))),
    };

    let seed_db = get_or("SEED_DB", "false")
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database,
      db_max_connections,
      db_acquire_timeout,
      environment,
      cors_allow_origin,
      log_format,
      seed_db,
    })
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }

  /// Internal error detail is only ever sent to clients in development.
  pub fn expose_error_detail(&self) -> bool {
    self.environment == Environment::Development
  }
}

// DB_USER / DB_PASSWORD / DB_HOST / DB_PORT / DB_NAME / DB_SSL, used when
// DATABASE_URL is not set.
fn database_from_parts<F>(lookup: &F) -> Result<PgConnectOptions>
where
  F: Fn(&str) -> Option<String>,
{
  let password = lookup("DB_PASSWORD").ok_or_else(|| {
    AppError::Config("Missing environment variable 'DATABASE_URL' (or 'DB_PASSWORD' to build it)".to_string())
  })?;
  let port = lookup("DB_PORT")
    .unwrap_or_else(|| "5432".to_string())
    .parse::<u16>()
    .map_err(|e| AppError::Config(format!("Invalid DB_PORT: {}", e)))?;
  let ssl_mode = match lookup("DB_SSL").as_deref() {
    Some("true") => PgSslMode::Require,
    _ => PgSslMode::Prefer,
  };

  Ok(
    PgConnectOptions::new_without_pgpass()
      .host(&lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()))
      .port(port)
      .username(&lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()))
      .password(&password)
      .database(&lookup("DB_NAME").unwrap_or_else(|| "catalog".to_string()))
      .ssl_mode(ssl_mode),
  )
}
