// catalog_server/src/db/mod.rs

pub mod postgres;
pub mod seed;

pub use postgres::{connect_pool, PgProductRepository};

/// Migrations embedded from `server/migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
