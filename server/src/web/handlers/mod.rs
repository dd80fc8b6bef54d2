// catalog_server/src/web/handlers/mod.rs

pub mod product_handlers;
