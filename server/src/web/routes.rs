// catalog_server/src/web/routes.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::product_handlers;

// Reports 503 when the product store does not answer.
async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  match app_state.product_service.ping().await {
    Ok(()) => HttpResponse::Ok().json(json!({ "status": "ok" })),
    Err(e) => {
      warn!(error = %e, "Health check failed.");
      HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
    }
  }
}

fn extractor_configs(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()))
    .app_data(
      web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid product ID: {}", err)).into()),
    );
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  extractor_configs(cfg);
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::create_product_handler))
          // Registered before "/{product_id}" so "search" is never parsed as an id.
          .route("/search", web::get().to(product_handlers::search_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
      ),
  );
}

#[cfg(test)]
mod tests {
  use crate::test_support::catalog_app;
  use actix_web::http::StatusCode;
  use actix_web::test;

  #[actix_rt::test]
  async fn health_reports_ok_for_reachable_store() {
    let app = test::init_service(catalog_app()).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[actix_rt::test]
  async fn trailing_slash_is_normalized() {
    let app = test::init_service(catalog_app()).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
