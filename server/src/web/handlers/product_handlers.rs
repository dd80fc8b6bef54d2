// catalog_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use catalog::{ProductDraft, ProductId, SearchMode};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::dto::{to_responses, MessageResponse, PageParams, ProductPayload, ProductResponse, SearchParams};

#[instrument(name = "handler::list_products", skip(app_state, query_params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
  let products = app_state
    .product_service
    .list(query_params.into_inner().into())
    .await
    .map_err(|e| app_state.app_error(e))?;

  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(to_responses(products)))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  let product = app_state
    .product_service
    .get_by_id(product_id)
    .await
    .map_err(|e| app_state.app_error(e))?;

  Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

#[instrument(
  name = "handler::search_products",
  skip(app_state, query_params),
  fields(query = ?query_params.query, advanced = query_params.advanced)
)]
pub async fn search_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
  let params = query_params.into_inner();
  let mode = SearchMode::from_advanced_flag(params.advanced);
  let raw_query = params.query.as_deref().unwrap_or_default();

  let products = app_state
    .product_service
    .search(raw_query, mode, params.page())
    .await
    .map_err(|e| app_state.app_error(e))?;

  info!(%mode, "Search returned {} products.", products.len());
  Ok(HttpResponse::Ok().json(to_responses(products)))
}

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
  let draft = ProductDraft::from(payload.into_inner());

  let product = app_state
    .product_service
    .create(draft)
    .await
    .map_err(|e| app_state.app_error(e))?;

  info!(product_id = product.id, "Product created.");
  Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
  payload: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let draft = ProductDraft::from(payload.into_inner());

  let product = app_state
    .product_service
    .update(product_id, draft)
    .await
    .map_err(|e| app_state.app_error(e))?;

  Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  app_state
    .product_service
    .delete(product_id)
    .await
    .map_err(|e| app_state.app_error(e))?;

  Ok(HttpResponse::Ok().json(MessageResponse {
    message: "Product deleted successfully".to_string(),
  }))
}
