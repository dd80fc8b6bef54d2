// catalog_server/src/web/mod.rs

pub mod cors;
pub mod dto;
pub mod handlers;
pub mod routes;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{from_fn, NormalizePath, TrailingSlash};
use actix_web::{web, App, Error};

use crate::state::AppState;

pub use routes::configure_app_routes;

/// The full application: shared state, routes and middleware. Used by both
/// `main` and the handler tests.
pub fn catalog_app(
  app_state: AppState,
) -> App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<impl MessageBody>,
    Error = Error,
    InitError = (),
  >,
> {
  let allow_origin = app_state.config.cors_allow_origin.clone();
  App::new()
    .app_data(web::Data::new(app_state))
    .configure(configure_app_routes)
    .wrap(from_fn(cors::answer_preflight))
    .wrap(cors::cors_headers(&allow_origin))
    .wrap(NormalizePath::new(TrailingSlash::Trim))
    .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
}
