// catalog_server/src/web/cors.rs

//! Minimal CORS: every response carries the allow-* headers and preflight
//! `OPTIONS` requests are answered directly.

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::middleware::{DefaultHeaders, Next};
use actix_web::{Error, HttpResponse};

pub fn cors_headers(allow_origin: &str) -> DefaultHeaders {
  DefaultHeaders::new()
    .add(("Access-Control-Allow-Origin", allow_origin.to_string()))
    .add(("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"))
    .add(("Access-Control-Allow-Headers", "Content-Type, Accept"))
    .add(("Access-Control-Max-Age", "3600"))
}

pub async fn answer_preflight<B>(req: ServiceRequest, next: Next<B>) -> Result<ServiceResponse<BoxBody>, Error>
where
  B: MessageBody + 'static,
{
  if *req.method() == Method::OPTIONS {
    return Ok(req.into_response(HttpResponse::NoContent().finish()));
  }
  next.call(req).await.map(ServiceResponse::map_into_boxed_body)
}
