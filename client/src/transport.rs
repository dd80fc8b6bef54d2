// catalog_client/src/transport.rs

use async_trait::async_trait;
use catalog::{Product, ProductDraft, ProductId, SearchMode};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiFieldError, ClientError, ClientResult};

/// The remote side of the catalog as the client sees it.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
  async fn list(&self) -> ClientResult<Vec<Product>>;

  async fn get(&self, id: ProductId) -> ClientResult<Product>;

  async fn create(&self, draft: &ProductDraft) -> ClientResult<Product>;

  async fn update(&self, id: ProductId, draft: &ProductDraft) -> ClientResult<Product>;

  async fn delete(&self, id: ProductId) -> ClientResult<()>;

  async fn search(&self, query: &str, mode: SearchMode) -> ClientResult<Vec<Product>>;
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
  #[serde(default)]
  error: String,
  #[serde(default)]
  fields: Vec<ApiFieldError>,
}

/// `CatalogTransport` over the JSON API using reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
  client: Client,
  products_url: Url,
}

impl HttpTransport {
  /// # Errors
  ///
  /// Returns `ClientError::Config` when the base URL does not parse, or a
  /// transport error when the reqwest client cannot be constructed.
  pub fn new(config: &ClientConfig) -> ClientResult<Self> {
    let products_url = products_url(&config.base_url)?;
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, products_url })
  }

  fn url(&self, suffix: &str) -> ClientResult<Url> {
    if suffix.is_empty() {
      return Ok(self.products_url.clone());
    }
    self
      .products_url
      .join(suffix)
      .map_err(|e| ClientError::Config(format!("Invalid request path {:?}: {}", suffix, e)))
  }

  fn item_url(&self, id: ProductId) -> ClientResult<Url> {
    self.url(&id.to_string())
  }
}

/// `{base}/products/`. The trailing slash keeps `Url::join` from replacing the
/// last path segment; the server trims it back off.
fn products_url(base_url: &str) -> ClientResult<Url> {
  let mut base = Url::parse(base_url).map_err(|e| ClientError::Config(format!("Invalid base URL: {}", e)))?;
  if base.cannot_be_a_base() {
    return Err(ClientError::Config(format!("Base URL {:?} cannot carry a path", base_url)));
  }
  if !base.path().ends_with('/') {
    let path = format!("{}/", base.path());
    base.set_path(&path);
  }
  base
    .join("products/")
    .map_err(|e| ClientError::Config(format!("Invalid base URL: {}", e)))
}

async fn send(request: RequestBuilder) -> ClientResult<Response> {
  let response = request.header(reqwest::header::ACCEPT, "application/json").send().await?;
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let body = response.bytes().await.unwrap_or_default();
  let parsed: ErrorBody = serde_json::from_slice(&body).unwrap_or_default();
  let message = if parsed.error.is_empty() {
    status.canonical_reason().unwrap_or("request failed").to_string()
  } else {
    parsed.error
  };
  debug!(status = status.as_u16(), %message, "API returned an error.");
  Err(ClientError::Api {
    status: status.as_u16(),
    message,
    fields: parsed.fields,
  })
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
  let response = send(request).await?;
  response.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl CatalogTransport for HttpTransport {
  #[instrument(name = "http::list", skip(self))]
  async fn list(&self) -> ClientResult<Vec<Product>> {
    send_json(self.client.get(self.url("")?)).await
  }

  #[instrument(name = "http::get", skip(self))]
  async fn get(&self, id: ProductId) -> ClientResult<Product> {
    send_json(self.client.get(self.item_url(id)?)).await
  }

  #[instrument(name = "http::create", skip(self, draft))]
  async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
    send_json(self.client.post(self.url("")?).json(draft)).await
  }

  #[instrument(name = "http::update", skip(self, draft))]
  async fn update(&self, id: ProductId, draft: &ProductDraft) -> ClientResult<Product> {
    send_json(self.client.put(self.item_url(id)?).json(draft)).await
  }

  #[instrument(name = "http::delete", skip(self))]
  async fn delete(&self, id: ProductId) -> ClientResult<()> {
    send(self.client.delete(self.item_url(id)?)).await.map(|_| ())
  }

  #[instrument(name = "http::search", skip(self))]
  async fn search(&self, query: &str, mode: SearchMode) -> ClientResult<Vec<Product>> {
    let advanced = if mode.is_advanced() { "true" } else { "false" };
    let request = self
      .client
      .get(self.url("search")?)
      .query(&[("query", query), ("advanced", advanced)]);
    send_json(request).await
  }
}
