//! Upstream catalog API client.
//!
//! `CatalogApi` is the seam between the service layer and the remote REST
//! API; `HttpCatalogClient` is the real reqwest-backed implementation and
//! `InMemoryCatalog` an in-process one for development and tests.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{multipart, Client, StatusCode};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::envelope::{self, ApiResponse};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{ImageUpload, Product, ProductInput};

/// Upstream API settings
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the remote catalog API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Timeout for image uploads (larger bodies, slower upstream)
    pub upload_timeout_secs: u64,
    /// Accept invalid upstream TLS certificates (opt-in, dev only)
    pub accept_invalid_certs: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-producto-07d2.onrender.com".to_string(),
            timeout_secs: 30,
            upload_timeout_secs: 60,
            accept_invalid_certs: false,
        }
    }
}

/// Client trait for the remote catalog API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the whole catalog
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    /// Fetch one product; `None` when the upstream answers without a payload
    async fn get_product(&self, id: i32) -> CatalogResult<Option<Product>>;

    /// Create a product and return the stored entity
    async fn create_product(&self, input: ProductInput) -> CatalogResult<Product>;

    /// Replace a product and return the stored entity
    async fn update_product(&self, id: i32, input: ProductInput) -> CatalogResult<Product>;

    /// Delete a product
    async fn delete_product(&self, id: i32) -> CatalogResult<()>;

    /// Upload a product image, returning the path the upstream stored it under
    async fn upload_image(&self, file_name: String, bytes: Vec<u8>) -> CatalogResult<ImageUpload>;
}

/// reqwest-backed implementation of [`CatalogApi`].
///
/// Two clients are kept: the regular one and a second with a longer timeout
/// for uploads. Both are reused across calls.
pub struct HttpCatalogClient {
    http: Client,
    upload: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(config: &UpstreamConfig) -> CatalogResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let builder = |timeout_secs| {
            Client::builder()
                .user_agent("catalog-web")
                .default_headers(headers.clone())
                .timeout(Duration::from_secs(timeout_secs))
                .danger_accept_invalid_certs(config.accept_invalid_certs)
        };

        Ok(Self {
            http: builder(config.timeout_secs)
                .build()
                .map_err(CatalogError::Unavailable)?,
            upload: builder(config.upload_timeout_secs)
                .build()
                .map_err(CatalogError::Unavailable)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a write (create/update) response body.
    ///
    /// Successful writes answer with a bare product or an envelope; an
    /// envelope with `success:false` or no payload is a failure even under
    /// a 2xx status.
    fn decode_write(body: &str, fallback: &str) -> CatalogResult<Product> {
        if let Ok(product) = serde_json::from_str::<Product>(body) {
            return Ok(product);
        }

        let envelope: ApiResponse<Product> =
            serde_json::from_str(body).map_err(CatalogError::Decode)?;

        if !envelope.success {
            let message = envelope
                .message
                .or(envelope.error)
                .unwrap_or_else(|| fallback.to_string());
            return Err(CatalogError::Api(message));
        }

        envelope
            .data
            .ok_or_else(|| CatalogError::Api(fallback.to_string()))
    }

    /// Map a non-success write status to an error carrying the server's
    /// message when its body parses as an envelope.
    fn write_status_error(status: StatusCode, body: &str) -> CatalogError {
        let message = envelope::error_message(body)
            .unwrap_or_else(|| format!("El servidor respondió {status}"));
        CatalogError::Api(message)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let url = self.url("/api/productos");
        debug!(%url, "GET productos");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(CatalogError::Unavailable)?;
        let status = response.status();

        if let Err(cause) = response.error_for_status_ref() {
            warn!(%status, %url, "upstream rejected the catalog listing");
            return Err(CatalogError::Unavailable(cause));
        }

        let body = response.text().await.map_err(CatalogError::Unavailable)?;
        debug!(%status, bytes = body.len(), "productos response");

        // Shape drift tolerance: bare array, envelope, or neither (empty).
        Ok(envelope::decode_payload(&body).unwrap_or_default())
    }

    async fn get_product(&self, id: i32) -> CatalogResult<Option<Product>> {
        let url = self.url(&format!("/api/productos/{id}"));
        debug!(%url, "GET producto");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(CatalogError::Unavailable)?;
        let status = response.status();

        if let Err(cause) = response.error_for_status_ref() {
            warn!(%status, %url, "upstream rejected the product fetch");
            return Err(CatalogError::Unavailable(cause));
        }

        let body = response.text().await.map_err(CatalogError::Unavailable)?;
        debug!(%status, bytes = body.len(), "producto response");

        Ok(envelope::decode_payload(&body))
    }

    async fn create_product(&self, input: ProductInput) -> CatalogResult<Product> {
        let url = self.url("/api/productos");
        debug!(%url, product = %input.name, "POST producto");

        let response = self
            .http
            .post(&url)
            .json(&input)
            .send()
            .await
            .map_err(CatalogError::Unavailable)?;
        let status = response.status();
        let body = response.text().await.map_err(CatalogError::Unavailable)?;
        debug!(%status, bytes = body.len(), "create response");

        if !status.is_success() {
            warn!(%status, %url, "upstream rejected the create");
            return Err(Self::write_status_error(status, &body));
        }

        Self::decode_write(&body, "No se pudo crear el producto")
    }

    async fn update_product(&self, id: i32, input: ProductInput) -> CatalogResult<Product> {
        let url = self.url(&format!("/api/productos/{id}"));
        debug!(%url, product = %input.name, "PUT producto");

        let response = self
            .http
            .put(&url)
            .json(&input)
            .send()
            .await
            .map_err(CatalogError::Unavailable)?;
        let status = response.status();
        let body = response.text().await.map_err(CatalogError::Unavailable)?;
        debug!(%status, bytes = body.len(), "update response");

        if !status.is_success() {
            warn!(%status, %url, "upstream rejected the update");
            return Err(Self::write_status_error(status, &body));
        }

        Self::decode_write(&body, "No se pudo actualizar el producto")
    }

    async fn delete_product(&self, id: i32) -> CatalogResult<()> {
        let url = self.url(&format!("/api/productos/{id}"));
        debug!(%url, "DELETE producto");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(CatalogError::Unavailable)?;
        let status = response.status();
        debug!(%status, "delete response");

        if let Err(cause) = response.error_for_status_ref() {
            warn!(%status, %url, "upstream rejected the delete");
            return Err(CatalogError::Unavailable(cause));
        }

        Ok(())
    }

    async fn upload_image(&self, file_name: String, bytes: Vec<u8>) -> CatalogResult<ImageUpload> {
        let url = self.url("/api/productos/upload-imagen");
        debug!(%url, file = %file_name, bytes = bytes.len(), "POST imagen");

        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new().part("imagen", part);

        let response = self
            .upload
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(CatalogError::Unavailable)?;
        let status = response.status();
        let body = response.text().await.map_err(CatalogError::Unavailable)?;
        debug!(%status, bytes = body.len(), "upload response");

        if !status.is_success() {
            warn!(%status, %url, "upstream rejected the upload");
            return Err(Self::write_status_error(status, &body));
        }

        let upload: ImageUpload = serde_json::from_str(&body).map_err(CatalogError::Decode)?;
        if !upload.success {
            let message = upload
                .error
                .clone()
                .or(upload.message.clone())
                .unwrap_or_else(|| "No se pudo subir la imagen".to_string());
            return Err(CatalogError::Api(message));
        }

        Ok(upload)
    }
}

/// In-process implementation of [`CatalogApi`] (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<i32, Product>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    async fn get_product(&self, id: i32) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn create_product(&self, input: ProductInput) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let product = Product::new(id, input);
        products.insert(id, product.clone());

        tracing::info!(product_id = id, "created product");
        Ok(product)
    }

    async fn update_product(&self, id: i32, input: ProductInput) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        let product = products.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        product.apply_input(input);

        tracing::info!(product_id = id, "updated product");
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> CatalogResult<()> {
        let mut products = self.products.write().await;
        if products.remove(&id).is_none() {
            return Err(CatalogError::NotFound(id));
        }

        tracing::info!(product_id = id, "deleted product");
        Ok(())
    }

    async fn upload_image(&self, file_name: String, _bytes: Vec<u8>) -> CatalogResult<ImageUpload> {
        Ok(ImageUpload {
            success: true,
            image_url: Some(format!("/images/{file_name}")),
            message: None,
            error: None,
        })
    }
}
