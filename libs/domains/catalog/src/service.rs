//! Catalog service - business rules in front of the upstream client

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::client::CatalogApi;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{has_image_extension, ImageUpload, Product, ProductInput};

/// Service layer over a [`CatalogApi`] implementation.
///
/// Inputs are validated here, before any request leaves the process; the
/// upstream is never contacted with an invalid product.
pub struct CatalogService<C: CatalogApi> {
    client: Arc<C>,
}

impl<C: CatalogApi> CatalogService<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Fetch the whole catalog
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        self.client.list_products().await
    }

    /// Fetch one product
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> CatalogResult<Product> {
        self.client
            .get_product(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Create a product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.client.create_product(input).await
    }

    /// Replace a product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn update_product(&self, id: i32, input: ProductInput) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.client.update_product(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> CatalogResult<()> {
        self.client.delete_product(id).await
    }

    /// Upload a product image
    #[instrument(skip(self, bytes), fields(file = %file_name, bytes = bytes.len()))]
    pub async fn upload_image(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> CatalogResult<ImageUpload> {
        if !has_image_extension(&file_name) {
            return Err(CatalogError::Validation(format!(
                "formato de imagen no soportado: {file_name}"
            )));
        }

        self.client.upload_image(file_name, bytes).await
    }
}

impl<C: CatalogApi> Clone for CatalogService<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}
