//! HTTP endpoints exposing the catalog to the web UI

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::client::CatalogApi;
use crate::error::{CatalogResult, ErrorResponse};
use crate::models::{Product, ProductInput};
use crate::service::CatalogService;

const TAG: &str = "catalog";

/// OpenAPI documentation for the catalog endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(schemas(Product, ProductInput, ErrorResponse)),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the catalog router with all HTTP endpoints
pub fn router<C: CatalogApi + 'static>(service: CatalogService<C>) -> Router {
    let shared = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared)
}

/// List all catalog products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Catalog listing", body = Vec<Product>),
        (status = 502, description = "Upstream unavailable", body = ErrorResponse)
    )
)]
async fn list_products<C: CatalogApi>(
    State(service): State<Arc<CatalogService<C>>>,
) -> CatalogResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid product data", body = ErrorResponse),
        (status = 502, description = "Upstream rejected the create", body = ErrorResponse)
    )
)]
async fn create_product<C: CatalogApi>(
    State(service): State<Arc<CatalogService<C>>>,
    Json(input): Json<ProductInput>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 502, description = "Upstream unavailable", body = ErrorResponse)
    )
)]
async fn get_product<C: CatalogApi>(
    State(service): State<Arc<CatalogService<C>>>,
    Path(id): Path<i32>,
) -> CatalogResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid product data", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 502, description = "Upstream rejected the update", body = ErrorResponse)
    )
)]
async fn update_product<C: CatalogApi>(
    State(service): State<Arc<CatalogService<C>>>,
    Path(id): Path<i32>,
    Json(input): Json<ProductInput>,
) -> CatalogResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 502, description = "Upstream rejected the delete", body = ErrorResponse)
    )
)]
async fn delete_product<C: CatalogApi>(
    State(service): State<Arc<CatalogService<C>>>,
    Path(id): Path<i32>,
) -> CatalogResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
