//! API routes module

pub mod health;

use axum::Router;
use domain_catalog::{handlers, CatalogApi, CatalogService};
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;

// Longer than the upstream request timeout so its errors surface first.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(75);

/// Assemble the full application router: the product API, health check,
/// Swagger UI, and the static site as the fallback.
pub fn routes<C: CatalogApi + 'static>(service: CatalogService<C>, static_dir: &str) -> Router {
    Router::new()
        .nest("/api/products", handlers::router(service))
        .merge(health::router())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
}
