//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the catalog web server
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Web",
        version = "0.1.0",
        description = "Product catalog server backed by a remote REST API"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_catalog::ApiDoc)
    ),
    tags(
        (name = "catalog", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;
