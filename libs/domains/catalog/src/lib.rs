//! Catalog Domain
//!
//! Client-side domain for a product catalog owned by a remote REST API.
//! The data lives upstream; this crate fetches it, tolerates the API's
//! inconsistent response shapes, and exposes the catalog to the web layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints for the web UI
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, business rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Client    │  ← CatalogApi trait + reqwest implementation
//! └──────┬──────┘
//!        │
//!   remote catalog API (Spanish wire format, enveloped or bare payloads)
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers,
//!     client::{HttpCatalogClient, UpstreamConfig},
//!     service::CatalogService,
//! };
//!
//! # fn example() -> Result<(), domain_catalog::CatalogError> {
//! let client = HttpCatalogClient::new(&UpstreamConfig::default())?;
//! let service = CatalogService::new(client);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use client::{CatalogApi, HttpCatalogClient, InMemoryCatalog, UpstreamConfig};
pub use envelope::{ApiResponse, PaginationInfo};
pub use error::{CatalogError, CatalogResult, ErrorResponse};
pub use handlers::ApiDoc;
pub use models::{ImageUpload, Product, ProductInput};
pub use service::CatalogService;
