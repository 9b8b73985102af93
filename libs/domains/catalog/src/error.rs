use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// The one error kind every catalog failure collapses into.
///
/// Messages are user-facing and localized like the upstream's; the original
/// cause is chained as `source` for diagnostics only. There is no retry or
/// backoff anywhere: errors propagate to the caller to display.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Producto {0} no encontrado")]
    NotFound(i32),

    #[error("No se pudo conectar con el servidor. Por favor, intente más tarde.")]
    Unavailable(#[source] reqwest::Error),

    #[error("Error al procesar los datos del servidor.")]
    Decode(#[source] serde_json::Error),

    /// Error reported by the upstream itself, carrying its message
    #[error("{0}")]
    Api(String),

    #[error("Datos de producto inválidos: {0}")]
    Validation(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Standard error body returned by the HTTP surface
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable, localized message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CatalogError {
    fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Unavailable(_) | CatalogError::Decode(_) | CatalogError::Api(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "NotFound",
            CatalogError::Unavailable(_) => "ServiceUnavailable",
            CatalogError::Decode(_) => "InvalidUpstreamPayload",
            CatalogError::Api(_) => "UpstreamError",
            CatalogError::Validation(_) => "Validation",
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            details: None,
        });
        (self.status(), body).into_response()
    }
}
