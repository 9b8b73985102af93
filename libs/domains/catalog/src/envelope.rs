//! Response envelope for the upstream catalog API.
//!
//! The API has gone through several generations: some endpoints answer with
//! a bare payload (`[...]` or `{...}`), others wrap it in an envelope
//! carrying a success flag and metadata. The decoders here accept both.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Envelope wrapped around the real payload by newer API generations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub pagination: Option<PaginationInfo>,
    #[serde(default)]
    pub filters: Option<HashMap<String, serde_json::Value>>,
}

/// Pagination block inside the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: i32,
    pub total_pages: i32,
    pub total_items: i64,
}

/// Decode a body that may be either the bare payload or an envelope around it.
///
/// The bare shape is tried first; envelopes never parse as a bare `Product`
/// or product list because they lack the mandatory `id` field / array shape.
/// Returns `None` when neither shape yields a payload.
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> Option<T> {
    if let Ok(payload) = serde_json::from_str::<T>(body) {
        return Some(payload);
    }
    match serde_json::from_str::<ApiResponse<T>>(body) {
        Ok(envelope) => envelope.data,
        Err(_) => None,
    }
}

/// Extract a human-readable error message from an envelope body, if any
pub fn error_message(body: &str) -> Option<String> {
    let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(body).ok()?;
    envelope.message.or(envelope.error)
}
