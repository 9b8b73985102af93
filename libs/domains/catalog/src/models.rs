use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

/// Barcode format accepted by the upstream API (EAN/UPC style, 10 to 15 digits)
static BARCODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").unwrap());

/// Image extensions the upstream serves from its static root
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Check whether a file name carries a supported image extension
pub fn has_image_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Custom validator for barcodes
fn validate_barcode(barcode: &str) -> Result<(), validator::ValidationError> {
    if !BARCODE.is_match(barcode) {
        return Err(validator::ValidationError::new("invalid_barcode"));
    }
    Ok(())
}

/// Custom validator for image paths.
///
/// The upstream stores product images under its `images/` static root, so a
/// path must start with `/images/` or `images/` and end in a supported
/// image extension.
fn validate_image_path(path: &str) -> Result<(), validator::ValidationError> {
    let relative = path.strip_prefix('/').unwrap_or(path);
    if !relative.starts_with("images/") || !has_image_extension(relative) {
        return Err(validator::ValidationError::new("invalid_image_path"));
    }
    Ok(())
}

/// Product entity as the upstream catalog API serializes it.
///
/// The API speaks Spanish on the wire; every field except `id` tolerates
/// absence because older API generations omit fields freely.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier assigned by the upstream
    pub id: i32,
    /// Product name
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    /// Product description
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// Barcode (EAN/UPC style digits)
    #[serde(rename = "codigoBarras", default)]
    pub barcode: Option<String>,
    /// Unit price
    #[serde(rename = "precio", default)]
    pub price: f64,
    /// Current stock quantity
    #[serde(default)]
    pub stock: i32,
    /// Category label
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    /// Image path under the static root
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    /// Creation timestamp
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(rename = "fechaActualizacion", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// DTO sent on create and update.
///
/// Create and update both send the full product, so the required fields are
/// required here and validation runs before any request leaves the process.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 200))]
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(custom(function = "validate_barcode"))]
    #[serde(rename = "codigoBarras", default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "precio")]
    pub price: f64,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(length(min = 1, max = 100))]
    #[serde(rename = "categoria")]
    pub category: String,
    #[validate(custom(function = "validate_image_path"))]
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Image upload result from the upstream
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Product {
    /// Build a product from an input DTO, stamping both timestamps
    pub fn new(id: i32, input: ProductInput) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: Some(input.name),
            description: input.description,
            barcode: input.barcode,
            price: input.price,
            stock: input.stock,
            category: Some(input.category),
            image: input.image,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Overwrite the mutable fields from an input DTO, keeping id and creation time
    pub fn apply_input(&mut self, input: ProductInput) {
        self.name = Some(input.name);
        self.description = input.description;
        self.barcode = input.barcode;
        self.price = input.price;
        self.stock = input.stock;
        self.category = Some(input.category);
        self.image = input.image;
        self.updated_at = Some(Utc::now());
    }
}
