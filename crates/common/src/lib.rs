//! Wire types and constants shared by the inspection client and server

pub mod image_name;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Multipart field carrying one binary part per image, in slot order
pub const IMAGES_FIELD: &str = "images";

/// Multipart field carrying the JSON-encoded, order-parallel description list
pub const DESCRIPTIONS_FIELD: &str = "descriptions";

/// Collection endpoint for inspections
pub const INSPECTIONS_PATH: &str = "/api/inspections";

/// Health check endpoint
pub const HEALTH_PATH: &str = "/health";

/// Largest accepted image, in bytes, unless configured otherwise (5 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Content type sent and stored for an image part with no known type
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// One image of a stored inspection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InspectionImage {
    pub id: String,
    pub url: String,
    pub description: String,
}

/// Server-side record produced by one successful submission
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub images: Vec<InspectionImage>,
    pub created_at: DateTime<Utc>,
    pub total_images: usize,
}

impl Inspection {
    /// Path of a single inspection relative to the API base URL
    pub fn path(id: &str) -> String {
        format!("{}/{}", INSPECTIONS_PATH, id)
    }
}

/// Response from health check endpoint
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String, // "ok" when healthy
}
