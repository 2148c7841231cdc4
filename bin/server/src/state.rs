//! In-memory inspection store

use crate::config::UploadLimits;
use actix_web::web::Bytes;
use chrono::{DateTime, Utc};
use common::{Inspection, InspectionImage};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// One image as received, in submission order
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub description: String,
    pub content: Bytes,
}

/// An uploaded image before it has been given an id
#[derive(Debug, Clone)]
pub struct NewImage {
    pub file_name: String,
    pub content_type: String,
    pub description: String,
    pub content: Bytes,
}

#[derive(Debug, Clone)]
pub struct StoredInspection {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub images: Vec<StoredImage>,
}

impl StoredInspection {
    /// Wire representation with image URLs relative to the server root
    pub fn to_response(&self) -> Inspection {
        Inspection {
            id: self.id.clone(),
            images: self
                .images
                .iter()
                .map(|image| InspectionImage {
                    id: image.id.clone(),
                    url: image_url(&self.id, &image.id),
                    description: image.description.clone(),
                })
                .collect(),
            created_at: self.created_at,
            total_images: self.images.len(),
        }
    }
}

/// Path under which an image's bytes are served
pub fn image_url(inspection_id: &str, image_id: &str) -> String {
    format!("{}/images/{}", Inspection::path(inspection_id), image_id)
}

/// Shared server state
pub struct AppState {
    limits: UploadLimits,
    inspections: Mutex<HashMap<String, StoredInspection>>, // id -> inspection
}

impl AppState {
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            limits,
            inspections: Mutex::new(HashMap::new()),
        }
    }

    pub fn limits(&self) -> UploadLimits {
        self.limits
    }

    /// Store a new inspection, keeping image order
    pub fn create(&self, images: Vec<NewImage>) -> StoredInspection {
        let inspection = StoredInspection {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            images: images
                .into_iter()
                .map(|image| StoredImage {
                    id: Uuid::new_v4().to_string(),
                    file_name: image.file_name,
                    content_type: image.content_type,
                    description: image.description,
                    content: image.content,
                })
                .collect(),
        };
        self.lock()
            .insert(inspection.id.clone(), inspection.clone());
        inspection
    }

    /// All inspections, newest first
    pub fn list(&self) -> Vec<StoredInspection> {
        let mut inspections: Vec<StoredInspection> = self.lock().values().cloned().collect();
        inspections.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        inspections
    }

    pub fn get(&self, id: &str) -> Option<StoredInspection> {
        self.lock().get(id).cloned()
    }

    pub fn image(&self, id: &str, image_id: &str) -> Option<StoredImage> {
        self.lock()
            .get(id)?
            .images
            .iter()
            .find(|image| image.id == image_id)
            .cloned()
    }

    /// Remove an inspection; returns false if it did not exist
    pub fn delete(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, StoredInspection>> {
        self.inspections.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
