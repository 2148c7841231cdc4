use actix_multipart::form::{bytes::Bytes as FilePart, text::Text, MultipartForm};
use common::image_name;

/// Multipart form for creating an inspection
#[derive(MultipartForm)]
pub struct CreateInspectionForm {
    /// One part per image, in display order
    pub images: Vec<FilePart>,

    /// JSON list of descriptions, parallel to `images`
    pub descriptions: Text<String>,
}

impl CreateInspectionForm {
    /// Check the form and decode the description list.
    ///
    /// Returns the descriptions, one per image part.
    pub fn validate_fields(&self) -> Result<Vec<String>, String> {
        if self.images.is_empty() {
            return Err("At least one image is required".to_string());
        }

        let descriptions: Vec<String> = serde_json::from_str(self.descriptions.as_str())
            .map_err(|e| format!("descriptions must be a JSON list of strings: {}", e))?;

        if descriptions.len() != self.images.len() {
            return Err(format!(
                "Got {} descriptions for {} images",
                descriptions.len(),
                self.images.len()
            ));
        }

        for (index, image) in self.images.iter().enumerate() {
            let name = image.file_name.as_deref().unwrap_or_default();
            image_name::validate_image_name(name)
                .map_err(|e| format!("Image {}: {}", index + 1, e))?;
        }

        Ok(descriptions)
    }
}
