use std::path::Path;
use thiserror::Error;

/// Longest image file name accepted in a multipart part
pub const MAX_IMAGE_NAME_LEN: usize = 255;

/// Reasons an uploaded image file name is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageNameError {
    #[error("Image name cannot be empty")]
    Empty,
    #[error("Image name cannot be longer than {MAX_IMAGE_NAME_LEN} bytes")]
    TooLong,
    #[error("Image name cannot contain control characters")]
    ContainsControlCharacter,
    #[error("Image name cannot contain path separators (/ or \\)")]
    ContainsPathSeparator,
    #[error("Image name cannot be '.' or '..'")]
    IsSpecialDirectory,
}

/// Validate the file name a client attached to an image part.
///
/// The name is only ever echoed back as metadata, but it must still be a
/// bare file name so it can never be mistaken for a path.
pub fn validate_image_name(name: &str) -> Result<(), ImageNameError> {
    if name.is_empty() {
        return Err(ImageNameError::Empty);
    }

    if name.len() > MAX_IMAGE_NAME_LEN {
        return Err(ImageNameError::TooLong);
    }

    if name.chars().any(char::is_control) {
        return Err(ImageNameError::ContainsControlCharacter);
    }

    if name.contains('/') || name.contains('\\') {
        return Err(ImageNameError::ContainsPathSeparator);
    }

    if name == "." || name == ".." || Path::new(name).file_name().is_none() {
        return Err(ImageNameError::IsSpecialDirectory);
    }

    Ok(())
}
