//! Whole-collection validation
//!
//! Validation always recomputes every flag from slot contents, overriding
//! any flag cleared optimistically by an edit.

use crate::collection::SlotCollection;
use crate::size::FileSizeLimit;
use std::fmt;

/// Why a collection cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// At least one slot has no image or a blank description
    MissingFields { slots: usize },
    /// Every slot is complete but an image is over the size limit
    SizeExceeded { file_name: String, limit: FileSizeLimit },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::MissingFields { .. } => {
                write!(f, "Please fill in all required fields")
            }
            ValidationFailure::SizeExceeded { file_name, limit } => write!(
                f,
                "File \"{}\" exceeds the maximum size of {}",
                file_name, limit
            ),
        }
    }
}

/// Result of a validation pass
#[derive(Debug, Clone)]
pub struct Validation {
    /// The input collection with error flags re-derived
    pub collection: SlotCollection,
    pub is_valid: bool,
    pub failure: Option<ValidationFailure>,
}

/// Re-derive `required_error` and `size_error` for every slot
pub fn validate(collection: &SlotCollection) -> Validation {
    let limit = collection.limit();
    let mut annotated = collection.clone();
    let mut missing = 0;
    let mut oversized = None;

    for slot in annotated.slots_mut() {
        let required_error = slot.file().is_none() || slot.description().trim().is_empty();
        let size_error = slot.file().is_some_and(|file| !limit.allows(file.size()));

        if required_error {
            missing += 1;
        }
        if size_error && oversized.is_none() {
            oversized = slot.file().map(|file| file.name().to_string());
        }
        slot.set_errors(required_error, size_error);
    }

    // Missing fields are reported first; a size failure names its file
    let failure = if missing > 0 {
        Some(ValidationFailure::MissingFields { slots: missing })
    } else {
        oversized.map(|file_name| ValidationFailure::SizeExceeded { file_name, limit })
    };

    Validation {
        collection: annotated,
        is_valid: failure.is_none(),
        failure,
    }
}
