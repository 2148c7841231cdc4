//! Composition and submission of multi-image inspections
//!
//! An inspection is an ordered set of (image, description) pairs sent to the
//! backend as one multipart request. This crate owns the slot list the user
//! edits while composing it, its validation, and the submission lifecycle.
//! Rendering, file pickers and toast display belong to the caller.

pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod notify;
pub mod payload;
pub mod preview;
pub mod size;
pub mod slot;
pub mod submission;
pub mod validation;

pub use api::{ApiError, InspectionApi};
pub use collection::SlotCollection;
pub use config::{ConfigError, FormConfig};
pub use error::{FormError, SlotError};
pub use file::SelectedFile;
pub use http::HttpInspectionApi;
pub use notify::{NotificationKind, NotificationSink, ToastQueue};
pub use payload::InspectionPayload;
pub use preview::{DigestPreviewStore, Preview, PreviewStore};
pub use size::{FileSizeLimit, DEFAULT_MAX_FILE_SIZE};
pub use slot::{Slot, SlotId};
pub use submission::{delete_inspection, ErrorClass, InspectionForm, SubmissionPhase, SubmitError};
pub use validation::{validate, Validation, ValidationFailure};

pub use common::{Inspection, InspectionImage};
