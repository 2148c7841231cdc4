//! Submission lifecycle for an inspection form
//!
//! ```text
//! Idle --submit--> (validate) --invalid--> Idle, flags annotated
//!                      |
//!                    valid
//!                      v
//!                 Submitting --ok--> Idle, collection reset
//!                      |
//!                      +----err----> Idle, collection kept
//! ```
//!
//! Validation is synchronous, so it never shows up as an observable phase.
//! While `Submitting`, file selection, add and remove are refused;
//! description edits still go through. There is no cancellation: a started
//! submission is settled exactly once by [`InspectionForm::finish_submission`].

use crate::api::{ApiError, InspectionApi};
use crate::collection::SlotCollection;
use crate::config::FormConfig;
use crate::error::{FormError, SlotError};
use crate::file::SelectedFile;
use crate::notify::{messages, NotificationKind, NotificationSink};
use crate::payload::InspectionPayload;
use crate::preview::PreviewStore;
use crate::slot::SlotId;
use crate::validation::{validate, ValidationFailure};
use common::Inspection;
use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
}

/// User-facing error classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    MissingField,
    SizeExceeded,
    PayloadTooLarge,
    ServerRejected,
    TransportError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Blocked locally; nothing was sent
    #[error("{0}")]
    Validation(ValidationFailure),
    #[error("A submission is already in progress")]
    Busy,
    #[error("No submission is in progress")]
    NotSubmitting,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// Taxonomy class, or `None` for lifecycle misuse
    pub fn classification(&self) -> Option<ErrorClass> {
        match self {
            SubmitError::Validation(ValidationFailure::MissingFields { .. }) => {
                Some(ErrorClass::MissingField)
            }
            SubmitError::Validation(ValidationFailure::SizeExceeded { .. }) => {
                Some(ErrorClass::SizeExceeded)
            }
            SubmitError::Api(ApiError::PayloadTooLarge) => Some(ErrorClass::PayloadTooLarge),
            SubmitError::Api(ApiError::ServerRejected { .. } | ApiError::NotFound(_)) => {
                Some(ErrorClass::ServerRejected)
            }
            SubmitError::Api(ApiError::TransportError(_)) => Some(ErrorClass::TransportError),
            SubmitError::Busy | SubmitError::NotSubmitting => None,
        }
    }
}

/// Message shown when the backend refuses a submission
pub fn api_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::PayloadTooLarge => messages::PAYLOAD_TOO_LARGE.to_string(),
        ApiError::ServerRejected { message, status } if message.is_empty() => {
            messages::create_failed(&status.to_string())
        }
        ApiError::ServerRejected { message, .. } => messages::create_failed(message),
        ApiError::NotFound(_) => messages::create_failed("404"),
        ApiError::TransportError(detail) => messages::create_failed(detail),
    }
}

/// Working state of one inspection form
pub struct InspectionForm {
    slots: SlotCollection,
    phase: SubmissionPhase,
    notifier: Arc<dyn NotificationSink>,
}

impl InspectionForm {
    pub fn new(
        config: &FormConfig,
        previews: Arc<dyn PreviewStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            slots: SlotCollection::new(config.max_file_size, previews),
            phase: SubmissionPhase::Idle,
            notifier,
        }
    }

    pub fn slots(&self) -> &SlotCollection {
        &self.slots
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Whether "add another image" should be enabled
    pub fn can_add(&self) -> bool {
        !self.is_submitting() && self.slots.can_add()
    }

    pub fn select_files(&mut self, id: SlotId, files: &[SelectedFile]) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.slots = self.slots.select_files(id, files)?;
        Ok(())
    }

    pub fn add_empty_slot(&mut self) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.slots = self.slots.add_empty_slot()?;
        Ok(())
    }

    pub fn remove_slot(&mut self, id: SlotId) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.slots = self.slots.remove_slot(id)?;
        Ok(())
    }

    /// Allowed during a submission
    pub fn update_description(&mut self, id: SlotId, text: impl Into<String>) -> Result<(), SlotError> {
        self.slots = self.slots.update_description(id, text)?;
        Ok(())
    }

    /// Validate and, if the form is complete, enter `Submitting` with the payload to send.
    ///
    /// On failure the annotated collection replaces the working one and an
    /// error notification is emitted.
    pub fn begin_submission(&mut self) -> Result<InspectionPayload, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::Busy);
        }

        let validation = validate(&self.slots);
        self.slots = validation.collection;

        if let Some(failure) = validation.failure {
            warn!("Inspection rejected before sending: {}", failure);
            self.notifier
                .notify(&failure.to_string(), NotificationKind::Error);
            return Err(SubmitError::Validation(failure));
        }

        // A valid collection has a file in every slot
        let payload = InspectionPayload::try_from(&self.slots)
            .map_err(|_| SubmitError::Validation(ValidationFailure::MissingFields { slots: 1 }))?;

        self.phase = SubmissionPhase::Submitting;
        info!("Submitting inspection with {} images", payload.len());
        Ok(payload)
    }

    /// Settle the in-flight submission with the backend's answer
    pub fn finish_submission(
        &mut self,
        outcome: Result<Inspection, ApiError>,
    ) -> Result<Inspection, SubmitError> {
        if !self.is_submitting() {
            return Err(SubmitError::NotSubmitting);
        }
        self.phase = SubmissionPhase::Idle;

        match outcome {
            Ok(inspection) => {
                info!(
                    "Inspection {} created with {} images",
                    inspection.id, inspection.total_images
                );
                self.slots = self.slots.reset();
                self.notifier
                    .notify(messages::SUBMITTED, NotificationKind::Success);
                Ok(inspection)
            }
            Err(error) => {
                warn!("Inspection submission failed: {}", error);
                self.notifier
                    .notify(&api_failure_message(&error), NotificationKind::Error);
                Err(SubmitError::Api(error))
            }
        }
    }

    /// Validate, send once, and settle
    pub async fn submit(&mut self, api: &dyn InspectionApi) -> Result<Inspection, SubmitError> {
        let payload = self.begin_submission()?;
        let outcome = api.create_inspection(&payload).await;
        self.finish_submission(outcome)
    }

    fn ensure_idle(&self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::Busy);
        }
        Ok(())
    }
}

/// Delete a stored inspection and tell the user how it went
pub async fn delete_inspection(
    api: &dyn InspectionApi,
    notifier: &dyn NotificationSink,
    id: &str,
) -> Result<(), ApiError> {
    match api.delete_inspection(id).await {
        Ok(()) => {
            info!("Inspection {} deleted", id);
            notifier.notify(messages::DELETED, NotificationKind::Success);
            Ok(())
        }
        Err(error) => {
            warn!("Failed to delete inspection {}: {}", id, error);
            notifier.notify(&messages::delete_failed(&error.to_string()), NotificationKind::Error);
            Err(error)
        }
    }
}
