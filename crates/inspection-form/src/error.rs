//! Error types for slot edits and form actions

use crate::slot::SlotId;
use thiserror::Error;

/// A slot transition that cannot be applied to the current collection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("No slot with id {0}")]
    UnknownSlot(SlotId),
    #[error("A file selection must contain at least one file")]
    EmptySelection,
    #[error("The last image must be filled and within the size limit before adding another")]
    TrailingSlotNotReady,
    #[error("Slot {0} has no image")]
    SlotEmpty(SlotId),
}

/// A form action rejected by the form as a whole
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("A submission is already in progress")]
    Busy,
    #[error(transparent)]
    Slot(#[from] SlotError),
}
