//! A single image position in the form

use crate::file::SelectedFile;
use crate::preview::{Preview, PreviewStore};
use crate::size::FileSizeLimit;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identifier of a slot, stable for the slot's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(Uuid);

impl SlotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One position in the ordered image list
#[derive(Debug, Clone)]
pub struct Slot {
    id: SlotId,
    file: Option<SelectedFile>,
    preview: Option<Arc<Preview>>,
    description: String,
    required_error: bool,
    size_error: bool,
}

impl Slot {
    pub(crate) fn empty() -> Self {
        Self {
            id: SlotId::new(),
            file: None,
            preview: None,
            description: String::new(),
            required_error: false,
            size_error: false,
        }
    }

    /// A new slot holding `file`, with an empty description
    pub(crate) fn filled(
        file: SelectedFile,
        limit: FileSizeLimit,
        previews: &Arc<dyn PreviewStore>,
    ) -> Self {
        Self::empty().with_file(file, limit, previews)
    }

    /// Put `file` into this slot, keeping the id.
    ///
    /// Both error flags are recomputed from the new file. The description
    /// survives only when a file is being replaced.
    pub(crate) fn with_file(
        self,
        file: SelectedFile,
        limit: FileSizeLimit,
        previews: &Arc<dyn PreviewStore>,
    ) -> Self {
        let description = if self.file.is_some() {
            self.description
        } else {
            String::new()
        };
        Self {
            id: self.id,
            preview: Some(Preview::create(previews, &file)),
            size_error: !limit.allows(file.size()),
            file: Some(file),
            description,
            required_error: false,
        }
    }

    pub(crate) fn set_description(&mut self, text: String) {
        self.description = text;
        self.required_error = false;
    }

    pub(crate) fn set_errors(&mut self, required_error: bool, size_error: bool) {
        self.required_error = required_error;
        self.size_error = size_error;
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Display reference for the file, present iff a file is present
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref().map(Preview::reference)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn required_error(&self) -> bool {
        self.required_error
    }

    pub fn size_error(&self) -> bool {
        self.size_error
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }

    pub fn has_error(&self) -> bool {
        self.required_error || self.size_error
    }
}
