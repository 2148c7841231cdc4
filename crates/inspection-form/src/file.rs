//! File handles produced by a file selection

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// An image chosen by the user. Cloning shares the underlying bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content_type: Option<String>,
    content: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let content_type = guess_image_type(&name).map(str::to_string);
        Self {
            name,
            content_type,
            content: content.into(),
        }
    }

    /// Override the guessed content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, naming it after its last path component
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok(Self::new(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Byte length of the file
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

// Content is elided so debug output of a whole collection stays readable
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.content.len())
            .finish()
    }
}

fn guess_image_type(name: &str) -> Option<&'static str> {
    let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        _ => return None,
    };
    Some(mime)
}
