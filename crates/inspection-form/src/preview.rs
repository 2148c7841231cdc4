//! Preview references and their lifetimes
//!
//! Each filled slot owns a preview reference handed out by a [`PreviewStore`]
//! (the view layer's equivalent of an object URL). References hold a
//! temporary resource in the store, so they must be revoked once no slot
//! refers to them any more. [`Preview`] ties that revocation to `Drop`.

use crate::file::SelectedFile;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Issues and revokes display references for selected files
pub trait PreviewStore: Send + Sync {
    /// Create a reference for `file`. Must be deterministic in the file contents.
    fn create(&self, file: &SelectedFile) -> String;

    /// Release a reference previously returned by [`PreviewStore::create`]
    fn revoke(&self, reference: &str);
}

/// A live preview reference, revoked when dropped
pub struct Preview {
    reference: String,
    store: Arc<dyn PreviewStore>,
}

impl Preview {
    pub fn create(store: &Arc<dyn PreviewStore>, file: &SelectedFile) -> Arc<Self> {
        let reference = store.create(file);
        Arc::new(Self {
            reference,
            store: Arc::clone(store),
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.store.revoke(&self.reference);
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Preview").field(&self.reference).finish()
    }
}

/// In-memory store deriving references from a SHA-256 digest of the file.
///
/// Identical files share a reference, so outstanding handles are reference
/// counted and a reference only disappears when its last holder revokes it.
#[derive(Debug, Default)]
pub struct DigestPreviewStore {
    live: Mutex<HashMap<String, usize>>,
}

impl DigestPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding (created but not yet revoked) handles
    pub fn live_count(&self) -> usize {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }

    pub fn is_live(&self, reference: &str) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(reference)
    }
}

impl PreviewStore for DigestPreviewStore {
    fn create(&self, file: &SelectedFile) -> String {
        let reference = format!("preview:{}", hex::encode(Sha256::digest(file.content())));
        let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);
        *live.entry(reference.clone()).or_insert(0) += 1;
        reference
    }

    fn revoke(&self, reference: &str) {
        let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(count) = live.get_mut(reference) {
            *count -= 1;
            if *count == 0 {
                live.remove(reference);
            }
        } else {
            log::warn!("Revoked unknown preview reference: {}", reference);
        }
    }
}
