//! Ordered slot list and its transitions
//!
//! A [`SlotCollection`] is a value: every transition borrows the current
//! collection and returns the next one, so the view layer only ever renders
//! a snapshot. The collection always holds at least one slot, and the only
//! slot allowed to be empty is the last one.

use crate::error::SlotError;
use crate::file::SelectedFile;
use crate::preview::PreviewStore;
use crate::size::FileSizeLimit;
use crate::slot::{Slot, SlotId};
use log::debug;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct SlotCollection {
    slots: Vec<Slot>,
    limit: FileSizeLimit,
    previews: Arc<dyn PreviewStore>,
}

impl SlotCollection {
    /// A collection holding a single empty slot
    pub fn new(limit: FileSizeLimit, previews: Arc<dyn PreviewStore>) -> Self {
        Self {
            slots: vec![Slot::empty()],
            limit,
            previews,
        }
    }

    /// Place `files` starting at slot `id`.
    ///
    /// A filled slot, or a single file, is a replacement: only the first file
    /// is used and it takes over the slot in place. Several files on an empty
    /// slot fill it with the first one and insert one new slot per remaining
    /// file directly after it, in input order. No trailing empty slot is
    /// appended.
    pub fn select_files(&self, id: SlotId, files: &[SelectedFile]) -> Result<Self, SlotError> {
        let (first, rest) = files.split_first().ok_or(SlotError::EmptySelection)?;
        let index = self.position(id)?;

        let mut next = self.clone();
        let target = next.slots.remove(index);
        let replacing = !target.is_empty();
        next.slots
            .insert(index, target.with_file(first.clone(), self.limit, &self.previews));

        if replacing || rest.is_empty() {
            debug!("Slot {} now holds {}", id, first.name());
            return Ok(next);
        }

        let added: Vec<Slot> = rest
            .iter()
            .map(|file| Slot::filled(file.clone(), self.limit, &self.previews))
            .collect();
        debug!(
            "Slot {} split into {} slots from one selection",
            id,
            added.len() + 1
        );
        next.slots.splice(index + 1..index + 1, added);

        Ok(next)
    }

    /// Append one empty slot after a filled, correctly sized last slot
    pub fn add_empty_slot(&self) -> Result<Self, SlotError> {
        if !self.can_add() {
            return Err(SlotError::TrailingSlotNotReady);
        }

        let mut next = self.clone();
        next.slots.push(Slot::empty());
        Ok(next)
    }

    /// Remove a slot. Removing the only slot leaves one fresh empty slot.
    pub fn remove_slot(&self, id: SlotId) -> Result<Self, SlotError> {
        let index = self.position(id)?;

        if self.slots.len() == 1 {
            return Ok(self.reset());
        }

        let mut next = self.clone();
        next.slots.remove(index);
        debug!("Removed slot {} ({} remaining)", id, next.slots.len());
        Ok(next)
    }

    /// Change a filled slot's description, optimistically clearing its
    /// presence error. Validation re-derives the flag later.
    pub fn update_description(&self, id: SlotId, text: impl Into<String>) -> Result<Self, SlotError> {
        let index = self.position(id)?;
        if self.slots[index].is_empty() {
            return Err(SlotError::SlotEmpty(id));
        }

        let mut next = self.clone();
        next.slots[index].set_description(text.into());
        Ok(next)
    }

    /// A fresh single-empty-slot collection with the same configuration
    pub fn reset(&self) -> Self {
        Self::new(self.limit, Arc::clone(&self.previews))
    }

    /// Whether "add another image" is currently allowed
    pub fn can_add(&self) -> bool {
        self.last().file().is_some() && !self.last().size_error()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id() == id)
    }

    pub fn last(&self) -> &Slot {
        // Never empty: every constructor and transition keeps one slot
        &self.slots[self.slots.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn limit(&self) -> FileSizeLimit {
        self.limit
    }

    /// True when the collection is a single empty slot
    pub fn is_pristine(&self) -> bool {
        self.slots.len() == 1 && self.slots[0].is_empty()
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    fn position(&self, id: SlotId) -> Result<usize, SlotError> {
        self.slots
            .iter()
            .position(|slot| slot.id() == id)
            .ok_or(SlotError::UnknownSlot(id))
    }
}

impl<'a> IntoIterator for &'a SlotCollection {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl fmt::Debug for SlotCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotCollection")
            .field("slots", &self.slots)
            .field("limit", &self.limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::DigestPreviewStore;

    fn file(name: &str, size: usize) -> SelectedFile {
        SelectedFile::new(name, vec![name.len() as u8; size])
    }

    fn collection(limit: u64) -> (SlotCollection, Arc<DigestPreviewStore>) {
        let previews = Arc::new(DigestPreviewStore::new());
        (
            SlotCollection::new(FileSizeLimit::new(limit), previews.clone()),
            previews,
        )
    }

    fn assert_shape(c: &SlotCollection) {
        assert!(c.len() >= 1);
        let empties: Vec<usize> = c
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_empty())
            .map(|(i, _)| i)
            .collect();
        assert!(empties.len() <= 1, "more than one empty slot");
        if let Some(i) = empties.first() {
            assert_eq!(*i, c.len() - 1, "empty slot is not last");
        }
        for slot in c {
            assert_eq!(slot.file().is_some(), slot.preview().is_some());
        }
    }

    #[test]
    fn test_new_collection_has_one_empty_slot() {
        let (c, _) = collection(100);
        assert_eq!(c.len(), 1);
        assert!(c.is_pristine());
        assert!(!c.can_add());
        assert_shape(&c);
    }

    #[test]
    fn test_select_many_on_sole_empty_slot_splits() {
        let (c, _) = collection(100);
        let id = c.last().id();
        let files = vec![file("a.png", 1), file("b.png", 2), file("c.png", 3)];

        let next = c.select_files(id, &files).unwrap();

        assert_eq!(next.len(), 3);
        assert_eq!(next.slots()[0].id(), id);
        for (slot, expected) in next.iter().zip(&files) {
            assert_eq!(slot.file(), Some(expected));
            assert_eq!(slot.description(), "");
            assert!(!slot.has_error());
        }
        assert_shape(&next);
        // the input value is untouched
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_split_inserts_after_target() {
        let (c, _) = collection(100);
        let c = c.select_files(c.last().id(), &[file("a.png", 1)]).unwrap();
        let c = c.add_empty_slot().unwrap();
        let trailing = c.last().id();

        let c = c
            .select_files(trailing, &[file("b.png", 1), file("c.png", 1)])
            .unwrap();

        let names: Vec<&str> = c.iter().map(|s| s.file().unwrap().name()).collect();
        assert_eq!(names, ["a.png", "b.png", "c.png"]);
        assert_eq!(c.slots()[1].id(), trailing);
    }

    #[test]
    fn test_replace_keeps_description_and_neighbours() {
        let (c, _) = collection(100);
        let c = c
            .select_files(c.last().id(), &[file("a.png", 1), file("b.png", 1)])
            .unwrap();
        let first = c.slots()[0].id();
        let second = c.slots()[1].clone();
        let c = c.update_description(first, "front").unwrap();

        let replaced = c
            .select_files(first, &[file("z.png", 5), file("ignored.png", 1)])
            .unwrap();

        assert_eq!(replaced.len(), 2);
        assert_eq!(replaced.slots()[0].id(), first);
        assert_eq!(replaced.slots()[0].file().unwrap().name(), "z.png");
        assert_eq!(replaced.slots()[0].description(), "front");
        assert_ne!(replaced.slots()[0].preview(), c.slots()[0].preview());
        assert_eq!(replaced.slots()[1].id(), second.id());
        assert_eq!(replaced.slots()[1].file(), second.file());
    }

    #[test]
    fn test_replace_recomputes_both_flags() {
        let (c, _) = collection(4);
        let id = c.last().id();
        let c = c.select_files(id, &[file("big.png", 10)]).unwrap();
        assert!(c.slots()[0].size_error());

        let c = c.select_files(id, &[file("ok.png", 2)]).unwrap();
        assert!(!c.slots()[0].size_error());
        assert!(!c.slots()[0].required_error());
    }

    #[test]
    fn test_oversized_files_in_split_flag_independently() {
        let (c, _) = collection(4);
        let c = c
            .select_files(
                c.last().id(),
                &[file("a.png", 1), file("b.png", 9), file("c.png", 4)],
            )
            .unwrap();
        let flags: Vec<bool> = c.iter().map(Slot::size_error).collect();
        assert_eq!(flags, [false, true, false]);
    }

    #[test]
    fn test_empty_selection_rejected() {
        let (c, _) = collection(100);
        assert_eq!(
            c.select_files(c.last().id(), &[]).unwrap_err(),
            SlotError::EmptySelection
        );
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let (c, _) = collection(100);
        let stranger = SlotId::new();
        assert_eq!(
            c.select_files(stranger, &[file("a.png", 1)]).unwrap_err(),
            SlotError::UnknownSlot(stranger)
        );
        assert_eq!(
            c.remove_slot(stranger).unwrap_err(),
            SlotError::UnknownSlot(stranger)
        );
    }

    #[test]
    fn test_add_requires_filled_valid_last_slot() {
        let (c, _) = collection(4);
        assert_eq!(c.add_empty_slot().unwrap_err(), SlotError::TrailingSlotNotReady);

        let oversized = c.select_files(c.last().id(), &[file("a.png", 8)]).unwrap();
        assert_eq!(
            oversized.add_empty_slot().unwrap_err(),
            SlotError::TrailingSlotNotReady
        );

        let ok = c.select_files(c.last().id(), &[file("a.png", 2)]).unwrap();
        let grown = ok.add_empty_slot().unwrap();
        assert_eq!(grown.len(), 2);
        assert!(grown.last().is_empty());
        assert_eq!(
            grown.add_empty_slot().unwrap_err(),
            SlotError::TrailingSlotNotReady
        );
        assert_shape(&grown);
    }

    #[test]
    fn test_remove_only_slot_resets() {
        let (c, _) = collection(100);
        let id = c.last().id();
        let c = c.select_files(id, &[file("a.png", 1)]).unwrap();
        let c = c.update_description(id, "front").unwrap();

        let next = c.remove_slot(id).unwrap();

        assert_eq!(next.len(), 1);
        assert!(next.last().file().is_none());
        assert_eq!(next.last().description(), "");
        assert_ne!(next.last().id(), id);
    }

    #[test]
    fn test_remove_preserves_order() {
        let (c, _) = collection(100);
        let c = c
            .select_files(
                c.last().id(),
                &[file("a.png", 1), file("b.png", 1), file("c.png", 1)],
            )
            .unwrap();
        let middle = c.slots()[1].id();

        let next = c.remove_slot(middle).unwrap();

        let names: Vec<&str> = next.iter().map(|s| s.file().unwrap().name()).collect();
        assert_eq!(names, ["a.png", "c.png"]);
    }

    #[test]
    fn test_description_edit_requires_file_and_clears_required_error() {
        let (c, _) = collection(100);
        let id = c.last().id();
        assert_eq!(
            c.update_description(id, "x").unwrap_err(),
            SlotError::SlotEmpty(id)
        );

        let mut c = c.select_files(id, &[file("a.png", 1)]).unwrap();
        c.slots_mut()[0].set_errors(true, false);
        let c = c.update_description(id, "   ").unwrap();
        assert!(!c.slots()[0].required_error());
        assert_eq!(c.slots()[0].description(), "   ");
    }

    #[test]
    fn test_ids_unique_across_edits() {
        let (c, _) = collection(100);
        let c = c
            .select_files(
                c.last().id(),
                &[file("a.png", 1), file("b.png", 1), file("c.png", 1)],
            )
            .unwrap();
        let c = c.add_empty_slot().unwrap();
        let mut ids: Vec<SlotId> = c.iter().map(Slot::id).collect();
        ids.sort_by_key(|id| id.to_string());
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_previews_released_on_remove_replace_and_reset() {
        let (mut c, previews) = collection(100);
        c = c
            .select_files(c.last().id(), &[file("a.png", 1), file("bb.png", 1)])
            .unwrap();
        assert_eq!(previews.live_count(), 2);

        let first = c.slots()[0].id();
        c = c.select_files(first, &[file("ccc.png", 1)]).unwrap();
        assert_eq!(previews.live_count(), 2, "replaced preview is revoked");

        c = c.remove_slot(first).unwrap();
        assert_eq!(previews.live_count(), 1);

        c = c.reset();
        assert_eq!(previews.live_count(), 0);
        assert!(c.is_pristine());
    }
}
