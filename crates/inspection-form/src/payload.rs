//! Transport payload built from a submittable collection
//!
//! Binary part `i` and description `i` always come from the same slot; the
//! backend has no other way to pair them.

use crate::collection::SlotCollection;
use crate::error::SlotError;
use crate::file::SelectedFile;

#[derive(Debug, Clone)]
pub struct InspectionPayload {
    images: Vec<SelectedFile>,
    descriptions: Vec<String>,
}

impl InspectionPayload {
    pub fn images(&self) -> &[SelectedFile] {
        &self.images
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Number of image parts (always equal to the number of descriptions)
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image and description pairs in submission order
    pub fn entries(&self) -> impl Iterator<Item = (&SelectedFile, &str)> {
        self.images
            .iter()
            .zip(self.descriptions.iter().map(String::as_str))
    }

    /// The description list as sent in the descriptions field
    pub fn descriptions_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.descriptions)
    }
}

impl TryFrom<&SlotCollection> for InspectionPayload {
    type Error = SlotError;

    fn try_from(collection: &SlotCollection) -> Result<Self, Self::Error> {
        let mut images = Vec::with_capacity(collection.len());
        let mut descriptions = Vec::with_capacity(collection.len());

        for slot in collection {
            let file = slot.file().ok_or(SlotError::SlotEmpty(slot.id()))?;
            images.push(file.clone());
            descriptions.push(slot.description().to_string());
        }

        Ok(Self {
            images,
            descriptions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::DigestPreviewStore;
    use crate::size::FileSizeLimit;
    use crate::slot::Slot;
    use std::sync::Arc;

    fn collection(names: &[&str]) -> SlotCollection {
        let c = SlotCollection::new(FileSizeLimit::default(), Arc::new(DigestPreviewStore::new()));
        let files: Vec<SelectedFile> = names
            .iter()
            .map(|name| SelectedFile::new(*name, name.as_bytes().to_vec()))
            .collect();
        let mut c = c.select_files(c.last().id(), &files).unwrap();
        let ids: Vec<_> = c.iter().map(Slot::id).collect();
        for (id, name) in ids.into_iter().zip(names) {
            c = c.update_description(id, format!("about {}", name)).unwrap();
        }
        c
    }

    #[test]
    fn test_parts_and_descriptions_are_parallel() {
        let payload = InspectionPayload::try_from(&collection(&["a.png", "b.png", "c.png"])).unwrap();

        assert_eq!(payload.len(), 3);
        assert_eq!(payload.descriptions().len(), payload.images().len());
        for (file, description) in payload.entries() {
            assert_eq!(description, format!("about {}", file.name()));
            assert_eq!(file.content(), file.name().as_bytes());
        }
    }

    #[test]
    fn test_descriptions_json_is_ordered_list() {
        let payload = InspectionPayload::try_from(&collection(&["b.png", "a.png"])).unwrap();
        assert_eq!(
            payload.descriptions_json().unwrap(),
            r#"["about b.png","about a.png"]"#
        );
    }

    #[test]
    fn test_empty_slot_cannot_be_serialized() {
        let c = collection(&["a.png"]).add_empty_slot().unwrap();
        let trailing = c.last().id();
        assert_eq!(
            InspectionPayload::try_from(&c).unwrap_err(),
            SlotError::SlotEmpty(trailing)
        );
    }
}
