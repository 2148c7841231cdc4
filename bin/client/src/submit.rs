use anyhow::{Context, Result};
use inspection_form::{
    DigestPreviewStore, FormConfig, Inspection, InspectionApi, InspectionForm, NotificationSink,
    SelectedFile, SlotCollection, SlotId, SubmitError,
};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

/// Composes an inspection from files on disk and submits it
pub struct InspectionSubmitter {
    form: InspectionForm,
}

impl InspectionSubmitter {
    pub fn new(config: &FormConfig, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            form: InspectionForm::new(config, Arc::new(DigestPreviewStore::new()), notifier),
        }
    }

    /// Select every image at once on the trailing slot, then describe each
    /// slot by position. Missing descriptions are left blank for validation
    /// to report.
    pub fn compose(&mut self, images: &[PathBuf], descriptions: &[String]) -> Result<()> {
        let files = images
            .iter()
            .map(|path| {
                SelectedFile::from_path(path)
                    .with_context(|| format!("Failed to read image: {:?}", path))
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Selected {} images", files.len());

        let target = self.form.slots().last().id();
        self.form.select_files(target, &files)?;

        if descriptions.len() > files.len() {
            anyhow::bail!(
                "Got {} descriptions for {} images",
                descriptions.len(),
                files.len()
            );
        }

        let ids: Vec<SlotId> = self.form.slots().iter().map(|slot| slot.id()).collect();
        for (id, description) in ids.into_iter().zip(descriptions) {
            self.form.update_description(id, description.as_str())?;
        }

        Ok(())
    }

    pub async fn submit(&mut self, api: &dyn InspectionApi) -> Result<Inspection> {
        match self.form.submit(api).await {
            Ok(inspection) => Ok(inspection),
            Err(error @ SubmitError::Validation(_)) => {
                print_slot_report(self.form.slots());
                Err(error.into())
            }
            Err(error) => Err(error.into()),
        }
    }

    pub fn slots(&self) -> &SlotCollection {
        self.form.slots()
    }
}

/// Print each slot with its validation markers
fn print_slot_report(slots: &SlotCollection) {
    for (index, slot) in slots.iter().enumerate() {
        let name = slot.file().map(|f| f.name()).unwrap_or("<no image>");
        let mut markers = Vec::new();
        if slot.required_error() {
            if slot.file().is_none() {
                markers.push("image required");
            } else {
                markers.push("description required");
            }
        }
        if slot.size_error() {
            markers.push("too large");
        }
        if markers.is_empty() {
            eprintln!("  {}. {}", index + 1, name);
        } else {
            eprintln!("  {}. {} (*{})", index + 1, name, markers.join(", "));
        }
    }
}

/// Print a created or fetched inspection
pub fn print_inspection(inspection: &Inspection) {
    println!(
        "Inspection {} ({} images, created {})",
        inspection.id,
        inspection.total_images,
        inspection.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for (index, image) in inspection.images.iter().enumerate() {
        println!("  {}. {} - {}", index + 1, image.url, image.description);
    }
}
