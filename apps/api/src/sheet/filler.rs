//! TemplateFieldFiller — projects a `CharacterRecord` onto the slots of a PDF form.
//!
//! # Fill rules
//! - Slot mapped and field present → write the trimmed value
//! - Slot mapped and field absent  → write the empty string (never leave a stale default)
//! - Slot not in the template map  → untouched
//!
//! The template is read with a single call and the output is written to a temp file in
//! the destination directory, then persisted over the output path. Every handle is
//! owned and closed on drop, so an early return leaves neither open files nor a
//! partial output behind.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use lopdf::Document;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::sheet::fields::CanonicalField;
use crate::sheet::parser::CharacterRecord;
use crate::sheet::pdf::{
    collect_slots, request_appearance_regeneration, set_slot_value, slot_value,
};
use crate::sheet::template_map::field_for_slot;

#[derive(Debug, Error)]
pub enum FillError {
    #[error("template not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("template {} could not be loaded: {reason}", path.display())]
    TemplateInvalid { path: PathBuf, reason: String },

    #[error("failed to write filled document to {}: {reason}", path.display())]
    TemplateWriteError { path: PathBuf, reason: String },
}

impl FillError {
    fn write(path: &Path, err: impl Display) -> Self {
        FillError::TemplateWriteError {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

/// Outcome of a successful fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillReport {
    pub output_path: PathBuf,
    /// Mapped slots that received a non-empty value.
    pub slots_written: usize,
    /// Mapped slots cleared because the record lacked their field.
    pub slots_cleared: usize,
}

/// A slot of the template and the canonical field feeding it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotInfo {
    pub name: String,
    pub field: Option<CanonicalField>,
}

#[derive(Debug, Clone)]
pub struct TemplateFiller {
    template_path: PathBuf,
}

impl TemplateFiller {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Fills every mapped slot from `record` and persists the result at `output_path`.
    ///
    /// `output_path` must be unique to this call; concurrent fills onto the same
    /// path race on the final rename.
    pub fn fill(
        &self,
        record: &CharacterRecord,
        output_path: &Path,
    ) -> Result<FillReport, FillError> {
        let mut doc = load_document(&self.template_path)?;
        let slots = collect_slots(&doc);

        let mut slots_written = 0;
        let mut slots_cleared = 0;
        for slot in &slots {
            let Some(field) = field_for_slot(&slot.name) else {
                continue;
            };
            let value = record.get(field).map(str::trim).unwrap_or_default();
            if !set_slot_value(&mut doc, slot, value) {
                continue;
            }
            if value.is_empty() {
                slots_cleared += 1;
            } else {
                slots_written += 1;
            }
        }
        request_appearance_regeneration(&mut doc);

        optimize(&mut doc);
        persist(&mut doc, output_path)?;

        debug!(
            template = %self.template_path.display(),
            output = %output_path.display(),
            slots = slots.len(),
            written = slots_written,
            cleared = slots_cleared,
            "Template filled"
        );

        Ok(FillReport {
            output_path: output_path.to_path_buf(),
            slots_written,
            slots_cleared,
        })
    }

    /// Lists every slot in the template with the canonical field mapped onto it.
    pub fn list_slots(&self) -> Result<Vec<SlotInfo>, FillError> {
        let doc = load_document(&self.template_path)?;
        Ok(collect_slots(&doc)
            .into_iter()
            .map(|slot| SlotInfo {
                field: field_for_slot(&slot.name),
                name: slot.name,
            })
            .collect())
    }
}

/// Reads back the `/V` of every slot in a document (filled output or template).
pub fn read_slot_values(path: &Path) -> Result<BTreeMap<String, String>, FillError> {
    let doc = load_document(path)?;
    Ok(collect_slots(&doc)
        .into_iter()
        .map(|slot| {
            let value = slot_value(&doc, &slot).unwrap_or_default();
            (slot.name, value)
        })
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn load_document(path: &Path) -> Result<Document, FillError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FillError::TemplateNotFound {
            path: path.to_path_buf(),
        },
        _ => FillError::TemplateInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    Document::load_mem(&bytes).map_err(|e| FillError::TemplateInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Drops unreferenced objects and compresses streams. Cannot fail.
fn optimize(doc: &mut Document) {
    doc.prune_objects();
    doc.delete_zero_length_streams();
    doc.compress();
}

fn persist(doc: &mut Document, output_path: &Path) -> Result<(), FillError> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| FillError::write(output_path, e))?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        doc.save_to(&mut writer)
            .map_err(|e| FillError::write(output_path, e))?;
        writer
            .flush()
            .map_err(|e| FillError::write(output_path, e))?;
    }
    staged
        .persist(output_path)
        .map_err(|e| FillError::write(output_path, e))?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
