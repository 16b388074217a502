//! Host document model boundary.
//!
//! Every operation the pipeline performs against the CAD host goes through [`CadHost`].
//! Each call reports success or failure explicitly; callers propagate the first failure
//! and stop, so a run never continues on a partially-mutated document.

pub mod memory;

pub use memory::{Document, DrawingDocument, HostCall, HostMeta, MemoryHost, PartDocument};

use crate::drawing::{Anchor, SheetFormat, SheetSetup};
use crate::error::HostError;
use crate::part::CutlistItem;
use crate::types::{DocumentId, DocumentRef, NoteId, ViewId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options passed when adding a configuration to a part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRequest {
    pub name: String,
    pub comment: String,
    pub alternate_name: String,
    /// Keep this configuration out of bill-of-materials rollups.
    pub exclude_from_bom: bool,
    /// Leave the current configuration active after creation.
    pub dont_activate: bool,
}

impl ConfigurationRequest {
    /// Request used for synthesized cutlist configurations.
    pub fn for_cutlist(name: &str) -> Self {
        Self {
            name: name.to_string(),
            comment: format!("Configuration for: {}", name),
            alternate_name: "Cutlist member configuration".to_string(),
            exclude_from_bom: true,
            dont_activate: true,
        }
    }
}

/// Options for save-as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOptions {
    /// Export every sheet rather than only the active one.
    pub all_sheets: bool,
    pub silent: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            all_sheets: true,
            silent: true,
        }
    }
}

/// Status returned by save-as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub success: bool,
    pub errors: u32,
    pub warnings: u32,
    pub path: PathBuf,
}

/// Operations consumed from the host document model.
pub trait CadHost {
    /// The document the host currently has active, if any.
    fn active_document(&self) -> Result<Option<DocumentRef>, HostError>;

    fn activate_document(&mut self, document: &DocumentId) -> Result<(), HostError>;

    /// Close a document without saving. Closing the active document leaves none active.
    fn close_document(&mut self, document: &DocumentId) -> Result<(), HostError>;

    /// Cutlist items of the part's active configuration, in host order.
    fn cutlist_items(&self, part: &DocumentId) -> Result<Vec<CutlistItem>, HostError>;

    /// All solid bodies of the part, in host order.
    fn bodies(&self, part: &DocumentId) -> Result<Vec<String>, HostError>;

    /// Add a body to the selection set.
    fn select_body(&mut self, part: &DocumentId, body: &str) -> Result<(), HostError>;

    fn clear_selection(&mut self, document: &DocumentId) -> Result<(), HostError>;

    /// Hide the selected bodies under the active configuration.
    fn hide_selected_bodies(&mut self, part: &DocumentId) -> Result<(), HostError>;

    /// Show the selected bodies under the active configuration.
    fn show_selected_bodies(&mut self, part: &DocumentId) -> Result<(), HostError>;

    fn configuration_names(&self, part: &DocumentId) -> Result<Vec<String>, HostError>;

    fn add_configuration(
        &mut self,
        part: &DocumentId,
        request: &ConfigurationRequest,
    ) -> Result<(), HostError>;

    fn activate_configuration(&mut self, part: &DocumentId, name: &str) -> Result<(), HostError>;

    fn force_rebuild(&mut self, document: &DocumentId) -> Result<(), HostError>;

    /// Create a new, empty drawing document and make it active.
    fn new_drawing(&mut self, source: &Path, format: &SheetFormat)
        -> Result<DocumentRef, HostError>;

    /// Create the first sheet, fixing title block, scale and zones for the document.
    fn setup_first_sheet(
        &mut self,
        drawing: &DocumentId,
        name: &str,
        setup: &SheetSetup,
    ) -> Result<(), HostError>;

    /// Append a sheet that inherits the document's setup, and activate it.
    fn new_sheet(
        &mut self,
        drawing: &DocumentId,
        name: &str,
        format: &SheetFormat,
    ) -> Result<(), HostError>;

    /// Name of the drawing's active sheet, if it has one.
    fn active_sheet_name(&self, drawing: &DocumentId) -> Result<Option<String>, HostError>;

    fn activate_sheet(&mut self, drawing: &DocumentId, name: &str) -> Result<(), HostError>;

    /// Create a standard view on the active sheet. `Ok(None)` is the host's null result.
    fn create_standard_view(
        &mut self,
        drawing: &DocumentId,
        source: &Path,
        projection: &str,
        anchor: Anchor,
    ) -> Result<Option<ViewId>, HostError>;

    fn set_view_configuration(
        &mut self,
        drawing: &DocumentId,
        view: ViewId,
        configuration: &str,
    ) -> Result<(), HostError>;

    /// Insert a note on the active sheet. `Ok(None)` is the host's null result.
    fn insert_note(&mut self, drawing: &DocumentId, text: &str)
        -> Result<Option<NoteId>, HostError>;

    fn place_note(
        &mut self,
        drawing: &DocumentId,
        note: NoteId,
        anchor: Anchor,
    ) -> Result<(), HostError>;

    fn delete_note(&mut self, drawing: &DocumentId, note: NoteId) -> Result<(), HostError>;

    fn save_as(
        &mut self,
        document: &DocumentId,
        path: &Path,
        options: &SaveOptions,
    ) -> Result<SaveOutcome, HostError>;
}
