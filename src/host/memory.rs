//! In-memory host document model.
//!
//! Keeps the observable behaviour of the CAD host: one active document, per-configuration
//! body visibility driven through a selection set, drawing documents made of sheets that
//! own views and notes, and save-as with error/warning counts. Documents are plain serde
//! records so a session store can persist them between runs.

use super::{CadHost, ConfigurationRequest, SaveOptions, SaveOutcome};
use crate::drawing::{Anchor, SheetFormat, SheetSetup, ViewKind};
use crate::error::HostError;
use crate::part::{CutlistItem, PartDescription};
use crate::types::{DocumentId, DocumentKind, DocumentRef, NoteId, ViewId};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration every part starts with.
pub const DEFAULT_CONFIGURATION: &str = "Default";

const STANDARD_PROJECTIONS: [&str; 7] = [
    "*Front",
    "*Back",
    "*Left",
    "*Right",
    "*Top",
    "*Bottom",
    "*Isometric",
];

/// One host operation, as counted and targeted by injected faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCall {
    ActiveDocument,
    ActivateDocument,
    CloseDocument,
    CutlistItems,
    Bodies,
    SelectBody,
    ClearSelection,
    HideSelectedBodies,
    ShowSelectedBodies,
    ConfigurationNames,
    AddConfiguration,
    ActivateConfiguration,
    ForceRebuild,
    NewDrawing,
    SetupFirstSheet,
    NewSheet,
    ActiveSheetName,
    ActivateSheet,
    CreateStandardView,
    SetViewConfiguration,
    InsertNote,
    PlaceNote,
    DeleteNote,
    SaveAs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaultKind {
    Error,
    Null,
}

#[derive(Debug, Clone, Copy)]
struct Fault {
    call: HostCall,
    occurrence: usize,
    kind: FaultKind,
}

enum Gate {
    Proceed,
    Null,
}

/// A configuration of a part and the bodies hidden under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    pub name: String,
    pub comment: String,
    pub alternate_name: String,
    pub exclude_from_bom: bool,
    pub hidden: BTreeSet<String>,
}

impl ConfigurationRecord {
    fn default_configuration() -> Self {
        Self {
            name: DEFAULT_CONFIGURATION.to_string(),
            comment: String::new(),
            alternate_name: String::new(),
            exclude_from_bom: false,
            hidden: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDocument {
    pub id: DocumentId,
    pub path: PathBuf,
    pub bodies: Vec<String>,
    pub cutlists: Vec<CutlistItem>,
    pub configurations: Vec<ConfigurationRecord>,
    pub active_configuration: String,
    pub selection: Vec<String>,
    pub rebuilds: u64,
}

impl PartDocument {
    fn from_description(description: &PartDescription) -> Self {
        Self {
            id: DocumentId::for_part(&description.path),
            path: description.path.clone(),
            bodies: description.all_bodies(),
            cutlists: description.cutlists.clone(),
            configurations: vec![ConfigurationRecord::default_configuration()],
            active_configuration: DEFAULT_CONFIGURATION.to_string(),
            selection: Vec::new(),
            rebuilds: 0,
        }
    }

    pub fn configuration(&self, name: &str) -> Option<&ConfigurationRecord> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Bodies visible under the named configuration, in host order.
    pub fn visible_bodies(&self, configuration: &str) -> Option<Vec<&str>> {
        let record = self.configuration(configuration)?;
        Some(
            self.bodies
                .iter()
                .filter(|b| !record.hidden.contains(b.as_str()))
                .map(String::as_str)
                .collect(),
        )
    }

    fn active_configuration_mut(&mut self) -> Result<&mut ConfigurationRecord, HostError> {
        let name = self.active_configuration.clone();
        self.configurations
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or(HostError::ConfigurationNotFound(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub id: ViewId,
    pub projection: String,
    pub anchor: Anchor,
    pub source: PathBuf,
    pub configuration: Option<String>,
}

impl ViewRecord {
    pub fn kind(&self) -> Option<ViewKind> {
        ViewKind::from_projection_name(&self.projection)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: NoteId,
    pub text: String,
    pub position: Option<Anchor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRecord {
    pub name: String,
    pub format: SheetFormat,
    pub views: Vec<ViewRecord>,
    pub notes: Vec<NoteRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingDocument {
    pub id: DocumentId,
    pub path: PathBuf,
    pub source: PathBuf,
    pub format: SheetFormat,
    pub setup: Option<SheetSetup>,
    pub sheets: Vec<SheetRecord>,
    pub active_sheet: Option<usize>,
    pub created_at: String,
    pub rebuilds: u64,
}

impl DrawingDocument {
    pub fn sheet(&self, name: &str) -> Option<&SheetRecord> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn active_sheet(&self) -> Option<&SheetRecord> {
        self.active_sheet.and_then(|i| self.sheets.get(i))
    }

    fn active_sheet_mut(&mut self) -> Result<&mut SheetRecord, HostError> {
        let index = self.active_sheet.ok_or_else(|| HostError::CallFailed {
            call: "active_sheet".to_string(),
            reason: format!("drawing {} has no active sheet", self.id),
        })?;
        self.sheets
            .get_mut(index)
            .ok_or_else(|| HostError::SheetNotFound(format!("#{}", index + 1)))
    }

    fn view_mut(&mut self, view: ViewId) -> Option<&mut ViewRecord> {
        self.sheets
            .iter_mut()
            .flat_map(|s| s.views.iter_mut())
            .find(|v| v.id == view)
    }
}

/// A host document of either kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Document {
    Part(PartDocument),
    Drawing(DrawingDocument),
}

impl Document {
    pub fn id(&self) -> &DocumentId {
        match self {
            Document::Part(p) => &p.id,
            Document::Drawing(d) => &d.id,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Part(_) => DocumentKind::Part,
            Document::Drawing(_) => DocumentKind::Drawing,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Document::Part(p) => &p.path,
            Document::Drawing(d) => &d.path,
        }
    }

    pub fn to_ref(&self) -> DocumentRef {
        DocumentRef {
            id: self.id().clone(),
            kind: self.kind(),
            path: self.path().to_path_buf(),
        }
    }
}

/// Session-level host state that is not owned by any one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostMeta {
    pub active: Option<DocumentId>,
    pub next_handle: u64,
    pub drawing_serial: u64,
}

/// In-memory implementation of [`CadHost`].
#[derive(Debug, Default)]
pub struct MemoryHost {
    documents: BTreeMap<DocumentId, Document>,
    meta: HostMeta,
    counts: RefCell<HashMap<HostCall, usize>>,
    faults: Vec<Fault>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a host from persisted documents and session metadata.
    pub fn restore(documents: Vec<Document>, meta: HostMeta) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|d| (d.id().clone(), d))
                .collect(),
            meta,
            ..Self::default()
        }
    }

    /// Open a part (or refresh an already open one) and make it active.
    ///
    /// Refreshing replaces bodies and cutlists but keeps the part's configurations.
    pub fn open_part(&mut self, description: &PartDescription) -> DocumentRef {
        let fresh = PartDocument::from_description(description);
        let id = fresh.id.clone();
        match self.documents.get_mut(&id) {
            Some(Document::Part(existing)) => {
                existing.bodies = fresh.bodies;
                existing.cutlists = fresh.cutlists;
                let known: BTreeSet<&String> = existing.bodies.iter().collect();
                for config in &mut existing.configurations {
                    config.hidden.retain(|b| known.contains(b));
                }
                existing.selection.clear();
            }
            _ => {
                self.documents.insert(id.clone(), Document::Part(fresh));
            }
        }
        self.meta.active = Some(id.clone());
        debug!(part = %id, path = %description.path.display(), "Opened part");
        self.documents[&id].to_ref()
    }

    /// Make an open document active.
    pub fn activate(&mut self, id: &DocumentId) -> Result<DocumentRef, HostError> {
        let doc = self
            .documents
            .get(id)
            .ok_or_else(|| HostError::DocumentNotFound(id.clone()))?;
        let doc_ref = doc.to_ref();
        self.meta.active = Some(id.clone());
        Ok(doc_ref)
    }

    /// Find an open document by path.
    pub fn find_by_path(&self, path: &Path) -> Option<&Document> {
        self.documents.values().find(|d| d.path() == path)
    }

    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn meta(&self) -> &HostMeta {
        &self.meta
    }

    pub fn part(&self, id: &DocumentId) -> Option<&PartDocument> {
        match self.documents.get(id) {
            Some(Document::Part(p)) => Some(p),
            _ => None,
        }
    }

    pub fn drawing(&self, id: &DocumentId) -> Option<&DrawingDocument> {
        match self.documents.get(id) {
            Some(Document::Drawing(d)) => Some(d),
            _ => None,
        }
    }

    /// Drawings generated from the given source part, oldest first.
    pub fn drawings_for(&self, source: &Path) -> Vec<&DrawingDocument> {
        let mut drawings: Vec<&DrawingDocument> = self
            .documents
            .values()
            .filter_map(|d| match d {
                Document::Drawing(drawing) if drawing.source == source => Some(drawing),
                _ => None,
            })
            .collect();
        drawings.sort_by(|a, b| a.path.cmp(&b.path));
        drawings
    }

    pub fn call_count(&self, call: HostCall) -> usize {
        self.counts.borrow().get(&call).copied().unwrap_or(0)
    }

    /// Make the `occurrence`-th (0-based) future call of `call` fail.
    pub fn fail_on(&mut self, call: HostCall, occurrence: usize) {
        let occurrence = occurrence + self.call_count(call);
        self.faults.push(Fault {
            call,
            occurrence,
            kind: FaultKind::Error,
        });
    }

    /// Make the `occurrence`-th (0-based) future call of `call` return the host's null result.
    pub fn null_on(&mut self, call: HostCall, occurrence: usize) {
        let occurrence = occurrence + self.call_count(call);
        self.faults.push(Fault {
            call,
            occurrence,
            kind: FaultKind::Null,
        });
    }

    fn enter(&self, call: HostCall) -> Result<Gate, HostError> {
        let occurrence = {
            let mut counts = self.counts.borrow_mut();
            let count = counts.entry(call).or_insert(0);
            let occurrence = *count;
            *count += 1;
            occurrence
        };
        match self
            .faults
            .iter()
            .find(|f| f.call == call && f.occurrence == occurrence)
            .map(|f| f.kind)
        {
            Some(FaultKind::Error) => Err(HostError::CallFailed {
                call: format!("{:?}", call),
                reason: "injected failure".to_string(),
            }),
            Some(FaultKind::Null) => Ok(Gate::Null),
            None => Ok(Gate::Proceed),
        }
    }

    fn next_handle(&mut self) -> u64 {
        self.meta.next_handle += 1;
        self.meta.next_handle
    }

    fn part_ref(&self, id: &DocumentId) -> Result<&PartDocument, HostError> {
        match self.documents.get(id) {
            Some(Document::Part(p)) => Ok(p),
            Some(other) => Err(HostError::DocumentKindMismatch {
                id: id.clone(),
                expected: DocumentKind::Part,
                found: other.kind(),
            }),
            None => Err(HostError::DocumentNotFound(id.clone())),
        }
    }

    fn part_mut(&mut self, id: &DocumentId) -> Result<&mut PartDocument, HostError> {
        match self.documents.get_mut(id) {
            Some(Document::Part(p)) => Ok(p),
            Some(other) => Err(HostError::DocumentKindMismatch {
                id: id.clone(),
                expected: DocumentKind::Part,
                found: other.kind(),
            }),
            None => Err(HostError::DocumentNotFound(id.clone())),
        }
    }

    fn drawing_mut(&mut self, id: &DocumentId) -> Result<&mut DrawingDocument, HostError> {
        match self.documents.get_mut(id) {
            Some(Document::Drawing(d)) => Ok(d),
            Some(other) => Err(HostError::DocumentKindMismatch {
                id: id.clone(),
                expected: DocumentKind::Drawing,
                found: other.kind(),
            }),
            None => Err(HostError::DocumentNotFound(id.clone())),
        }
    }

    fn set_selected_hidden(&mut self, part: &DocumentId, hidden: bool) -> Result<(), HostError> {
        let part = self.part_mut(part)?;
        if part.selection.is_empty() {
            return Err(HostError::NothingSelected);
        }
        let selection = part.selection.clone();
        let config = part.active_configuration_mut()?;
        for body in selection {
            if hidden {
                config.hidden.insert(body);
            } else {
                config.hidden.remove(&body);
            }
        }
        Ok(())
    }

    fn render(drawing: &DrawingDocument) -> Result<String, String> {
        serde_json::to_string_pretty(drawing).map_err(|e| e.to_string())
    }
}

impl CadHost for MemoryHost {
    fn active_document(&self) -> Result<Option<DocumentRef>, HostError> {
        self.enter(HostCall::ActiveDocument)?;
        Ok(self
            .meta
            .active
            .as_ref()
            .and_then(|id| self.documents.get(id))
            .map(Document::to_ref))
    }

    fn activate_document(&mut self, document: &DocumentId) -> Result<(), HostError> {
        self.enter(HostCall::ActivateDocument)?;
        self.activate(document).map(|_| ())
    }

    fn close_document(&mut self, document: &DocumentId) -> Result<(), HostError> {
        self.enter(HostCall::CloseDocument)?;
        self.documents
            .remove(document)
            .ok_or_else(|| HostError::DocumentNotFound(document.clone()))?;
        if self.meta.active.as_ref() == Some(document) {
            self.meta.active = None;
        }
        debug!(document = %document, "Closed document");
        Ok(())
    }

    fn cutlist_items(&self, part: &DocumentId) -> Result<Vec<CutlistItem>, HostError> {
        self.enter(HostCall::CutlistItems)?;
        Ok(self.part_ref(part)?.cutlists.clone())
    }

    fn bodies(&self, part: &DocumentId) -> Result<Vec<String>, HostError> {
        self.enter(HostCall::Bodies)?;
        Ok(self.part_ref(part)?.bodies.clone())
    }

    fn select_body(&mut self, part: &DocumentId, body: &str) -> Result<(), HostError> {
        self.enter(HostCall::SelectBody)?;
        let part = self.part_mut(part)?;
        if !part.bodies.iter().any(|b| b == body) {
            return Err(HostError::BodyNotFound(body.to_string()));
        }
        if !part.selection.iter().any(|b| b == body) {
            part.selection.push(body.to_string());
        }
        Ok(())
    }

    fn clear_selection(&mut self, document: &DocumentId) -> Result<(), HostError> {
        self.enter(HostCall::ClearSelection)?;
        match self.documents.get_mut(document) {
            Some(Document::Part(p)) => {
                p.selection.clear();
                Ok(())
            }
            Some(Document::Drawing(_)) => Ok(()),
            None => Err(HostError::DocumentNotFound(document.clone())),
        }
    }

    fn hide_selected_bodies(&mut self, part: &DocumentId) -> Result<(), HostError> {
        self.enter(HostCall::HideSelectedBodies)?;
        self.set_selected_hidden(part, true)
    }

    fn show_selected_bodies(&mut self, part: &DocumentId) -> Result<(), HostError> {
        self.enter(HostCall::ShowSelectedBodies)?;
        self.set_selected_hidden(part, false)
    }

    fn configuration_names(&self, part: &DocumentId) -> Result<Vec<String>, HostError> {
        self.enter(HostCall::ConfigurationNames)?;
        Ok(self
            .part_ref(part)?
            .configurations
            .iter()
            .map(|c| c.name.clone())
            .collect())
    }

    fn add_configuration(
        &mut self,
        part: &DocumentId,
        request: &ConfigurationRequest,
    ) -> Result<(), HostError> {
        self.enter(HostCall::AddConfiguration)?;
        let part = self.part_mut(part)?;
        if part.configuration(&request.name).is_some() {
            return Err(HostError::CallFailed {
                call: "add_configuration".to_string(),
                reason: format!("configuration '{}' already exists", request.name),
            });
        }
        // New configurations start from the active one's show-state.
        let inherited = part
            .configuration(&part.active_configuration)
            .map(|c| c.hidden.clone())
            .unwrap_or_default();
        part.configurations.push(ConfigurationRecord {
            name: request.name.clone(),
            comment: request.comment.clone(),
            alternate_name: request.alternate_name.clone(),
            exclude_from_bom: request.exclude_from_bom,
            hidden: inherited,
        });
        if !request.dont_activate {
            part.active_configuration = request.name.clone();
        }
        Ok(())
    }

    fn activate_configuration(&mut self, part: &DocumentId, name: &str) -> Result<(), HostError> {
        self.enter(HostCall::ActivateConfiguration)?;
        let part = self.part_mut(part)?;
        if part.configuration(name).is_none() {
            return Err(HostError::ConfigurationNotFound(name.to_string()));
        }
        part.active_configuration = name.to_string();
        Ok(())
    }

    fn force_rebuild(&mut self, document: &DocumentId) -> Result<(), HostError> {
        self.enter(HostCall::ForceRebuild)?;
        match self.documents.get_mut(document) {
            Some(Document::Part(p)) => p.rebuilds += 1,
            Some(Document::Drawing(d)) => d.rebuilds += 1,
            None => return Err(HostError::DocumentNotFound(document.clone())),
        }
        Ok(())
    }

    fn new_drawing(
        &mut self,
        source: &Path,
        format: &SheetFormat,
    ) -> Result<DocumentRef, HostError> {
        self.enter(HostCall::NewDrawing)?;
        self.meta.drawing_serial += 1;
        let serial = self.meta.drawing_serial;
        let id = DocumentId::for_drawing(source, serial);
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "drawing".to_string());
        let path = source.with_file_name(format!("{}_{:03}.slddrw", stem, serial));
        let drawing = DrawingDocument {
            id: id.clone(),
            path,
            source: source.to_path_buf(),
            format: format.clone(),
            setup: None,
            sheets: Vec::new(),
            active_sheet: None,
            created_at: chrono::Utc::now().to_rfc3339(),
            rebuilds: 0,
        };
        let doc = Document::Drawing(drawing);
        let doc_ref = doc.to_ref();
        self.documents.insert(id.clone(), doc);
        self.meta.active = Some(id);
        Ok(doc_ref)
    }

    fn setup_first_sheet(
        &mut self,
        drawing: &DocumentId,
        name: &str,
        setup: &SheetSetup,
    ) -> Result<(), HostError> {
        self.enter(HostCall::SetupFirstSheet)?;
        let drawing = self.drawing_mut(drawing)?;
        if !drawing.sheets.is_empty() {
            return Err(HostError::CallFailed {
                call: "setup_first_sheet".to_string(),
                reason: "drawing already has sheets".to_string(),
            });
        }
        drawing.setup = Some(setup.clone());
        drawing.sheets.push(SheetRecord {
            name: name.to_string(),
            format: setup.format.clone(),
            views: Vec::new(),
            notes: Vec::new(),
        });
        drawing.active_sheet = Some(0);
        Ok(())
    }

    fn new_sheet(
        &mut self,
        drawing: &DocumentId,
        name: &str,
        format: &SheetFormat,
    ) -> Result<(), HostError> {
        self.enter(HostCall::NewSheet)?;
        let drawing = self.drawing_mut(drawing)?;
        if drawing.setup.is_none() {
            return Err(HostError::CallFailed {
                call: "new_sheet".to_string(),
                reason: "first sheet has not been set up".to_string(),
            });
        }
        if drawing.sheet(name).is_some() {
            return Err(HostError::CallFailed {
                call: "new_sheet".to_string(),
                reason: format!("sheet '{}' already exists", name),
            });
        }
        drawing.sheets.push(SheetRecord {
            name: name.to_string(),
            format: format.clone(),
            views: Vec::new(),
            notes: Vec::new(),
        });
        drawing.active_sheet = Some(drawing.sheets.len() - 1);
        Ok(())
    }

    fn active_sheet_name(&self, drawing: &DocumentId) -> Result<Option<String>, HostError> {
        self.enter(HostCall::ActiveSheetName)?;
        let drawing = self
            .drawing(drawing)
            .ok_or_else(|| HostError::DocumentNotFound(drawing.clone()))?;
        Ok(drawing.active_sheet().map(|s| s.name.clone()))
    }

    fn activate_sheet(&mut self, drawing: &DocumentId, name: &str) -> Result<(), HostError> {
        self.enter(HostCall::ActivateSheet)?;
        let drawing = self.drawing_mut(drawing)?;
        let index = drawing
            .sheets
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| HostError::SheetNotFound(name.to_string()))?;
        drawing.active_sheet = Some(index);
        Ok(())
    }

    fn create_standard_view(
        &mut self,
        drawing: &DocumentId,
        source: &Path,
        projection: &str,
        anchor: Anchor,
    ) -> Result<Option<ViewId>, HostError> {
        if let Gate::Null = self.enter(HostCall::CreateStandardView)? {
            return Ok(None);
        }
        let source_loaded = matches!(self.find_by_path(source), Some(Document::Part(_)));
        if !source_loaded || !STANDARD_PROJECTIONS.contains(&projection) {
            return Ok(None);
        }
        let id = self.next_handle();
        let sheet = self.drawing_mut(drawing)?.active_sheet_mut()?;
        sheet.views.push(ViewRecord {
            id,
            projection: projection.to_string(),
            anchor,
            source: source.to_path_buf(),
            configuration: None,
        });
        Ok(Some(id))
    }

    fn set_view_configuration(
        &mut self,
        drawing: &DocumentId,
        view: ViewId,
        configuration: &str,
    ) -> Result<(), HostError> {
        self.enter(HostCall::SetViewConfiguration)?;
        let source = {
            let drawing = self.drawing_mut(drawing)?;
            drawing
                .view_mut(view)
                .ok_or(HostError::ViewNotFound(view))?
                .source
                .clone()
        };
        let known = match self.find_by_path(&source) {
            Some(Document::Part(p)) => p.configuration(configuration).is_some(),
            _ => false,
        };
        if !known {
            return Err(HostError::ConfigurationNotFound(configuration.to_string()));
        }
        if let Some(record) = self.drawing_mut(drawing)?.view_mut(view) {
            record.configuration = Some(configuration.to_string());
        }
        Ok(())
    }

    fn insert_note(
        &mut self,
        drawing: &DocumentId,
        text: &str,
    ) -> Result<Option<NoteId>, HostError> {
        if let Gate::Null = self.enter(HostCall::InsertNote)? {
            return Ok(None);
        }
        let id = self.next_handle();
        let sheet = self.drawing_mut(drawing)?.active_sheet_mut()?;
        sheet.notes.push(NoteRecord {
            id,
            text: text.to_string(),
            position: None,
        });
        Ok(Some(id))
    }

    fn place_note(
        &mut self,
        drawing: &DocumentId,
        note: NoteId,
        anchor: Anchor,
    ) -> Result<(), HostError> {
        self.enter(HostCall::PlaceNote)?;
        let drawing = self.drawing_mut(drawing)?;
        let record = drawing
            .sheets
            .iter_mut()
            .flat_map(|s| s.notes.iter_mut())
            .find(|n| n.id == note)
            .ok_or(HostError::NoteNotFound(note))?;
        record.position = Some(anchor);
        Ok(())
    }

    fn delete_note(&mut self, drawing: &DocumentId, note: NoteId) -> Result<(), HostError> {
        self.enter(HostCall::DeleteNote)?;
        let drawing = self.drawing_mut(drawing)?;
        for sheet in &mut drawing.sheets {
            if let Some(pos) = sheet.notes.iter().position(|n| n.id == note) {
                sheet.notes.remove(pos);
                return Ok(());
            }
        }
        Err(HostError::NoteNotFound(note))
    }

    fn save_as(
        &mut self,
        document: &DocumentId,
        path: &Path,
        options: &SaveOptions,
    ) -> Result<SaveOutcome, HostError> {
        self.enter(HostCall::SaveAs)?;
        let drawing = match self.documents.get(document) {
            Some(Document::Drawing(d)) => d,
            Some(other) => {
                return Err(HostError::DocumentKindMismatch {
                    id: document.clone(),
                    expected: DocumentKind::Drawing,
                    found: other.kind(),
                })
            }
            None => return Err(HostError::DocumentNotFound(document.clone())),
        };
        let mut outcome = SaveOutcome {
            path: path.to_path_buf(),
            ..SaveOutcome::default()
        };

        let mut printed = drawing.clone();
        if !options.all_sheets {
            printed.sheets = drawing.active_sheet().cloned().into_iter().collect();
        }
        if printed.sheets.is_empty() {
            outcome.errors += 1;
            return Ok(outcome);
        }
        // Sheets without a full set of views still print, with a warning each.
        outcome.warnings = printed
            .sheets
            .iter()
            .filter(|s| s.views.len() < ViewKind::ALL.len())
            .count() as u32;

        let written = Self::render(&printed).and_then(|body| {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
            std::fs::write(path, body).map_err(|e| e.to_string())
        });
        match written {
            Ok(()) => outcome.success = true,
            Err(reason) => {
                debug!(path = %path.display(), %reason, "Save failed");
                outcome.errors += 1;
            }
        }
        Ok(outcome)
    }
}
