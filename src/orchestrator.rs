//! Command orchestration.
//!
//! Sequences the pipeline for each command and owns the abort policy. The host document is
//! a single shared resource: the orchestrator holds it behind a mutex and every command
//! takes it with `try_lock`, so a command issued while another is running fails with
//! [`CommandError::Busy`] instead of interleaving host calls.

use crate::composition::{compose, ComposedSheet, SkippedView};
use crate::drawing::{Anchor, MissingViewPolicy, SheetSetup, DEFAULT_NOTE_ANCHOR};
use crate::error::CommandError;
use crate::export::{self, ExportReport};
use crate::host::CadHost;
use crate::notes::{self, NoteSelection};
use crate::partition::partition_part;
use crate::synthesis::{synthesize_all, SynthesizedConfiguration};
use crate::types::{DocumentKind, DocumentRef, NoteId};
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Settings the orchestrator passes down to pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub setup: SheetSetup,
    pub missing_view_policy: MissingViewPolicy,
    pub note_anchor: Anchor,
    pub pdf_all_sheets: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            setup: SheetSetup::new(Default::default()),
            missing_view_policy: MissingViewPolicy::default(),
            note_anchor: DEFAULT_NOTE_ANCHOR,
            pdf_all_sheets: true,
        }
    }
}

/// Result of the generate command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateReport {
    pub part: DocumentRef,
    pub drawing: DocumentRef,
    pub configurations: Vec<SynthesizedConfiguration>,
    pub sheets: Vec<ComposedSheet>,
    pub skipped_views: Vec<SkippedView>,
}

/// Result of the annotate command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotateReport {
    pub drawing: DocumentRef,
    pub sheet: Option<String>,
    pub note: NoteId,
    pub anchor: Anchor,
    pub text: String,
}

pub struct Orchestrator<H: CadHost> {
    host: Mutex<H>,
    settings: PipelineSettings,
}

impl<H: CadHost> Orchestrator<H> {
    pub fn new(host: H, settings: PipelineSettings) -> Self {
        Self {
            host: Mutex::new(host),
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Give the host back, e.g. to persist it.
    pub fn into_host(self) -> H {
        self.host.into_inner()
    }

    /// Run `f` with exclusive access to the host.
    pub fn with_host<R>(&self, f: impl FnOnce(&mut H) -> R) -> Result<R, CommandError> {
        let mut host = self.lock()?;
        Ok(f(&mut host))
    }

    fn lock(&self) -> Result<MutexGuard<'_, H>, CommandError> {
        self.host.try_lock().ok_or(CommandError::Busy)
    }

    fn require_active(host: &H, expected: DocumentKind) -> Result<DocumentRef, CommandError> {
        let active = host.active_document()?.ok_or(CommandError::NoActiveDocument)?;
        if active.kind != expected {
            return Err(CommandError::WrongDocumentType {
                expected,
                found: active.kind,
            });
        }
        Ok(active)
    }

    /// Generate one configuration and one drawing sheet per non-empty cutlist item of the
    /// active part.
    ///
    /// Nothing is created when the part has no non-empty cutlist items. Configurations that
    /// exist from an earlier run are reused; the drawing document is always new. When
    /// composition fails the drawing is discarded and the part is active again.
    pub fn generate(&self) -> Result<GenerateReport, CommandError> {
        let mut host = self.lock()?;
        let host = &mut *host;

        let part = Self::require_active(host, DocumentKind::Part)?;
        info!(part = %part.id, path = %part.path.display(), "Generating drawings");

        let units = partition_part(&*host, &part.id)?;
        if units.is_empty() {
            warn!(part = %part.id, "No non-empty cutlist items");
            return Err(CommandError::NoValidCutlists);
        }

        let configurations = synthesize_all(host, &part.id, &units)?;
        let names: Vec<String> = configurations.iter().map(|c| c.name.clone()).collect();

        let composed = match compose(
            host,
            &self.settings.setup,
            &names,
            &part.path,
            self.settings.missing_view_policy,
        ) {
            Ok(composed) => composed,
            Err(err) => {
                // The partial drawing is closed; hand the part back.
                if let Err(restore) = host.activate_document(&part.id) {
                    warn!(part = %part.id, error = %restore, "Failed to reactivate part");
                }
                return Err(err);
            }
        };

        info!(
            drawing = %composed.document.id,
            sheets = composed.sheets.len(),
            skipped_views = composed.skipped_views.len(),
            "Generated drawing"
        );
        Ok(GenerateReport {
            part,
            drawing: composed.document,
            configurations,
            sheets: composed.sheets,
            skipped_views: composed.skipped_views,
        })
    }

    /// Compose the note for `selection` and place it on the active drawing's active sheet,
    /// or on `sheet` when given.
    ///
    /// Any failure after the note was inserted deletes it again, and a sheet switched to for
    /// the note is switched back, before the error is returned.
    pub fn annotate(
        &self,
        selection: &NoteSelection,
        sheet: Option<&str>,
    ) -> Result<AnnotateReport, CommandError> {
        let mut host = self.lock()?;
        let host = &mut *host;

        let drawing = Self::require_active(host, DocumentKind::Drawing)?;
        let previous_sheet = match sheet {
            Some(sheet) => {
                let previous = host.active_sheet_name(&drawing.id)?;
                host.activate_sheet(&drawing.id, sheet)?;
                previous.filter(|p| p != sheet)
            }
            None => None,
        };

        let text = notes::compose(selection);
        let anchor = self.settings.note_anchor;
        let note = match Self::insert_and_place(host, &drawing, &text, anchor) {
            Ok(note) => note,
            Err(err) => {
                if let Some(previous) = previous_sheet {
                    if let Err(restore) = host.activate_sheet(&drawing.id, &previous) {
                        warn!(sheet = %previous, error = %restore, "Failed to restore active sheet");
                    }
                }
                return Err(err);
            }
        };

        info!(drawing = %drawing.id, note, "Placed note");
        Ok(AnnotateReport {
            drawing,
            sheet: sheet.map(str::to_string),
            note,
            anchor,
            text,
        })
    }

    /// Insert and place a note on the active sheet. A note that was inserted but could not
    /// be placed is deleted again.
    fn insert_and_place(
        host: &mut H,
        drawing: &DocumentRef,
        text: &str,
        anchor: Anchor,
    ) -> Result<NoteId, CommandError> {
        let note = host
            .insert_note(&drawing.id, text)?
            .ok_or(CommandError::NoteNotInserted)?;

        let placed = host
            .place_note(&drawing.id, note, anchor)
            .and_then(|()| host.clear_selection(&drawing.id));
        if let Err(err) = placed {
            if let Err(cleanup) = host.delete_note(&drawing.id, note) {
                warn!(note, error = %cleanup, "Failed to remove partial note");
            }
            return Err(err.into());
        }
        Ok(note)
    }

    /// Save the active drawing as PDF, next to the drawing unless `output` is given.
    pub fn export_pdf(&self, output: Option<&Path>) -> Result<ExportReport, CommandError> {
        let mut host = self.lock()?;
        let host = &mut *host;
        let drawing = Self::require_active(host, DocumentKind::Drawing)?;
        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| export::default_pdf_path(&drawing.path));
        export::export_pdf(host, &drawing, &path, self.settings.pdf_all_sheets)
    }

    pub fn export_dxf(&self) -> Result<ExportReport, CommandError> {
        let host = self.lock()?;
        let drawing = Self::require_active(&host, DocumentKind::Drawing)?;
        export::export_dxf(&drawing)
    }
}
