//! Drawing Sheet Composition
//!
//! Composes one drawing document from an ordered list of configurations: one sheet per
//! configuration, three orthographic views per sheet, each view bound to its sheet's
//! configuration. The first sheet goes through the host's setup call, which fixes title
//! block, scale and zones for the whole document; later sheets are appended with the same
//! format and inherit that setup.

use crate::drawing::{sheet_name, MissingViewPolicy, SheetFormat, SheetSetup, ViewKind};
use crate::error::CommandError;
use crate::host::CadHost;
use crate::types::{DocumentRef, ViewId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// A view placed on a composed sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedView {
    pub kind: ViewKind,
    pub view: ViewId,
}

/// A composed sheet and the configuration its views reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedSheet {
    /// 1-based position in the document.
    pub number: usize,
    pub name: String,
    pub configuration: String,
    pub views: Vec<ComposedView>,
}

/// A view the host declined to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedView {
    pub sheet: String,
    pub kind: ViewKind,
}

/// Result of composing a drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDrawing {
    pub document: DocumentRef,
    pub sheets: Vec<ComposedSheet>,
    pub skipped_views: Vec<SkippedView>,
}

/// Compose a fresh drawing document for `configurations`, in order.
///
/// A host failure aborts composition. A view the host returns no handle for is handled by
/// `policy`: recorded and skipped, or turned into [`CommandError::ViewNotCreated`]. On any
/// failure the new drawing is closed again, so no partial document survives the run.
pub fn compose<H: CadHost + ?Sized>(
    host: &mut H,
    setup: &SheetSetup,
    configurations: &[String],
    source: &Path,
    policy: MissingViewPolicy,
) -> Result<ComposedDrawing, CommandError> {
    let format: &SheetFormat = &setup.format;
    let document = host.new_drawing(source, format)?;
    info!(
        drawing = %document.id,
        template = %format.template.display(),
        paper = %format.paper_size,
        sheets = configurations.len(),
        "Composing drawing"
    );

    match compose_sheets(host, &document, setup, configurations, source, policy) {
        Ok((sheets, skipped_views)) => Ok(ComposedDrawing {
            document,
            sheets,
            skipped_views,
        }),
        Err(err) => {
            if let Err(cleanup) = host.close_document(&document.id) {
                warn!(drawing = %document.id, error = %cleanup, "Failed to close partial drawing");
            }
            Err(err)
        }
    }
}

fn compose_sheets<H: CadHost + ?Sized>(
    host: &mut H,
    document: &DocumentRef,
    setup: &SheetSetup,
    configurations: &[String],
    source: &Path,
    policy: MissingViewPolicy,
) -> Result<(Vec<ComposedSheet>, Vec<SkippedView>), CommandError> {
    let format = &setup.format;
    let mut sheets = Vec::with_capacity(configurations.len());
    let mut skipped_views = Vec::new();

    for (offset, configuration) in configurations.iter().enumerate() {
        let number = offset + 1;
        let name = sheet_name(number);
        if number == 1 {
            host.setup_first_sheet(&document.id, &name, setup)?;
        } else {
            host.new_sheet(&document.id, &name, format)?;
            host.force_rebuild(&document.id)?;
        }

        let mut views = Vec::with_capacity(ViewKind::ALL.len());
        for kind in ViewKind::ALL {
            let created =
                host.create_standard_view(&document.id, source, kind.projection_name(), kind.anchor())?;
            match created {
                Some(view) => {
                    host.set_view_configuration(&document.id, view, configuration)?;
                    views.push(ComposedView { kind, view });
                }
                None => match policy {
                    MissingViewPolicy::Skip => {
                        warn!(sheet = %name, view = %kind, "View not created; skipping");
                        skipped_views.push(SkippedView {
                            sheet: name.clone(),
                            kind,
                        });
                    }
                    MissingViewPolicy::Abort => {
                        return Err(CommandError::ViewNotCreated {
                            sheet: name,
                            view: kind.to_string(),
                        });
                    }
                },
            }
        }

        debug!(sheet = %name, configuration = %configuration, views = views.len(), "Composed sheet");
        sheets.push(ComposedSheet {
            number,
            name,
            configuration: configuration.clone(),
            views,
        });
    }

    Ok((sheets, skipped_views))
}
