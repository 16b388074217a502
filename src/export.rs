//! Drawing export: PDF through the host's save-as, DXF not available.

use crate::error::CommandError;
use crate::host::{CadHost, SaveOptions};
use crate::types::DocumentRef;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub warnings: u32,
}

/// Default PDF path: the drawing's path with a `.pdf` extension.
pub fn default_pdf_path(drawing: &Path) -> PathBuf {
    drawing.with_extension("pdf")
}

/// Save `drawing` as PDF.
///
/// Save status, error count and warning count are folded into one result: any error or a
/// false status is [`CommandError::OutputFailed`]; warnings alone still succeed.
pub fn export_pdf<H: CadHost + ?Sized>(
    host: &mut H,
    drawing: &DocumentRef,
    output: &Path,
    all_sheets: bool,
) -> Result<ExportReport, CommandError> {
    let options = SaveOptions {
        all_sheets,
        ..SaveOptions::default()
    };
    let outcome = host.save_as(&drawing.id, output, &options)?;
    if !outcome.success || outcome.errors > 0 {
        warn!(
            drawing = %drawing.id,
            errors = outcome.errors,
            warnings = outcome.warnings,
            "PDF export failed"
        );
        return Err(CommandError::OutputFailed {
            errors: outcome.errors,
            warnings: outcome.warnings,
        });
    }
    info!(drawing = %drawing.id, path = %outcome.path.display(), "Exported PDF");
    Ok(ExportReport {
        path: outcome.path,
        warnings: outcome.warnings,
    })
}

/// DXF export has no implementation.
pub fn export_dxf(_drawing: &DocumentRef) -> Result<ExportReport, CommandError> {
    Err(CommandError::Unsupported("DXF export".to_string()))
}
