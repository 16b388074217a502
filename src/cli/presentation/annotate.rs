//! Annotate command presentation.

use super::shared::to_json;
use crate::notes::NoteSelection;
use crate::orchestrator::AnnotateReport;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_annotate_report(report: &AnnotateReport, format: &str) -> String {
    if format == "json" {
        return to_json(report);
    }
    let target = report.sheet.as_deref().unwrap_or("active sheet");
    format!(
        "{} note {} on {} of {} at {}\n\n{}",
        "Placed".green(),
        report.note,
        target,
        report.drawing.path.display(),
        report.anchor,
        report.text
    )
}

/// Preview for `annotate --dry-run`.
pub fn format_note_preview(selection: &NoteSelection, text: &str, format: &str) -> String {
    if format == "json" {
        return to_json(&json!({ "selection": selection, "text": text }));
    }
    text.to_string()
}
