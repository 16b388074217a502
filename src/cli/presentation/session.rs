//! Session presentation: import, open, status and export.

use super::shared::{format_section_heading, table, to_json};
use crate::export::ExportReport;
use crate::host::{Document, MemoryHost};
use crate::types::{DocumentKind, DocumentRef};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

/// One row of `weldsheet status`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStatus {
    pub id: String,
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub active: bool,
    /// Part: configurations. Drawing: sheets.
    pub children: Vec<String>,
    pub views: usize,
    pub notes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub documents: Vec<DocumentStatus>,
}

pub fn session_status(host: &MemoryHost) -> SessionStatus {
    let active = host.meta().active.as_ref();
    let documents = host
        .documents()
        .map(|doc| {
            let (children, views, notes) = match doc {
                Document::Part(part) => (
                    part.configurations.iter().map(|c| c.name.clone()).collect(),
                    0,
                    0,
                ),
                Document::Drawing(drawing) => (
                    drawing.sheets.iter().map(|s| s.name.clone()).collect(),
                    drawing.sheets.iter().map(|s| s.views.len()).sum(),
                    drawing.sheets.iter().map(|s| s.notes.len()).sum(),
                ),
            };
            DocumentStatus {
                id: doc.id().to_string(),
                kind: doc.kind(),
                path: doc.path().to_path_buf(),
                active: Some(doc.id()) == active,
                children,
                views,
                notes,
            }
        })
        .collect();
    SessionStatus { documents }
}

pub fn format_session_status(status: &SessionStatus, format: &str) -> String {
    if format == "json" {
        return to_json(status);
    }
    if status.documents.is_empty() {
        return "No documents in session.\n\nUse 'weldsheet part import <file>' to load a part."
            .to_string();
    }
    let mut out = format!("{}\n", format_section_heading("Session"));
    let mut rows = table(vec!["", "Id", "Kind", "Path", "Contents"]);
    for doc in &status.documents {
        let marker = if doc.active { "*" } else { "" };
        let contents = match doc.kind {
            DocumentKind::Part => format!("{} configuration(s)", doc.children.len()),
            DocumentKind::Drawing => format!(
                "{} sheet(s), {} view(s), {} note(s)",
                doc.children.len(),
                doc.views,
                doc.notes
            ),
        };
        rows.add_row(vec![
            marker.to_string(),
            doc.id.clone(),
            doc.kind.to_string(),
            doc.path.display().to_string(),
            contents,
        ]);
    }
    out.push_str(&rows.to_string());
    out
}

pub fn format_import_result(part: &DocumentRef, bodies: usize, cutlists: usize) -> String {
    format!(
        "{} {} ({} bodies, {} cutlist item(s))\nDocument id: {}",
        "Imported".green(),
        part.path.display(),
        bodies,
        cutlists,
        part.id
    )
}

pub fn format_open_result(document: &DocumentRef) -> String {
    format!(
        "Active {}: {} ({})",
        document.kind,
        document.path.display(),
        document.id
    )
}

pub fn format_export_report(report: &ExportReport) -> String {
    let mut out = format!("{} {}", "Exported".green(), report.path.display());
    if report.warnings > 0 {
        out.push_str(&format!(
            "\n{} {} warning(s) reported by the host",
            "warning:".yellow(),
            report.warnings
        ));
    }
    out
}
