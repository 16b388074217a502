//! CLI presentation: text and json formatters per command family.

mod annotate;
mod generate;
mod session;
mod shared;

pub use annotate::{format_annotate_report, format_note_preview};
pub use generate::format_generate_report;
pub use session::{
    format_export_report, format_import_result, format_open_result, format_session_status,
    session_status, DocumentStatus, SessionStatus,
};
pub use shared::format_section_heading;
