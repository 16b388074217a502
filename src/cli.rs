//! CLI domain: parse, route, help, output, and presentation only.
//! No pipeline logic; a single route table dispatches to the orchestrator.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, mutates_session};
pub use output::map_error;
pub use parse::{AnnotateArgs, Cli, Commands, ExportCommands, PartCommands};
pub use presentation::{
    format_annotate_report, format_export_report, format_generate_report, format_import_result,
    format_note_preview, format_open_result, format_section_heading, format_session_status,
    session_status, DocumentStatus, SessionStatus,
};
pub use route::RunContext;
