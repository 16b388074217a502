//! Error types for weldment drawing generation.

use crate::types::{DocumentId, DocumentKind};
use thiserror::Error;

/// Failures reported by the host document model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    #[error("Host call {call} failed: {reason}")]
    CallFailed { call: String, reason: String },

    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("Document {id} is a {found}, expected a {expected}")]
    DocumentKindMismatch {
        id: DocumentId,
        expected: DocumentKind,
        found: DocumentKind,
    },

    #[error("Body not found: {0}")]
    BodyNotFound(String),

    #[error("Configuration not found: {0}")]
    ConfigurationNotFound(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("View not found: {0}")]
    ViewNotFound(u64),

    #[error("Note not found: {0}")]
    NoteNotFound(u64),

    #[error("Nothing is selected")]
    NothingSelected,
}

/// Session store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found in session: {0}")]
    DocumentNotFound(DocumentId),

    #[error("Corrupt session record {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("sled: {}", err),
        ))
    }
}

/// Command-level errors surfaced to the user.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No document is active.")]
    NoActiveDocument,

    #[error("Active document is not a {expected} (found a {found}).")]
    WrongDocumentType {
        expected: DocumentKind,
        found: DocumentKind,
    },

    #[error("No valid cutlists found: every cutlist item is empty.")]
    NoValidCutlists,

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("View {view} could not be created on {sheet}.")]
    ViewNotCreated { sheet: String, view: String },

    #[error("Note could not be inserted into the active sheet.")]
    NoteNotInserted,

    #[error("Save failed with {errors} error(s) and {warnings} warning(s).")]
    OutputFailed { errors: u32, warnings: u32 },

    #[error("{0} is not supported.")]
    Unsupported(String),

    #[error("Another command is already running against this document.")]
    Busy,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<config::ConfigError> for CommandError {
    fn from(err: config::ConfigError) -> Self {
        CommandError::ConfigError(err.to_string())
    }
}
