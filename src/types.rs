//! Core identifiers shared across the host boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Number of hash bytes kept in a document identity (16 hex digits).
const DOCUMENT_ID_LEN: usize = 8;

/// Identity of a host document (part or drawing).
///
/// Parts are keyed by their path so re-importing the same file addresses the same
/// document. Drawings mix in the host's drawing serial, so every generate run gets a
/// fresh identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn for_part(path: &Path) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"part\0");
        hasher.update(path.to_string_lossy().as_bytes());
        Self::from_hasher(hasher)
    }

    pub fn for_drawing(source: &Path, serial: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"drawing\0");
        hasher.update(source.to_string_lossy().as_bytes());
        hasher.update(&serial.to_le_bytes());
        Self::from_hasher(hasher)
    }

    fn from_hasher(hasher: blake3::Hasher) -> Self {
        let hash = hasher.finalize();
        DocumentId(hex::encode(&hash.as_bytes()[..DOCUMENT_ID_LEN]))
    }

    /// Parse a user-supplied identity (hex, case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        let bytes = hex::decode(&s).ok()?;
        if bytes.len() != DOCUMENT_ID_LEN {
            return None;
        }
        Some(DocumentId(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Part,
    Drawing,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Part => f.write_str("part"),
            DocumentKind::Drawing => f.write_str("drawing"),
        }
    }
}

/// Handle to the document the host currently has active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub path: std::path::PathBuf,
}

/// Host-side identity of a created drawing view.
pub type ViewId = u64;

/// Host-side identity of an inserted note.
pub type NoteId = u64;
