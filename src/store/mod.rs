//! Session Store
//!
//! Persists the host's open documents between CLI invocations, so configurations created
//! by one run are still there for the next and every generated drawing stays addressable.

pub mod persistence;

pub use persistence::SledSessionStore;

use crate::error::StorageError;
use crate::host::{Document, HostMeta, MemoryHost};
use crate::types::DocumentId;

/// Session store interface
pub trait SessionStore {
    fn put(&self, document: &Document) -> Result<(), StorageError>;
    fn remove(&self, id: &DocumentId) -> Result<bool, StorageError>;

    /// All stored documents, ordered by identity.
    fn list(&self) -> Result<Vec<Document>, StorageError>;

    fn meta(&self) -> Result<HostMeta, StorageError>;
    fn put_meta(&self, meta: &HostMeta) -> Result<(), StorageError>;

    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Rebuild the in-memory host from everything in the store.
pub fn load_host(store: &dyn SessionStore) -> Result<MemoryHost, StorageError> {
    let documents = store.list()?;
    let mut meta = store.meta()?;
    if let Some(active) = &meta.active {
        if !documents.iter().any(|d| d.id() == active) {
            tracing::warn!(document = %active, "Active document missing from session");
            meta.active = None;
        }
    }
    Ok(MemoryHost::restore(documents, meta))
}

/// Write every document of `host` and its session metadata back to the store. Stored
/// documents the host no longer has open are removed.
pub fn save_host(store: &dyn SessionStore, host: &MemoryHost) -> Result<(), StorageError> {
    for stored in store.list()? {
        if host.document(stored.id()).is_none() {
            store.remove(stored.id())?;
        }
    }
    for document in host.documents() {
        store.put(document)?;
    }
    store.put_meta(host.meta())?;
    store.flush()
}
