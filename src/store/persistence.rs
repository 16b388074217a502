//! Persistence layer for the session store

use crate::error::StorageError;
use crate::host::{Document, HostMeta};
use crate::store::SessionStore;
use crate::types::DocumentId;
use std::path::Path;

const DOCUMENTS_TREE: &str = "documents";
const META_KEY: &[u8] = b"meta";

/// Sled-based implementation of SessionStore
pub struct SledSessionStore {
    db: sled::Db,
    documents: sled::Tree,
}

impl SledSessionStore {
    /// Open (or create) a session store at the given directory.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let documents = db.open_tree(DOCUMENTS_TREE)?;
        Ok(Self { db, documents })
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: &[u8], value: &[u8]) -> Result<T, StorageError> {
    bincode::deserialize(value).map_err(|e| StorageError::Corrupt {
        key: String::from_utf8_lossy(key).into_owned(),
        reason: e.to_string(),
    })
}

fn encode<T: serde::Serialize>(key: &str, value: &T) -> Result<Vec<u8>, StorageError> {
    bincode::serialize(value).map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

impl SessionStore for SledSessionStore {
    fn put(&self, document: &Document) -> Result<(), StorageError> {
        let key = document.id().as_str();
        let value = encode(key, document)?;
        self.documents.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn remove(&self, id: &DocumentId) -> Result<bool, StorageError> {
        Ok(self.documents.remove(id.as_str().as_bytes())?.is_some())
    }

    fn list(&self) -> Result<Vec<Document>, StorageError> {
        self.documents
            .iter()
            .map(|entry| {
                let (key, value) = entry?;
                decode(&key, &value)
            })
            .collect()
    }

    fn meta(&self) -> Result<HostMeta, StorageError> {
        match self.db.get(META_KEY)? {
            Some(value) => decode(META_KEY, &value),
            None => Ok(HostMeta::default()),
        }
    }

    fn put_meta(&self, meta: &HostMeta) -> Result<(), StorageError> {
        let value = encode("meta", meta)?;
        self.db.insert(META_KEY, value)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}
