//! Durable mapping from date keys to entries.

use thiserror::Error;
use wh_core::EntryCollection;

use crate::{DbError, KeyValueStore};

/// Key under which the whole entry collection is stored.
pub const STORAGE_KEY: &str = "storedData";

/// The stored collection could not be read back.
///
/// [`EntryStore::load`] recovers from this by starting with an empty
/// collection; [`EntryStore::try_load`] reports it.
#[derive(Debug, Error)]
pub enum StorageReadCorrupt {
    #[error("failed to read stored entries: {0}")]
    Read(#[from] DbError),
    #[error("stored entries are malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Saving the collection failed; the stored data is unchanged.
#[derive(Debug, Error)]
pub enum StorageWriteFailed {
    #[error("failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write entries: {0}")]
    Write(#[from] DbError),
}

/// Loads and persists an [`EntryCollection`] through a [`KeyValueStore`].
#[derive(Debug)]
pub struct EntryStore<S> {
    store: S,
}

impl<S: KeyValueStore> EntryStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the stored collection, reporting corruption.
    ///
    /// A store with nothing saved yet yields an empty collection.
    pub fn try_load(&self) -> Result<EntryCollection, StorageReadCorrupt> {
        match self.store.get(STORAGE_KEY)? {
            Some(raw) => Ok(EntryCollection::from_json(&raw)?),
            None => Ok(EntryCollection::new()),
        }
    }

    /// Reads the stored collection, substituting an empty one for corrupt data.
    pub fn load(&self) -> EntryCollection {
        match self.try_load() {
            Ok(collection) => {
                tracing::debug!(entries = collection.len(), "loaded entries");
                collection
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable stored entries");
                EntryCollection::new()
            }
        }
    }

    /// Writes the full collection, replacing whatever was stored before.
    pub fn persist(&mut self, collection: &EntryCollection) -> Result<(), StorageWriteFailed> {
        let json = collection.to_json()?;
        self.store.set(STORAGE_KEY, &json)?;
        tracing::debug!(entries = collection.len(), bytes = json.len(), "persisted entries");
        Ok(())
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
