//! Govtally Store
//!
//! Key-addressed record persistence for the indexer: the [`RecordStore`]
//! contract, typed load/save on top of it, and two backends — in-memory for
//! tests and embedding, SQLite for durable indexing.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use govtally_core::records::StoredRecord;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("record codec error: {0}")]
    Codec(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Key-addressed persistence for typed records.
///
/// Records are namespaced by kind and addressed by key within the kind.
/// `put` is an upsert: writing an existing (kind, key) replaces the body.
pub trait RecordStore {
    /// Load the raw body stored under (kind, key), if any.
    fn get(&self, kind: &str, key: &str) -> Result<Option<Vec<u8>>>;

    /// Insert or replace the body stored under (kind, key).
    fn put(&mut self, kind: &str, key: &str, body: &[u8]) -> Result<()>;

    /// Whether a record exists under (kind, key).
    fn contains(&self, kind: &str, key: &str) -> Result<bool> {
        Ok(self.get(kind, key)?.is_some())
    }
}

/// Typed load/save for any [`StoredRecord`], JSON-encoded at the boundary.
pub trait RecordStoreExt: RecordStore {
    fn load<R>(&self, key: &str) -> Result<Option<R>>
    where
        R: StoredRecord + DeserializeOwned,
    {
        match self.get(R::KIND, key)? {
            Some(body) => {
                let record = serde_json::from_slice(&body)
                    .map_err(|e| StoreError::Codec(e.to_string()))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn save<R>(&mut self, record: &R) -> Result<()>
    where
        R: StoredRecord + Serialize,
    {
        let body =
            serde_json::to_vec(record).map_err(|e| StoreError::Codec(e.to_string()))?;
        self.put(R::KIND, &record.key(), &body)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
