//! SQLite-backed record store.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::{RecordStore, Result, StoreError};

/// Durable [`RecordStore`] on a single SQLite table.
pub struct SqliteStore {
    db: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Connection::open(path.as_ref()).map_err(backend)?;
        Self::init(db)
    }

    /// Open a private in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().map_err(backend)?;
        Self::init(db)
    }

    fn init(db: Connection) -> Result<Self> {
        db.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                kind TEXT NOT NULL,
                key TEXT NOT NULL,
                body BLOB NOT NULL,
                PRIMARY KEY (kind, key)
            );",
        )
        .map_err(backend)?;
        debug!("record store ready");
        Ok(Self { db })
    }
}

impl RecordStore for SqliteStore {
    fn get(&self, kind: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.db
            .query_row(
                "SELECT body FROM records WHERE kind = ?1 AND key = ?2",
                params![kind, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)
    }

    fn put(&mut self, kind: &str, key: &str, body: &[u8]) -> Result<()> {
        self.db
            .execute(
                "INSERT OR REPLACE INTO records (kind, key, body) VALUES (?1, ?2, ?3)",
                params![kind, key, body],
            )
            .map_err(backend)?;
        Ok(())
    }

    fn contains(&self, kind: &str, key: &str) -> Result<bool> {
        self.db
            .query_row(
                "SELECT 1 FROM records WHERE kind = ?1 AND key = ?2",
                params![kind, key],
                |_| Ok(()),
            )
            .optional()
            .map_err(backend)
            .map(|row| row.is_some())
    }
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};
    use govtally_core::records::{StoredRecord, VoterDetail};

    use super::*;
    use crate::RecordStoreExt;

    #[test]
    fn test_get_missing_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("kind", "key").unwrap(), None);
        assert!(!store.contains("kind", "key").unwrap());
    }

    #[test]
    fn test_put_is_upsert() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.put("kind", "key", b"one").unwrap();
        store.put("kind", "key", b"two").unwrap();
        assert_eq!(store.get("kind", "key").unwrap(), Some(b"two".to_vec()));
    }

    #[test]
    fn test_typed_roundtrip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let detail = VoterDetail {
            voter: Address::repeat_byte(0xaa),
            proposal_id: U256::from(1u64),
            voting_power: U256::from(100u64),
            support: 1,
            timestamp: 1000,
        };
        store.save(&detail).unwrap();
        let loaded: VoterDetail = store.load(&detail.key()).unwrap().unwrap();
        assert_eq!(loaded, detail);
    }

    #[test]
    fn test_persists_across_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("records.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.put("kind", "key", b"body").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("kind", "key").unwrap(), Some(b"body".to_vec()));
    }
}
