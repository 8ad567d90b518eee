//! In-memory record store for tests and embedding.

use std::collections::HashMap;

use crate::{RecordStore, Result};

/// `HashMap`-backed [`RecordStore`]. Not durable; contents drop with the
/// process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<(String, String), Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all kinds.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records stored under one kind.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.records.keys().filter(|(k, _)| k == kind).count()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, kind: &str, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .records
            .get(&(kind.to_string(), key.to_string()))
            .cloned())
    }

    fn put(&mut self, kind: &str, key: &str, body: &[u8]) -> Result<()> {
        self.records
            .insert((kind.to_string(), key.to_string()), body.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("kind", "key").unwrap(), None);
        assert!(!store.contains("kind", "key").unwrap());
    }

    #[test]
    fn test_put_then_get() {
        let mut store = MemoryStore::new();
        store.put("kind", "key", b"body").unwrap();
        assert_eq!(store.get("kind", "key").unwrap(), Some(b"body".to_vec()));
        assert!(store.contains("kind", "key").unwrap());
    }

    #[test]
    fn test_put_is_upsert() {
        let mut store = MemoryStore::new();
        store.put("kind", "key", b"one").unwrap();
        store.put("kind", "key", b"two").unwrap();
        assert_eq!(store.get("kind", "key").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_kinds_are_disjoint_namespaces() {
        let mut store = MemoryStore::new();
        store.put("a", "key", b"one").unwrap();
        store.put("b", "key", b"two").unwrap();
        assert_eq!(store.get("a", "key").unwrap(), Some(b"one".to_vec()));
        assert_eq!(store.get("b", "key").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.count_kind("a"), 1);
        assert_eq!(store.count_kind("b"), 1);
    }
}
