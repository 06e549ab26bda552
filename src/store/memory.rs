//! In-memory board store

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use crate::board::BoardId;
use crate::error::{BoardError, BoardResult};
use super::{BoardRecord, BoardStore};

/// Keeps encoded records in a map, for tests and embedding.
///
/// Records go through the same JSON encoding as [`super::FileStore`], so a
/// record that loads here would load from disk as well.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<BoardId, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail with an I/O error until switched off
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw encoded record, as it would appear on disk
    pub fn raw(&self, id: &BoardId) -> Option<String> {
        self.records().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<BoardId, String>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BoardStore for MemoryStore {
    fn save(&self, record: &BoardRecord) -> BoardResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BoardError::Io(io::Error::new(
                io::ErrorKind::Other,
                "memory store is failing writes",
            )));
        }

        let json = record.to_json()?;
        self.records().insert(record.id, json);
        debug!(board_id = %record.id, "Saved board record in memory");
        Ok(())
    }

    fn load(&self, id: &BoardId) -> BoardResult<BoardRecord> {
        let json = self.raw(id).ok_or(BoardError::BoardNotFound(*id))?;
        let record = BoardRecord::from_json(&json)?;
        if record.id != *id {
            return Err(BoardError::Serialization {
                message: format!("record stored under {} belongs to board {}", id, record.id),
            });
        }
        Ok(record)
    }

    fn contains(&self, id: &BoardId) -> BoardResult<bool> {
        Ok(self.records().contains_key(id))
    }

    fn remove(&self, id: &BoardId) -> BoardResult<()> {
        self.records()
            .remove(id)
            .map(|_| ())
            .ok_or(BoardError::BoardNotFound(*id))
    }

    fn list(&self) -> BoardResult<Vec<BoardId>> {
        Ok(self.records().keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_save_load_remove() {
        let store = MemoryStore::new();
        let record = BoardRecord::new(BoardId::new());

        store.save(&record).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains(&record.id).unwrap());
        assert_eq!(store.load(&record.id).unwrap(), record);
        assert_eq!(store.list().unwrap(), vec![record.id]);

        store.remove(&record.id).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.load(&record.id).unwrap_err().kind(), ErrorKind::BoardNotFound);
    }

    #[test]
    fn test_failing_writes() {
        let store = MemoryStore::new();
        let record = BoardRecord::new(BoardId::new());

        store.fail_writes(true);
        assert_eq!(store.save(&record).unwrap_err().kind(), ErrorKind::Io);
        assert!(!store.contains(&record.id).unwrap());

        store.fail_writes(false);
        assert!(store.save(&record).is_ok());
    }

    #[test]
    fn test_raw_record_is_json() {
        let store = MemoryStore::new();
        let record = BoardRecord::new(BoardId::new());
        store.save(&record).unwrap();

        let raw = store.raw(&record.id).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["in_progress"], false);
    }

    #[test]
    fn test_record_under_wrong_key_is_rejected() {
        let store = MemoryStore::new();
        let record = BoardRecord::new(BoardId::new());
        let other = BoardId::new();
        store.records().insert(other, record.to_json().unwrap());

        assert_eq!(store.load(&other).unwrap_err().kind(), ErrorKind::Serialization);
    }
}
