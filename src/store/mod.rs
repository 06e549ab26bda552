//! Durable storage for board records
//!
//! A board writes its complete state through a [`BoardStore`] after every
//! successful mutation, keyed by the board identifier.

pub mod file;
pub mod memory;
pub mod record;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{BoardRecord, RECORD_VERSION};

use std::sync::Arc;
use crate::board::BoardId;
use crate::error::BoardResult;

/// Key-value persistence port for board records
pub trait BoardStore {
    /// Write the record under its board id, replacing any previous version
    fn save(&self, record: &BoardRecord) -> BoardResult<()>;

    /// Read a record back; a missing record is `BoardNotFound`
    fn load(&self, id: &BoardId) -> BoardResult<BoardRecord>;

    fn contains(&self, id: &BoardId) -> BoardResult<bool>;

    /// Delete the record; a missing record is `BoardNotFound`
    fn remove(&self, id: &BoardId) -> BoardResult<()>;

    /// Ids of every stored board, in no particular order
    fn list(&self) -> BoardResult<Vec<BoardId>>;
}

impl<S: BoardStore + ?Sized> BoardStore for Arc<S> {
    fn save(&self, record: &BoardRecord) -> BoardResult<()> {
        (**self).save(record)
    }

    fn load(&self, id: &BoardId) -> BoardResult<BoardRecord> {
        (**self).load(id)
    }

    fn contains(&self, id: &BoardId) -> BoardResult<bool> {
        (**self).contains(id)
    }

    fn remove(&self, id: &BoardId) -> BoardResult<()> {
        (**self).remove(id)
    }

    fn list(&self) -> BoardResult<Vec<BoardId>> {
        (**self).list()
    }
}

impl<S: BoardStore + ?Sized> BoardStore for &S {
    fn save(&self, record: &BoardRecord) -> BoardResult<()> {
        (**self).save(record)
    }

    fn load(&self, id: &BoardId) -> BoardResult<BoardRecord> {
        (**self).load(id)
    }

    fn contains(&self, id: &BoardId) -> BoardResult<bool> {
        (**self).contains(id)
    }

    fn remove(&self, id: &BoardId) -> BoardResult<()> {
        (**self).remove(id)
    }

    fn list(&self) -> BoardResult<Vec<BoardId>> {
        (**self).list()
    }
}
