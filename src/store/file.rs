//! File-backed board store, one JSON document per board

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::board::BoardId;
use crate::config::StorageConfig;
use crate::error::{BoardError, BoardResult};
use super::{BoardRecord, BoardStore};

/// Stores each board as `<dir>/<board id>.<extension>`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    extension: String,
}

impl FileStore {
    /// Store rooted at `dir` using the default `board` extension
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self::with_extension(dir, StorageConfig::default().extension)
    }

    pub fn with_extension<P: AsRef<Path>>(dir: P, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extension: extension.into(),
        }
    }

    /// Build a store from configuration, creating the data directory if needed
    pub fn from_config(config: &StorageConfig) -> BoardResult<Self> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self::with_extension(&config.data_dir, config.extension.clone()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the record for `id`
    pub fn path_for(&self, id: &BoardId) -> PathBuf {
        self.dir.join(format!("{}.{}", id, self.extension))
    }

    fn temp_path_for(&self, id: &BoardId) -> PathBuf {
        self.dir.join(format!(".{}.{}.tmp", id, self.extension))
    }
}

impl BoardStore for FileStore {
    fn save(&self, record: &BoardRecord) -> BoardResult<()> {
        let json = record.to_json()?;
        let path = self.path_for(&record.id);
        let temp = self.temp_path_for(&record.id);

        // Write-then-rename so readers never observe a partial record
        fs::write(&temp, json)?;
        if let Err(e) = fs::rename(&temp, &path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        debug!(board_id = %record.id, path = %path.display(), "Saved board record");
        Ok(())
    }

    fn load(&self, id: &BoardId) -> BoardResult<BoardRecord> {
        let path = self.path_for(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(BoardError::BoardNotFound(*id)),
            Err(e) => return Err(e.into()),
        };

        let record = BoardRecord::from_json(&json)?;
        if record.id != *id {
            return Err(BoardError::Serialization {
                message: format!("record at {} belongs to board {}", path.display(), record.id),
            });
        }

        debug!(board_id = %id, path = %path.display(), "Loaded board record");
        Ok(record)
    }

    fn contains(&self, id: &BoardId) -> BoardResult<bool> {
        Ok(self.path_for(id).try_exists()?)
    }

    fn remove(&self, id: &BoardId) -> BoardResult<()> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BoardError::BoardNotFound(*id)),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> BoardResult<Vec<BoardId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<BoardId>().ok())
            {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
