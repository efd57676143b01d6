//! File-backed record store: one JSON document per collection

use super::{Collection, RecordStore};
use crate::{Result, storage_error};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each collection as `<data_dir>/<collection file name>`
///
/// Writes go to a `.tmp` sibling first and are renamed into place, so a
/// reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| {
            storage_error!("Cannot create data directory {}: {}", data_dir.display(), e)
        })?;

        tracing::info!("📁 File store opened at {}", data_dir.display());
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }
}

impl RecordStore for FileStore {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        let path = self.path_for(collection);
        match fs::read_to_string(&path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            // Non-UTF-8 content is corruption, not an I/O failure
            Err(e) if e.kind() == ErrorKind::InvalidData => Ok(Some(String::new())),
            Err(e) => Err(storage_error!("Cannot read {}: {}", path.display(), e)),
        }
    }

    fn write(&self, collection: Collection, document: &str) -> Result<()> {
        let path = self.path_for(collection);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, document)
            .map_err(|e| storage_error!("Cannot write {}: {}", tmp_path.display(), e))?;
        fs::rename(&tmp_path, &path)
            .map_err(|e| storage_error!("Cannot replace {}: {}", path.display(), e))?;

        Ok(())
    }
}
