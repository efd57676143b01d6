//! In-process record store

use super::{Collection, RecordStore};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Keeps documents in memory; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Collection, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collections written so far
    pub fn len(&self) -> Result<usize> {
        let documents = self
            .documents
            .read()
            .map_err(|_| Error::internal("Memory store read error"))?;
        Ok(documents.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| Error::internal("Memory store read error"))?;
        Ok(documents.get(&collection).cloned())
    }

    fn write(&self, collection: Collection, document: &str) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| Error::internal("Memory store write error"))?;
        documents.insert(collection, document.to_string());
        Ok(())
    }
}
