//! Record store for the three election collections
//!
//! A [`RecordStore`] only moves raw documents in and out of durable storage.
//! The typed, lenient load/save policy lives in [`RecordStoreExt`] so every
//! backend gets identical semantics:
//!
//! 1. A never-written collection loads as the supplied default, which is
//!    persisted on the spot (first read creates).
//! 2. A document that fails to parse loads as the default and is left
//!    untouched on disk.
//! 3. Any other I/O failure is a [`crate::Error::Storage`].

pub mod file;
pub mod memory;

use crate::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt;

pub use file::FileStore;
pub use memory::MemoryStore;

/// The named collections persisted by the election service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Candidates,
    VotingHistory,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Candidates,
        Collection::VotingHistory,
        Collection::Settings,
    ];

    /// File name used by file-backed stores
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Candidates => "candidates.json",
            Collection::VotingHistory => "voted_students.json",
            Collection::Settings => "settings.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Candidates => "candidates",
            Collection::VotingHistory => "voting-history",
            Collection::Settings => "settings",
        };
        f.write_str(name)
    }
}

/// Raw document storage
pub trait RecordStore: Send + Sync {
    /// Read a collection's document, `None` if it was never written
    fn read(&self, collection: Collection) -> Result<Option<String>>;

    /// Replace a collection's document
    fn write(&self, collection: Collection, document: &str) -> Result<()>;
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        (**self).read(collection)
    }

    fn write(&self, collection: Collection, document: &str) -> Result<()> {
        (**self).write(collection, document)
    }
}

/// Typed load/save on top of any [`RecordStore`]
pub trait RecordStoreExt: RecordStore {
    /// Load a collection, falling back to `default` when missing or corrupted
    fn load<T>(&self, collection: Collection, default: T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let Some(document) = self.read(collection)? else {
            tracing::debug!("Initializing {} with default document", collection);
            self.save(collection, &default)?;
            return Ok(default);
        };

        match serde_json::from_str(&document) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(
                    "Unreadable {} document ({}), using default instead",
                    collection,
                    e
                );
                Ok(default)
            }
        }
    }

    /// Serialize and persist a collection
    fn save<T>(&self, collection: Collection, data: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let document = to_document(data)?;
        self.write(collection, &document)?;
        tracing::debug!("Saved {} ({} bytes)", collection, document.len());
        Ok(())
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}

/// Pretty-print a document with four-space indentation
fn to_document<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
