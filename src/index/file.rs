//! Durable index backed by a [`Storage`] collaborator.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::{NbayesError, Result};
use crate::index::index::{Index, IndexSnapshot};
use crate::index::memory::MemoryIndex;
use crate::storage::{FileStorage, Storage, StorageConfig};

/// Version written into every saved index.
pub const FORMAT_VERSION: u32 = 1;

/// What a durable index writes to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedIndex {
    version: u32,
    /// Seconds since the Unix epoch at save time.
    modified: u64,
    model: IndexSnapshot,
}

/// An index whose model can be loaded from and saved to storage.
///
/// The in-memory model is authoritative during a session; storage is only
/// touched by [`open`](FileIndex::open) and [`save`](FileIndex::save).
#[derive(Debug)]
pub struct FileIndex<S: Storage = FileStorage> {
    storage: S,
    name: String,
    index: MemoryIndex,
    dirty: AtomicBool,
}

impl FileIndex<FileStorage> {
    /// Open (or start) an index stored at `path`.
    ///
    /// The parent directory is created if needed; a missing file yields an
    /// empty index.
    pub fn at_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                NbayesError::invalid_argument(format!("not a file path: {}", path.display()))
            })?
            .to_string();
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let storage = FileStorage::new(directory, StorageConfig::default())?;
        Self::open_in(storage, name)
    }
}

impl<S: Storage> FileIndex<S> {
    /// Create an empty index bound to `name` in `storage` without loading anything.
    pub fn new<N: Into<String>>(storage: S, name: N) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(NbayesError::invalid_argument("index file name must not be empty"));
        }

        Ok(FileIndex {
            storage,
            name,
            index: MemoryIndex::new(),
            dirty: AtomicBool::new(false),
        })
    }

    /// Create the index and immediately [`open`](Self::open) it.
    pub fn open_in<N: Into<String>>(storage: S, name: N) -> Result<Self> {
        let index = Self::new(storage, name)?;
        index.open()?;
        Ok(index)
    }

    /// Load the persisted model, replacing the in-memory one.
    ///
    /// Does nothing if nothing has been saved yet.
    pub fn open(&self) -> Result<()> {
        if !self.storage.file_exists(&self.name) {
            debug!("No saved index at {}, starting empty", self.name);
            return Ok(());
        }

        let data = self.storage.read_file(&self.name)?;
        let persisted: PersistedIndex = serde_json::from_slice(&data)?;
        if persisted.version != FORMAT_VERSION {
            return Err(NbayesError::index(format!(
                "unsupported index format version {} in {} (expected {})",
                persisted.version, self.name, FORMAT_VERSION
            )));
        }

        info!(
            "Opened index {} ({} documents, {} distinct tokens)",
            self.name,
            persisted.model.document_count(),
            persisted.model.vocabulary_size()
        );
        self.index.replace(persisted.model);
        self.dirty.store(false, Ordering::Release);
        Ok(())
    }

    /// Persist the current model, atomically replacing any previous save.
    ///
    /// Entries added while the write is in flight keep the index marked
    /// as having unsaved changes.
    pub fn save(&self) -> Result<()> {
        // Cleared before the snapshot so a concurrent add re-marks it.
        let was_dirty = self.dirty.swap(false, Ordering::AcqRel);
        let model = self.index.snapshot();
        let document_count = model.document_count();
        let persisted = PersistedIndex {
            version: FORMAT_VERSION,
            modified: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            model,
        };

        let written = serde_json::to_vec(&persisted)
            .map_err(NbayesError::from)
            .and_then(|data| self.storage.write_file(&self.name, &data).map(|_| data));
        let data = match written {
            Ok(data) => data,
            Err(e) => {
                if was_dirty {
                    self.dirty.store(true, Ordering::Release);
                }
                return Err(e);
            }
        };

        info!(
            "Saved index {} ({} documents, {} bytes)",
            self.name,
            document_count,
            data.len()
        );
        Ok(())
    }

    /// Whether entries were added since the last open or save.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// The file name inside the storage.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: Storage> Index for FileIndex<S> {
    fn add(&self, entry: &Entry) -> Result<()> {
        self.index.add(entry)?;
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    fn add_all(&self, entries: &[Entry]) -> Result<()> {
        self.index.add_all(entries)?;
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    fn token_frequency(&self, token: &str) -> u64 {
        self.index.token_frequency(token)
    }

    fn document_count(&self) -> u64 {
        self.index.document_count()
    }

    fn total_token_count(&self) -> u64 {
        self.index.total_token_count()
    }

    fn vocabulary_size(&self) -> usize {
        self.index.vocabulary_size()
    }

    fn visit_tokens(&self, visitor: &mut dyn FnMut(&str, u64)) {
        self.index.visit_tokens(visitor)
    }

    fn snapshot(&self) -> IndexSnapshot {
        self.index.snapshot()
    }
}
