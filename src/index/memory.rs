//! In-memory index.

use log::debug;
use parking_lot::RwLock;

use crate::entry::Entry;
use crate::error::Result;
use crate::index::index::{Index, IndexSnapshot};

/// An index that lives only as long as the process.
///
/// Writers take an exclusive lock for the whole update of one entry, so
/// concurrent `add` calls never interleave their counter updates; readers
/// share the lock.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    model: RwLock<IndexSnapshot>,
}

impl MemoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index pre-populated from a snapshot.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Self {
        MemoryIndex {
            model: RwLock::new(snapshot),
        }
    }

    /// Replace the whole model.
    pub fn replace(&self, snapshot: IndexSnapshot) {
        *self.model.write() = snapshot;
    }

    /// Fold another model into this one.
    pub fn merge(&self, other: &IndexSnapshot) {
        self.model.write().merge(other);
    }
}

impl Index for MemoryIndex {
    fn add(&self, entry: &Entry) -> Result<()> {
        let mut model = self.model.write();
        model.add(entry);
        debug!(
            "Indexed entry with {} tokens ({} documents, {} distinct tokens)",
            entry.len(),
            model.document_count(),
            model.vocabulary_size()
        );
        Ok(())
    }

    fn add_all(&self, entries: &[Entry]) -> Result<()> {
        let mut model = self.model.write();
        for entry in entries {
            model.add(entry);
        }
        debug!(
            "Indexed batch of {} entries ({} documents total)",
            entries.len(),
            model.document_count()
        );
        Ok(())
    }

    fn token_frequency(&self, token: &str) -> u64 {
        self.model.read().token_frequency(token)
    }

    fn document_count(&self) -> u64 {
        self.model.read().document_count()
    }

    fn total_token_count(&self) -> u64 {
        self.model.read().total_token_count()
    }

    fn vocabulary_size(&self) -> usize {
        self.model.read().vocabulary_size()
    }

    fn visit_tokens(&self, visitor: &mut dyn FnMut(&str, u64)) {
        for (token, count) in self.model.read().iter() {
            visitor(token, count);
        }
    }

    fn snapshot(&self) -> IndexSnapshot {
        self.model.read().clone()
    }
}
