//! The word-frequency model shared by every index variant.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::Result;

/// An accumulating token-frequency model trained from entries.
///
/// Counts only ever grow: every [`add`](Index::add) increments the
/// document counter by one and each token's count by its occurrences in
/// the entry. Implementations serialize concurrent `add` calls so no
/// update is lost.
///
/// The scoring code in [`Analyzer`](crate::classification::Analyzer)
/// depends only on this trait, never on the storage variant behind it.
pub trait Index: Send + Sync + std::fmt::Debug {
    /// Train the model with one entry. Empty entries still count as a document.
    fn add(&self, entry: &Entry) -> Result<()>;

    /// Train the model with a batch of entries.
    fn add_all(&self, entries: &[Entry]) -> Result<()> {
        for entry in entries {
            self.add(entry)?;
        }
        Ok(())
    }

    /// Occurrences of `token` across all training documents; 0 if unseen.
    fn token_frequency(&self, token: &str) -> u64;

    /// Number of documents added.
    fn document_count(&self) -> u64;

    /// Sum of all token occurrences.
    fn total_token_count(&self) -> u64;

    /// Number of distinct tokens seen.
    fn vocabulary_size(&self) -> usize;

    /// Whether `token` has been seen at least once.
    fn contains(&self, token: &str) -> bool {
        self.token_frequency(token) > 0
    }

    /// Call `visitor` once per distinct token with its frequency.
    ///
    /// Visiting order is unspecified.
    fn visit_tokens(&self, visitor: &mut dyn FnMut(&str, u64));

    /// A point-in-time copy of the model.
    fn snapshot(&self) -> IndexSnapshot;

    /// Summary counters.
    fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.document_count(),
            token_count: self.total_token_count(),
            vocabulary_size: self.vocabulary_size(),
        }
    }
}

/// Summary counters of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Documents added.
    pub document_count: u64,
    /// Total token occurrences.
    pub token_count: u64,
    /// Distinct tokens.
    pub vocabulary_size: usize,
}

/// The plain data behind an index: counters plus per-token frequencies.
///
/// This is also the unit of persistence for durable indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    document_count: u64,
    token_count: u64,
    frequencies: AHashMap<String, u64>,
}

impl IndexSnapshot {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one training document.
    pub fn add(&mut self, entry: &Entry) {
        for (token, count) in entry.term_frequencies() {
            match self.frequencies.get_mut(token) {
                Some(existing) => *existing += count,
                None => {
                    self.frequencies.insert(token.to_string(), count);
                }
            }
        }
        self.token_count += entry.len() as u64;
        self.document_count += 1;
    }

    /// Fold another model's counts into this one.
    pub fn merge(&mut self, other: &IndexSnapshot) {
        for (token, count) in &other.frequencies {
            *self.frequencies.entry(token.clone()).or_insert(0) += count;
        }
        self.token_count += other.token_count;
        self.document_count += other.document_count;
    }

    /// Occurrences of `token`; 0 if unseen.
    pub fn token_frequency(&self, token: &str) -> u64 {
        self.frequencies.get(token).copied().unwrap_or(0)
    }

    /// Number of documents added.
    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    /// Sum of all token occurrences.
    pub fn total_token_count(&self) -> u64 {
        self.token_count
    }

    /// Number of distinct tokens.
    pub fn vocabulary_size(&self) -> usize {
        self.frequencies.len()
    }

    /// Iterate over `(token, frequency)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.frequencies.iter().map(|(token, &count)| (token.as_str(), count))
    }
}
