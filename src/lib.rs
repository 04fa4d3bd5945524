//! # nbayes
//!
//! Naive Bayes text categorization and adaptive option selection.
//!
//! ## Features
//!
//! - Deterministic tokenization into [`Entry`](entry::Entry) bags of words
//! - Word-frequency [`Index`](index::Index) models, in memory or durable
//! - Laplace-smoothed log-likelihood [`Analyzer`](classification::Analyzer)
//!   with an explicit "undetermined" outcome
//! - Epsilon-greedy [`Optimizer`](optimization::Optimizer) with a
//!   deterministic cold start
//! - [`BufferedIter`](util::BufferedIter) for replayable iteration

pub mod analysis;
pub mod classification;
pub mod config;
pub mod entry;
pub mod error;
pub mod index;
pub mod optimization;
pub mod storage;
pub mod util;

pub mod prelude {
    pub use crate::classification::{Analyzer, AnalyzerConfig, CategorizationResult};
    pub use crate::entry::Entry;
    pub use crate::error::{NbayesError, Result};
    pub use crate::index::{FileIndex, Index, MemoryIndex};
    pub use crate::optimization::{Optimizer, OptimizerConfig, Variant};
    pub use crate::util::BufferedIter;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
