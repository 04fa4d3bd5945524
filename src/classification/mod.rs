//! Naive Bayes categorization of entries against trained indexes.
//!
//! # Examples
//!
//! ```
//! use nbayes::classification::{Analyzer, CategorizationResult};
//! use nbayes::entry::Entry;
//! use nbayes::index::{Index, MemoryIndex};
//!
//! let positive = MemoryIndex::new();
//! let negative = MemoryIndex::new();
//! positive.add(&Entry::from_str("this is awesome")).unwrap();
//! positive.add(&Entry::from_str("great event")).unwrap();
//! negative.add(&Entry::from_str("terrible experience")).unwrap();
//! negative.add(&Entry::from_str("awful service")).unwrap();
//!
//! let analyzer = Analyzer::default();
//! let entry = Entry::from_str("what a great event");
//! assert_eq!(
//!     analyzer.categorize(&entry, &positive, &negative),
//!     CategorizationResult::First
//! );
//! ```

pub mod analyzer;
pub mod result;

pub use analyzer::{Analyzer, AnalyzerConfig, Scores};
pub use result::CategorizationResult;
