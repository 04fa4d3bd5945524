//! Utility modules for nbayes.

pub mod buffered;

pub use buffered::BufferedIter;
