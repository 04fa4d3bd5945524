//! Storage abstraction layer used by durable indexes.
//!
//! Scoring never touches storage: a [`FileIndex`](crate::index::FileIndex)
//! only reads its backend on `open` and writes it on `save`. Backends are
//! pluggable so tests can persist into memory.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::*;
pub use memory::*;
pub use traits::*;
