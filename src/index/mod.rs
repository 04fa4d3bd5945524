//! Word-frequency indexes.
//!
//! [`Index`] is the capability set the classifier relies on. Two variants
//! implement it: [`MemoryIndex`], which lives for the process lifetime,
//! and [`FileIndex`], which can additionally load and save its model
//! through a [`Storage`](crate::storage::Storage) backend.

pub mod file;
#[allow(clippy::module_inception)]
pub mod index;
pub mod memory;
pub mod training;

pub use file::FileIndex;
pub use index::{Index, IndexSnapshot, IndexStats};
pub use memory::MemoryIndex;
pub use training::{train, train_parallel};
