//! Storage abstraction trait and common types.

use crate::error::NbayesError;
use crate::error::Result;

/// A backend that stores named blobs.
///
/// Writes are whole-file and atomic: readers observe either the previous
/// contents or the new contents, never a partial write.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Read the full contents of a file.
    fn read_file(&self, name: &str) -> Result<Vec<u8>>;

    /// Replace the contents of a file atomically, creating it if needed.
    fn write_file(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Check if a file exists.
    fn file_exists(&self, name: &str) -> bool;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete_file(&self, name: &str) -> Result<()>;

    /// List all files in the storage, sorted by name.
    fn list_files(&self) -> Result<Vec<String>>;
}

/// Configuration for storage backends.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Buffer size for I/O operations.
    pub buffer_size: usize,

    /// Whether to fsync files before they replace the previous version.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            buffer_size: 65536,
            sync_writes: true,
        }
    }
}

/// Error types specific to storage operations.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// File not found.
    FileNotFound(String),

    /// I/O error.
    IoError(String),

    /// Invalid operation.
    InvalidOperation(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::FileNotFound(name) => write!(f, "File not found: {name}"),
            StorageError::IoError(msg) => write!(f, "I/O error: {msg}"),
            StorageError::InvalidOperation(msg) => write!(f, "Invalid operation: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for NbayesError {
    fn from(err: StorageError) -> Self {
        NbayesError::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();

        assert_eq!(config.buffer_size, 65536);
        assert!(config.sync_writes);
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::FileNotFound("positive.json".to_string());
        assert_eq!(err.to_string(), "File not found: positive.json");

        let err = StorageError::IoError("disk full".to_string());
        assert_eq!(err.to_string(), "I/O error: disk full");

        let err = StorageError::InvalidOperation("empty file name".to_string());
        assert_eq!(err.to_string(), "Invalid operation: empty file name");

        let err: NbayesError = StorageError::FileNotFound("x".to_string()).into();
        assert_eq!(err.to_string(), "Storage error: File not found: x");
    }
}
