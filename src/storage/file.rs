//! File-based storage implementation.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{NbayesError, Result};
use crate::storage::traits::{Storage, StorageConfig, StorageError};

/// A storage rooted at one directory; file names are relative to it.
#[derive(Debug)]
pub struct FileStorage {
    /// The root directory for storage.
    directory: PathBuf,
    /// Storage configuration.
    config: StorageConfig,
}

impl FileStorage {
    /// Create a new file storage in the given directory, creating it if missing.
    pub fn new<P: AsRef<Path>>(directory: P, config: StorageConfig) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            std::fs::create_dir_all(&directory)
                .map_err(|e| NbayesError::storage(format!("Failed to create directory: {e}")))?;
        }

        if !directory.is_dir() {
            return Err(NbayesError::storage(format!(
                "Path is not a directory: {}",
                directory.display()
            )));
        }

        Ok(FileStorage { directory, config })
    }

    /// The root directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(StorageError::InvalidOperation(format!("invalid file name: {name:?}")).into());
        }
        Ok(self.directory.join(name))
    }

    /// Pick a temp name next to `name` that no other file uses.
    fn temp_path(&self, name: &str) -> Result<PathBuf> {
        for counter in 0..10000 {
            let candidate = self.directory.join(format!("{name}_{counter}.tmp"));
            if !candidate.exists() {
                return Ok(candidate);
            }
        }
        Err(StorageError::IoError("Could not create temporary file".to_string()).into())
    }
}

impl Storage for FileStorage {
    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.file_path(name)?;
        let mut file = File::open(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::FileNotFound(name.to_string())
            } else {
                StorageError::IoError(e.to_string())
            }
        })?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        Ok(data)
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.file_path(name)?;
        let temp_path = self.temp_path(name)?;

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        let written = (|| -> std::io::Result<()> {
            let mut writer = BufWriter::with_capacity(self.config.buffer_size, file);
            writer.write_all(data)?;
            writer.flush()?;
            if self.config.sync_writes {
                writer.get_ref().sync_all()?;
            }
            Ok(())
        })();

        if let Err(e) = written {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StorageError::IoError(format!("Failed to write {name}: {e}")).into());
        }

        std::fs::rename(&temp_path, &path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            StorageError::IoError(format!("Failed to rename file: {e}"))
        })?;

        Ok(())
    }

    fn file_exists(&self, name: &str) -> bool {
        self.file_path(name).map(|p| p.exists()).unwrap_or(false)
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.file_path(name)?;
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| StorageError::IoError(format!("Failed to delete file: {e}")))?;
        }

        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in
            std::fs::read_dir(&self.directory).map_err(|e| StorageError::IoError(e.to_string()))?
        {
            let entry = entry.map_err(|e| StorageError::IoError(e.to_string()))?;
            let path = entry.path();

            if path.is_file()
                && let Some(name) = path.file_name().and_then(|n| n.to_str())
            {
                files.push(name.to_string());
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path(), StorageConfig::default()).unwrap();

        assert!(!storage.file_exists("model.json"));
        storage.write_file("model.json", b"{\"a\":1}").unwrap();
        assert!(storage.file_exists("model.json"));
        assert_eq!(storage.read_file("model.json").unwrap(), b"{\"a\":1}");
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path(), StorageConfig::default()).unwrap();

        storage.write_file("model.json", b"first").unwrap();
        storage.write_file("model.json", b"second").unwrap();

        assert_eq!(storage.read_file("model.json").unwrap(), b"second");
        assert_eq!(storage.list_files().unwrap(), vec!["model.json"]);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path(), StorageConfig::default()).unwrap();

        let err = storage.read_file("missing.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
        storage.delete_file("missing.json").unwrap();
    }

    #[test]
    fn test_rejects_path_separators() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path(), StorageConfig::default()).unwrap();

        assert!(storage.write_file("../escape.json", b"x").is_err());
        assert!(storage.write_file("", b"x").is_err());
        assert!(!storage.file_exists("../escape.json"));
    }

    #[test]
    fn test_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let storage = FileStorage::new(&nested, StorageConfig::default()).unwrap();
        assert!(storage.directory().is_dir());
    }
}
