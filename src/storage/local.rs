//! Local filesystem storage backend
//!
//! All operations complete immediately (synchronous).

use super::StorageError;
use std::path::{Path, PathBuf};

/// Local filesystem storage rooted at a base directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for relative paths
    base_dir: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    /// Create a new local storage backend rooted at the current directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }

    /// Create a local storage backend with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Per-user config directory for this game, e.g.
    /// `~/.config/reality-collapsing` on Linux
    #[cfg(not(target_arch = "wasm32"))]
    pub fn user_config() -> Result<Self, StorageError> {
        dirs::config_dir()
            .map(|dir| Self::with_base_dir(dir.join(crate::config::APP_DIR_NAME)))
            .ok_or(StorageError::Unavailable)
    }

    /// No writable filesystem in the browser
    #[cfg(target_arch = "wasm32")]
    pub fn user_config() -> Result<Self, StorageError> {
        Err(StorageError::Unavailable)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }

    pub fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        Ok(std::fs::read(self.resolve(path))?)
    }

    pub fn read_to_string(&self, path: &str) -> Result<String, StorageError> {
        Ok(std::fs::read_to_string(self.resolve(path))?)
    }

    /// Creates or overwrites the file, creating parent directories as needed
    pub fn write(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, data)?;
        Ok(())
    }

    /// Delete a file. Missing files are not an error.
    pub fn delete(&self, path: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.resolve(path)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_write_and_read() {
        let (_dir, storage) = setup_test_dir();

        storage.write("test.txt", b"hello world").unwrap();
        assert_eq!(storage.read("test.txt").unwrap(), b"hello world");
        assert_eq!(storage.read_to_string("test.txt").unwrap(), "hello world");
    }

    #[test]
    fn test_read_not_found() {
        let (_dir, storage) = setup_test_dir();

        let result = storage.read("nonexistent.txt");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let (dir, storage) = setup_test_dir();

        std::fs::write(dir.path().join("delete_me.txt"), "x").unwrap();
        storage.delete("delete_me.txt").unwrap();
        assert!(!dir.path().join("delete_me.txt").exists());

        // Deleting again should be OK
        storage.delete("delete_me.txt").unwrap();
    }

    #[test]
    fn test_exists() {
        let (dir, storage) = setup_test_dir();

        std::fs::write(dir.path().join("exists.txt"), "x").unwrap();
        assert!(storage.exists("exists.txt"));
        assert!(!storage.exists("not_exists.txt"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let (dir, _) = setup_test_dir();
        let storage = LocalStorage::with_base_dir(dir.path().join("reality-collapsing"));

        storage.write("deep/nested/settings.ron", b"data").unwrap();
        assert_eq!(storage.read("deep/nested/settings.ron").unwrap(), b"data");
    }
}
