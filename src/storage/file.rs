//! A storage substrate backed by local files

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::traits::Storage;

/// A [`Storage`] that keeps each key in its own file (`<dir>/<key>.json`).
///
/// The directory is created on the first write. A missing file is reported as an absent
/// key, not as an error.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use (or create on first write) the given directory as the storage location
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: PathBuf::from(dir.as_ref()) }
    }

    /// The directory this storage writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }
}
