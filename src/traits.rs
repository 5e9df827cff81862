use async_trait::async_trait;

use crate::error::StorageError;

/// The durable key-value substrate the tracker persists into.
///
/// The whole task collection lives under a single logical key, as one serialized blob;
/// implementors only need to provide whole-blob reads and writes. A `set` replaces any
/// prior value and is assumed atomic from the caller's point of view.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns the blob stored under `key`, or `None` in case this key has never been written
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Replaces the blob stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
