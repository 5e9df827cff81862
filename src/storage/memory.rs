//! An in-memory storage substrate

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::mock_behaviour::MockBehaviour;
use crate::traits::Storage;

/// A [`Storage`] that keeps its blobs in memory.
///
/// Nothing survives the process, which makes it suited to tests and throw-away runs.
/// It can be given a [`MockBehaviour`] to make some of its operations fail, so that tests
/// can exercise the storage-failure paths of their callers.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,

    /// `None` means every operation succeeds
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage whose operations can be made to fail.
    ///
    /// Keep a clone of the `Arc` to tweak the behaviour while the storage is in use.
    pub fn new_with_mock_behaviour(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            mock_behaviour: Some(mock_behaviour),
        }
    }

    /// Seed a key without going through the (possibly failing) `set` path
    pub fn seed(&self, key: &str, value: &str) {
        self.data.lock().unwrap().insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_get()?;
        }
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_set()?;
        }
        self.data.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
