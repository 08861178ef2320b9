//! Key-value storage with automatic JSON serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Raw-byte key-value storage.
///
/// Object-safe so stores can take their storage as `Rc<dyn KeyValue>`;
/// typed access goes through [`KeyValueExt`]. Writes are synchronous local
/// I/O — fire-and-forget from the caller's perspective.
pub trait KeyValue {
    /// Get the raw bytes stored under a key.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store raw bytes under a key, replacing any prior value.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// JSON (de)serialization helpers over any [`KeyValue`].
pub trait KeyValueExt: KeyValue {
    /// Get a value from storage, deserializing it from JSON.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize a value to JSON and store it.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }
}

impl<K: KeyValue + ?Sized> KeyValueExt for K {}

/// In-memory key-value store.
///
/// A cheaply-cloneable handle over shared entries, so tests can keep a
/// handle to storage they hand to a store. Used on native builds where the
/// platform key-value API is unavailable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValue for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Device-local store backed by the platform Key-Value API.
#[cfg(target_arch = "wasm32")]
pub struct DeviceStore {
    store: spin_sdk::key_value::Store,
}

#[cfg(target_arch = "wasm32")]
impl DeviceStore {
    /// Open the default store.
    pub fn open_default() -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named store.
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValue for DeviceStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store
            .get(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.store
            .set(key, value)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store
            .delete(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}
