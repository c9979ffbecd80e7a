//! Key-Value store abstraction with automatic serialization.

use std::sync::Arc;

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// A raw byte-oriented key-value backend.
///
/// Implementations take `&self` and handle their own interior mutability so
/// that a single backend can be shared by several readers.
pub trait KeyValueStore {
    /// Read the raw bytes stored under `key`.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace the bytes stored under `key`.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List every key in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Check if a key exists in the store.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }
}

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone, Default)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and a
    /// [`CacheError::SerializeError`] if the stored bytes are not valid JSON
    /// for `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<CartLineItem>> = cache.get("swag_cart_v1")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get_raw(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set_raw(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Borrow the underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        sku: String,
        qty: i64,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::new(MemoryStore::new());
        let lines = vec![Line {
            sku: "TAZ-001".to_string(),
            qty: 3,
        }];

        cache.set("lines", &lines).unwrap();
        let back: Option<Vec<Line>> = cache.get("lines").unwrap();
        assert_eq!(back, Some(lines));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let value: Option<Vec<Line>> = cache.get("nothing").unwrap();
        assert!(value.is_none());
        assert!(!cache.exists("nothing").unwrap());
    }

    #[test]
    fn test_corrupt_bytes_are_a_serialize_error() {
        let store = MemoryStore::new();
        store.set_raw("lines", b"{not json").unwrap();

        let cache = Cache::new(&store);
        let result: Result<Option<Vec<Line>>, _> = cache.get("lines");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_shared_backend_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let writer = Cache::new(Arc::clone(&store));
        let reader = Cache::new(Arc::clone(&store));

        writer.set("count", &7).unwrap();
        assert_eq!(reader.get::<i64>("count").unwrap(), Some(7));

        writer.delete("count").unwrap();
        assert!(reader.keys().unwrap().is_empty());
    }
}
