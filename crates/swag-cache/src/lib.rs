//! Type-safe local Key-Value persistence for the swag storefront.
//!
//! The storefront keeps its cart in a small key-value store, the same way a
//! browser keeps it in local storage. This crate provides the store
//! abstraction and two backends:
//!
//! - [`MemoryStore`]: process-local, used by tests and throwaway sessions.
//! - [`FileStore`]: a single JSON file on disk, used by the CLI.
//!
//! [`Cache`] wraps any backend with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use swag_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("greeting", &vec!["hola", "chao"]).unwrap();
//!
//! let value: Option<Vec<String>> = cache.get("greeting").unwrap();
//! assert_eq!(value.unwrap().len(), 2);
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
