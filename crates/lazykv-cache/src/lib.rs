//! Deferred-write local overlay in front of a typed remote key-value store.
//!
//! Callers read and mutate values through local, in-memory representatives;
//! no network operation happens until an explicit synchronization point
//! flushes accumulated local state to the remote store.
//!
//! This crate provides:
//! - [`CacheDirectory`]: key -> representative map, lazily populated on
//!   first access
//! - [`Representative`]: the tagged union of typed value stand-ins
//! - [`ListOverlay`]: the buffered list reconciliation core
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lazykv_cache::CacheDirectory;
//! use lazykv_store::MemoryStore;
//! use lazykv_types::Value;
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut dir = CacheDirectory::new(store.clone());
//!
//! dir.set("jobs", Value::Sequence(vec![])).unwrap();
//! let list = dir.get("jobs").unwrap().as_list_mut().unwrap();
//! list.push_right("build");
//! list.push_left("lint");
//!
//! // Nothing has touched the store yet.
//! assert!(store.keys().is_empty());
//!
//! dir.synchronize_all().unwrap();
//! assert_eq!(store.list_contents("jobs").unwrap(), vec!["lint", "build"]);
//! ```

pub mod directory;
pub mod list;
pub mod representative;

// Re-export main types for convenience
pub use directory::CacheDirectory;
pub use list::ListOverlay;
pub use representative::{
    AbsentValue, FieldMapValue, Representative, ScalarValue, SetValue, SortedSetValue,
};
