//! Store client surface for the lazykv workspace.
//!
//! This crate provides:
//! - [`StoreClient`]: the capability surface the overlay core consumes
//! - [`MemoryStore`]: an in-memory reference implementation with fault
//!   injection, used by tests and the demo harness
//! - [`test_utils::RecordingStore`]: a delegating wrapper that logs every
//!   remote call, for replay-order assertions
//!
//! # Example
//!
//! ```
//! use lazykv_store::{MemoryStore, StoreClient};
//!
//! let store = MemoryStore::new();
//! store.push_right("jobs", "a").unwrap();
//! store.push_right("jobs", "b").unwrap();
//! assert_eq!(store.list_length("jobs").unwrap(), 2);
//! assert_eq!(store.pop_left("jobs").unwrap(), Some("a".to_string()));
//! ```

pub mod client;
pub mod memory;
pub mod test_utils;

// Re-export main types for convenience
pub use client::StoreClient;
pub use memory::MemoryStore;
pub use test_utils::{RecordingStore, StoreOp};
