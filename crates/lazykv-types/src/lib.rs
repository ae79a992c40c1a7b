//! Shared types for the lazykv workspace.
//!
//! This crate provides foundational types used across multiple crates in the
//! workspace, breaking circular dependency chains:
//! - [`TypeTag`] - the closed set of remote value types
//! - [`Value`] - raw local value shapes accepted by the cache directory
//! - [`StoreError`] / [`CacheError`] - the error surface of the store client
//!   and the overlay layer

pub mod error;
pub mod tag;
pub mod value;

// Re-export commonly used types at crate root
pub use error::{CacheError, StoreError};
pub use tag::TypeTag;
pub use value::Value;
