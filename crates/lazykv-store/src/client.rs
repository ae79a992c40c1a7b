//! The store client capability surface.
//!
//! The overlay core is written against this trait, not a concrete store.
//! Every method is synchronous and may block on the network in a real
//! implementation; the core neither retries nor catches failures.

use lazykv_types::{StoreError, TypeTag};

/// Primitive per-type operations against one remote key-value store.
///
/// Methods take `&self` so one client can be shared behind an `Arc` by the
/// cache directory and every representative it hands out; implementations
/// use interior mutability where they need it.
pub trait StoreClient: Send + Sync {
    /// Report the remote type of `key`. Missing keys report [`TypeTag::None`].
    fn type_of(&self, key: &str) -> Result<TypeTag, StoreError>;

    // ==================== Scalar Operations ====================

    /// Fetch the scalar value at `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite `key` with a scalar value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key` regardless of its type. Deleting a missing key is not
    /// an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    // ==================== List Operations ====================

    /// Prepend `value` to the list at `key`, creating the list if missing.
    fn push_left(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Append `value` to the list at `key`, creating the list if missing.
    fn push_right(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove and return the head of the list at `key`.
    fn pop_left(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Remove and return the tail of the list at `key`.
    fn pop_right(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Length of the list at `key`; missing keys report 0.
    fn list_length(&self, key: &str) -> Result<usize, StoreError>;

    /// Remove up to `count` head-side occurrences of `value` from the list
    /// at `key`; `count == 0` removes every occurrence. Returns how many
    /// were actually removed.
    fn remove_by_value(&self, key: &str, value: &str, count: usize)
        -> Result<usize, StoreError>;
}
