//! In-memory reference implementation of [`StoreClient`].
//!
//! Used by the test suites and the demo harness as a stand-in for a real
//! remote store. Thread-safe via an internal RwLock so it can be shared
//! behind an `Arc` with `&self` methods. An offline switch lets tests
//! exercise `StoreError::Unavailable` propagation without a network.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use lazykv_types::{StoreError, TypeTag};

use crate::client::StoreClient;

/// One stored remote value.
#[derive(Debug, Clone)]
enum Stored {
    Scalar(String),
    List(VecDeque<String>),
}

impl Stored {
    fn type_tag(&self) -> TypeTag {
        match self {
            Stored::Scalar(_) => TypeTag::String,
            Stored::List(_) => TypeTag::List,
        }
    }
}

/// In-memory key-value store with typed values.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Stored>>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle fault injection: while offline, every call fails with
    /// [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    /// All keys currently present, in unspecified order.
    pub fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    /// Full contents of the list at `key`, if the key holds a list.
    ///
    /// Inspection helper for harnesses; not part of [`StoreClient`].
    pub fn list_contents(&self, key: &str) -> Option<Vec<String>> {
        match self.values.read().get(key) {
            Some(Stored::List(items)) => Some(items.iter().cloned().collect()),
            _ => None,
        }
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::Relaxed) {
            Err(StoreError::unavailable("store is offline"))
        } else {
            Ok(())
        }
    }

    fn wrong_type(key: &str, expected: TypeTag, found: TypeTag) -> StoreError {
        StoreError::protocol(format!(
            "wrong type for key {}: expected {}, found {}",
            key, expected, found
        ))
    }

    /// Run `op` against the list at `key`, creating it when `create` is set.
    fn with_list<T>(
        &self,
        key: &str,
        create: bool,
        op: impl FnOnce(&mut VecDeque<String>) -> T,
        missing: T,
    ) -> Result<T, StoreError> {
        self.check_online()?;
        let mut values = self.values.write();
        match values.get_mut(key) {
            Some(Stored::List(items)) => {
                let out = op(items);
                if items.is_empty() {
                    values.remove(key);
                }
                Ok(out)
            }
            Some(other) => Err(Self::wrong_type(key, TypeTag::List, other.type_tag())),
            None if create => {
                let mut items = VecDeque::new();
                let out = op(&mut items);
                if !items.is_empty() {
                    values.insert(key.to_string(), Stored::List(items));
                }
                Ok(out)
            }
            None => Ok(missing),
        }
    }
}

impl StoreClient for MemoryStore {
    fn type_of(&self, key: &str) -> Result<TypeTag, StoreError> {
        self.check_online()?;
        Ok(self
            .values
            .read()
            .get(key)
            .map(Stored::type_tag)
            .unwrap_or(TypeTag::None))
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_online()?;
        match self.values.read().get(key) {
            Some(Stored::Scalar(value)) => Ok(Some(value.clone())),
            Some(other) => Err(Self::wrong_type(key, TypeTag::String, other.type_tag())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_online()?;
        self.values
            .write()
            .insert(key.to_string(), Stored::Scalar(value.to_string()));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check_online()?;
        self.values.write().remove(key);
        Ok(())
    }

    fn push_left(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_list(key, true, |items| items.push_front(value.to_string()), ())
    }

    fn push_right(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_list(key, true, |items| items.push_back(value.to_string()), ())
    }

    fn pop_left(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.with_list(key, false, |items| items.pop_front(), None)
    }

    fn pop_right(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.with_list(key, false, |items| items.pop_back(), None)
    }

    fn list_length(&self, key: &str) -> Result<usize, StoreError> {
        self.with_list(key, false, |items| items.len(), 0)
    }

    fn remove_by_value(
        &self,
        key: &str,
        value: &str,
        count: usize,
    ) -> Result<usize, StoreError> {
        self.with_list(
            key,
            false,
            |items| {
                let mut removed = 0;
                while count == 0 || removed < count {
                    match items.iter().position(|v| v == value) {
                        Some(idx) => {
                            items.remove(idx);
                            removed += 1;
                        }
                        None => break,
                    }
                }
                removed
            },
            0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reports_none() {
        let store = MemoryStore::new();
        assert_eq!(store.type_of("nope").unwrap(), TypeTag::None);
        assert_eq!(store.get("nope").unwrap(), None);
        assert_eq!(store.list_length("nope").unwrap(), 0);
        assert_eq!(store.pop_left("nope").unwrap(), None);
    }

    #[test]
    fn test_scalar_set_get_delete() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.type_of("k").unwrap(), TypeTag::String);
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
        store.delete("k").unwrap();
        assert_eq!(store.type_of("k").unwrap(), TypeTag::None);
    }

    #[test]
    fn test_list_push_pop_order() {
        let store = MemoryStore::new();
        store.push_right("l", "b").unwrap();
        store.push_right("l", "c").unwrap();
        store.push_left("l", "a").unwrap();

        assert_eq!(store.type_of("l").unwrap(), TypeTag::List);
        assert_eq!(store.list_length("l").unwrap(), 3);
        assert_eq!(
            store.list_contents("l").unwrap(),
            vec!["a", "b", "c"]
        );
        assert_eq!(store.pop_left("l").unwrap(), Some("a".to_string()));
        assert_eq!(store.pop_right("l").unwrap(), Some("c".to_string()));
    }

    #[test]
    fn test_empty_list_key_disappears() {
        let store = MemoryStore::new();
        store.push_right("l", "only").unwrap();
        assert_eq!(store.pop_left("l").unwrap(), Some("only".to_string()));
        assert_eq!(store.type_of("l").unwrap(), TypeTag::None);
    }

    #[test]
    fn test_remove_by_value_counted_and_all() {
        let store = MemoryStore::new();
        for v in ["x", "y", "x", "x", "z"] {
            store.push_right("l", v).unwrap();
        }
        assert_eq!(store.remove_by_value("l", "x", 2).unwrap(), 2);
        assert_eq!(store.list_contents("l").unwrap(), vec!["y", "x", "z"]);
        assert_eq!(store.remove_by_value("l", "x", 0).unwrap(), 1);
        assert_eq!(store.remove_by_value("l", "missing", 0).unwrap(), 0);
    }

    #[test]
    fn test_wrong_type_is_protocol_error() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert!(matches!(
            store.push_right("k", "x"),
            Err(StoreError::Protocol { .. })
        ));
        store.push_right("l", "x").unwrap();
        assert!(matches!(store.get("l"), Err(StoreError::Protocol { .. })));
    }

    #[test]
    fn test_offline_fails_everything() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        store.set_offline(true);
        assert!(matches!(
            store.get("k"),
            Err(StoreError::Unavailable { .. })
        ));
        assert!(matches!(
            store.type_of("k"),
            Err(StoreError::Unavailable { .. })
        ));
        store.set_offline(false);
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }
}
