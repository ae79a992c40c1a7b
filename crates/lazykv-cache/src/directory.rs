//! The cache directory: key -> representative, lazily populated.
//!
//! The directory owns one representative per key. A key's first access asks
//! the store for its remote type and constructs the matching variant; every
//! later access returns the cached representative without touching the
//! store. `synchronize_all` flushes every cached representative in
//! insertion order of first access.

use std::sync::Arc;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, trace};

use lazykv_store::StoreClient;
use lazykv_types::{CacheError, Value};

use crate::representative::Representative;

/// Mapping from key to typed value representative.
///
/// Not designed for concurrent access to the same key from multiple
/// threads; callers needing that must serialize per key.
pub struct CacheDirectory {
    store: Arc<dyn StoreClient>,
    entries: IndexMap<String, Representative>,
}

impl CacheDirectory {
    /// Create a directory over `store` with no cached entries.
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self {
            store,
            entries: IndexMap::new(),
        }
    }

    /// The shared store handle, for harnesses that inspect remote state.
    pub fn store(&self) -> Arc<dyn StoreClient> {
        Arc::clone(&self.store)
    }

    /// Number of cached representatives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any representative is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The representative for `key`.
    ///
    /// Returns the cached representative unchanged if one exists (no remote
    /// call). Otherwise queries the store for the key's remote type,
    /// constructs the matching variant with no local seed, caches it, and
    /// returns it. Never mutates remote state.
    pub fn get(&mut self, key: &str) -> Result<&mut Representative, CacheError> {
        let store = Arc::clone(&self.store);
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                trace!(key, "cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let tag = store.type_of(key)?;
                debug!(key, tag = %tag, "cache miss; constructed representative");
                Ok(entry.insert(Representative::for_remote_type(store, key, tag)))
            }
        }
    }

    /// Classify a raw local value and cache it under `key`.
    ///
    /// Fully replaces any previous representative for `key`; no merge with
    /// prior local state occurs. A replaced key keeps its original position
    /// in the synchronization order. A field-map value fails with
    /// [`CacheError::UnsupportedValueType`] and leaves any prior
    /// representative unchanged.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), CacheError> {
        let key = key.into();
        let tag = value.type_tag();
        let rep = Representative::from_value(Arc::clone(&self.store), key.clone(), value)?;
        debug!(key = key.as_str(), tag = %tag, "cached seeded representative");
        self.entries.insert(key, rep);
        Ok(())
    }

    /// Cache an already-constructed representative as-is. Same replace
    /// semantics as [`CacheDirectory::set`].
    pub fn insert(&mut self, key: impl Into<String>, rep: Representative) {
        self.entries.insert(key.into(), rep);
    }

    /// Synchronize every cached representative, in insertion order of first
    /// access.
    ///
    /// The first failure propagates immediately and halts the remaining
    /// synchronizations: earlier keys are already flushed, later keys are
    /// untouched. No rollback, no retry.
    pub fn synchronize_all(&mut self) -> Result<(), CacheError> {
        for (key, rep) in self.entries.iter_mut() {
            debug!(key = key.as_str(), tag = %rep.type_tag(), "synchronizing");
            rep.synchronize()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    use lazykv_store::{MemoryStore, RecordingStore, StoreClient, StoreOp};
    use lazykv_types::TypeTag;

    #[test]
    fn test_get_caches_representative() {
        let store = Arc::new(RecordingStore::in_memory());
        let mut dir = CacheDirectory::new(store.clone());

        assert_eq!(dir.get("k").unwrap().type_tag(), TypeTag::None);
        assert_eq!(dir.get("k").unwrap().type_tag(), TypeTag::None);

        // One type lookup, not two.
        assert_eq!(store.ops(), vec![StoreOp::TypeOf { key: "k".into() }]);
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_get_constructs_matching_variant() {
        let store = Arc::new(MemoryStore::new());
        store.set("s", "v").unwrap();
        store.push_right("l", "v").unwrap();

        let mut dir = CacheDirectory::new(store);
        assert_eq!(dir.get("s").unwrap().type_tag(), TypeTag::String);
        assert_eq!(dir.get("l").unwrap().type_tag(), TypeTag::List);
        assert_eq!(dir.get("missing").unwrap().type_tag(), TypeTag::None);
    }

    #[test]
    fn test_set_replaces_without_merging() {
        let store = Arc::new(MemoryStore::new());
        let mut dir = CacheDirectory::new(store.clone());

        dir.set("k", Value::Sequence(vec!["old".to_string()])).unwrap();
        dir.get("k").unwrap().as_list_mut().unwrap().push_right("x");

        dir.set("k", Value::Sequence(vec!["new".to_string()])).unwrap();
        let list = dir.get("k").unwrap().as_list_mut().unwrap();
        assert_eq!(list.snapshot().unwrap(), &["new".to_string()]);
        assert_eq!(list.len().unwrap(), 1);

        dir.synchronize_all().unwrap();
        assert_eq!(store.list_contents("k").unwrap(), vec!["new"]);
    }

    #[test]
    fn test_set_classifies_raw_shapes() {
        let mut dir = CacheDirectory::new(Arc::new(MemoryStore::new()));

        dir.set("a", Value::Absent).unwrap();
        dir.set("b", Value::from("scalar")).unwrap();
        dir.set("c", Value::Sequence(vec![])).unwrap();
        dir.set("d", Value::Members(BTreeSet::new())).unwrap();

        assert_eq!(dir.get("a").unwrap().type_tag(), TypeTag::None);
        assert_eq!(dir.get("b").unwrap().type_tag(), TypeTag::String);
        assert_eq!(dir.get("c").unwrap().type_tag(), TypeTag::List);
        assert_eq!(dir.get("d").unwrap().type_tag(), TypeTag::Set);
    }

    #[test]
    fn test_unsupported_shape_leaves_prior_entry() {
        let mut dir = CacheDirectory::new(Arc::new(MemoryStore::new()));
        dir.set("k", Value::from("prior")).unwrap();

        let err = dir.set("k", Value::Fields(BTreeMap::new())).unwrap_err();
        assert!(matches!(err, CacheError::UnsupportedValueType { .. }));

        let scalar = dir.get("k").unwrap().as_scalar_mut().unwrap();
        assert_eq!(scalar.get().unwrap(), Some("prior".to_string()));
    }

    #[test]
    fn test_synchronize_all_runs_in_first_access_order() {
        let store = Arc::new(RecordingStore::in_memory());
        let mut dir = CacheDirectory::new(store.clone());

        dir.set("second", Value::from("2")).unwrap();
        dir.set("first", Value::from("1")).unwrap();
        // Replacing keeps the original position.
        dir.set("second", Value::from("2b")).unwrap();
        store.take_ops();

        dir.synchronize_all().unwrap();
        assert_eq!(
            store.ops(),
            vec![
                StoreOp::Set {
                    key: "second".into(),
                    value: "2b".into()
                },
                StoreOp::Set {
                    key: "first".into(),
                    value: "1".into()
                },
            ]
        );
    }

    #[test]
    fn test_synchronize_all_halts_on_first_failure() {
        let store = Arc::new(MemoryStore::new());
        let mut dir = CacheDirectory::new(store.clone());

        dir.set("a", Value::from("1")).unwrap();
        dir.set("b", Value::from("2")).unwrap();

        store.set_offline(true);
        assert!(matches!(
            dir.synchronize_all(),
            Err(CacheError::Store(_))
        ));

        // Nothing was flushed; after recovery a new sync flushes both.
        store.set_offline(false);
        assert_eq!(store.get("a").unwrap(), None);
        dir.synchronize_all().unwrap();
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
        assert_eq!(store.get("b").unwrap(), Some("2".to_string()));
    }
}
