//! Typed value representatives.
//!
//! A [`Representative`] is the local stand-in for one remote key's value,
//! tagged by the remote type it models. The tag set is closed, so dispatch
//! is a plain enum match. Every variant shares the same capability shape:
//! construct with an optional seed, synchronize to the remote store.
//!
//! Only the list variant carries real overlay semantics; the set, sorted
//! set and field map variants are acknowledged shells whose remote
//! behavior is deferred (synchronize is a safe no-op).

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::debug;

use lazykv_store::StoreClient;
use lazykv_types::{CacheError, TypeTag, Value};

use crate::list::ListOverlay;

/// Stand-in for a key with no remote value. Synchronizes by deleting the
/// remote key.
pub struct AbsentValue {
    store: Arc<dyn StoreClient>,
    key: String,
}

impl AbsentValue {
    pub fn new(store: Arc<dyn StoreClient>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn synchronize(&mut self) -> Result<(), CacheError> {
        self.store.delete(&self.key)?;
        Ok(())
    }
}

/// Stand-in for a scalar value.
///
/// Reads are served from the local value, lazily fetched from the remote
/// store on first read if nothing was ever set locally. Writes are buffered
/// locally; synchronize overwrites the remote key.
pub struct ScalarValue {
    store: Arc<dyn StoreClient>,
    key: String,
    value: Option<String>,
}

impl ScalarValue {
    pub fn new(store: Arc<dyn StoreClient>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            value: None,
        }
    }

    pub fn seeded(
        store: Arc<dyn StoreClient>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut scalar = Self::new(store, key);
        scalar.value = Some(value.into());
        scalar
    }

    /// Current value; fetches from the remote store on the first read if no
    /// local value exists, and caches the result.
    pub fn get(&mut self) -> Result<Option<String>, CacheError> {
        if self.value.is_none() {
            self.value = self.store.get(&self.key)?;
        }
        Ok(self.value.clone())
    }

    /// Buffer a new value locally. Purely local.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Overwrite the remote key with the local value. A no-op when no value
    /// was ever set or fetched (nothing is buffered to flush).
    pub fn synchronize(&mut self) -> Result<(), CacheError> {
        if let Some(value) = &self.value {
            self.store.set(&self.key, value)?;
        }
        Ok(())
    }
}

/// Shell for a remote set. Remote semantics deferred; synchronize is a
/// no-op.
pub struct SetValue {
    #[allow(dead_code)]
    store: Arc<dyn StoreClient>,
    key: String,
    members: Option<BTreeSet<String>>,
}

impl SetValue {
    pub fn new(store: Arc<dyn StoreClient>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            members: None,
        }
    }

    pub fn seeded(
        store: Arc<dyn StoreClient>,
        key: impl Into<String>,
        members: BTreeSet<String>,
    ) -> Self {
        let mut set = Self::new(store, key);
        set.members = Some(members);
        set
    }

    pub fn members(&self) -> Option<&BTreeSet<String>> {
        self.members.as_ref()
    }

    pub fn synchronize(&mut self) -> Result<(), CacheError> {
        debug!(key = self.key.as_str(), "set synchronize deferred; no-op");
        Ok(())
    }
}

/// Shell for a remote sorted set. Remote semantics deferred; synchronize is
/// a no-op.
pub struct SortedSetValue {
    #[allow(dead_code)]
    store: Arc<dyn StoreClient>,
    key: String,
    entries: Option<Vec<(String, f64)>>,
}

impl SortedSetValue {
    pub fn new(store: Arc<dyn StoreClient>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            entries: None,
        }
    }

    pub fn seeded(
        store: Arc<dyn StoreClient>,
        key: impl Into<String>,
        entries: Vec<(String, f64)>,
    ) -> Self {
        let mut zset = Self::new(store, key);
        zset.entries = Some(entries);
        zset
    }

    pub fn synchronize(&mut self) -> Result<(), CacheError> {
        debug!(
            key = self.key.as_str(),
            "sorted set synchronize deferred; no-op"
        );
        Ok(())
    }
}

/// Shell for a remote field map. Remote semantics deferred; synchronize is
/// a no-op. Raw field-map values are also rejected by directory
/// classification, so this shell is only reachable by direct construction.
pub struct FieldMapValue {
    #[allow(dead_code)]
    store: Arc<dyn StoreClient>,
    key: String,
    fields: Option<BTreeMap<String, String>>,
}

impl FieldMapValue {
    pub fn new(store: Arc<dyn StoreClient>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            fields: None,
        }
    }

    pub fn seeded(
        store: Arc<dyn StoreClient>,
        key: impl Into<String>,
        fields: BTreeMap<String, String>,
    ) -> Self {
        let mut map = Self::new(store, key);
        map.fields = Some(fields);
        map
    }

    pub fn synchronize(&mut self) -> Result<(), CacheError> {
        debug!(
            key = self.key.as_str(),
            "field map synchronize deferred; no-op"
        );
        Ok(())
    }
}

/// The local stand-in for one remote key's value.
pub enum Representative {
    Absent(AbsentValue),
    Scalar(ScalarValue),
    List(ListOverlay),
    Set(SetValue),
    SortedSet(SortedSetValue),
    FieldMap(FieldMapValue),
}

impl std::fmt::Debug for Representative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self {
            Representative::Absent(_) => "Absent",
            Representative::Scalar(_) => "Scalar",
            Representative::List(_) => "List",
            Representative::Set(_) => "Set",
            Representative::SortedSet(_) => "SortedSet",
            Representative::FieldMap(_) => "FieldMap",
        };
        f.debug_struct(variant).finish_non_exhaustive()
    }
}

impl Representative {
    /// Construct the variant matching a remote type tag, with no local
    /// seed.
    pub fn for_remote_type(
        store: Arc<dyn StoreClient>,
        key: impl Into<String>,
        tag: TypeTag,
    ) -> Self {
        let key = key.into();
        match tag {
            TypeTag::None => Representative::Absent(AbsentValue::new(store, key)),
            TypeTag::String => Representative::Scalar(ScalarValue::new(store, key)),
            TypeTag::List => Representative::List(ListOverlay::new(store, key)),
            TypeTag::Set => Representative::Set(SetValue::new(store, key)),
            TypeTag::ZSet => Representative::SortedSet(SortedSetValue::new(store, key)),
            TypeTag::Hash => Representative::FieldMap(FieldMapValue::new(store, key)),
        }
    }

    /// Classify a raw local value into a seeded representative.
    ///
    /// A field-map value has no defined mapping (deferred functionality)
    /// and fails with [`CacheError::UnsupportedValueType`].
    pub fn from_value(
        store: Arc<dyn StoreClient>,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Self, CacheError> {
        let key = key.into();
        match value {
            Value::Absent => Ok(Representative::Absent(AbsentValue::new(store, key))),
            Value::Scalar(s) => Ok(Representative::Scalar(ScalarValue::seeded(store, key, s))),
            Value::Sequence(seq) => Ok(Representative::List(ListOverlay::seeded(store, key, seq))),
            Value::Members(members) => {
                Ok(Representative::Set(SetValue::seeded(store, key, members)))
            }
            fields @ Value::Fields(_) => Err(CacheError::UnsupportedValueType {
                shape: fields.shape_name(),
            }),
        }
    }

    /// The remote type this representative models.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Representative::Absent(_) => TypeTag::None,
            Representative::Scalar(_) => TypeTag::String,
            Representative::List(_) => TypeTag::List,
            Representative::Set(_) => TypeTag::Set,
            Representative::SortedSet(_) => TypeTag::ZSet,
            Representative::FieldMap(_) => TypeTag::Hash,
        }
    }

    /// Flush this representative's buffered state to the remote store.
    pub fn synchronize(&mut self) -> Result<(), CacheError> {
        match self {
            Representative::Absent(absent) => absent.synchronize(),
            Representative::Scalar(scalar) => scalar.synchronize(),
            Representative::List(list) => list.synchronize(),
            Representative::Set(set) => set.synchronize(),
            Representative::SortedSet(zset) => zset.synchronize(),
            Representative::FieldMap(map) => map.synchronize(),
        }
    }

    /// The list overlay, if this is the list variant.
    pub fn as_list_mut(&mut self) -> Option<&mut ListOverlay> {
        match self {
            Representative::List(list) => Some(list),
            _ => None,
        }
    }

    /// The scalar value, if this is the scalar variant.
    pub fn as_scalar_mut(&mut self) -> Option<&mut ScalarValue> {
        match self {
            Representative::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}
