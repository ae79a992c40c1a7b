//! Test utilities for store clients.
//!
//! Provides [`RecordingStore`], a delegating wrapper that logs every call
//! made against the wrapped client. Synchronize replay order is part of the
//! overlay contract, so tests assert against the recorded sequence rather
//! than just the final store state.
//!
//! # Example
//!
//! ```
//! use lazykv_store::{RecordingStore, StoreClient, StoreOp};
//!
//! let store = RecordingStore::in_memory();
//! store.push_right("k", "v").unwrap();
//! assert_eq!(
//!     store.take_ops(),
//!     vec![StoreOp::PushRight { key: "k".into(), value: "v".into() }]
//! );
//! ```

use parking_lot::Mutex;

use lazykv_types::{StoreError, TypeTag};

use crate::client::StoreClient;
use crate::memory::MemoryStore;

/// One recorded store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    TypeOf { key: String },
    Get { key: String },
    Set { key: String, value: String },
    Delete { key: String },
    PushLeft { key: String, value: String },
    PushRight { key: String, value: String },
    PopLeft { key: String },
    PopRight { key: String },
    ListLength { key: String },
    RemoveByValue { key: String, value: String, count: usize },
}

/// A store client wrapper that records every call before delegating.
pub struct RecordingStore<S: StoreClient = MemoryStore> {
    inner: S,
    ops: Mutex<Vec<StoreOp>>,
}

impl RecordingStore<MemoryStore> {
    /// Record against a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: StoreClient> RecordingStore<S> {
    /// Record against an existing client.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            ops: Mutex::new(Vec::new()),
        }
    }

    /// The wrapped client, for direct inspection.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Snapshot of all calls recorded so far.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.lock().clone()
    }

    /// Drain and return all calls recorded so far.
    pub fn take_ops(&self) -> Vec<StoreOp> {
        std::mem::take(&mut *self.ops.lock())
    }

    fn record(&self, op: StoreOp) {
        self.ops.lock().push(op);
    }
}

impl<S: StoreClient> StoreClient for RecordingStore<S> {
    fn type_of(&self, key: &str) -> Result<TypeTag, StoreError> {
        self.record(StoreOp::TypeOf { key: key.into() });
        self.inner.type_of(key)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.record(StoreOp::Get { key: key.into() });
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.record(StoreOp::Set {
            key: key.into(),
            value: value.into(),
        });
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.record(StoreOp::Delete { key: key.into() });
        self.inner.delete(key)
    }

    fn push_left(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.record(StoreOp::PushLeft {
            key: key.into(),
            value: value.into(),
        });
        self.inner.push_left(key, value)
    }

    fn push_right(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.record(StoreOp::PushRight {
            key: key.into(),
            value: value.into(),
        });
        self.inner.push_right(key, value)
    }

    fn pop_left(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.record(StoreOp::PopLeft { key: key.into() });
        self.inner.pop_left(key)
    }

    fn pop_right(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.record(StoreOp::PopRight { key: key.into() });
        self.inner.pop_right(key)
    }

    fn list_length(&self, key: &str) -> Result<usize, StoreError> {
        self.record(StoreOp::ListLength { key: key.into() });
        self.inner.list_length(key)
    }

    fn remove_by_value(
        &self,
        key: &str,
        value: &str,
        count: usize,
    ) -> Result<usize, StoreError> {
        self.record(StoreOp::RemoveByValue {
            key: key.into(),
            value: value.into(),
            count,
        });
        self.inner.remove_by_value(key, value, count)
    }
}
