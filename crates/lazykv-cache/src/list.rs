//! Buffered list overlay reconciliation.
//!
//! A [`ListOverlay`] layers three pending segments over a remote list whose
//! content may or may not have been materialized locally:
//!
//! - `pending_left`: values to prepend, held in logical head order (the
//!   front of the buffer is the value closest to the final head)
//! - `pending_right`: values to append, in buffer order
//! - `pending_removals`: removal requests not yet resolved against any
//!   known segment
//!
//! plus an optional `snapshot` of the full list. The logical list at any
//! instant is `pending_left ++ (snapshot ?? remote-unknown-tail) ++
//! pending_right`. All mutation operations are purely local; `synchronize`
//! replays them against the store in a fixed order.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use lazykv_store::StoreClient;
use lazykv_types::CacheError;

/// Remove up to `limit` head-side occurrences of `target` from `values`.
/// Returns how many were removed.
fn drain_matches(values: &mut Vec<String>, target: &str, limit: usize) -> usize {
    let mut removed = 0;
    while removed < limit {
        match values.iter().position(|v| v == target) {
            Some(idx) => {
                values.remove(idx);
                removed += 1;
            }
            None => break,
        }
    }
    removed
}

/// Local overlay over one remote list.
///
/// Created either empty (remote type lookup, no seed) or seeded with a known
/// sequence. A seeded overlay treats its snapshot as the single source of
/// truth: at synchronize time the remote list is deleted and rewritten from
/// it. An unseeded overlay only buffers edits around the unknown remote
/// tail.
pub struct ListOverlay {
    store: Arc<dyn StoreClient>,
    key: String,

    /// Fully-materialized local copy of the list, if any.
    snapshot: Option<Vec<String>>,

    /// Values to prepend, front = closest to the final head.
    pending_left: VecDeque<String>,

    /// Values to append, in buffer order.
    pending_right: Vec<String>,

    /// `(value, count)` removals deferred to remote replay.
    pending_removals: Vec<(String, usize)>,
}

impl ListOverlay {
    /// Create an unseeded overlay: the remote list (if any) stays resident
    /// in the store until an operation needs it.
    pub fn new(store: Arc<dyn StoreClient>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            snapshot: None,
            pending_left: VecDeque::new(),
            pending_right: Vec::new(),
            pending_removals: Vec::new(),
        }
    }

    /// Create an overlay seeded with a known sequence. The seed is copied
    /// into the snapshot; the overlay never aliases caller storage.
    pub fn seeded(
        store: Arc<dyn StoreClient>,
        key: impl Into<String>,
        seed: Vec<String>,
    ) -> Self {
        let mut overlay = Self::new(store, key);
        overlay.snapshot = Some(seed);
        overlay
    }

    /// The remote key this overlay shadows.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The materialized snapshot, if present.
    pub fn snapshot(&self) -> Option<&[String]> {
        self.snapshot.as_deref()
    }

    /// Removal requests deferred to remote replay.
    pub fn pending_removals(&self) -> &[(String, usize)] {
        &self.pending_removals
    }

    // ==================== Local Mutation ====================

    /// Buffer `value` for appending. Purely local.
    pub fn push_right(&mut self, value: impl Into<String>) {
        self.pending_right.push(value.into());
    }

    /// Buffer `value` for prepending. Purely local. The most recently
    /// pushed value ends up adjacent to the final head.
    pub fn push_left(&mut self, value: impl Into<String>) {
        self.pending_left.push_front(value.into());
    }

    /// Logical length of the list.
    ///
    /// Sums the pending push buffers with the snapshot length, or with one
    /// remote length lookup when no snapshot is present (blocking fallback).
    /// Unresolved entries in `pending_removals` do not reduce the reported
    /// length; removals only count once resolved against a known segment or
    /// once the remote list is actually mutated.
    pub fn len(&self) -> Result<usize, CacheError> {
        let buffered = self.pending_left.len() + self.pending_right.len();
        match &self.snapshot {
            Some(snapshot) => Ok(buffered + snapshot.len()),
            None => Ok(buffered + self.store.list_length(&self.key)?),
        }
    }

    /// Whether the logical list is empty. Falls back to the remote length
    /// the same way [`ListOverlay::len`] does.
    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }

    /// Remove up to `count` occurrences of `value`.
    ///
    /// Occurrences are resolved against local segments in fixed priority
    /// order (`pending_left`, then snapshot, then `pending_right`); any
    /// unresolved remainder is deferred to a remote remove-by-value at
    /// synchronize time. A deferred remainder replays *after* the pending
    /// pushes, so interleavings of push and remove across the local/remote
    /// boundary are not guaranteed to match a single-store list.
    ///
    /// Quirk, kept from the documented behavior: a non-positive `count`
    /// behaves exactly like `count == 1`, not "remove none".
    pub fn remove_value(&mut self, value: &str, count: i64) {
        let mut remaining = if count < 1 { 1 } else { count as usize };

        while remaining > 0 {
            match self.pending_left.iter().position(|v| v == value) {
                Some(idx) => {
                    self.pending_left.remove(idx);
                    remaining -= 1;
                }
                None => break,
            }
        }
        if remaining > 0 {
            if let Some(snapshot) = self.snapshot.as_mut() {
                remaining -= drain_matches(snapshot, value, remaining);
            }
        }
        if remaining > 0 {
            remaining -= drain_matches(&mut self.pending_right, value, remaining);
        }
        if remaining > 0 {
            self.pending_removals.push((value.to_string(), remaining));
        }
    }

    // ==================== Pops ====================

    /// Remove and return the head of the logical list.
    ///
    /// Checked in priority order: `pending_left` front, snapshot front
    /// (present and non-empty), one remote pop (blocking fallback), then
    /// `pending_right` front. `None` once all are exhausted.
    pub fn pop_left(&mut self) -> Result<Option<String>, CacheError> {
        if let Some(value) = self.pending_left.pop_front() {
            return Ok(Some(value));
        }
        if let Some(snapshot) = self.snapshot.as_mut() {
            if !snapshot.is_empty() {
                return Ok(Some(snapshot.remove(0)));
            }
        }
        if let Some(value) = self.store.pop_left(&self.key)? {
            return Ok(Some(value));
        }
        if !self.pending_right.is_empty() {
            return Ok(Some(self.pending_right.remove(0)));
        }
        Ok(None)
    }

    /// Remove and return the tail of the logical list.
    ///
    /// Symmetric to [`ListOverlay::pop_left`]: `pending_right` back,
    /// snapshot back, one remote pop, then `pending_left` back.
    pub fn pop_right(&mut self) -> Result<Option<String>, CacheError> {
        if let Some(value) = self.pending_right.pop() {
            return Ok(Some(value));
        }
        if let Some(snapshot) = self.snapshot.as_mut() {
            if let Some(value) = snapshot.pop() {
                return Ok(Some(value));
            }
        }
        if let Some(value) = self.store.pop_right(&self.key)? {
            return Ok(Some(value));
        }
        Ok(self.pending_left.pop_back())
    }

    // ==================== Synchronize ====================

    /// Flush buffered operations to the remote store.
    ///
    /// Replay order is fixed regardless of local call order:
    /// 1. if a snapshot is present, delete the remote key and right-push
    ///    every snapshot element in order (the snapshot replaces the entire
    ///    remote list);
    /// 2. replay `pending_left` in reverse buffer order via remote prepends,
    ///    so the final remote head order matches the logical order;
    /// 3. replay `pending_right` in buffer order via remote appends;
    /// 4. replay each `pending_removals` entry as a remote
    ///    remove-by-value-and-count.
    ///
    /// Afterwards the three pending buffers are cleared. A snapshot is
    /// retained, folded together with the buffers it was flushed alongside,
    /// so it mirrors the remote list this call just produced; the next
    /// synchronize rewrites the remote list from it again.
    pub fn synchronize(&mut self) -> Result<(), CacheError> {
        debug!(
            key = self.key.as_str(),
            snapshot = self.snapshot.as_ref().map(Vec::len).unwrap_or(0),
            materialized = self.snapshot.is_some(),
            left = self.pending_left.len(),
            right = self.pending_right.len(),
            removals = self.pending_removals.len(),
            "replaying list overlay"
        );

        if let Some(snapshot) = &self.snapshot {
            self.store.delete(&self.key)?;
            for value in snapshot {
                self.store.push_right(&self.key, value)?;
            }
        }
        for value in self.pending_left.iter().rev() {
            self.store.push_left(&self.key, value)?;
        }
        for value in &self.pending_right {
            self.store.push_right(&self.key, value)?;
        }
        for (value, count) in &self.pending_removals {
            self.store.remove_by_value(&self.key, value, *count)?;
        }

        // Fold the flushed buffers into the retained snapshot so it keeps
        // mirroring the remote list exactly.
        if let Some(snapshot) = self.snapshot.as_mut() {
            let mut merged: Vec<String> = self.pending_left.drain(..).collect();
            merged.append(snapshot);
            merged.append(&mut self.pending_right);
            for (value, count) in self.pending_removals.drain(..) {
                drain_matches(&mut merged, &value, count);
            }
            *snapshot = merged;
        }
        self.pending_left.clear();
        self.pending_right.clear();
        self.pending_removals.clear();
        Ok(())
    }
}
