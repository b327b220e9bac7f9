//! Resident cache records and the handles that reference them.

use std::ops::Deref;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// One resident entry of the tile cache: the loaded payload plus the
/// count of handles currently referencing it.
///
/// The payload is written once by the load operation and never mutated
/// afterwards; `owners` is the only mutable state and is atomic.
#[derive(Debug)]
pub struct TileRecord<P> {
    data: P,
    owners: AtomicU32,
}

impl<P> TileRecord<P> {
    /// Create a record with no owners.
    pub(crate) fn new(data: P) -> Self {
        Self {
            data,
            owners: AtomicU32::new(0),
        }
    }

    /// The loaded payload.
    pub fn data(&self) -> &P {
        &self.data
    }

    /// Number of live handles referencing this record.
    ///
    /// Uses acquire ordering so a zero observed here happens-after the
    /// releasing decrement of the last dropped handle.
    pub fn owners(&self) -> u32 {
        self.owners.load(Ordering::Acquire)
    }

    /// Increment the owner count.
    ///
    /// Only called while the cache lock is held (handles are created
    /// exclusively by acquire), so a relaxed increment cannot race the
    /// eviction check, which runs under the same lock.
    pub(crate) fn add_owner(&self) {
        self.owners.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrement the owner count with release ordering.
    pub(crate) fn remove_owner(&self) {
        let previous = self.owners.fetch_sub(1, Ordering::Release);
        debug_assert!(previous > 0, "owner count underflow");
    }
}

/// RAII guard over a resident tile record.
///
/// Holding a handle keeps the record's owner count positive, which
/// blocks eviction; dropping it releases the reference. Handles are
/// deliberately not cloneable: a thread that needs another reference
/// acquires the key again, so every owner increment happens under the
/// cache lock.
#[derive(Debug)]
pub struct TileHandle<P> {
    record: Arc<TileRecord<P>>,
}

impl<P> TileHandle<P> {
    /// Wrap a record, taking one owner reference.
    pub(crate) fn new(record: Arc<TileRecord<P>>) -> Self {
        record.add_owner();
        Self { record }
    }

    /// Current owner count of the underlying record (this handle
    /// included).
    pub fn owners(&self) -> u32 {
        self.record.owners()
    }
}

impl<P> Deref for TileHandle<P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.record.data()
    }
}

impl<P> Drop for TileHandle<P> {
    fn drop(&mut self) {
        self.record.remove_owner();
    }
}
