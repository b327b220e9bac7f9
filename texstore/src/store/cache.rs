//! Bounded, concurrency-safe cache with reference-counted eviction.

use crate::store::record::{TileHandle, TileRecord};
use crate::store::size::format_bytes;
use crate::store::stats::{StoreStats, StoreStatistics};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

/// Load/unload policy plugged into a [`TileCache`].
///
/// The swapper owns all memory accounting: `load` adds the payload's
/// footprint, `unload` subtracts it, and `over_budget` compares the
/// running total against the configured budget. The cache calls every
/// method with its lock held, so implementations see strictly
/// serialized loads and unloads and need no synchronization of their
/// own.
pub trait Swapper {
    /// Key identifying a cacheable payload.
    type Key: Copy + Eq + Hash;
    /// The cached payload.
    type Payload;
    /// Error produced by a failed load.
    type Error;

    /// Produce the payload for `key`, accounting for its footprint.
    fn load(&mut self, key: &Self::Key) -> Result<Self::Payload, Self::Error>;

    /// Release the record's payload and subtract its footprint.
    ///
    /// Must refuse (return `false`) while the record has live owners;
    /// the cache then skips the record and tries the next candidate.
    fn unload(&mut self, key: &Self::Key, record: &TileRecord<Self::Payload>) -> bool;

    /// Total footprint of currently loaded payloads in bytes.
    fn memory_size(&self) -> usize;

    /// Highest footprint observed since construction.
    fn peak_memory_size(&self) -> usize;

    /// Whether the current footprint exceeds the configured budget.
    fn over_budget(&self) -> bool;
}

/// A resident record plus its logical access stamp for LRU ordering.
struct Resident<P> {
    record: Arc<TileRecord<P>>,
    last_used: u64,
}

struct CacheInner<S: Swapper> {
    swapper: S,
    records: HashMap<S::Key, Resident<S::Payload>>,
    /// Logical clock advanced on every acquire; records carry the stamp
    /// of their most recent access.
    clock: u64,
    stats: StoreStats,
}

/// Memory-bounded key to record cache with reference counting.
///
/// All map access, loads, unloads, and statistics run under one mutex.
/// Holding the lock across the swapper's load is what makes loads
/// single-flight: a second thread acquiring a missing key blocks until
/// the first load finishes, then hits the now-resident record. Handle
/// drops are the one lock-free operation.
///
/// The memory budget is soft. When an insert leaves the swapper over
/// budget the cache walks zero-owner records oldest-first and unloads
/// until it is back under; if every resident record is still referenced
/// the store simply grows, and the overrun is visible in diagnostics
/// only.
pub struct TileCache<S: Swapper> {
    inner: Mutex<CacheInner<S>>,
}

impl<S: Swapper> TileCache<S> {
    /// Create a cache around the given swapper.
    pub fn new(swapper: S) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                swapper,
                records: HashMap::new(),
                clock: 0,
                stats: StoreStats::new(),
            }),
        }
    }

    /// Get a handle to the record for `key`, loading it on a miss.
    ///
    /// The returned handle keeps the record's owner count positive
    /// until dropped. Dropping is the release operation; it never
    /// evicts synchronously.
    ///
    /// # Errors
    ///
    /// Propagates the swapper's load error; the key is left absent.
    pub fn acquire(&self, key: S::Key) -> Result<TileHandle<S::Payload>, S::Error> {
        let mut inner = self.inner.lock().unwrap();
        inner.clock += 1;
        let stamp = inner.clock;

        if let Some(resident) = inner.records.get_mut(&key) {
            resident.last_used = stamp;
            let handle = TileHandle::new(Arc::clone(&resident.record));
            inner.stats.record_hit();
            return Ok(handle);
        }

        inner.stats.record_miss();
        let payload = inner.swapper.load(&key)?;
        let record = Arc::new(TileRecord::new(payload));

        // Hand the caller its reference before eviction runs, so the
        // fresh record can never be selected as a victim.
        let handle = TileHandle::new(Arc::clone(&record));
        inner.records.insert(key, Resident { record, last_used: stamp });

        inner.evict_if_needed();

        Ok(handle)
    }

    /// Whether a record for `key` is currently resident.
    pub fn contains(&self, key: &S::Key) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.records.contains_key(key)
    }

    /// Number of resident records.
    pub fn resident_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.records.len()
    }

    /// Current footprint of resident payloads in bytes.
    pub fn memory_size(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.swapper.memory_size()
    }

    /// Highest footprint observed since construction.
    pub fn peak_memory_size(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.swapper.peak_memory_size()
    }

    /// Take a consistent statistics snapshot.
    pub fn statistics(&self) -> StoreStatistics {
        let inner = self.inner.lock().unwrap();
        StoreStatistics::new(
            &inner.stats,
            inner.records.len(),
            inner.swapper.memory_size(),
            inner.swapper.peak_memory_size(),
        )
    }
}

impl<S: Swapper> CacheInner<S> {
    /// Walk records oldest-first, unloading until back under budget.
    ///
    /// The owners check lives in the swapper's unload, and the cache
    /// lock is held for the whole walk, so a record observed at zero
    /// owners cannot be re-acquired before it is removed.
    fn evict_if_needed(&mut self) {
        if !self.swapper.over_budget() {
            return;
        }

        let mut victims: Vec<(S::Key, u64)> = self
            .records
            .iter()
            .map(|(key, resident)| (*key, resident.last_used))
            .collect();
        victims.sort_by_key(|&(_, stamp)| stamp);

        let mut evicted = 0u64;
        for (key, _) in victims {
            if !self.swapper.over_budget() {
                break;
            }
            let record = match self.records.get(&key) {
                Some(resident) => Arc::clone(&resident.record),
                None => continue,
            };
            if self.swapper.unload(&key, &record) {
                self.records.remove(&key);
                self.stats.record_eviction();
                evicted += 1;
            }
        }

        if evicted > 0 {
            tracing::debug!(
                "tile cache eviction: removed {} records, store size now {}",
                evicted,
                format_bytes(self.swapper.memory_size())
            );
        }
    }
}
