//! Memoized immutable snapshots.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A memoized immutable derivation of a pure function.
///
/// Holds an optional `Arc<T>` plus an invalidation flag. [`get`]
/// (Self::get) returns the cached value or computes one under an
/// internal mutex, so at most one computation runs per cache instance at
/// any time and callers never observe a partially built value.
///
/// Invalidation is a lock-free flag flip: a mutator holding the lock of
/// the state the supplier reads can invalidate without deadlocking
/// against a concurrent computation. A computation that races an
/// invalidation may store a stale value, but the flag stays set, so the
/// next [`get`](Self::get) recomputes.
///
/// # Example
///
/// ```
/// use strata_engine::SnapshotCache;
///
/// let cache: SnapshotCache<Vec<u32>> = SnapshotCache::new();
/// let v = cache.get(|| vec![1, 2, 3]);
/// assert_eq!(*v, vec![1, 2, 3]);
///
/// // Cached: the supplier is not called again.
/// let again = cache.get(|| unreachable!("cached"));
/// assert_eq!(*again, *v);
///
/// cache.invalidate();
/// let fresh = cache.get(|| vec![4]);
/// assert_eq!(*fresh, vec![4]);
/// ```
#[derive(Debug, Default)]
pub struct SnapshotCache<T> {
    slot: Mutex<Option<Arc<T>>>,
    dirty: AtomicBool,
}

impl<T> SnapshotCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            dirty: AtomicBool::new(false),
        }
    }

    /// Returns the cached value, computing it with `supplier` if absent
    /// or invalidated.
    ///
    /// The supplier must be a pure derivation of the state it reads; it
    /// runs while the cache's internal mutex is held, which is what
    /// bounds computation to at-most-one concurrently.
    pub fn get(&self, supplier: impl FnOnce() -> T) -> Arc<T> {
        let mut slot = self.slot.lock();
        if self.dirty.swap(false, Ordering::SeqCst) {
            *slot = None;
        }
        if let Some(value) = slot.as_ref() {
            return Arc::clone(value);
        }
        let value = Arc::new(supplier());
        *slot = Some(Arc::clone(&value));
        value
    }

    /// Marks the cached value stale. Never blocks.
    pub fn invalidate(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn computes_once_until_invalidated() {
        let calls = AtomicUsize::new(0);
        let cache: SnapshotCache<usize> = SnapshotCache::new();

        let supplier = || calls.fetch_add(1, Ordering::SeqCst) + 1;
        assert_eq!(*cache.get(supplier), 1);
        assert_eq!(*cache.get(supplier), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.invalidate();
        assert_eq!(*cache.get(supplier), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn repeated_invalidation_is_idempotent() {
        let cache: SnapshotCache<u8> = SnapshotCache::new();
        cache.invalidate();
        cache.invalidate();
        assert_eq!(*cache.get(|| 7), 7);
        assert_eq!(*cache.get(|| 8), 7);
    }

    #[test]
    fn snapshots_outlive_invalidation() {
        let cache: SnapshotCache<String> = SnapshotCache::new();
        let first = cache.get(|| "one".to_string());
        cache.invalidate();
        let second = cache.get(|| "two".to_string());
        // The old Arc stays valid for holders that grabbed it.
        assert_eq!(*first, "one");
        assert_eq!(*second, "two");
    }

    #[test]
    fn concurrent_readers_share_one_computation() {
        use std::sync::Arc as StdArc;
        use std::thread;

        let cache = StdArc::new(SnapshotCache::<u64>::new());
        let calls = StdArc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = StdArc::clone(&cache);
                let calls = StdArc::clone(&calls);
                thread::spawn(move || {
                    *cache.get(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        42
                    })
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().expect("reader thread"), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
