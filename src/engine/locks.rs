//! Per-key serialization of check-then-act sequences.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

/// A set of mutexes, one per key, created on first use and dropped once no
/// caller holds or waits on them.
///
/// Holding the lock for a key across aggregate, validate and post keeps two
/// requests against the same balance from both passing validation on the
/// same snapshot.
#[derive(Debug)]
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    /// Creates an empty lock set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys with a live lock.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no key has a live lock.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` while holding the lock for `key`.
    pub fn with_lock<T>(&self, key: &K, f: impl FnOnce() -> T) -> T {
        self.with_sorted_locks(vec![key], f)
    }

    /// Runs `f` while holding the locks for every key, acquired in sorted
    /// order so overlapping callers cannot deadlock.
    pub fn with_locks<T>(&self, keys: &[K], f: impl FnOnce() -> T) -> T
    where
        K: Ord,
    {
        let mut sorted: Vec<&K> = keys.iter().collect();
        sorted.sort();
        sorted.dedup();
        self.with_sorted_locks(sorted, f)
    }

    fn with_sorted_locks<T>(&self, keys: Vec<&K>, f: impl FnOnce() -> T) -> T {
        let locks: Vec<Arc<Mutex<()>>> = {
            let mut map = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            keys.iter()
                .map(|k| Arc::clone(map.entry((*k).clone()).or_default()))
                .collect()
        };

        let result = {
            let _guards: Vec<_> = locks
                .iter()
                .map(|l| l.lock().unwrap_or_else(PoisonError::into_inner))
                .collect();
            f()
        };

        self.release(&keys, &locks);
        result
    }

    /// Drops the map's entry for every key nobody else has cloned. Clones
    /// are only taken under the map lock, so the count cannot rise while
    /// it is checked here.
    fn release(&self, keys: &[&K], locks: &[Arc<Mutex<()>>]) {
        let mut map = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, lock) in keys.iter().zip(locks) {
            let unused = map
                .get(*key)
                .is_some_and(|held| Arc::ptr_eq(held, lock) && Arc::strong_count(lock) == 2);
            if unused {
                map.remove(*key);
            }
        }
    }
}
