use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tracing::trace;

use crate::error::Result;
use crate::math::Vector3;

/// Counters reported by an engine's position cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoized path positions, keyed on the exact bit pattern of `t`.
///
/// Owned by one engine and flushed whenever its path or bounds change. Once
/// `capacity` entries are stored the whole map is dropped and refilled.
#[derive(Debug)]
pub(crate) struct PositionCache {
    entries: RefCell<HashMap<u64, Vector3>>,
    capacity: usize,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl PositionCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            capacity: capacity.max(1),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Returns the cached position for `t`, computing and storing it on a miss.
    ///
    /// Failed evaluations are not cached.
    pub(crate) fn get_or_try_insert<F>(&self, t: f64, evaluate: F) -> Result<Vector3>
    where
        F: FnOnce(f64) -> Result<Vector3>,
    {
        let key = Self::key(t);
        if let Some(position) = self.entries.borrow().get(&key) {
            self.hits.set(self.hits.get() + 1);
            trace!(t, "position cache hit");
            return Ok(*position);
        }

        self.misses.set(self.misses.get() + 1);
        trace!(t, "position cache miss");
        let position = evaluate(t)?;

        let mut entries = self.entries.borrow_mut();
        if entries.len() >= self.capacity {
            trace!(capacity = self.capacity, "position cache full, flushing");
            entries.clear();
        }
        entries.insert(key, position);
        Ok(position)
    }

    pub(crate) fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.hits.set(0);
        self.misses.set(0);
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            entries: self.entries.borrow().len(),
        }
    }

    /// `-0.0` and `0.0` share a key.
    fn key(t: f64) -> u64 {
        if t == 0.0 {
            0.0_f64.to_bits()
        } else {
            t.to_bits()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PathError;

    #[test]
    fn hit_after_miss() {
        let cache = PositionCache::new(8);
        let calls = Cell::new(0);
        let eval = |t: f64| {
            calls.set(calls.get() + 1);
            Ok(Vector3::new(t, 0.0, 0.0))
        };
        cache.get_or_try_insert(1.0, eval).unwrap();
        cache.get_or_try_insert(1.0, eval).unwrap();
        cache.get_or_try_insert(-0.0, eval).unwrap();
        cache.get_or_try_insert(0.0, eval).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 2,
                misses: 2,
                entries: 2
            }
        );
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = PositionCache::new(8);
        let failed = cache.get_or_try_insert(1.0, |_| {
            Err(PathError::Evaluation("boom".into()).into())
        });
        assert!(failed.is_err());
        assert_eq!(cache.stats().entries, 0);
        let ok = cache.get_or_try_insert(1.0, |_| Ok(Vector3::x())).unwrap();
        assert_eq!(ok, Vector3::x());
    }

    #[test]
    fn flushes_at_capacity() {
        let cache = PositionCache::new(2);
        for t in [1.0, 2.0, 3.0] {
            cache.get_or_try_insert(t, |_| Ok(Vector3::zeros())).unwrap();
        }
        assert_eq!(cache.stats().entries, 1);
    }

    #[test]
    fn clear_resets_everything() {
        let cache = PositionCache::new(4);
        cache.get_or_try_insert(1.0, |_| Ok(Vector3::zeros())).unwrap();
        cache.clear();
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
