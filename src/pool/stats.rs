//! Pool counters.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time snapshot of a pool's counters.
///
/// Counters are updated with relaxed atomics, so a snapshot taken while
/// other threads rent and return is only approximately consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Rents served from a free list.
    pub hits: u64,
    /// Rents that had to allocate (including bespoke over-range sizes).
    pub misses: u64,
    /// Arrays accepted back onto a free list.
    pub returned: u64,
    /// Arrays dropped because their class's free list was full.
    pub discarded: u64,
    /// Arrays currently resident across all free lists.
    pub cached: usize,
}

impl PoolStats {
    /// Fraction of rents served without allocating, `0.0` before any rent.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PoolStats(hits={}, misses={}, returned={}, discarded={}, cached={})",
            self.hits, self.misses, self.returned, self.discarded, self.cached
        )
    }
}

#[derive(Debug, Default)]
pub(crate) struct PoolMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    returned: AtomicU64,
    discarded: AtomicU64,
}

impl PoolMetrics {
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn returned(&self) {
        self.returned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn discarded(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, cached: usize) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            cached,
        }
    }
}
