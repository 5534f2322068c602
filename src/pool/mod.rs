//! Size-classed array pool.
//!
//! - [`SizeClassPool`] - Rents and takes back fixed-length arrays
//! - [`PoolStats`] - Counter snapshot
//!
//! Arrays are bucketed into power-of-two classes of `16 << i` units. Each
//! class is an independent bounded free list behind its own spin lock, so
//! callers only contend with others renting the same class. Nothing in the
//! pool blocks: an empty class allocates and a full class drops the array.
//!
//! # Example
//!
//! ```
//! use chunkstr::SizeClassPool;
//!
//! let pool = SizeClassPool::<u8>::new();
//! let array = pool.rent(20);
//! assert_eq!(array.len(), 32);
//!
//! pool.give_back(array)?;
//! assert_eq!(pool.stats().cached, 1);
//! # Ok::<(), chunkstr::BufferError>(())
//! ```

mod class;
mod stats;

pub use stats::PoolStats;

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::config::{MIN_CLASS_LEN, PoolConfig};
use crate::error::BufferError;

use class::SizeClass;
use stats::PoolMetrics;

/// A pool of reusable fixed-length arrays.
///
/// `rent` hands out an array at least as long as requested; `give_back`
/// consumes it, so the caller cannot keep using an array the pool may hand
/// to someone else.
pub struct SizeClassPool<T> {
    classes: Box<[SizeClass<T>]>,
    metrics: PoolMetrics,
}

impl<T: Copy + Default> SizeClassPool<T> {
    /// Creates a pool with the default configuration.
    pub fn new() -> Self {
        Self::build(PoolConfig::default())
    }

    /// Creates a pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn with_config(config: PoolConfig) -> Result<Self, BufferError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PoolConfig) -> Self {
        let classes = (0..config.class_count())
            .map(|index| SizeClass::new(MIN_CLASS_LEN << index, config.max_cached_per_class()))
            .collect();
        Self {
            classes,
            metrics: PoolMetrics::default(),
        }
    }

    /// Rents an array of at least `min_size` units.
    ///
    /// Zero yields an empty array without touching any class. Sizes above
    /// the largest class get a bespoke array of exactly `min_size` units
    /// that the pool will not take back.
    pub fn rent(&self, min_size: usize) -> Box<[T]> {
        if min_size == 0 {
            return Box::default();
        }

        let index = class_index(min_size);
        let Some(class) = self.classes.get(index) else {
            tracing::debug!(min_size, "rent above largest size class");
            self.metrics.miss();
            return vec![T::default(); min_size].into_boxed_slice();
        };

        // The next class up is an acceptable fallback before allocating.
        for candidate in &self.classes[index..self.classes.len().min(index + 2)] {
            if let Some(array) = candidate.pop() {
                self.metrics.hit();
                return array;
            }
        }

        self.metrics.miss();
        class.allocate()
    }

    /// Hands `array` back to its size class.
    ///
    /// Empty arrays are ignored. An array whose class is full is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::BufferNotFromPool`] if the array's length is
    /// not exactly the length of one of this pool's classes.
    pub fn give_back(&self, array: Box<[T]>) -> Result<(), BufferError> {
        let len = array.len();
        if len == 0 {
            return Ok(());
        }

        let class = self
            .class_for_len(len)
            .ok_or(BufferError::BufferNotFromPool { len })?;

        match class.push(array) {
            Ok(()) => self.metrics.returned(),
            Err(dropped) => {
                tracing::debug!(len, "size class full, dropping array");
                self.metrics.discarded();
                drop(dropped);
            }
        }
        Ok(())
    }

    /// Whether an array of `len` units would be accepted by [`give_back`](Self::give_back).
    pub fn accepts(&self, len: usize) -> bool {
        len == 0 || self.class_for_len(len).is_some()
    }

    fn class_for_len(&self, len: usize) -> Option<&SizeClass<T>> {
        self.classes
            .get(class_index(len))
            .filter(|class| class.len() == len)
    }

    /// Number of size classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Array length served by class `index`.
    pub fn class_len(&self, index: usize) -> Option<usize> {
        self.classes.get(index).map(SizeClass::len)
    }

    /// Returns a snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        let cached = self.classes.iter().map(SizeClass::cached).sum();
        self.metrics.snapshot(cached)
    }

    /// Drops every cached array, returning how many were released.
    pub fn trim(&self) -> usize {
        self.classes.iter().map(SizeClass::drain).sum()
    }
}

impl SizeClassPool<u8> {
    /// Process-wide pool used by builders that were not given one.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<SizeClassPool<u8>>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(SizeClassPool::new())))
    }
}

impl<T: Copy + Default> Default for SizeClassPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default> fmt::Debug for SizeClassPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeClassPool")
            .field("class_count", &self.classes.len())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Index of the smallest class whose length is `>= len`.
///
/// Classes grow as `16 << i`, so the index is the bit length of
/// `(len - 1) >> 4`. `len` must be non-zero.
#[inline]
pub(crate) fn class_index(len: usize) -> usize {
    debug_assert!(len > 0);
    let bucket = (len - 1) >> 4;
    (usize::BITS - bucket.leading_zeros()) as usize
}
