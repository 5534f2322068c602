//! Configuration for builders and pools.
//!
//! - [`BuilderConfig`] - Initial capacity and single-step growth cap
//! - [`PoolConfig`] - Number of size classes and free-list depth
//!
//! # Example
//!
//! ```
//! use chunkstr::{BuilderConfig, PoolConfig};
//!
//! let config = BuilderConfig::new(64, 4096)?;
//! assert_eq!(config.initial_capacity(), 64);
//!
//! let pool = PoolConfig::default().with_class_count(8);
//! pool.validate()?;
//! # Ok::<(), chunkstr::BufferError>(())
//! ```

use crate::error::BufferError;

/// Default capacity of a fresh active region, in units.
pub const DEFAULT_CAPACITY: usize = 16;

/// Default upper bound of the length-proportional part of a growth step.
pub const DEFAULT_GROWTH_CAP: usize = 8000;

/// Default number of size classes (16 units up to 1 Mi units).
pub const DEFAULT_CLASS_COUNT: usize = 17;

/// Smallest class length; class `i` holds arrays of `MIN_CLASS_LEN << i` units.
pub const MIN_CLASS_LEN: usize = 16;

/// Largest accepted class count (class lengths stay below 2^32).
pub const MAX_CLASS_COUNT: usize = 27;

/// Free-list depth per core when none is configured.
const CACHED_PER_CORE: usize = 5;

/// Configuration for a [`StrBuilder`](crate::StrBuilder).
///
/// When the active region cannot hold an append of `extra` units, the next
/// region gets `max(extra, min(len, growth_cap))` units, so growth is
/// proportional to the logical length but never larger than `growth_cap`
/// unless a single append needs more.
///
/// # Example
///
/// ```
/// use chunkstr::BuilderConfig;
///
/// let config = BuilderConfig::default()
///     .with_initial_capacity(256)
///     .with_growth_cap(1024);
/// assert_eq!(config.growth_cap(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuilderConfig {
    initial_capacity: usize,
    growth_cap: usize,
}

impl BuilderConfig {
    /// Creates a new configuration.
    ///
    /// An `initial_capacity` of zero is replaced by [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if `growth_cap` is zero.
    pub fn new(initial_capacity: usize, growth_cap: usize) -> Result<Self, BufferError> {
        let config = Self::default()
            .with_initial_capacity(initial_capacity)
            .with_growth_cap(growth_cap);
        config.validate()?;
        Ok(config)
    }

    /// Sets the capacity of the first and every post-`clear` active region.
    ///
    /// Zero selects [`DEFAULT_CAPACITY`].
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = normalize_capacity(capacity);
        self
    }

    /// Sets the growth cap.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`BuilderConfig::validate`] to check it.
    pub fn with_growth_cap(mut self, cap: usize) -> Self {
        self.growth_cap = cap;
        self
    }

    /// Returns the initial capacity.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the growth cap.
    pub fn growth_cap(&self) -> usize {
        self.growth_cap
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.growth_cap == 0 {
            return Err(BufferError::InvalidConfig {
                message: "growth_cap must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            growth_cap: DEFAULT_GROWTH_CAP,
        }
    }
}

/// Non-positive capacity hints fall back to the default.
pub(crate) fn normalize_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        DEFAULT_CAPACITY
    } else {
        capacity
    }
}

/// Configuration for a [`SizeClassPool`](crate::SizeClassPool).
///
/// Class `i` serves arrays of exactly `16 << i` units. Each class keeps at
/// most `max_cached_per_class` arrays on its free list; arrays returned to a
/// full class are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    class_count: usize,
    max_cached_per_class: usize,
}

impl PoolConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if `class_count` is zero or
    /// above [`MAX_CLASS_COUNT`], or if `max_cached_per_class` is zero.
    pub fn new(class_count: usize, max_cached_per_class: usize) -> Result<Self, BufferError> {
        let config = Self {
            class_count,
            max_cached_per_class,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the number of size classes.
    pub fn with_class_count(mut self, count: usize) -> Self {
        self.class_count = count;
        self
    }

    /// Sets the free-list depth of every class.
    pub fn with_max_cached_per_class(mut self, max: usize) -> Self {
        self.max_cached_per_class = max;
        self
    }

    /// Returns the number of size classes.
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Returns the free-list depth of every class.
    pub fn max_cached_per_class(&self) -> usize {
        self.max_cached_per_class
    }

    /// Length of the largest class.
    pub fn max_class_len(&self) -> usize {
        MIN_CLASS_LEN << (self.class_count.max(1) - 1)
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkstr::PoolConfig;
    ///
    /// assert!(PoolConfig::default().with_class_count(0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.class_count == 0 {
            return Err(BufferError::InvalidConfig {
                message: "class_count must be non-zero",
            });
        }
        if self.class_count > MAX_CLASS_COUNT {
            return Err(BufferError::InvalidConfig {
                message: "class_count exceeds the largest supported class",
            });
        }
        if self.max_cached_per_class == 0 {
            return Err(BufferError::InvalidConfig {
                message: "max_cached_per_class must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
        Self {
            class_count: DEFAULT_CLASS_COUNT,
            max_cached_per_class: cores * CACHED_PER_CORE,
        }
    }
}
