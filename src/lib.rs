//! chunkstr
//!
//! Chunked, pooled, append-optimized string building for Rust.
//!
//! `chunkstr` builds text in a run of fixed chunks plus one active region
//! instead of one contiguous buffer. It is designed for hot paths that
//! assemble lots of small pieces:
//!
//! - log and message formatting
//! - templating and code generation
//! - protocol text assembly
//!
//! The crate intentionally:
//! - does NOT copy on growth (full regions are sealed in place)
//! - does NOT allocate when appending integers, booleans or characters
//! - does NOT share a builder across threads (the pool is shared instead)
//!
//! Backing arrays are rented from a [`SizeClassPool`] of power-of-two size
//! classes and returned to it on [`StrBuilder::clear`] and on drop.
//!
//! # Example
//!
//! ```
//! use chunkstr::StrBuilder;
//!
//! let mut sb = StrBuilder::new();
//! sb.append("PI=").append(3.14).append(true).append(i16::MAX);
//! assert_eq!(sb.to_text(), "PI=3.14True32767");
//!
//! sb.replace("True", " ");
//! assert_eq!(sb, "PI=3.14 32767");
//! ```
//!
//! # Private pools
//!
//! ```
//! use std::sync::Arc;
//! use chunkstr::{BuilderConfig, PoolConfig, SizeClassPool, StrBuilder};
//!
//! # fn main() -> Result<(), chunkstr::BufferError> {
//! let pool = Arc::new(SizeClassPool::with_config(PoolConfig::new(10, 8)?)?);
//! {
//!     let mut sb = StrBuilder::with_pool(BuilderConfig::default(), Arc::clone(&pool));
//!     sb.append("rented");
//! }
//! assert!(pool.stats().returned >= 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod chunk;
mod config;
mod encode;
mod error;
mod pool;

//
// Public surface
//

pub use builder::{Chunks, StrBuilder, Units};
pub use chunk::Chunk;
pub use config::{
    BuilderConfig, DEFAULT_CAPACITY, DEFAULT_CLASS_COUNT, DEFAULT_GROWTH_CAP, MAX_CLASS_COUNT,
    MIN_CLASS_LEN, PoolConfig,
};
pub use encode::{Append, LINE_TERMINATOR, MAX_DIGITS, digit_count};
pub use error::BufferError;
pub use pool::{PoolStats, SizeClassPool};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct ReadmeDoctests;
