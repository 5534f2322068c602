//! Error types for chunkstr.

use std::fmt;

/// Errors reported by the builder, the pool and configuration validation.
///
/// Every other operation in the crate normalises its input instead of
/// failing, so these are the only conditions a caller has to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A logical position outside `[0, len)` was read.
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The logical length at the time of the read.
        len: usize,
    },

    /// An array handed back to a pool has a length that matches no size class.
    BufferNotFromPool {
        /// Length of the rejected array.
        len: usize,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::IndexOutOfRange { index, len } => {
                write!(f, "index out of range: {} (len {})", index, len)
            }
            BufferError::BufferNotFromPool { len } => {
                write!(f, "buffer not from pool: length {} matches no size class", len)
            }
            BufferError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for BufferError {}
