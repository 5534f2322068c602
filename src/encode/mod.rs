//! Primitive-to-text encoding.
//!
//! - [`Append`] - Values that render themselves into a builder
//! - [`digit_count`] - Constant-time decimal width of a `u64`
//! - [`LINE_TERMINATOR`] - Platform line ending used by `append_line`
//!
//! Integers are written by reserving exactly their width, then filling the
//! digits back to front in their final positions, so no reversal pass and no
//! intermediate `String` is needed.

mod append;
mod digits;

pub use append::Append;
pub use digits::{MAX_DIGITS, digit_count};

pub(crate) use digits::{bool_text, write_digits};

/// Line terminator written by `append_line`.
#[cfg(windows)]
pub const LINE_TERMINATOR: &str = "\r\n";

/// Line terminator written by `append_line`.
#[cfg(not(windows))]
pub const LINE_TERMINATOR: &str = "\n";
