//! Chunk types.
//!
//! - [`Chunk`] - Sealed region of a builder's text with its logical offset

mod data;

pub use data::Chunk;
