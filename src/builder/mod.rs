//! The chunked string builder.
//!
//! - [`StrBuilder`] - Append, grow, replace, materialize
//! - [`Chunks`] / [`Units`] - Views over its storage

mod access;
mod engine;
mod impls;
mod iter;
mod replace;

pub use engine::StrBuilder;
pub use iter::{Chunks, Units};
