//! Positional reads.

use std::ops::Index;

use crate::error::BufferError;

use super::engine::StrBuilder;

impl StrBuilder {
    /// Returns the unit at logical position `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.unit_ref(index).copied()
    }

    /// Returns the unit at logical position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkstr::{BufferError, StrBuilder};
    ///
    /// let sb = StrBuilder::from("Hi");
    /// assert_eq!(sb.unit_at(1), Ok(b'i'));
    /// assert_eq!(sb.unit_at(2), Err(BufferError::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn unit_at(&self, index: usize) -> Result<u8, BufferError> {
        self.get(index).ok_or(BufferError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    fn unit_ref(&self, index: usize) -> Option<&u8> {
        if index >= self.len() {
            return None;
        }
        if index >= self.sealed_len {
            return self.active.get(index - self.sealed_len);
        }
        let at = self.sealed.partition_point(|chunk| chunk.end() <= index);
        let chunk = self.sealed.get(at)?;
        chunk.span().get(index - chunk.offset())
    }
}

impl Index<usize> for StrBuilder {
    type Output = u8;

    /// # Panics
    ///
    /// Panics if `index >= len()`, like slice indexing. Use
    /// [`StrBuilder::unit_at`] for a checked read.
    fn index(&self, index: usize) -> &u8 {
        match self.unit_ref(index) {
            Some(unit) => unit,
            None => panic!("index out of range: {} (len {})", index, self.len()),
        }
    }
}
