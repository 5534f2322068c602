//! The Chunk type - a sealed region of a builder's logical text.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// A sealed, immutable region of a backing array.
///
/// Holds `count` meaningful units at the front of `storage`, which sit at
/// logical position `offset` of the owning builder. Fields cannot change
/// after construction; a chunk at another offset is a new chunk.
///
/// # Example
///
/// ```
/// use chunkstr::Chunk;
///
/// let chunk = Chunk::new(b"hello....".to_vec().into_boxed_slice(), 5, 10);
///
/// assert_eq!(chunk.span(), b"hello");
/// assert_eq!(chunk.range(), 10..15);
/// ```
///
/// Only the first `count` units are ever readable; the backing array cannot
/// be taken out:
///
/// ```compile_fail
/// use chunkstr::Chunk;
///
/// let chunk = Chunk::new(b"hi-stale".to_vec().into_boxed_slice(), 2, 0);
/// let _whole = chunk.into_storage();
/// ```
#[derive(Clone)]
pub struct Chunk {
    storage: Box<[u8]>,
    count: usize,
    offset: usize,
}

impl Chunk {
    /// Creates a chunk over the first `count` units of `storage`.
    ///
    /// `count` is clamped to the storage length.
    pub fn new(storage: Box<[u8]>, count: usize, offset: usize) -> Self {
        let count = count.min(storage.len());
        Self {
            storage,
            count,
            offset,
        }
    }

    /// Returns the meaningful units of this chunk.
    pub fn span(&self) -> &[u8] {
        &self.storage[..self.count]
    }

    /// Returns the number of meaningful units.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the chunk holds no units.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the logical start position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the logical end position (exclusive).
    pub fn end(&self) -> usize {
        self.offset + self.count
    }

    /// Returns the chunk as a logical range.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Returns true if `next` starts exactly where this chunk ends.
    pub fn is_followed_by(&self, next: &Chunk) -> bool {
        next.offset == self.end()
    }

    /// Length of the backing array, including unused tail units.
    pub fn storage_len(&self) -> usize {
        self.storage.len()
    }

    /// Returns the units as text.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(self.span()).into_owned()
    }

    /// Consumes the chunk and returns its backing array.
    ///
    /// Units past `count` may hold text left by a previous owner of a pooled
    /// array, so the whole array never leaves the crate.
    pub(crate) fn into_storage(self) -> Box<[u8]> {
        self.storage
    }
}

impl PartialEq for Chunk {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.span() == other.span()
    }
}

impl Eq for Chunk {}

impl Hash for Chunk {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.span());
        state.write_usize(self.count);
        state.write_usize(self.offset);
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("span", &self.span())
            .field("offset", &self.offset)
            .finish()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} units @ {})", self.count, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn chunk(data: &[u8], capacity: usize, offset: usize) -> Chunk {
        let mut storage = vec![0u8; capacity];
        storage[..data.len()].copy_from_slice(data);
        Chunk::new(storage.into_boxed_slice(), data.len(), offset)
    }

    fn hash_of(chunk: &Chunk) -> u64 {
        let mut hasher = DefaultHasher::new();
        chunk.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_span_ignores_tail() {
        let c = chunk(b"abc", 16, 0);
        assert_eq!(c.span(), b"abc");
        assert_eq!(c.len(), 3);
        assert_eq!(c.storage_len(), 16);
    }

    #[test]
    fn test_count_is_clamped() {
        let c = Chunk::new(vec![b'x'; 4].into_boxed_slice(), 10, 0);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_empty() {
        let c = chunk(b"", 16, 0);
        assert!(c.is_empty());
        assert_eq!(c.to_text(), "");
    }

    #[test]
    fn test_range() {
        let c = chunk(b"hello", 8, 100);
        assert_eq!(c.offset(), 100);
        assert_eq!(c.end(), 105);
        assert_eq!(c.range(), 100..105);
    }

    #[test]
    fn test_adjacency() {
        let a = chunk(b"hello", 8, 0);
        let b = chunk(b"world", 8, 5);
        let c = chunk(b"!", 8, 11);
        assert!(a.is_followed_by(&b));
        assert!(!b.is_followed_by(&c));
    }

    #[test]
    fn test_equality_ignores_storage_tail() {
        let a = chunk(b"same", 4, 3);
        let b = chunk(b"same", 32, 3);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_equality_depends_on_offset() {
        let a = chunk(b"same", 8, 0);
        let b = chunk(b"same", 8, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_to_text_and_display() {
        let c = chunk(b"hello", 8, 100);
        assert_eq!(c.to_text(), "hello");
        let s = format!("{}", c);
        assert!(s.contains("5 units"));
        assert!(s.contains("@ 100"));
    }

    #[test]
    fn test_into_storage() {
        let c = chunk(b"ab", 16, 0);
        assert_eq!(c.into_storage().len(), 16);
    }

    #[test]
    fn test_stale_tail_not_exposed() {
        let c = Chunk::new(b"hiSECRET".to_vec().into_boxed_slice(), 2, 0);
        let copy = c.clone();
        assert_eq!(copy.span(), b"hi");
        assert_eq!(copy.to_text(), "hi");
        assert!(!format!("{:?}", copy).contains("83"));
        assert_eq!(format!("{:?}", copy), "Chunk { span: [104, 105], offset: 0 }");
    }
}
