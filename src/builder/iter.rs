//! Iterators over a builder's storage.

use std::iter::FusedIterator;
use std::slice;

use crate::chunk::Chunk;

/// Iterator over a builder's sealed chunks, in offset order.
///
/// Created by [`StrBuilder::chunks`](crate::StrBuilder::chunks).
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    inner: slice::Iter<'a, Chunk>,
}

impl<'a> Chunks<'a> {
    pub(super) fn new(sealed: &'a [Chunk]) -> Self {
        Self {
            inner: sealed.iter(),
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Chunks<'_> {}

impl FusedIterator for Chunks<'_> {}

/// Iterator over every unit of a builder's logical text.
///
/// Walks the sealed chunks, then the filled part of the active region.
/// Created by [`StrBuilder::units`](crate::StrBuilder::units).
#[derive(Debug, Clone)]
pub struct Units<'a> {
    chunks: slice::Iter<'a, Chunk>,
    active: Option<&'a [u8]>,
    current: slice::Iter<'a, u8>,
    remaining: usize,
}

impl<'a> Units<'a> {
    pub(super) fn new(sealed: &'a [Chunk], active: &'a [u8], len: usize) -> Self {
        Self {
            chunks: sealed.iter(),
            active: Some(active),
            current: <&[u8]>::default().iter(),
            remaining: len,
        }
    }
}

impl Iterator for Units<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        loop {
            if let Some(&unit) = self.current.next() {
                self.remaining -= 1;
                return Some(unit);
            }
            if let Some(chunk) = self.chunks.next() {
                self.current = chunk.span().iter();
            } else if let Some(active) = self.active.take() {
                self.current = active.iter();
            } else {
                return None;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Units<'_> {}

impl FusedIterator for Units<'_> {}
