//! Core builder - StrBuilder with chunked, pooled storage.
//!
//! The logical text is a run of sealed [`Chunk`]s followed by one active
//! region that receives appends. When an append does not fit, the active
//! region is sealed in place (no copy) and a new one is rented from the
//! pool, sized proportionally to the current length but capped so that one
//! growth step never balloons.
//!
//! # Example
//!
//! ```
//! use chunkstr::StrBuilder;
//!
//! let mut sb = StrBuilder::with_capacity(4);
//! sb.append("Hello").append(", ").append("world").append('!');
//!
//! assert_eq!(sb.len(), 13);
//! assert_eq!(sb.to_text(), "Hello, world!");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::chunk::Chunk;
use crate::config::{BuilderConfig, normalize_capacity};
use crate::encode::{Append, LINE_TERMINATOR, bool_text, digit_count, write_digits};
use crate::pool::SizeClassPool;

use super::iter::{Chunks, Units};

/// An append-optimized, growable string.
///
/// Appending text, characters, booleans and integers never allocates while
/// the active region has room, and growth seals the full region instead of
/// copying it. Backing arrays come from a [`SizeClassPool`] (the process-wide
/// [`SizeClassPool::shared`] pool unless another is given) and go back to it
/// on [`clear`](Self::clear) and on drop.
///
/// A builder is owned by one thread of control; it is `Send` but has no
/// internal synchronisation.
///
/// # Example
///
/// ```
/// use chunkstr::StrBuilder;
///
/// let mut sb = StrBuilder::new();
/// sb.append("ABCabcABCdefgABC");
/// sb.replace("ABC", "123");
///
/// assert_eq!(sb, "123abc123defg123");
/// ```
#[derive(Clone)]
pub struct StrBuilder {
    pub(super) active: Box<[u8]>,
    pub(super) active_pos: usize,
    pub(super) sealed: Vec<Chunk>,
    pub(super) sealed_len: usize,
    pub(super) config: BuilderConfig,
    pub(super) pool: Option<Arc<SizeClassPool<u8>>>,
}

impl StrBuilder {
    /// Creates an empty builder with the default capacity.
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    /// Creates an empty builder whose first region holds at least `capacity` units.
    ///
    /// Zero selects the default capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(BuilderConfig::default().with_initial_capacity(capacity))
    }

    /// Creates an empty builder backed by the shared pool.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self::build(config, Some(SizeClassPool::shared()))
    }

    /// Creates an empty builder that rents from and returns to `pool`.
    pub fn with_pool(config: BuilderConfig, pool: Arc<SizeClassPool<u8>>) -> Self {
        Self::build(config, Some(pool))
    }

    /// Creates an empty builder that allocates its arrays directly.
    ///
    /// Released arrays are simply dropped.
    pub fn unpooled(config: BuilderConfig) -> Self {
        Self::build(config, None)
    }

    /// Creates a builder pre-loaded with `text`.
    ///
    /// The first region is sized to the text, or to the default capacity
    /// when `text` is absent or empty.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkstr::StrBuilder;
    ///
    /// assert_eq!(StrBuilder::from_text(Some("Hello")).to_text(), "Hello");
    /// assert!(StrBuilder::from_text(None).is_empty());
    /// ```
    pub fn from_text(text: Option<&str>) -> Self {
        let text = text.unwrap_or_default();
        let mut builder = Self::with_capacity(text.len());
        builder.append_str(text);
        builder
    }

    fn build(config: BuilderConfig, pool: Option<Arc<SizeClassPool<u8>>>) -> Self {
        let mut builder = Self {
            active: Box::default(),
            active_pos: 0,
            sealed: Vec::new(),
            sealed_len: 0,
            config,
            pool,
        };
        builder.active = builder.rent(normalize_capacity(config.initial_capacity()));
        builder
    }

    /// Returns the logical length in units (bytes of UTF-8).
    #[inline]
    pub fn len(&self) -> usize {
        self.sealed_len + self.active_pos
    }

    /// Returns true if nothing has been appended since creation or the last clear.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the length the builder can reach before the next growth step.
    pub fn capacity(&self) -> usize {
        self.sealed_len + self.active.len()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Returns the pool this builder rents from, if any.
    pub fn pool(&self) -> Option<&Arc<SizeClassPool<u8>>> {
        self.pool.as_ref()
    }

    /// Returns the sealed chunks in offset order.
    ///
    /// The unsealed tail is not included; see [`units`](Self::units) for
    /// the whole text.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(&self.sealed)
    }

    /// Returns every unit of the logical text in order.
    pub fn units(&self) -> Units<'_> {
        Units::new(&self.sealed, self.active_span(), self.len())
    }

    /// Makes room for `extra` more units in the active region.
    ///
    /// If they do not fit, the filled part of the active region is sealed
    /// into a chunk and a region of `max(extra, min(len, growth_cap))` units
    /// is rented to replace it.
    pub fn reserve(&mut self, extra: usize) {
        if self.active_pos + extra <= self.active.len() {
            return;
        }

        let capacity = extra.max(self.len().min(self.config.growth_cap()));
        let fresh = self.rent(capacity);
        let previous = std::mem::replace(&mut self.active, fresh);

        if self.active_pos > 0 {
            let count = std::mem::take(&mut self.active_pos);
            tracing::trace!(offset = self.sealed_len, count, capacity, "sealing active region");
            self.sealed.push(Chunk::new(previous, count, self.sealed_len));
            self.sealed_len += count;
        } else {
            self.recycle(previous);
        }
    }

    /// Appends any [`Append`] value.
    pub fn append<T: Append>(&mut self, value: T) -> &mut Self {
        value.append_to(self);
        self
    }

    /// Appends every value in order.
    pub fn append_all(&mut self, values: &[&dyn Append]) -> &mut Self {
        for value in values {
            value.append_to(self);
        }
        self
    }

    /// Appends text. Empty text is a no-op.
    #[inline]
    pub fn append_str(&mut self, text: &str) -> &mut Self {
        self.append_units(text.as_bytes());
        self
    }

    /// Appends one character as UTF-8.
    #[inline]
    pub fn append_char(&mut self, c: char) -> &mut Self {
        let width = c.len_utf8();
        if self.active_pos + width > self.active.len() {
            self.reserve(width);
        }
        let pos = self.active_pos;
        c.encode_utf8(&mut self.active[pos..pos + width]);
        self.active_pos += width;
        self
    }

    /// Appends a run of characters, reserving their whole width at once.
    pub fn append_chars(&mut self, chars: &[char]) -> &mut Self {
        let width: usize = chars.iter().map(|c| c.len_utf8()).sum();
        if width == 0 {
            return self;
        }
        self.reserve(width);
        let mut pos = self.active_pos;
        for c in chars {
            let len = c.len_utf8();
            c.encode_utf8(&mut self.active[pos..pos + len]);
            pos += len;
        }
        self.active_pos = pos;
        self
    }

    /// Appends `True` or `False`.
    #[inline]
    pub fn append_bool(&mut self, value: bool) -> &mut Self {
        self.append_str(bool_text(value))
    }

    /// Appends an integer given as magnitude and sign.
    ///
    /// Every integer width funnels into this: exactly the rendered width is
    /// reserved and the digits are written back to front in place.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkstr::StrBuilder;
    ///
    /// let mut sb = StrBuilder::new();
    /// sb.append_integer(1000, true);
    /// assert_eq!(sb, "-1000");
    /// ```
    pub fn append_integer(&mut self, magnitude: u64, negative: bool) -> &mut Self {
        let sign = usize::from(negative);
        let digits = digit_count(magnitude);
        let width = sign + digits;
        self.reserve(width);

        let pos = self.active_pos;
        let dst = &mut self.active[pos..pos + width];
        if negative {
            dst[0] = b'-';
        }
        if magnitude < 10 {
            dst[sign] = b'0' + magnitude as u8;
        } else {
            write_digits(&mut dst[sign..], magnitude);
        }
        self.active_pos += width;
        self
    }

    /// Appends `value` through its `Display` impl.
    ///
    /// This is the path for floats and for any type without a dedicated
    /// encoder. The text is written straight into the builder, but the
    /// formatting machinery may split it across regions.
    ///
    /// Writing into a builder never fails, so an error can only come from
    /// `value`'s own `Display` impl. In that case the text it wrote before
    /// failing stays in the builder and the error is logged at debug level.
    pub fn append_display<T: fmt::Display>(&mut self, value: T) -> &mut Self {
        if let Err(err) = fmt::Write::write_fmt(&mut *self, format_args!("{}", value)) {
            tracing::debug!(%err, len = self.len(), "Display impl failed, partial output kept");
        }
        self
    }

    /// Appends the line terminator.
    pub fn append_line(&mut self) -> &mut Self {
        self.append_str(LINE_TERMINATOR)
    }

    /// Appends `value` followed by the line terminator.
    pub fn append_line_with<T: Append>(&mut self, value: T) -> &mut Self {
        value.append_to(self);
        self.append_line()
    }

    /// Replaces the content with `value`.
    pub fn set<T: Append>(&mut self, value: T) -> &mut Self {
        self.clear();
        self.append(value)
    }

    /// Replaces the content with `values`, appended in order.
    pub fn set_all(&mut self, values: &[&dyn Append]) -> &mut Self {
        self.clear();
        self.append_all(values)
    }

    /// Empties the builder and returns its arrays to the pool.
    ///
    /// The active region is reset to the configured initial capacity.
    pub fn clear(&mut self) -> &mut Self {
        self.release_sealed();
        let previous = std::mem::take(&mut self.active);
        self.recycle(previous);
        self.active = self.rent(self.config.initial_capacity());
        self.active_pos = 0;
        self
    }

    /// Returns the logical text as a fresh `String`.
    ///
    /// The result is a copy; later mutation of the builder does not affect it.
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        // Appends only ever write whole UTF-8 sequences, so the lossy path
        // is unreachable.
        String::from_utf8(self.to_vec())
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }

    /// Returns the logical text as a fresh byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.len()];
        for chunk in &self.sealed {
            out[chunk.range()].copy_from_slice(chunk.span());
        }
        out[self.sealed_len..].copy_from_slice(self.active_span());
        out
    }

    /// Returns the logical text as an immutable [`bytes::Bytes`] snapshot.
    #[cfg(feature = "bytes")]
    pub fn to_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.to_vec())
    }

    /// Copies raw units into the active region.
    ///
    /// Callers must only pass whole UTF-8 sequences.
    pub(crate) fn append_units(&mut self, units: &[u8]) {
        let n = units.len();
        if n == 0 {
            return;
        }
        self.reserve(n);
        let pos = self.active_pos;
        self.active[pos..pos + n].copy_from_slice(units);
        self.active_pos += n;
    }

    /// Filled part of the active region.
    #[inline]
    pub(crate) fn active_span(&self) -> &[u8] {
        &self.active[..self.active_pos]
    }

    /// Sealed spans followed by the active span.
    pub(crate) fn segments(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.sealed
            .iter()
            .map(Chunk::span)
            .chain(std::iter::once(self.active_span()))
    }

    /// Returns every sealed array to the pool and forgets the sealed chunks.
    pub(super) fn release_sealed(&mut self) {
        for chunk in std::mem::take(&mut self.sealed) {
            self.recycle(chunk.into_storage());
        }
        self.sealed_len = 0;
    }

    fn rent(&self, min_size: usize) -> Box<[u8]> {
        match &self.pool {
            Some(pool) => pool.rent(min_size),
            None => vec![0u8; min_size].into_boxed_slice(),
        }
    }

    pub(super) fn recycle(&self, array: Box<[u8]>) {
        let Some(pool) = &self.pool else {
            return;
        };
        if let Err(err) = pool.give_back(array) {
            tracing::trace!(%err, "array not recycled");
        }
    }
}

impl Default for StrBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StrBuilder {
    fn drop(&mut self) {
        self.release_sealed();
        let active = std::mem::take(&mut self.active);
        self.recycle(active);
    }
}
