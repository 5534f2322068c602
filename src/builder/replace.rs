//! Pattern replacement across chunk boundaries.
//!
//! The scan walks the logical text left to right with a cursor that moves
//! to the next segment whenever the index passes the one it is reading, so
//! a match may straddle any number of chunks. Matches are leftmost-first
//! and non-overlapping; scanning resumes right after each match. Nothing
//! is allocated until the first match, and on any match the whole text is
//! rebuilt into a single consolidated chunk.

use crate::chunk::Chunk;

use super::engine::StrBuilder;

impl StrBuilder {
    /// Replaces every non-overlapping occurrence of `old` with `new`.
    ///
    /// Absent or empty `old`, an `old` longer than the text, or an empty
    /// builder leave the builder untouched. Absent `new` means "delete".
    ///
    /// # Example
    ///
    /// ```
    /// use chunkstr::StrBuilder;
    ///
    /// let mut sb = StrBuilder::from("ABCabcABCdefgABC");
    /// sb.replace("A", "123");
    /// assert_eq!(sb, "123BCabc123BCdefg123BC");
    ///
    /// sb.replace(None, "ignored");
    /// assert_eq!(sb, "123BCabc123BCdefg123BC");
    /// ```
    pub fn replace<'a>(
        &mut self,
        old: impl Into<Option<&'a str>>,
        new: impl Into<Option<&'a str>>,
    ) -> &mut Self {
        let old = old.into().unwrap_or_default().as_bytes();
        let new = new.into().unwrap_or_default().as_bytes();
        let len = self.len();
        if len == 0 || old.is_empty() || old.len() > len {
            return self;
        }

        if let Some(output) = self.substitute(old, new) {
            self.consolidate(output);
        }
        self
    }

    /// Scans for `old` and builds the substituted text, or `None` when
    /// nothing matched.
    fn substitute(&self, old: &[u8], new: &[u8]) -> Option<Vec<u8>> {
        let len = self.len();
        let last_start = len - old.len();
        let first = old[0];

        let mut cursor = Cursor::new(self);
        let mut output: Option<Vec<u8>> = None;
        let mut i = 0;

        while i <= last_start {
            let unit = cursor.unit(i);
            if unit == first && cursor.matches_at(i, old) {
                let out =
                    output.get_or_insert_with(|| self.start_output(i, old.len(), new.len()));
                out.extend_from_slice(new);
                i += old.len();
            } else {
                if let Some(out) = output.as_mut() {
                    out.push(unit);
                }
                i += 1;
            }
        }

        // No match can start past `last_start`; the tail is copied as is.
        let mut out = output?;
        self.copy_range_into(i, len, &mut out);
        Some(out)
    }

    /// Output buffer holding every unit before the first match.
    ///
    /// Sized for matches of roughly uniform density, but never reserves more
    /// than the text plus one replacement; the vector grows past that if
    /// there are more matches.
    fn start_output(&self, prefix: usize, old_len: usize, new_len: usize) -> Vec<u8> {
        let len = self.len();
        let estimate = (len / old_len)
            .saturating_mul(old_len.max(new_len))
            .saturating_add(1);
        let hint = estimate.min(len.saturating_add(new_len)).max(prefix);
        let mut out = Vec::with_capacity(hint);
        self.copy_range_into(0, prefix, &mut out);
        out
    }

    /// Appends the logical units `[start, end)` to `out`.
    fn copy_range_into(&self, start: usize, end: usize, out: &mut Vec<u8>) {
        let mut offset = 0;
        for segment in self.segments() {
            let seg_end = offset + segment.len();
            if seg_end > start && offset < end {
                let from = start.max(offset) - offset;
                let to = end.min(seg_end) - offset;
                out.extend_from_slice(&segment[from..to]);
            }
            if seg_end >= end {
                break;
            }
            offset = seg_end;
        }
    }

    /// Swaps the storage for one chunk holding `output`.
    fn consolidate(&mut self, output: Vec<u8>) {
        self.release_sealed();
        let count = output.len();
        tracing::trace!(count, "replace consolidated storage");
        if count > 0 {
            self.sealed.push(Chunk::new(output.into_boxed_slice(), count, 0));
        }
        self.sealed_len = count;
        self.active_pos = 0;
    }
}

/// Forward-only reader over the logical text.
#[derive(Clone, Copy)]
struct Cursor<'a> {
    builder: &'a StrBuilder,
    segment: usize,
    start: usize,
    units: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn new(builder: &'a StrBuilder) -> Self {
        Self {
            builder,
            segment: 0,
            start: 0,
            units: segment_at(builder, 0),
        }
    }

    /// Unit at logical `index`; `index` must be below the builder length and
    /// not before the segment the cursor is on.
    fn unit(&mut self, index: usize) -> u8 {
        debug_assert!(index < self.builder.len());
        while index >= self.start + self.units.len() {
            self.start += self.units.len();
            self.segment += 1;
            self.units = segment_at(self.builder, self.segment);
        }
        self.units[index - self.start]
    }

    /// Whether `pattern` occurs at `index`, given its first unit already matched.
    fn matches_at(&self, index: usize, pattern: &[u8]) -> bool {
        let mut probe = *self;
        pattern[1..]
            .iter()
            .enumerate()
            .all(|(k, &expected)| probe.unit(index + 1 + k) == expected)
    }
}

fn segment_at(builder: &StrBuilder, index: usize) -> &[u8] {
    match builder.sealed.get(index) {
        Some(chunk) => chunk.span(),
        None => builder.active_span(),
    }
}
