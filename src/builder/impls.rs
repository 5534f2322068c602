//! Standard trait impls: equality, hashing, formatting and conversions.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::engine::StrBuilder;

impl StrBuilder {
    /// Running hash over the logical text and its length.
    ///
    /// Depends only on content, never on how it is split into chunks, so
    /// equal builders always hash equally.
    pub fn hash_code(&self) -> u64 {
        let content = self
            .units()
            .fold(0u64, |h, unit| h.wrapping_mul(31).wrapping_add(u64::from(unit)));
        content.wrapping_mul(31).wrapping_add(self.len() as u64)
    }
}

impl PartialEq for StrBuilder {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.len() == other.len() && self.units().eq(other.units())
    }
}

impl Eq for StrBuilder {}

impl PartialEq<str> for StrBuilder {
    fn eq(&self, other: &str) -> bool {
        self.len() == other.len() && self.units().eq(other.bytes())
    }
}

impl PartialEq<&str> for StrBuilder {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<String> for StrBuilder {
    fn eq(&self, other: &String) -> bool {
        *self == **other
    }
}

impl Hash for StrBuilder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for StrBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            f.write_str(&String::from_utf8_lossy(segment))?;
        }
        Ok(())
    }
}

impl fmt::Debug for StrBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrBuilder")
            .field("len", &self.len())
            .field("chunks", &self.sealed.len())
            .field("text", &self.to_text())
            .finish()
    }
}

impl fmt::Write for StrBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.append_char(c);
        Ok(())
    }
}

impl From<&str> for StrBuilder {
    fn from(text: &str) -> Self {
        Self::from_text(Some(text))
    }
}

impl From<String> for StrBuilder {
    fn from(text: String) -> Self {
        Self::from_text(Some(&text))
    }
}

impl From<Cow<'_, str>> for StrBuilder {
    fn from(text: Cow<'_, str>) -> Self {
        Self::from_text(Some(&text))
    }
}

impl From<&StrBuilder> for String {
    fn from(builder: &StrBuilder) -> Self {
        builder.to_text()
    }
}

impl FromStr for StrBuilder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Extend<char> for StrBuilder {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for c in iter {
            self.append_char(c);
        }
    }
}

impl<'a> Extend<&'a str> for StrBuilder {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for s in iter {
            self.append_str(s);
        }
    }
}
