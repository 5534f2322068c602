//! The [`Append`] trait and its impls for primitive and text types.

use std::borrow::Cow;
use std::fmt;

use crate::builder::StrBuilder;

/// A value that can render itself into a [`StrBuilder`].
///
/// Text, characters, booleans and integers up to 64 bits are written
/// straight into the builder's active region without allocating. Floats,
/// 128-bit integers and [`fmt::Arguments`] go through their `Display` impl.
/// `None` appends nothing.
///
/// # Example
///
/// ```
/// use chunkstr::StrBuilder;
///
/// let mut sb = StrBuilder::new();
/// sb.append("PI=").append(3.14).append(true).append(i16::MAX);
/// assert_eq!(sb.to_text(), "PI=3.14True32767");
/// ```
pub trait Append {
    /// Appends the textual form of `self` to `builder`.
    fn append_to(&self, builder: &mut StrBuilder);
}

impl Append for str {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.append_str(self);
    }
}

impl Append for String {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.append_str(self);
    }
}

impl Append for Cow<'_, str> {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.append_str(self);
    }
}

impl Append for char {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.append_char(*self);
    }
}

impl Append for [char] {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.append_chars(self);
    }
}

impl<const N: usize> Append for [char; N] {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.append_chars(self);
    }
}

impl Append for Vec<char> {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.append_chars(self);
    }
}

impl Append for bool {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.append_bool(*self);
    }
}

macro_rules! append_signed {
    ($($ty:ty),*) => {$(
        impl Append for $ty {
            fn append_to(&self, builder: &mut StrBuilder) {
                builder.append_integer(self.unsigned_abs() as u64, *self < 0);
            }
        }
    )*};
}

macro_rules! append_unsigned {
    ($($ty:ty),*) => {$(
        impl Append for $ty {
            fn append_to(&self, builder: &mut StrBuilder) {
                builder.append_integer(*self as u64, false);
            }
        }
    )*};
}

macro_rules! append_display {
    ($($ty:ty),*) => {$(
        impl Append for $ty {
            fn append_to(&self, builder: &mut StrBuilder) {
                builder.append_display(self);
            }
        }
    )*};
}

append_signed!(i8, i16, i32, i64, isize);
append_unsigned!(u8, u16, u32, u64, usize);
append_display!(f32, f64, i128, u128);

impl Append for fmt::Arguments<'_> {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.append_display(self);
    }
}

impl Append for StrBuilder {
    fn append_to(&self, builder: &mut StrBuilder) {
        builder.reserve(self.len());
        for segment in self.segments() {
            builder.append_units(segment);
        }
    }
}

impl<T: Append + ?Sized> Append for &T {
    fn append_to(&self, builder: &mut StrBuilder) {
        (**self).append_to(builder);
    }
}

impl<T: Append + ?Sized> Append for Box<T> {
    fn append_to(&self, builder: &mut StrBuilder) {
        (**self).append_to(builder);
    }
}

impl<T: Append> Append for Option<T> {
    fn append_to(&self, builder: &mut StrBuilder) {
        if let Some(value) = self {
            value.append_to(builder);
        }
    }
}
