//! Allocation-free decimal and boolean rendering.

/// Most decimal digits a `u64` can have.
pub const MAX_DIGITS: usize = 20;

const TRUE_TEXT: &str = "True";
const FALSE_TEXT: &str = "False";

/// Returns the number of decimal digits in `n` (1 for zero).
///
/// # Example
///
/// ```
/// use chunkstr::digit_count;
///
/// assert_eq!(digit_count(0), 1);
/// assert_eq!(digit_count(32767), 5);
/// assert_eq!(digit_count(u64::MAX), 20);
/// ```
#[inline]
pub fn digit_count(n: u64) -> usize {
    if n < 10 {
        return 1;
    }
    if n < 100 {
        return 2;
    }
    if n < 1_000 {
        return 3;
    }
    if n < 10_000 {
        return 4;
    }
    if n < 100_000 {
        return 5;
    }
    if n < 1_000_000 {
        return 6;
    }
    if n < 10_000_000 {
        return 7;
    }
    if n < 100_000_000 {
        return 8;
    }
    if n < 1_000_000_000 {
        return 9;
    }
    if n < 10_000_000_000 {
        return 10;
    }
    if n < 100_000_000_000 {
        return 11;
    }
    if n < 1_000_000_000_000 {
        return 12;
    }
    if n < 10_000_000_000_000 {
        return 13;
    }
    if n < 100_000_000_000_000 {
        return 14;
    }
    if n < 1_000_000_000_000_000 {
        return 15;
    }
    if n < 10_000_000_000_000_000 {
        return 16;
    }
    if n < 100_000_000_000_000_000 {
        return 17;
    }
    if n < 1_000_000_000_000_000_000 {
        return 18;
    }
    if n < 10_000_000_000_000_000_000 {
        return 19;
    }
    MAX_DIGITS
}

/// Writes the digits of `value` back to front so they fill `dst` exactly.
///
/// `dst.len()` must equal `digit_count(value)`.
#[inline]
pub(crate) fn write_digits(dst: &mut [u8], mut value: u64) {
    debug_assert_eq!(dst.len(), digit_count(value));
    for slot in dst.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

/// Static text for a boolean.
#[inline]
pub(crate) fn bool_text(value: bool) -> &'static str {
    if value { TRUE_TEXT } else { FALSE_TEXT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_count_boundaries() {
        let mut power = 1u64;
        for digits in 1..MAX_DIGITS {
            assert_eq!(digit_count(power), digits, "at {}", power);
            assert_eq!(digit_count(power * 10 - 1), digits, "at {}", power * 10 - 1);
            power *= 10;
        }
        assert_eq!(digit_count(power), MAX_DIGITS);
        assert_eq!(digit_count(u64::MAX), MAX_DIGITS);
    }

    #[test]
    fn test_digit_count_matches_display() {
        for n in [0u64, 7, 42, 999, 1000, 65535, 4_294_967_296, u64::MAX / 3] {
            assert_eq!(digit_count(n), n.to_string().len());
        }
    }

    #[test]
    fn test_write_digits() {
        let mut buf = [0u8; 5];
        write_digits(&mut buf, 32767);
        assert_eq!(&buf, b"32767");

        let mut buf = [0u8; MAX_DIGITS];
        write_digits(&mut buf, u64::MAX);
        assert_eq!(&buf[..], u64::MAX.to_string().as_bytes());
    }

    #[test]
    fn test_bool_text() {
        assert_eq!(bool_text(true), "True");
        assert_eq!(bool_text(false), "False");
    }
}
