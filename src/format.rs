//! Fixed-width field helpers shared by all ABO records.
//!
//! Numeric fields are right-aligned and zero-filled on the left. The group
//! header is the odd one out: its account fields are zero-filled on the
//! right, see [`zero_fill_right`].

/// Number of decimal digits needed to write `value`.
pub fn digit_count(value: u128) -> usize {
    let mut count = 1;
    let mut rest = value / 10;
    while rest > 0 {
        count += 1;
        rest /= 10;
    }
    count
}

/// Returns `true` if `value` can be written in `width` digits.
pub fn fits(value: u128, width: usize) -> bool {
    digit_count(value) <= width
}

/// Zero-pads a number on the left to `width` digits.
///
/// Callers check the value with [`fits`] when it is accepted; a wider value
/// is written in full rather than cut.
pub fn zero_pad(value: impl Into<u128>, width: usize) -> String {
    format!("{:0>width$}", value.into(), width = width)
}

/// Zero-pads a digit string on the left to `width`.
pub fn zero_fill_left(digits: &str, width: usize) -> String {
    format!("{:0>width$}", digits, width = width)
}

/// Appends zeros on the right of a digit string up to `width`.
pub fn zero_fill_right(digits: &str, width: usize) -> String {
    format!("{:0<width$}", digits, width = width)
}

/// Truncates to `width` characters and pads with spaces on the right.
pub fn text(value: &str, width: usize) -> String {
    let truncated: String = value.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}
