//! Dimension calculator.
//!
//! Width and height are kept as the user's original text (locale separators
//! included); the derived area is the only numeric product of the two.

/// Parses the leading decimal-number prefix of a string.
///
/// Mirrors common floating-point string parsing: leading whitespace is
/// skipped, an optional sign, digits, at most one decimal point and an
/// optional exponent are consumed, and everything after the numeric prefix is
/// ignored (`"3.5 m"` parses as `3.5`). Returns `None` when no digits are
/// consumed.
#[must_use]
pub fn parse_decimal_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(&(b'+' | b'-'))) {
        end += 1;
    }

    let mut digits = 0;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
        digits += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // Optional exponent, only kept when well-formed.
    if matches!(bytes.get(end), Some(&(b'e' | b'E'))) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(&(b'+' | b'-'))) {
            exp_end += 1;
        }
        let mut exp_digits = 0;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
            exp_digits += 1;
        }
        if exp_digits > 0 {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Computes the area from width and height text.
///
/// Succeeds only when both inputs parse to finite numbers strictly greater
/// than zero; the product is formatted with exactly two fractional digits.
/// Pure: same inputs always yield the same output.
#[must_use]
pub fn calc_area(width: &str, height: &str) -> Option<String> {
    let w = parse_decimal_prefix(width)?;
    let h = parse_decimal_prefix(height)?;
    if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 {
        Some(format!("{:.2}", w * h))
    } else {
        None
    }
}
