//! Margin and padding shorthand parsing.
//!
//! Accepts a single number (all sides) or one to four whitespace-separated
//! tokens expanded like the CSS `margin` shorthand:
//!
//! | tokens | top | right | bottom | left |
//! |--------|-----|-------|--------|------|
//! | `a`       | a | a | a | a |
//! | `a b`     | a | b | a | b |
//! | `a b c`   | a | b | c | b |
//! | `a b c d` | a | b | c | d |
//!
//! Tokens are read with integer-prefix semantics (`"10px"` is 10). Anything
//! unparseable, and any negative value, becomes 0.

use tessera_common::warning::warn_once;
use tessera_component::SidesSource;

use crate::box_model::Sides;

/// Parse a configured margin/padding value.
#[must_use]
pub fn parse_sides(source: &SidesSource) -> Sides {
    match source {
        SidesSource::Number(value) => Sides::uniform(side_from_number(*value)),
        SidesSource::Text(text) => parse_sides_str(text),
    }
}

/// Parse an optional configured value, defaulting to zero on every side.
#[must_use]
pub fn parse_sides_or_zero(source: Option<&SidesSource>) -> Sides {
    source.map_or(Sides::ZERO, parse_sides)
}

/// Parse CSS shorthand text such as `"5 10"`.
#[must_use]
pub fn parse_sides_str(text: &str) -> Sides {
    let mut values = [0_i32; 4];
    let mut count = 0;
    for token in text.split_ascii_whitespace().take(4) {
        values[count] = parse_side_token(token);
        count += 1;
    }

    let [a, b, c, d] = values;
    match count {
        0 => Sides::ZERO,
        1 => Sides::uniform(a),
        2 => Sides::new(a, b, a, b),
        3 => Sides::new(a, b, c, b),
        _ => Sides::new(a, b, c, d),
    }
}

fn side_from_number(value: f64) -> i32 {
    if value.is_finite() && value > 0.0 {
        value.trunc().min(f64::from(i32::MAX)) as i32
    } else {
        0
    }
}

fn parse_side_token(token: &str) -> i32 {
    match parse_int_prefix(token) {
        Some(value) if value >= 0 => value,
        Some(_) => {
            let _ = warn_once("Sides", &format!("negative side '{token}' clamped to 0"));
            0
        }
        None => {
            let _ = warn_once("Sides", &format!("non-numeric side '{token}' parsed as 0"));
            0
        }
    }
}

/// Leading integer of `token`: optional sign, then digits. Stops at the first
/// other character; `None` when no digit was read.
pub(crate) fn parse_int_prefix(token: &str) -> Option<i32> {
    let token = token.trim_start();
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let mut value: i64 = 0;
    let mut read = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(byte - b'0')).min(i64::from(i32::MAX));
        read += 1;
    }
    if read == 0 {
        return None;
    }
    let value = if negative { -value } else { value };
    i32::try_from(value).ok()
}

/// Leading decimal number of `token` (`"12.5%"` is 12.5).
pub(crate) fn parse_float_prefix(token: &str) -> Option<f64> {
    let token = token.trim_start();
    let bytes = token.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    let number = &token[..end];
    if number.len() == digits_start || &number[digits_start..] == "." {
        return None;
    }
    number.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_text_agree() {
        let expected = Sides::uniform(10);
        assert_eq!(parse_sides(&SidesSource::from(10)), expected);
        assert_eq!(parse_sides(&SidesSource::from("10")), expected);
    }

    #[test]
    fn test_two_tokens() {
        assert_eq!(parse_sides_str("10 20"), Sides::new(10, 20, 10, 20));
    }

    #[test]
    fn test_three_tokens() {
        assert_eq!(parse_sides_str("1 2 3"), Sides::new(1, 2, 3, 2));
    }

    #[test]
    fn test_four_tokens() {
        assert_eq!(parse_sides_str("1 2 3 4"), Sides::new(1, 2, 3, 4));
    }

    #[test]
    fn test_extra_tokens_ignored() {
        assert_eq!(parse_sides_str("1 2 3 4 5"), Sides::new(1, 2, 3, 4));
    }

    #[test]
    fn test_non_numeric_tokens_are_zero() {
        assert_eq!(parse_sides_str("auto 5"), Sides::new(0, 5, 0, 5));
        assert_eq!(parse_sides_str(""), Sides::ZERO);
        assert_eq!(parse_sides_str("   "), Sides::ZERO);
    }

    #[test]
    fn test_unit_suffix_and_negative() {
        assert_eq!(parse_sides_str("10px -4"), Sides::new(10, 0, 10, 0));
    }

    #[test]
    fn test_fractional_number_truncates() {
        assert_eq!(parse_sides(&SidesSource::Number(7.9)), Sides::uniform(7));
        assert_eq!(parse_sides(&SidesSource::Number(-3.0)), Sides::ZERO);
        assert_eq!(parse_sides(&SidesSource::Number(f64::NAN)), Sides::ZERO);
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("-20"), Some(-20));
        assert_eq!(parse_int_prefix("+7x"), Some(7));
        assert_eq!(parse_int_prefix("12.9"), Some(12));
        assert_eq!(parse_int_prefix("px"), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("50%"), Some(50.0));
        assert_eq!(parse_float_prefix("12.5%"), Some(12.5));
        assert_eq!(parse_float_prefix("-3"), Some(-3.0));
        assert_eq!(parse_float_prefix("%"), None);
        assert_eq!(parse_float_prefix("."), None);
    }
}
