//! Numeric coercion for quantity and threshold cells.
//!
//! Never fails: anything that does not start with a number counts as zero.

use crate::model::CellValue;

/// Coerce an optional cell to a float, `0.0` when absent or unparseable.
pub fn coerce(raw: Option<&CellValue>) -> f64 {
    let value = match raw {
        Some(CellValue::Number(n)) => *n,
        Some(CellValue::Text(s)) => parse_leading_float(s).unwrap_or(0.0),
        Some(CellValue::Bool(_)) | Some(CellValue::Empty) | None => 0.0,
    };
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Parse the longest numeric prefix of `s` after leading whitespace.
///
/// Accepts an optional sign, digits with an optional `.` fraction, an optional
/// exponent, and `Infinity`. The decimal separator is always `.`, so `"3,5"`
/// reads as `3`.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let inf = f64::INFINITY;
        return Some(if bytes.first() == Some(&b'-') { -inf } else { inf });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
