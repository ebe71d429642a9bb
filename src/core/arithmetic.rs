//! Pure arithmetic and number formatting.
//!
//! Nothing in here fails: singular results collapse into the
//! [`UNDEFINED`] display sentinel and unparsable text reads as zero.

use super::operation::Operation;

/// Display sentinel for division by zero and other non-finite results.
pub const UNDEFINED: &str = "Undefined";

/// Thousands separator inserted by [`format_display`].
pub const SEPARATOR: char = ',';

/// Apply a binary operation.
///
/// Division by zero yields `NaN`. With no operation the second operand is
/// passed through unchanged.
///
/// # Example
///
/// ```rust
/// use reckon::core::{arithmetic::compute, Operation};
///
/// assert_eq!(compute(2.0, 3.0, Some(Operation::Add)), 5.0);
/// assert_eq!(compute(7.0, 4.0, Some(Operation::Modulo)), 3.0);
/// assert!(compute(5.0, 0.0, Some(Operation::Divide)).is_nan());
/// assert_eq!(compute(2.0, 9.0, None), 9.0);
/// ```
pub fn compute(a: f64, b: f64, op: Option<Operation>) -> f64 {
    match op {
        Some(Operation::Add) => a + b,
        Some(Operation::Subtract) => a - b,
        Some(Operation::Multiply) => a * b,
        Some(Operation::Divide) => {
            if b == 0.0 {
                f64::NAN
            } else {
                a / b
            }
        }
        Some(Operation::Modulo) => a % b,
        None => b,
    }
}

/// Compute and render the result as plain decimal text.
///
/// Non-finite results render as [`UNDEFINED`]. No separators are added.
pub fn format_result(a: f64, b: f64, op: Option<Operation>) -> String {
    format_number(compute(a, b, op))
}

/// Render a number the way it is stored in the entry buffer.
///
/// Uses the shortest text that round-trips. Negative zero prints as `0`.
/// Magnitudes of `1e21` and above, or below `1e-6`, use exponent form
/// (`1e+21`, `1.5e-7`). Non-finite values print as [`UNDEFINED`].
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }

    value.to_string()
}

/// Insert thousands separators into the integer part of raw entry text.
///
/// Leading zeros are dropped except for a lone `0` (so `"0."` and
/// `"0.05"` survive). The fractional part is left exactly as typed,
/// including a trailing decimal point. Text whose integer part is not a
/// plain digit run (for example [`UNDEFINED`] or exponent form) is
/// returned as is.
///
/// # Example
///
/// ```rust
/// use reckon::core::arithmetic::format_display;
///
/// assert_eq!(format_display("1234567.891"), "1,234,567.891");
/// assert_eq!(format_display("007"), "7");
/// assert_eq!(format_display("0."), "0.");
/// assert_eq!(format_display("-1000"), "-1,000");
/// ```
pub fn format_display(raw: &str) -> String {
    if raw == "0" {
        return raw.to_string();
    }

    match raw.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_integer(integer), fraction),
        None => group_integer(raw),
    }
}

fn group_integer(integer: &str) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return integer.to_string();
    }

    let significant = match digits.trim_start_matches('0') {
        "" => "0",
        rest => rest,
    };

    let mut grouped = String::with_capacity(sign.len() + significant.len() * 4 / 3);
    grouped.push_str(sign);
    for (i, digit) in significant.chars().enumerate() {
        if i > 0 && (significant.len() - i) % 3 == 0 {
            grouped.push(SEPARATOR);
        }
        grouped.push(digit);
    }
    grouped
}

/// Remove thousands separators.
pub fn strip_separators(text: &str) -> String {
    text.chars().filter(|c| *c != SEPARATOR).collect()
}

/// Read entry text as a number, treating anything unparsable or
/// non-finite (including [`UNDEFINED`]) as zero.
pub fn parse_operand(text: &str) -> f64 {
    try_parse(text).unwrap_or(0.0)
}

/// Whether the text reads as a finite number.
pub fn is_numeric(text: &str) -> bool {
    try_parse(text).is_some()
}

/// Format a number for expression text: [`format_number`] then
/// [`format_display`].
pub fn display_number(value: f64) -> String {
    format_display(&format_number(value))
}

fn try_parse(text: &str) -> Option<f64> {
    let cleaned = strip_separators(text);
    let cleaned = cleaned.trim();
    // Rust accepts "inf" and "NaN"; the keypad never produces letters.
    if cleaned.is_empty() || cleaned.chars().any(|c| c.is_ascii_alphabetic() && c != 'e') {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
