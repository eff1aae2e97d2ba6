//! # Number Text
//!
//! Conversion between `f64` and the text shown on the calculator display.
//!
//! ## Display Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  value              text             rule                               │
//! │  ─────              ────             ────                               │
//! │  8.0                "8"              integers have no fraction          │
//! │  0.1 + 0.2          "0.30000000000000004"  shortest round-trip digits   │
//! │  -0.0               "0"              negative zero hides its sign       │
//! │  1e21               "1e+21"          exponent form from 10^21 up        │
//! │  1e-7               "1e-7"           exponent form below 10^-6          │
//! │  0.000001           "0.000001"                                          │
//! │  NaN / ±inf         "NaN" / "Infinity" / "-Infinity"                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These are the ECMAScript `Number#toString` rules. The calculator's history
//! strings and display must match them exactly, so `{}` formatting of `f64`
//! (which never uses exponent form) is not enough on its own.

/// Formats a value the way the calculator displays it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e3" or "5e-7".
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, e_sign, e.abs())
        }
    };

    format!("{}{}", sign, body)
}

/// Parses display text into a value.
///
/// Accepts everything [`format_number`] produces plus partial entries such as
/// `"5."`. Anything else parses to NaN.
pub fn parse_number(text: &str) -> f64 {
    try_parse_number(text).unwrap_or(f64::NAN)
}

/// Parses display text, returning `None` when the text is not a number.
pub fn try_parse_number(text: &str) -> Option<f64> {
    match text {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => {
            // Rust also accepts "inf"/"nan" spellings; the display never shows them.
            if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
                return None;
            }
            text.parse::<f64>().ok()
        }
    }
}

/// Returns true if the text is a finite numeric literal.
pub fn is_finite_literal(text: &str) -> bool {
    try_parse_number(text).is_some_and(f64::is_finite)
}

// =============================================================================
// Unit Tests
// =============================================================================
