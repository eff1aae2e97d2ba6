//! # Input Buffer
//!
//! The number currently being typed or displayed.
//!
//! ## Why a Buffer Instead of an f64?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Typed keys        Buffer text       Parsed value                       │
//! │  ──────────        ───────────       ────────────                       │
//! │  "1"               "1"               1.0                                │
//! │  "."               "1."              1.0   ◄── trailing point kept      │
//! │  "0"               "1.0"             1.0   ◄── trailing zero kept       │
//! │  "5"               "1.05"            1.05                               │
//! │                                                                         │
//! │  The display shows exactly what was typed. The value is parsed only     │
//! │  when an operation needs it.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - The text is never empty and always parses as a number
//! - At most one decimal point; [`InputBuffer::has_decimal`] is derived from
//!   the text so it can never disagree with it

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::number::{format_number, is_finite_literal, parse_number, try_parse_number};

// =============================================================================
// Digit Token
// =============================================================================

/// One key of numeric entry: a digit `0`-`9` or the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitToken {
    /// A decimal digit (always 0..=9).
    Digit(u8),
    /// The decimal point.
    Point,
}

impl DigitToken {
    /// Returns the character this token appends.
    pub fn as_char(self) -> char {
        match self {
            DigitToken::Digit(d) => char::from(b'0' + d),
            DigitToken::Point => '.',
        }
    }
}

impl TryFrom<char> for DigitToken {
    type Error = ValidationError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0'..='9' => Ok(DigitToken::Digit(c as u8 - b'0')),
            '.' => Ok(DigitToken::Point),
            other => Err(ValidationError::InvalidDigit(other.to_string())),
        }
    }
}

impl FromStr for DigitToken {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => DigitToken::try_from(c),
            _ => Err(ValidationError::InvalidDigit(s.to_string())),
        }
    }
}

impl fmt::Display for DigitToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =============================================================================
// Input Buffer
// =============================================================================

/// Text of the number on the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Creates a buffer showing "0".
    pub fn new() -> Self {
        InputBuffer {
            text: "0".to_string(),
        }
    }

    /// Creates a buffer holding a computed value.
    pub fn from_value(value: f64) -> Self {
        InputBuffer {
            text: format_number(value),
        }
    }

    /// Returns the display text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parses the text into a value.
    #[inline]
    pub fn value(&self) -> f64 {
        parse_number(&self.text)
    }

    /// Returns true if the text contains a decimal point.
    #[inline]
    pub fn has_decimal(&self) -> bool {
        self.text.contains('.')
    }

    /// Returns true if the text is exactly "0".
    #[inline]
    pub fn is_zero_literal(&self) -> bool {
        self.text == "0"
    }

    /// Appends a digit or decimal point.
    ///
    /// ## Behavior
    /// - A second decimal point is ignored
    /// - "0" followed by a digit becomes that digit (no leading zero)
    /// - On "NaN"/"Infinity" the token starts a fresh entry
    /// - A token that would leave unparsable text (a point after an
    ///   exponent, say) is ignored
    ///
    /// ## Returns
    /// `true` if the buffer changed.
    pub fn push(&mut self, token: DigitToken) -> bool {
        if token == DigitToken::Point && self.has_decimal() {
            return false;
        }

        if !is_finite_literal(&self.text) {
            self.text = "0".to_string();
        }

        let candidate = if self.is_zero_literal() && token != DigitToken::Point {
            token.as_char().to_string()
        } else {
            format!("{}{}", self.text, token.as_char())
        };

        if try_parse_number(&candidate).is_none() {
            return false;
        }

        self.text = candidate;
        true
    }

    /// Removes the last character.
    ///
    /// Trims further until the remaining text parses (`"-5"` → `"0"`,
    /// `"1e+21"` → `"1e+2"`); an empty result becomes "0".
    pub fn pop(&mut self) {
        if self.text.chars().count() <= 1 {
            self.reset();
            return;
        }

        self.text.pop();
        while !self.text.is_empty() && try_parse_number(&self.text).is_none() {
            self.text.pop();
        }

        if self.text.is_empty() {
            self.reset();
        }
    }

    /// Resets the buffer to "0".
    pub fn reset(&mut self) {
        self.text.clear();
        self.text.push('0');
    }

    /// Replaces the text with a computed value.
    pub fn set_value(&mut self, value: f64) {
        self.text = format_number(value);
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        InputBuffer::new()
    }
}

impl fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> InputBuffer {
        let mut buffer = InputBuffer::new();
        for c in keys.chars() {
            buffer.push(DigitToken::try_from(c).unwrap());
        }
        buffer
    }

    #[test]
    fn test_digit_token_parsing() {
        assert_eq!("7".parse::<DigitToken>().unwrap(), DigitToken::Digit(7));
        assert_eq!(".".parse::<DigitToken>().unwrap(), DigitToken::Point);
        assert!("12".parse::<DigitToken>().is_err());
        assert!("".parse::<DigitToken>().is_err());
        assert!(DigitToken::try_from('x').is_err());
    }

    #[test]
    fn test_no_leading_zero() {
        assert_eq!(typed("5").as_str(), "5");
        assert_eq!(typed("007").as_str(), "7");
        assert_eq!(typed("0.07").as_str(), "0.07");
    }

    #[test]
    fn test_second_decimal_point_ignored() {
        let mut buffer = typed("1.5");
        assert!(!buffer.push(DigitToken::Point));
        assert_eq!(buffer.as_str(), "1.5");
        assert_eq!(typed("1..2.3").as_str(), "1.23");
    }

    #[test]
    fn test_never_two_decimal_points() {
        for keys in ["....", "0.0.0", "9.9.9.9", ".1.", "12.34.56."] {
            let buffer = typed(keys);
            assert!(buffer.as_str().matches('.').count() <= 1, "{}", keys);
            assert_eq!(buffer.has_decimal(), buffer.as_str().contains('.'));
        }
    }

    #[test]
    fn test_pop_is_left_inverse_of_push() {
        for (start, key) in [("12", '3'), ("1.5", '0'), ("42", '.'), ("0.", '7')] {
            let mut buffer = typed(start);
            buffer.push(DigitToken::try_from(key).unwrap());
            buffer.pop();
            assert_eq!(buffer.as_str(), start);
        }
    }

    #[test]
    fn test_pop_boundaries() {
        let mut buffer = typed("7");
        buffer.pop();
        assert_eq!(buffer.as_str(), "0");

        let mut buffer = InputBuffer::new();
        buffer.pop();
        assert_eq!(buffer.as_str(), "0");

        let mut buffer = typed("3.");
        buffer.pop();
        assert_eq!(buffer.as_str(), "3");
        assert!(!buffer.has_decimal());
    }

    #[test]
    fn test_pop_keeps_text_parsable() {
        let mut buffer = InputBuffer::from_value(-5.0);
        buffer.pop();
        assert_eq!(buffer.as_str(), "0");

        let mut buffer = InputBuffer::from_value(1e21);
        buffer.pop();
        assert_eq!(buffer.as_str(), "1e+2");

        let mut buffer = InputBuffer::from_value(f64::INFINITY);
        buffer.pop();
        assert_eq!(buffer.as_str(), "0");
    }

    #[test]
    fn test_push_on_non_finite_starts_fresh() {
        let mut buffer = InputBuffer::from_value(f64::NAN);
        buffer.push(DigitToken::Digit(4));
        assert_eq!(buffer.as_str(), "4");

        let mut buffer = InputBuffer::from_value(f64::INFINITY);
        buffer.push(DigitToken::Point);
        assert_eq!(buffer.as_str(), "0.");
    }

    #[test]
    fn test_push_after_result_appends() {
        let mut buffer = InputBuffer::from_value(8.0);
        buffer.push(DigitToken::Digit(3));
        assert_eq!(buffer.as_str(), "83");
    }
}
