//! Parsing of `<number><unit>` strings, including compound forms.
//!
//! Accepted shapes: `1.754m`, `12 cm`, `1,000 km`, `5ft10in`, `5'10"`,
//! `1m 20cm`, `2 light-years`, `1e3 kg`, `∞`, `infinity`. Every term of a
//! compound form must be of the requested dimension.

use super::magnitude::{INFINITY_WORDS, Magnitude, parse_decimal_literal};
use super::units::{self, Dimension};
use crate::error::{ErrorSeverity, SizeError};

/// Errors raised when a quantity string cannot be understood.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitParseError {
    #[error("no quantity given")]
    Empty,

    #[error("malformed number: {0:?}")]
    MalformedNumber(String),

    #[error("missing unit after {0:?}")]
    MissingUnit(String),

    #[error("unrecognized unit: {0:?}")]
    UnknownUnit(String),

    #[error("{0:?} is not a unit of {1}")]
    WrongDimension(String, String),
}

impl SizeError for UnitParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "UNIT_EMPTY",
            Self::MalformedNumber(_) => "UNIT_MALFORMED_NUMBER",
            Self::MissingUnit(_) => "UNIT_MISSING_UNIT",
            Self::UnknownUnit(_) => "UNIT_UNKNOWN_UNIT",
            Self::WrongDimension(..) => "UNIT_WRONG_DIMENSION",
        }
    }
}

/// Parse a quantity of `dimension` into base units (meters or grams).
pub fn parse_quantity(input: &str, dimension: Dimension) -> Result<Magnitude, UnitParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitParseError::Empty);
    }
    if INFINITY_WORDS
        .iter()
        .any(|word| trimmed.eq_ignore_ascii_case(word))
    {
        return Ok(Magnitude::Infinity);
    }

    let mut rest = trimmed;
    let mut total = Magnitude::zero();
    while !rest.is_empty() {
        let (number, after_number) = split_number(rest);
        if number.is_empty() {
            return Err(UnitParseError::MalformedNumber(rest.to_string()));
        }
        let value = parse_decimal_literal(number)
            .map_err(|_| UnitParseError::MalformedNumber(number.to_string()))?;

        let (unit_token, after_unit) = split_unit(after_number);
        if unit_token.is_empty() {
            return Err(UnitParseError::MissingUnit(number.to_string()));
        }
        let unit = units::find_unit(dimension, unit_token)
            .ok_or_else(|| unknown_unit(dimension, unit_token))?;

        total = total + value * unit.factor;
        rest = after_unit.trim_start();
    }
    Ok(total)
}

fn unknown_unit(dimension: Dimension, token: &str) -> UnitParseError {
    let other = match dimension {
        Dimension::Length => Dimension::Weight,
        Dimension::Weight => Dimension::Length,
    };
    if units::find_unit(other, token).is_some() {
        UnitParseError::WrongDimension(token.to_string(), dimension.to_string())
    } else {
        UnitParseError::UnknownUnit(token.to_string())
    }
}

/// Split the leading numeric literal off `s`.
fn split_number(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    let mut end = 0;
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|(_, n)| *n);
        let accept = match c {
            '0'..='9' | '.' | '∞' => true,
            ',' | '_' => next.is_some_and(|n| n.is_ascii_digit()),
            '+' => i == 0,
            'e' | 'E' => {
                end > 0
                    && next.is_some_and(|n| n.is_ascii_digit() || n == '+' || n == '-')
                    && s[i + 1..]
                        .trim_start_matches(['+', '-'])
                        .starts_with(|d: char| d.is_ascii_digit())
            }
            '-' => s[..i].ends_with(['e', 'E']),
            '/' => next.is_some_and(|n| n.is_ascii_digit()),
            _ => false,
        };
        if !accept {
            break;
        }
        end = i + c.len_utf8();
    }
    (&s[..end], &s[end..])
}

/// Split the unit token off `s`: everything up to the next number.
fn split_unit(s: &str) -> (&str, &str) {
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let starts_number = c.is_ascii_digit()
            || c == '∞'
            || (c == '.' && chars.peek().is_some_and(|(_, n)| n.is_ascii_digit()));
        if starts_number {
            return (s[..i].trim(), &s[i..]);
        }
    }
    (s.trim(), "")
}
