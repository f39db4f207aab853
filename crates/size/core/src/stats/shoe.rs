//! US shoe sizes.
//!
//! Size `n` relates to foot length `L` (inches) by `n = 3(L + 2/3) − 24`.
//! Below size 1 the children's scale applies, shifted up by 12⅓; below
//! children's size 0 no shoe exists. Women's sizes run one larger.

use core::fmt;
use core::str::FromStr;

use bigdecimal::BigDecimal;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{ErrorSeverity, SizeError};
use crate::quantity::{Length, Magnitude, format_number, units};

/// Offset between the adult and children's scales (12⅓).
fn children_offset() -> Magnitude {
    Magnitude::from(37).ratio(&Magnitude::from(3))
}

const SHOE_SIZE_PRECISION: u32 = 2;

/// Shown in place of a size for feet below children's size 0.
pub const NO_SHOE_SIZE: &str = "No shoes exist this small!";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShoeSizeError {
    #[error("no shoe size found in {0:?}")]
    Malformed(String),

    #[error("no shoes exist this small")]
    TooSmall,
}

impl SizeError for ShoeSizeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "SHOE_SIZE_MALFORMED",
            Self::TooSmall => "SHOE_SIZE_TOO_SMALL",
        }
    }
}

/// A US shoe size as displayed, including the women's and children's markers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShoeSize {
    /// The displayed size number, offsets already applied.
    pub value: Magnitude,
    pub women: bool,
    pub children: bool,
}

impl ShoeSize {
    /// Size for a foot of the given length.
    pub fn from_foot_length(foot_length: &Length, women: bool) -> Result<Self, ShoeSizeError> {
        let inches = foot_length.magnitude().ratio(&Magnitude::new(units::INCH));
        let mut value = inches * dec!(3) - Magnitude::from(22);
        let mut children = false;
        if value < Decimal::ONE {
            children = true;
            value = value + children_offset();
        }
        if value.is_negative() {
            return Err(ShoeSizeError::TooSmall);
        }
        if women {
            value = value + Magnitude::one();
        }
        Ok(Self {
            value,
            women,
            children,
        })
    }

    /// Foot length that this size fits.
    pub fn foot_length(&self) -> Length {
        let mut size = self.value.clone();
        if self.women {
            size = size - Magnitude::one();
        }
        if self.children {
            size = size - children_offset();
        }
        let inches = (size + Magnitude::from(22)).ratio(&Magnitude::from(3));
        Length::new(inches * units::INCH)
    }
}

impl fmt::Display for ShoeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Size US ")?;
        if self.women {
            f.write_str("Women's ")?;
        }
        if self.children {
            f.write_str("Children's ")?;
        }
        f.write_str(&format_number(&self.value, SHOE_SIZE_PRECISION, true))
    }
}

/// Accepts forms such as `9`, `W10`, `10.5w`, `c3`, `Size US Women's 8`.
impl FromStr for ShoeSize {
    type Err = ShoeSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ShoeSizeError::Malformed(s.to_string());
        let start = s.find(|c: char| c.is_ascii_digit()).ok_or_else(malformed)?;
        let digits: String = s[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
            .filter(|c| *c != ',')
            .collect();
        let value = BigDecimal::from_str(digits.trim_end_matches('.')).map_err(|_| malformed())?;

        let lower = s.to_lowercase();
        Ok(Self {
            value: Magnitude::from_big(value),
            women: lower.contains('w'),
            children: lower.contains('c'),
        })
    }
}

/// Foot length for a written shoe size.
pub fn foot_length_from_shoe_size(size: &str) -> Result<Length, ShoeSizeError> {
    size.parse::<ShoeSize>().map(|s| s.foot_length())
}

/// Human-readable shoe size for a foot, or why there is none.
pub fn format_shoe_size(foot_length: &Length, women: bool) -> String {
    match ShoeSize::from_foot_length(foot_length, women) {
        Ok(size) => size.to_string(),
        Err(_) => NO_SHOE_SIZE.to_string(),
    }
}
