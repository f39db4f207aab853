//! Change engine: validated height updates.
//!
//! A change is parsed from a style keyword and an operand, validated, then
//! applied to a record to produce a new record. Nothing is mutated on failure.
//!
//! ```text
//! "x", "10"  ──parse──▶  Change::Multiply(10)  ──apply──▶  record'
//! ```

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{ArithmeticError, ErrorSeverity, SizeError};
use crate::quantity::{Length, Magnitude, UnitParseError};
use crate::record::PersonRecord;

/// Canonical change operation.
///
/// Parsed case-insensitively from any of its accepted synonyms.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(ascii_case_insensitive)]
pub enum ChangeStyle {
    #[strum(to_string = "add", serialize = "+", serialize = "a", serialize = "plus")]
    Add,
    #[strum(to_string = "subtract", serialize = "sub", serialize = "-", serialize = "minus")]
    Subtract,
    #[strum(
        to_string = "power",
        serialize = "exp",
        serialize = "pow",
        serialize = "exponent",
        serialize = "^",
        serialize = "**"
    )]
    Power,
    #[strum(
        to_string = "multiply",
        serialize = "mult",
        serialize = "m",
        serialize = "x",
        serialize = "times",
        serialize = "*"
    )]
    Multiply,
    #[strum(to_string = "divide", serialize = "d", serialize = "/", serialize = "div")]
    Divide,
    #[strum(to_string = "percent", serialize = "per", serialize = "perc", serialize = "%")]
    Percent,
}

impl ChangeStyle {
    /// Additive styles take a length operand; the rest take a plain number.
    pub const fn takes_length(self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }
}

/// Rejections raised by the change engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeError {
    #[error("unrecognized change style: {0:?}")]
    InvalidStyle(String),

    #[error("changing by a factor of one does nothing")]
    NoOpValue,

    #[error("changing by zero is not allowed")]
    ZeroValue,

    #[error("cannot divide by zero")]
    DivisionByZero,

    #[error("invalid change amount: {0:?}")]
    InvalidAmount(String),

    #[error(transparent)]
    Unit(#[from] UnitParseError),
}

impl From<ArithmeticError> for ChangeError {
    fn from(err: ArithmeticError) -> Self {
        match err {
            ArithmeticError::DivisionByZero => Self::DivisionByZero,
        }
    }
}

impl SizeError for ChangeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DivisionByZero => ErrorSeverity::Arithmetic,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStyle(_) => "CHANGE_INVALID_STYLE",
            Self::NoOpValue => "CHANGE_NO_OP_VALUE",
            Self::ZeroValue => "CHANGE_ZERO_VALUE",
            Self::DivisionByZero => "CHANGE_DIVISION_BY_ZERO",
            Self::InvalidAmount(_) => "CHANGE_INVALID_AMOUNT",
            Self::Unit(err) => err.error_code(),
        }
    }
}

/// A parsed change with its operand.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "style", content = "amount", rename_all = "snake_case"))]
pub enum Change {
    Add(Length),
    Subtract(Length),
    Multiply(Magnitude),
    Divide(Magnitude),
    /// Raises the height (in meters) to this exponent; bases are untouched.
    Power(Magnitude),
    Percent(Magnitude),
}

impl Change {
    /// Parse a style keyword and its operand, then validate the pair.
    pub fn parse(style: &str, amount: &str) -> Result<Self, ChangeError> {
        let style = ChangeStyle::from_str(style.trim())
            .map_err(|_| ChangeError::InvalidStyle(style.to_string()))?;

        let change = if style.takes_length() {
            let length = Length::parse(amount)?;
            match style {
                ChangeStyle::Add => Change::Add(length),
                _ => Change::Subtract(length),
            }
        } else {
            let value = Magnitude::from_str(amount)
                .map_err(|_| ChangeError::InvalidAmount(amount.to_string()))?;
            match style {
                ChangeStyle::Multiply => Change::Multiply(value),
                ChangeStyle::Divide => Change::Divide(value),
                ChangeStyle::Power => Change::Power(value),
                _ => Change::Percent(value),
            }
        };
        change.validate()?;
        Ok(change)
    }

    pub const fn style(&self) -> ChangeStyle {
        match self {
            Change::Add(_) => ChangeStyle::Add,
            Change::Subtract(_) => ChangeStyle::Subtract,
            Change::Multiply(_) => ChangeStyle::Multiply,
            Change::Divide(_) => ChangeStyle::Divide,
            Change::Power(_) => ChangeStyle::Power,
            Change::Percent(_) => ChangeStyle::Percent,
        }
    }

    /// Reject degenerate operands.
    pub fn validate(&self) -> Result<(), ChangeError> {
        match self {
            Change::Add(_) | Change::Subtract(_) => Ok(()),
            Change::Multiply(v) | Change::Power(v) => {
                if *v == Decimal::ONE {
                    Err(ChangeError::NoOpValue)
                } else if v.is_zero() {
                    Err(ChangeError::ZeroValue)
                } else {
                    Ok(())
                }
            }
            Change::Divide(v) => {
                if *v == Decimal::ONE {
                    Err(ChangeError::NoOpValue)
                } else if v.is_zero() {
                    Err(ChangeError::DivisionByZero)
                } else {
                    Ok(())
                }
            }
            Change::Percent(v) if v.is_zero() => Err(ChangeError::ZeroValue),
            Change::Percent(_) => Ok(()),
        }
    }

    /// New height for `height` under this change, clamped to `[0, +∞]`.
    pub fn apply_to_height(&self, height: &Length) -> Result<Length, ChangeError> {
        self.validate()?;
        let new_height = match self {
            Change::Add(amount) => height + amount,
            Change::Subtract(amount) => height - amount,
            Change::Multiply(factor) => height * factor,
            Change::Divide(divisor) => height.checked_div(divisor)?,
            Change::Power(exponent) => raise(height, exponent),
            Change::Percent(percent) => height * &percent.ratio(&Magnitude::from(100)),
        };
        Ok(new_height)
    }

    /// Apply to a record, returning the updated record.
    pub fn apply(&self, record: &PersonRecord) -> Result<PersonRecord, ChangeError> {
        let old = record.height();
        match self.apply_to_height(old) {
            Ok(new) => {
                tracing::debug!(
                    style = %self.style(),
                    operand = %self,
                    old = %old.magnitude(),
                    new = %new.magnitude(),
                    "applied size change"
                );
                Ok(record.clone().with_height(new))
            }
            Err(err) => {
                tracing::debug!(
                    style = %self.style(),
                    code = err.error_code(),
                    "rejected size change"
                );
                Err(err)
            }
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Add(length) | Change::Subtract(length) => {
                write!(f, "{} {}", self.style(), length.magnitude())
            }
            Change::Multiply(v) | Change::Divide(v) | Change::Power(v) | Change::Percent(v) => {
                write!(f, "{} {}", self.style(), v)
            }
        }
    }
}

/// `height ^ exponent`, with infinite exponents pushing away from one.
fn raise(height: &Length, exponent: &Magnitude) -> Length {
    match exponent {
        Magnitude::Finite(e) => height.pow(e),
        infinite => {
            let base = height.magnitude();
            if *base == Decimal::ONE {
                return height.clone();
            }
            let grows = (*base > Decimal::ONE) == (*infinite == Magnitude::Infinity);
            if grows { Length::INFINITY } else { Length::zero() }
        }
    }
}

/// Parse and apply a change in one step.
pub fn apply_change(
    record: &PersonRecord,
    style: &str,
    amount: &str,
) -> Result<PersonRecord, ChangeError> {
    Change::parse(style, amount)?.apply(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record_at(meters: Decimal) -> PersonRecord {
        PersonRecord::new("Ann").with_height(Length::from_base(meters))
    }

    #[test]
    fn synonyms_resolve_to_one_style() {
        for (token, style) in [
            ("add", ChangeStyle::Add),
            ("PLUS", ChangeStyle::Add),
            ("+", ChangeStyle::Add),
            ("sub", ChangeStyle::Subtract),
            ("-", ChangeStyle::Subtract),
            ("x", ChangeStyle::Multiply),
            ("Times", ChangeStyle::Multiply),
            ("*", ChangeStyle::Multiply),
            ("/", ChangeStyle::Divide),
            ("**", ChangeStyle::Power),
            ("^", ChangeStyle::Power),
            ("%", ChangeStyle::Percent),
        ] {
            assert_eq!(token.parse::<ChangeStyle>(), Ok(style), "{token}");
        }
        assert_eq!(ChangeStyle::Multiply.to_string(), "multiply");
        assert_eq!(
            Change::parse("grow", "2"),
            Err(ChangeError::InvalidStyle("grow".into()))
        );
    }

    #[test]
    fn multiply_scales_height_and_weight() {
        let record = apply_change(&record_at(dec!(1.754)), "multiply", "10").unwrap();
        assert_eq!(record.height(), &Length::from_base(dec!(17.54)));
        assert_eq!(record.viewscale(), Magnitude::new(dec!(0.1)));
        assert_eq!(record.weight(), record.base_weight() * dec!(1000));
    }

    #[test]
    fn repeated_changes_reach_astronomical_and_subatomic_scales() {
        let mut record = record_at(dec!(1.754));
        for _ in 0..30 {
            record = apply_change(&record, "x", "1000").unwrap();
        }
        assert_eq!(record.height().magnitude().exponent(), Some(90));
        assert_eq!(record.weight().magnitude().exponent(), Some(274));

        for _ in 0..40 {
            record = apply_change(&record, "/", "1000").unwrap();
        }
        assert_eq!(record.height(), &Length::parse("1.754e-30 m").unwrap());
        assert!(!record.weight().is_zero());
        assert_eq!(record.weight().magnitude().exponent(), Some(-86));
    }

    #[test]
    fn multiply_then_divide_restores_height() {
        let start = record_at(dec!(1.754));
        for k in ["2", "7", "0.3", "1e6"] {
            let grown = apply_change(&start, "multiply", k).unwrap();
            let back = apply_change(&grown, "divide", k).unwrap();
            let diff = (back.height().magnitude() - start.height().magnitude()).abs();
            assert!(diff < Magnitude::new(dec!(0.000000001)), "k = {k}");
        }
    }

    #[test]
    fn degenerate_operands_are_rejected() {
        let record = record_at(dec!(1.754));
        assert_eq!(apply_change(&record, "multiply", "1"), Err(ChangeError::NoOpValue));
        assert_eq!(apply_change(&record, "divide", "1"), Err(ChangeError::NoOpValue));
        assert_eq!(apply_change(&record, "power", "1"), Err(ChangeError::NoOpValue));
        assert_eq!(apply_change(&record, "multiply", "0"), Err(ChangeError::ZeroValue));
        assert_eq!(apply_change(&record, "power", "0"), Err(ChangeError::ZeroValue));
        assert_eq!(apply_change(&record, "percent", "0"), Err(ChangeError::ZeroValue));
        assert_eq!(apply_change(&record, "divide", "0"), Err(ChangeError::DivisionByZero));
        assert_eq!(
            apply_change(&record, "x", "lots"),
            Err(ChangeError::InvalidAmount("lots".into()))
        );
        assert!(matches!(
            apply_change(&record, "add", "3 parsecs of cheese"),
            Err(ChangeError::Unit(_))
        ));
    }

    #[test]
    fn directly_built_changes_are_still_validated() {
        let record = record_at(dec!(1.754));
        assert_eq!(
            Change::Divide(Magnitude::zero()).apply(&record),
            Err(ChangeError::DivisionByZero)
        );
        assert_eq!(ChangeError::DivisionByZero.severity(), ErrorSeverity::Arithmetic);
        assert_eq!(ChangeError::NoOpValue.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn additive_changes_take_lengths_and_clamp() {
        let record = record_at(dec!(1.754));
        let taller = apply_change(&record, "add", "1ft").unwrap();
        assert_eq!(taller.height(), &Length::from_base(dec!(2.0588)));
        let gone = apply_change(&record, "minus", "2m").unwrap();
        assert_eq!(gone.height(), &Length::zero());
    }

    #[test]
    fn percent_and_power() {
        let record = record_at(dec!(2));
        let half = apply_change(&record, "percent", "50").unwrap();
        assert_eq!(half.height(), &Length::from_base(dec!(1)));

        let cubed = apply_change(&record, "^", "3").unwrap();
        assert_eq!(cubed.height(), &Length::from_base(dec!(8)));
        assert_eq!(cubed.base_height(), record.base_height());
        assert_eq!(cubed.base_weight(), record.base_weight());
    }

    #[test]
    fn infinite_operands_saturate() {
        let record = record_at(dec!(2));
        let huge = apply_change(&record, "x", "infinity").unwrap();
        assert!(huge.height().is_infinite());
        assert!(apply_change(&record, "pow", "inf").unwrap().height().is_infinite());
        let tiny = apply_change(&record, "divide", "inf").unwrap();
        assert_eq!(tiny.height(), &Length::zero());
        let still_huge = apply_change(&huge, "subtract", "1000 ly").unwrap();
        assert!(still_huge.height().is_infinite());
    }
}
