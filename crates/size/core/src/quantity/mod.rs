//! Arbitrary-precision quantities with a fixed physical dimension.
//!
//! [`Length`] (base: meters) and [`Weight`] (base: grams) wrap a
//! [`Magnitude`] clamped to `[0, +∞]`. Arithmetic never fails: sums and
//! products saturate at the infinite sentinel and differences clamp at zero.
//! Only division by the zero scalar is rejected, through `checked_div`.
//!
//! Length and weight are never converted into each other automatically;
//! callers apply the cube law explicitly (see `PersonRecord::weight`).
//!
//! # Usage
//! ```
//! use size_core::quantity::{FormatSpec, Length};
//!
//! let height: Length = "5ft10in".parse().unwrap();
//! let doubled = height * rust_decimal::Decimal::TWO;
//! assert_eq!(doubled.format(&FormatSpec::metric()), "3.556m");
//! ```

mod format;
mod magnitude;
mod parse;
pub mod units;

use core::fmt;
use core::ops::{Add, Mul, Sub};
use core::str::FromStr;

use bigdecimal::BigDecimal;
use rust_decimal::Decimal;

use crate::error::ArithmeticError;

pub use format::{
    DisplayMode, FormatSpec, format_number, format_percent, format_quantity, format_scale,
};
pub use magnitude::{Magnitude, NumberParseError};
pub use parse::{UnitParseError, parse_quantity};
pub use units::{Dimension, Unit, UnitSystem};

macro_rules! quantity_type {
    ($(#[$meta:meta])* $name:ident, $dimension:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Magnitude);

        impl $name {
            pub const INFINITY: $name = $name(Magnitude::Infinity);
            pub const DIMENSION: Dimension = $dimension;

            /// Wrap a magnitude, clamping it into `[0, +∞]`.
            #[inline]
            pub fn new(value: Magnitude) -> Self {
                $name(value.clamp_non_negative())
            }

            pub fn zero() -> Self {
                $name(Magnitude::zero())
            }

            /// Construct from a value in base units.
            #[inline]
            pub fn from_base(value: Decimal) -> Self {
                Self::new(Magnitude::new(value))
            }

            /// Construct from a value in any accepted unit spelling.
            pub fn from_unit(value: Decimal, unit: &str) -> Result<Self, UnitParseError> {
                let unit = units::find_unit(Self::DIMENSION, unit)
                    .ok_or_else(|| UnitParseError::UnknownUnit(unit.to_string()))?;
                Ok(Self::new(Magnitude::new(value) * unit.factor))
            }

            /// Parse `<number><unit>` (compound forms allowed).
            pub fn parse(input: &str) -> Result<Self, UnitParseError> {
                parse_quantity(input, Self::DIMENSION).map(Self::new)
            }

            #[inline]
            pub const fn magnitude(&self) -> &Magnitude {
                &self.0
            }

            #[inline]
            pub const fn is_infinite(&self) -> bool {
                self.0.is_infinite()
            }

            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            /// Value expressed in the named unit.
            pub fn in_unit(&self, unit: &str) -> Result<Magnitude, UnitParseError> {
                let unit = units::find_unit(Self::DIMENSION, unit)
                    .ok_or_else(|| UnitParseError::UnknownUnit(unit.to_string()))?;
                Ok(self.0.ratio(&Magnitude::new(unit.factor)))
            }

            /// Divide by a scalar, failing on zero.
            pub fn checked_div(&self, rhs: &Magnitude) -> Result<Self, ArithmeticError> {
                self.0.checked_div(rhs).map(Self::new)
            }

            /// Dimensionless ratio `self / rhs` (see [`Magnitude::ratio`]).
            #[inline]
            pub fn ratio(&self, rhs: &Self) -> Magnitude {
                self.0.ratio(&rhs.0)
            }

            /// Raise the base-unit value to `exponent`.
            pub fn pow(&self, exponent: &BigDecimal) -> Self {
                Self::new(self.0.pow(exponent))
            }

            pub fn format(&self, spec: &FormatSpec) -> String {
                format_quantity(&self.0, Self::DIMENSION, spec)
            }

            /// `self` as a percentage of `reference`.
            pub fn percent_of(&self, reference: &Self, precision: u32) -> String {
                format_percent(&self.0, &reference.0, precision)
            }
        }

        impl From<$name> for Magnitude {
            fn from(value: $name) -> Magnitude {
                value.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name::new(self.0 + rhs.0)
            }
        }

        impl Add<&$name> for &$name {
            type Output = $name;
            fn add(self, rhs: &$name) -> $name {
                $name::new(&self.0 + &rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name::new(self.0 - rhs.0)
            }
        }

        impl Sub<&$name> for &$name {
            type Output = $name;
            fn sub(self, rhs: &$name) -> $name {
                $name::new(&self.0 - &rhs.0)
            }
        }

        impl Mul<Magnitude> for $name {
            type Output = $name;
            fn mul(self, rhs: Magnitude) -> $name {
                $name::new(self.0 * rhs)
            }
        }

        impl Mul<&Magnitude> for &$name {
            type Output = $name;
            fn mul(self, rhs: &Magnitude) -> $name {
                $name::new(&self.0 * rhs)
            }
        }

        impl Mul<Decimal> for $name {
            type Output = $name;
            fn mul(self, rhs: Decimal) -> $name {
                $name::new(self.0 * rhs)
            }
        }

        impl Mul<Decimal> for &$name {
            type Output = $name;
            fn mul(self, rhs: Decimal) -> $name {
                $name::new(&self.0 * rhs)
            }
        }

        impl FromStr for $name {
            type Err = UnitParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        /// Metric with US customary in parentheses, default precision.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.format(&FormatSpec::both()))
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                <Magnitude as serde::Deserialize>::deserialize(deserializer).map($name::new)
            }
        }
    };
}

quantity_type!(
    /// A length in meters.
    Length,
    Dimension::Length
);

quantity_type!(
    /// A weight (mass) in grams.
    Weight,
    Dimension::Weight
);

impl Length {
    /// Compact rendering used in nickname size tags (`1.8m`, `5'9.1"`).
    pub fn size_tag(&self, system: UnitSystem) -> String {
        self.format(&FormatSpec::system(system).with_precision(1))
    }
}
