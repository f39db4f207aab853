//! Arbitrary-precision magnitude with affine infinity.
//!
//! `Magnitude` is the scalar underneath every quantity. Finite values are
//! [`BigDecimal`]s carrying up to [`Magnitude::SIGNIFICANT_DIGITS`] digits
//! with a decimal exponent bounded by [`Magnitude::EXPONENT_LIMIT`]. Growth
//! past that bound saturates to a signed infinity and shrinkage below it
//! rounds to zero, so unbounded scaling can be carried through a whole
//! derivation without raising.
//!
//! Affine rules:
//! - `∞ + x = ∞`, `∞ - ∞ = 0`
//! - `0 × ∞ = 0`
//! - `ratio`: `x / 0 = ±∞`, `0 / 0 = 1`, `∞ / ∞ = 1`, `x / ∞ = 0`
//! - `checked_div` fails on a zero divisor instead

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;

use crate::error::ArithmeticError;

/// Words accepted as the infinite sentinel when parsing.
pub(crate) const INFINITY_WORDS: &[&str] = &["infinity", "infinite", "inf", "∞"];

/// Decimal magnitude with signed infinite sentinels.
///
/// Variant order gives the total order: `NegInfinity < Finite(_) < Infinity`.
/// Finite values are kept normalized, so equal values hash equally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Magnitude {
    NegInfinity,
    Finite(BigDecimal),
    Infinity,
}

impl Magnitude {
    /// Significant digits kept by products, quotients and powers.
    pub const SIGNIFICANT_DIGITS: u64 = 100;

    /// Largest decimal exponent a finite value may carry; `10^-LIMIT` is the
    /// smallest non-zero value.
    pub const EXPONENT_LIMIT: i64 = 999_999;

    pub fn zero() -> Self {
        Magnitude::Finite(BigDecimal::zero())
    }

    pub fn one() -> Self {
        Magnitude::Finite(BigDecimal::one())
    }

    /// Exact conversion from a fixed-precision literal.
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self::from_big(big(value))
    }

    /// Wrap an arbitrary-precision value, rounding to the significant-digit
    /// budget and saturating outside the exponent range.
    pub fn from_big(value: BigDecimal) -> Self {
        if value.is_zero() {
            return Self::zero();
        }
        let exponent = exponent_of(&value);
        if exponent > Self::EXPONENT_LIMIT {
            return Self::signed_infinity(value.is_negative());
        }
        if exponent < -Self::EXPONENT_LIMIT {
            return Self::zero();
        }
        let value = if value.digits() > Self::SIGNIFICANT_DIGITS {
            value.with_prec(Self::SIGNIFICANT_DIGITS)
        } else {
            value
        };
        Magnitude::Finite(value.normalized())
    }

    #[inline]
    pub const fn is_infinite(&self) -> bool {
        matches!(self, Magnitude::Infinity | Magnitude::NegInfinity)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Magnitude::Finite(d) if d.is_zero())
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Magnitude::NegInfinity => true,
            Magnitude::Finite(d) => d.is_negative(),
            Magnitude::Infinity => false,
        }
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    /// The finite decimal value, or `None` for either infinity.
    #[inline]
    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Magnitude::Finite(d) => Some(d),
            _ => None,
        }
    }

    /// Power of ten of the leading digit; `None` for zero and infinities.
    pub fn exponent(&self) -> Option<i64> {
        match self {
            Magnitude::Finite(d) if !d.is_zero() => Some(exponent_of(d)),
            _ => None,
        }
    }

    /// Lossy conversion used for trigonometry. Values beyond `f64` range
    /// become signed infinities or zero.
    pub fn to_f64(&self) -> f64 {
        match self {
            Magnitude::NegInfinity => f64::NEG_INFINITY,
            Magnitude::Infinity => f64::INFINITY,
            Magnitude::Finite(d) => match d.to_f64() {
                Some(f) if f.is_finite() => f,
                _ if d.is_zero() || exponent_of(d) < 0 => 0.0,
                _ if d.is_negative() => f64::NEG_INFINITY,
                _ => f64::INFINITY,
            },
        }
    }

    /// Conversion from the shortest decimal form of an `f64`. NaN maps to zero.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::zero();
        }
        if value.is_infinite() {
            return Self::signed_infinity(value < 0.0);
        }
        BigDecimal::from_str(&format!("{value:e}"))
            .map(Self::from_big)
            .unwrap_or_else(|_| Self::zero())
    }

    pub fn abs(&self) -> Self {
        match self {
            Magnitude::NegInfinity | Magnitude::Infinity => Magnitude::Infinity,
            Magnitude::Finite(d) => Magnitude::Finite(d.abs()),
        }
    }

    /// Clamp into `[0, +∞]`.
    pub fn clamp_non_negative(self) -> Self {
        if self.is_negative() { Self::zero() } else { self }
    }

    fn signed_infinity(negative: bool) -> Self {
        if negative {
            Magnitude::NegInfinity
        } else {
            Magnitude::Infinity
        }
    }

    /// Division that fails on a zero divisor.
    pub fn checked_div(&self, rhs: &Magnitude) -> Result<Magnitude, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(self.ratio(rhs))
    }

    /// Total division: degenerate operands resolve instead of failing.
    ///
    /// Equal degenerate operands (`0/0`, `∞/∞`) are treated as equal and give
    /// one; a non-zero value over zero gives a signed infinity.
    pub fn ratio(&self, rhs: &Magnitude) -> Magnitude {
        use Magnitude::*;
        match (self, rhs) {
            (Finite(a), Finite(b)) if b.is_zero() => {
                if a.is_zero() {
                    Self::one()
                } else {
                    Self::signed_infinity(a.is_negative())
                }
            }
            (Finite(a), Finite(b)) => Self::from_big(a / b),
            (Finite(_), _) => Self::zero(),
            (lhs, Finite(b)) => Self::signed_infinity(lhs.is_negative() != b.is_negative()),
            (lhs, rhs) => {
                if lhs == rhs {
                    Self::one()
                } else {
                    Self::from_big(-BigDecimal::one())
                }
            }
        }
    }

    /// `1 / self`, with `1/0 = ∞` and `1/∞ = 0`.
    pub fn recip(&self) -> Magnitude {
        Self::one().ratio(self)
    }

    /// Raise to an integer power by repeated squaring.
    pub fn powi(&self, exponent: i64) -> Magnitude {
        if exponent == 0 {
            return Self::one();
        }
        let mut base = self.clone();
        let mut remaining = exponent.unsigned_abs();
        let mut result = Self::one();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = &result * &base;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = &base * &base;
            }
        }
        if exponent < 0 { result.recip() } else { result }
    }

    /// Raise to a decimal exponent, saturating at the exponent bound.
    ///
    /// Negative bases only admit integer exponents; a fractional power of a
    /// negative base clamps to zero.
    pub fn pow(&self, exponent: &BigDecimal) -> Magnitude {
        if exponent.is_zero() {
            return Self::one();
        }
        let base = match self {
            Magnitude::Infinity => {
                return if exponent.is_positive() {
                    Magnitude::Infinity
                } else {
                    Self::zero()
                };
            }
            Magnitude::NegInfinity => return Magnitude::Infinity.pow(exponent),
            Magnitude::Finite(d) => d,
        };
        if base.is_zero() {
            return if exponent.is_positive() {
                Self::zero()
            } else {
                Magnitude::Infinity
            };
        }

        if exponent.is_integer() {
            return match exponent.to_i64() {
                Some(n) => self.powi(n),
                // Far beyond the exponent bound either way.
                None => Self::fractional_pow(base, exponent),
            };
        }
        if base.is_negative() {
            return Self::zero();
        }
        Self::fractional_pow(base, exponent)
    }

    /// `base^e` as `m^e × 10^(k·e)` for `base = m × 10^k`, `1 ≤ m < 10`.
    /// The mantissa part carries `f64` precision.
    fn fractional_pow(base: &BigDecimal, exponent: &BigDecimal) -> Magnitude {
        let k = exponent_of(base);
        let e = exponent.to_f64().unwrap_or(0.0);
        let mantissa = base.abs() / ten_pow(k);
        let m = mantissa.to_f64().unwrap_or(1.0);

        let shift = k as f64 * e;
        if !shift.is_finite() || shift.abs() > (Self::EXPONENT_LIMIT + 1) as f64 {
            return if shift > 0.0 { Magnitude::Infinity } else { Self::zero() };
        }
        let whole = shift.floor();
        let scaled = m.powf(e) * 10f64.powf(shift - whole);
        &Self::from_f64(scaled) * &Self::from_big(ten_pow(whole as i64))
    }

    /// Round to `dp` decimal places, halves away from zero.
    pub fn round_dp(&self, dp: u32) -> Magnitude {
        match self {
            Magnitude::Finite(d) => Self::from_big(round_half_away(d, dp)),
            other => other.clone(),
        }
    }

    fn add_ref(&self, rhs: &Magnitude) -> Magnitude {
        use Magnitude::*;
        match (self, rhs) {
            (Finite(a), Finite(b)) => {
                if a.is_zero() {
                    return rhs.clone();
                }
                if b.is_zero() {
                    return self.clone();
                }
                // An addend entirely below the precision budget cannot change the sum.
                let gap = exponent_of(a) - exponent_of(b);
                let budget = Self::SIGNIFICANT_DIGITS as i64 + 1;
                if gap > budget {
                    self.clone()
                } else if -gap > budget {
                    rhs.clone()
                } else {
                    Self::from_big(a + b)
                }
            }
            (Infinity, NegInfinity) | (NegInfinity, Infinity) => Self::zero(),
            (Infinity, _) | (_, Infinity) => Infinity,
            (NegInfinity, _) | (_, NegInfinity) => NegInfinity,
        }
    }

    fn mul_ref(&self, rhs: &Magnitude) -> Magnitude {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        match (self, rhs) {
            (Magnitude::Finite(a), Magnitude::Finite(b)) => Self::from_big(a * b),
            (lhs, rhs) => Self::signed_infinity(lhs.is_negative() != rhs.is_negative()),
        }
    }
}

/// Exact `BigDecimal` for a fixed-precision decimal.
pub(crate) fn big(value: Decimal) -> BigDecimal {
    BigDecimal::new(BigInt::from(value.mantissa()), i64::from(value.scale()))
}

fn ten_pow(exponent: i64) -> BigDecimal {
    BigDecimal::new(BigInt::one(), -exponent)
}

/// Power of ten of the leading digit of a non-zero value.
fn exponent_of(value: &BigDecimal) -> i64 {
    let (_, scale) = value.as_bigint_and_exponent();
    value.digits() as i64 - 1 - scale
}

/// Round to `dp` fractional digits, halves away from zero.
pub(crate) fn round_half_away(value: &BigDecimal, dp: u32) -> BigDecimal {
    let (int, scale) = value.as_bigint_and_exponent();
    let target = i64::from(dp);
    if scale <= target {
        return value.clone();
    }
    let drop = scale - target;
    if drop > value.digits() as i64 {
        return BigDecimal::zero();
    }
    let factor = BigInt::from(10u32).pow(drop as u32);
    let mut quotient = &int / &factor;
    let remainder = &int % &factor;
    if remainder.abs() * 2u32 >= factor {
        if int.sign() == Sign::Minus {
            quotient -= BigInt::one();
        } else {
            quotient += BigInt::one();
        }
    }
    BigDecimal::new(quotient, target)
}

/// Positional rendering without exponent, trailing fractional zeros trimmed.
pub(crate) fn plain_string(value: &BigDecimal) -> String {
    let (int, scale) = value.as_bigint_and_exponent();
    if int.is_zero() {
        return "0".to_string();
    }
    let digits = int.magnitude().to_string();
    let body = if scale <= 0 {
        format!("{digits}{}", "0".repeat(scale.unsigned_abs() as usize))
    } else {
        let scale = scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale - digits.len() + 1))
        } else {
            digits
        };
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        }
    };
    if int.sign() == Sign::Minus {
        format!("-{body}")
    } else {
        body
    }
}

/// `d.ddde±x` rendering with `significant` digits, trailing zeros trimmed.
pub(crate) fn scientific_string(value: &BigDecimal, significant: u64) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    let rounded = value.with_prec(significant.max(1));
    let (int, scale) = rounded.as_bigint_and_exponent();
    let digits = int.magnitude().to_string();
    let exponent = digits.len() as i64 - 1 - scale;
    let (lead, rest) = digits.split_at(1);
    let rest = rest.trim_end_matches('0');
    let sign = if int.sign() == Sign::Minus { "-" } else { "" };
    if rest.is_empty() {
        format!("{sign}{lead}e{exponent}")
    } else {
        format!("{sign}{lead}.{rest}e{exponent}")
    }
}

impl Default for Magnitude {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Magnitude {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<BigDecimal> for Magnitude {
    fn from(value: BigDecimal) -> Self {
        Self::from_big(value)
    }
}

impl From<i64> for Magnitude {
    fn from(value: i64) -> Self {
        Self::from_big(BigDecimal::from(value))
    }
}

impl From<i32> for Magnitude {
    fn from(value: i32) -> Self {
        Self::from_big(BigDecimal::from(value))
    }
}

impl Neg for Magnitude {
    type Output = Magnitude;
    fn neg(self) -> Magnitude {
        match self {
            Magnitude::NegInfinity => Magnitude::Infinity,
            Magnitude::Finite(d) => Magnitude::Finite(-d),
            Magnitude::Infinity => Magnitude::NegInfinity,
        }
    }
}

impl Neg for &Magnitude {
    type Output = Magnitude;
    fn neg(self) -> Magnitude {
        -self.clone()
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $trait<&Magnitude> for &Magnitude {
            type Output = Magnitude;
            fn $method(self, rhs: &Magnitude) -> Magnitude {
                let ($a, $b) = (self, rhs);
                $body
            }
        }

        impl $trait<Magnitude> for Magnitude {
            type Output = Magnitude;
            fn $method(self, rhs: Magnitude) -> Magnitude {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&Magnitude> for Magnitude {
            type Output = Magnitude;
            fn $method(self, rhs: &Magnitude) -> Magnitude {
                (&self).$method(rhs)
            }
        }

        impl $trait<Magnitude> for &Magnitude {
            type Output = Magnitude;
            fn $method(self, rhs: Magnitude) -> Magnitude {
                self.$method(&rhs)
            }
        }

        impl $trait<Decimal> for Magnitude {
            type Output = Magnitude;
            fn $method(self, rhs: Decimal) -> Magnitude {
                (&self).$method(&Magnitude::new(rhs))
            }
        }

        impl $trait<Decimal> for &Magnitude {
            type Output = Magnitude;
            fn $method(self, rhs: Decimal) -> Magnitude {
                self.$method(&Magnitude::new(rhs))
            }
        }
    };
}

forward_binop!(Add, add, |a, b| a.add_ref(b));
forward_binop!(Sub, sub, |a, b| a.add_ref(&-b));
forward_binop!(Mul, mul, |a, b| a.mul_ref(b));

impl PartialEq<Decimal> for Magnitude {
    fn eq(&self, other: &Decimal) -> bool {
        matches!(self, Magnitude::Finite(d) if *d == big(*other))
    }
}

impl PartialOrd<Decimal> for Magnitude {
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.cmp(&Magnitude::new(*other)))
    }
}

/// Canonical text: positional for everyday exponents, scientific beyond.
impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Magnitude::NegInfinity => f.write_str("-infinity"),
            Magnitude::Infinity => f.write_str("infinity"),
            Magnitude::Finite(d) => match self.exponent() {
                Some(e) if !(-20..=28).contains(&e) => {
                    f.write_str(&scientific_string(d, Self::SIGNIFICANT_DIGITS))
                }
                _ => f.write_str(&plain_string(d)),
            },
        }
    }
}

/// Error returned when a bare number cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed number: {0:?}")]
pub struct NumberParseError(pub String);

/// Parse a decimal literal: thousands separators, scientific exponents,
/// simple fractions (`2/3`) and the infinity words are accepted.
pub(crate) fn parse_decimal_literal(input: &str) -> Result<Magnitude, NumberParseError> {
    let trimmed = input.trim();
    let err = || NumberParseError(input.to_string());
    if trimmed.is_empty() {
        return Err(err());
    }

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed).trim_start()),
    };

    if INFINITY_WORDS
        .iter()
        .any(|word| body.eq_ignore_ascii_case(word))
    {
        return Ok(if negative {
            Magnitude::NegInfinity
        } else {
            Magnitude::Infinity
        });
    }

    let cleaned: String = body.chars().filter(|c| *c != ',' && *c != '_').collect();
    let value = if let Some((num, den)) = cleaned.split_once('/') {
        let num = parse_plain(num).ok_or_else(err)?;
        let den = parse_plain(den).ok_or_else(err)?;
        Magnitude::from_big(num)
            .checked_div(&Magnitude::from_big(den))
            .map_err(|_| err())?
    } else {
        Magnitude::from_big(parse_plain(&cleaned).ok_or_else(err)?)
    };

    Ok(if negative { -value } else { value })
}

fn parse_plain(s: &str) -> Option<BigDecimal> {
    let s = s.trim();
    let valid = s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !valid {
        return None;
    }
    let mut text = s.to_string();
    if text.starts_with('.') {
        text.insert(0, '0');
    }
    if text.ends_with('.') {
        text.push('0');
    }
    BigDecimal::from_str(&text).ok()
}

impl FromStr for Magnitude {
    type Err = NumberParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal_literal(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Magnitude {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Magnitude {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
