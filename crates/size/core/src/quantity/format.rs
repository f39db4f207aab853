//! Human-readable rendering of quantities.
//!
//! Auto-scaling picks the largest display unit that does not exceed the
//! value. US lengths between a foot and a mile render as feet and inches.
//! Values that still fall outside the ladder switch to scientific notation.

use bigdecimal::BigDecimal;
use num_traits::Zero;
use rust_decimal::Decimal;

use super::magnitude::{Magnitude, big, plain_string, round_half_away, scientific_string};
use super::units::{self, Dimension, Unit, UnitSystem};
use crate::config::SizeConfig;

/// Values at or above this (in the chosen unit) use scientific notation.
const SCIENTIFIC_THRESHOLD: Decimal = rust_decimal_macros::dec!(1000000000000000);

/// Target rendering for a quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Auto-scaled within one unit system.
    System(UnitSystem),
    /// Metric first, US customary in parentheses.
    Both,
    /// A fixed unit.
    Unit(&'static Unit),
}

/// Formatting options: display mode, decimal places and digit grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatSpec {
    pub mode: DisplayMode,
    pub precision: u32,
    pub grouping: bool,
}

impl FormatSpec {
    pub const fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            precision: SizeConfig::DEFAULT_PRECISION,
            grouping: true,
        }
    }

    pub const fn metric() -> Self {
        Self::new(DisplayMode::System(UnitSystem::Metric))
    }

    pub const fn us() -> Self {
        Self::new(DisplayMode::System(UnitSystem::Us))
    }

    pub const fn both() -> Self {
        Self::new(DisplayMode::Both)
    }

    pub const fn system(system: UnitSystem) -> Self {
        Self::new(DisplayMode::System(system))
    }

    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub const fn with_grouping(mut self, grouping: bool) -> Self {
        self.grouping = grouping;
        self
    }
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::both()
    }
}

/// Render a magnitude of the given dimension.
pub fn format_quantity(value: &Magnitude, dimension: Dimension, spec: &FormatSpec) -> String {
    if value.is_infinite() {
        return format_number(value, spec.precision, spec.grouping);
    }
    match spec.mode {
        DisplayMode::Both => format!(
            "{} ({})",
            format_in_system(value, dimension, UnitSystem::Metric, spec),
            format_in_system(value, dimension, UnitSystem::Us, spec)
        ),
        DisplayMode::System(system) => format_in_system(value, dimension, system, spec),
        DisplayMode::Unit(unit) => {
            let scaled = value.ratio(&Magnitude::new(unit.factor));
            with_symbol(format_number(&scaled, spec.precision, spec.grouping), unit)
        }
    }
}

fn format_in_system(
    value: &Magnitude,
    dimension: Dimension,
    system: UnitSystem,
    spec: &FormatSpec,
) -> String {
    let unit = pick_unit(value, dimension, system);
    if dimension == Dimension::Length && unit.symbol == "ft" {
        if let Some(d) = value.as_decimal() {
            return format_feet_inches(d, spec);
        }
    }
    let scaled = value.ratio(&Magnitude::new(unit.factor));
    with_symbol(format_number(&scaled, spec.precision, spec.grouping), unit)
}

/// Largest ladder unit not exceeding `value`; the smallest unit otherwise.
fn pick_unit(value: &Magnitude, dimension: Dimension, system: UnitSystem) -> &'static Unit {
    let ladder: Vec<&'static Unit> = units::display_ladder(dimension, system).collect();
    let smallest = ladder[0];
    let abs = value.abs();
    ladder
        .into_iter()
        .rev()
        .find(|u| abs >= Magnitude::new(u.factor))
        .unwrap_or(smallest)
}

fn format_feet_inches(meters: &BigDecimal, spec: &FormatSpec) -> String {
    let twelve = BigDecimal::from(12);
    let total_inches = meters / &big(units::INCH);
    let mut feet = (&total_inches / &twelve).with_scale(0);
    let mut inches = round_half_away(&(&total_inches - &feet * &twelve), spec.precision);
    if inches >= twelve {
        feet += BigDecimal::from(1);
        inches -= twelve;
    }
    format!(
        "{}'{}\"",
        format_number(&Magnitude::from_big(feet), 0, spec.grouping),
        format_number(&Magnitude::from_big(inches), spec.precision, false)
    )
}

fn with_symbol(number: String, unit: &Unit) -> String {
    // Word-like symbols ("US tons", "Earths") read better spaced.
    if unit.symbol.chars().count() > 2 && unit.symbol.chars().any(char::is_lowercase) {
        format!("{number} {}", unit.symbol)
    } else {
        format!("{number}{}", unit.symbol)
    }
}

/// Render a plain number with `precision` decimal places, trailing zeros
/// trimmed, optional thousands grouping, `∞` for infinity.
pub fn format_number(value: &Magnitude, precision: u32, grouping: bool) -> String {
    let d = match value {
        Magnitude::Infinity => return "∞".to_string(),
        Magnitude::NegInfinity => return "-∞".to_string(),
        Magnitude::Finite(d) => d,
    };
    if d.abs() >= big(SCIENTIFIC_THRESHOLD) {
        return format_scientific(d, precision);
    }
    let rounded = round_half_away(d, precision);
    if rounded.is_zero() && !d.is_zero() {
        return format_scientific(d, precision);
    }

    let text = plain_string(&rounded);
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let int_part = if grouping {
        group_thousands(int_part)
    } else {
        int_part.to_string()
    };
    match frac_part {
        Some(f) => format!("{sign}{int_part}.{f}"),
        None => format!("{sign}{int_part}"),
    }
}

/// `precision` digits after the leading one: 1.500e20 renders as 1.5e20.
fn format_scientific(d: &BigDecimal, precision: u32) -> String {
    scientific_string(d, u64::from(precision) + 1)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `value / reference × 100`, rendered with a percent sign.
pub fn format_percent(value: &Magnitude, reference: &Magnitude, precision: u32) -> String {
    let pct = value.ratio(reference) * Decimal::ONE_HUNDRED;
    format!("{}%", format_number(&pct, precision, true))
}

/// Scale summary: `10x` at or above one, `1/10x` below.
pub fn format_scale(scale: &Magnitude, precision: u32) -> String {
    if scale.is_zero() || *scale >= Decimal::ONE {
        format!("{}x", format_number(scale, precision, true))
    } else {
        format!("1/{}x", format_number(&scale.recip(), precision, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn len(d: Decimal) -> Magnitude {
        Magnitude::new(d)
    }

    #[test]
    fn metric_autoscale() {
        let spec = FormatSpec::metric();
        assert_eq!(format_quantity(&len(dec!(1.754)), Dimension::Length, &spec), "1.754m");
        assert_eq!(format_quantity(&len(dec!(0.25057)), Dimension::Length, &spec), "25.057cm");
        assert_eq!(format_quantity(&len(dec!(12345.6)), Dimension::Length, &spec), "12.346km");
        assert_eq!(format_quantity(&len(dec!(0.0000005)), Dimension::Length, &spec), "500nm");
    }

    #[test]
    fn us_lengths_use_feet_and_inches() {
        let spec = FormatSpec::us().with_precision(1);
        assert_eq!(format_quantity(&len(dec!(1.754)), Dimension::Length, &spec), "5'9.1\"");
        assert_eq!(format_quantity(&len(dec!(0.1)), Dimension::Length, &spec), "3.9in");
        assert_eq!(format_quantity(&len(dec!(3218.688)), Dimension::Length, &spec), "2mi");
    }

    #[test]
    fn feet_inches_carry_over() {
        // 5 ft 11.99 in rounds to 6'0"
        let meters = (dec!(71.99) * units::INCH).round_dp(10);
        let spec = FormatSpec::us().with_precision(1);
        assert_eq!(format_quantity(&len(meters), Dimension::Length, &spec), "6'0\"");
    }

    #[test]
    fn both_systems_and_weights() {
        let spec = FormatSpec::both().with_precision(1);
        assert_eq!(
            format_quantity(&len(dec!(66760)), Dimension::Weight, &spec),
            "66.8kg (147.2lb)"
        );
    }

    #[test]
    fn grouping_scientific_and_infinity() {
        assert_eq!(format_number(&len(dec!(1234567.891)), 2, true), "1,234,567.89");
        assert_eq!(format_number(&len(dec!(1234567.891)), 2, false), "1234567.89");
        let huge: Magnitude = "2.5e20".parse().unwrap();
        assert_eq!(format_number(&huge, 2, true), "2.5e20");
        assert_eq!(format_number(&Magnitude::Infinity, 3, true), "∞");
        assert_eq!(
            format_quantity(&Magnitude::Infinity, Dimension::Length, &FormatSpec::both()),
            "∞"
        );
    }

    #[test]
    fn extreme_values_render_scientifically() {
        let heavy: Magnitude = "1.0012e52".parse().unwrap();
        assert_eq!(format_number(&heavy, 3, true), "1.001e52");
        let light: Magnitude = "1.23724e-23".parse().unwrap();
        assert_eq!(format_number(&light, 3, true), "1.237e-23");
        let beyond_f64: Magnitude = "4.2e400".parse().unwrap();
        assert_eq!(format_number(&beyond_f64, 3, true), "4.2e400");
        assert_eq!(format_number(&Magnitude::new(dec!(0.0004)), 3, true), "4e-4");
    }

    #[test]
    fn fixed_unit_and_percent() {
        let spec = FormatSpec::new(DisplayMode::Unit(
            units::unit_by_symbol(Dimension::Length, "mm").unwrap(),
        ));
        assert_eq!(format_quantity(&len(dec!(1.5)), Dimension::Length, &spec), "1,500mm");
        assert_eq!(format_percent(&len(dec!(17.54)), &len(dec!(1.754)), 1), "1,000%");
    }

    #[test]
    fn scale_summaries() {
        assert_eq!(format_scale(&len(dec!(2.5)), 3), "2.5x");
        assert_eq!(format_scale(&len(dec!(0.125)), 3), "1/8x");
        assert_eq!(format_scale(&Magnitude::zero(), 3), "0x");
        assert_eq!(format_scale(&Magnitude::Infinity, 3), "∞x");
    }
}
