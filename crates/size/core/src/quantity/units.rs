//! Unit tables for lengths (base: meters) and weights (base: grams).
//!
//! Each unit carries the spellings accepted when parsing and, when it takes
//! part in auto-scaled display, the unit system it belongs to. Astronomical
//! lengths sit at the top of both display ladders.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Physical dimension of a quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Dimension {
    Length,
    Weight,
}

/// Display preference stored on each record.
///
/// Parsed case-insensitively from the single-letter codes `m` and `u`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum UnitSystem {
    #[default]
    #[strum(serialize = "m")]
    #[cfg_attr(feature = "serde", serde(rename = "m"))]
    Metric,
    #[strum(serialize = "u")]
    #[cfg_attr(feature = "serde", serde(rename = "u"))]
    Us,
}

/// Which display ladders a unit appears on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ladder {
    /// Metric ladder only.
    Metric,
    /// US customary ladder only.
    Us,
    /// Both ladders (astronomical units).
    Shared,
    /// Accepted when parsing, never chosen for display.
    ParseOnly,
}

impl Ladder {
    const fn includes(self, system: UnitSystem) -> bool {
        match self {
            Ladder::Shared => true,
            Ladder::Metric => matches!(system, UnitSystem::Metric),
            Ladder::Us => matches!(system, UnitSystem::Us),
            Ladder::ParseOnly => false,
        }
    }
}

/// A named unit and its size in base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit {
    /// Symbol used for display (`cm`, `lb`, `ly`).
    pub symbol: &'static str,
    /// Spellings accepted when parsing, already normalized (see [`normalize_unit_token`]).
    pub names: &'static [&'static str],
    /// Number of base units (meters or grams) in one of this unit.
    pub factor: Decimal,
    pub dimension: Dimension,
    pub ladder: Ladder,
}

impl Unit {
    const fn length(
        symbol: &'static str,
        names: &'static [&'static str],
        factor: Decimal,
        ladder: Ladder,
    ) -> Self {
        Self {
            symbol,
            names,
            factor,
            dimension: Dimension::Length,
            ladder,
        }
    }

    const fn weight(
        symbol: &'static str,
        names: &'static [&'static str],
        factor: Decimal,
        ladder: Ladder,
    ) -> Self {
        Self {
            symbol,
            names,
            factor,
            dimension: Dimension::Weight,
            ladder,
        }
    }

    fn matches(&self, token: &str) -> bool {
        self.names.contains(&token)
    }
}

pub const INCH: Decimal = dec!(0.0254);
pub const FOOT: Decimal = dec!(0.3048);
pub const MILE: Decimal = dec!(1609.344);

/// Length units in ascending size.
pub static LENGTH_UNITS: &[Unit] = &[
    Unit::length("fm", &["fm", "femtometer", "femtometers", "femtometre", "femtometres"], dec!(0.000000000000001), Ladder::Metric),
    Unit::length("pm", &["pm", "picometer", "picometers", "picometre", "picometres"], dec!(0.000000000001), Ladder::Metric),
    Unit::length("nm", &["nm", "nanometer", "nanometers", "nanometre", "nanometres"], dec!(0.000000001), Ladder::Metric),
    Unit::length("µm", &["µm", "μm", "um", "micrometer", "micrometers", "micrometre", "micrometres", "micron", "microns"], dec!(0.000001), Ladder::Metric),
    Unit::length("mm", &["mm", "millimeter", "millimeters", "millimetre", "millimetres"], dec!(0.001), Ladder::Metric),
    Unit::length("cm", &["cm", "centimeter", "centimeters", "centimetre", "centimetres"], dec!(0.01), Ladder::Metric),
    Unit::length("in", &["in", "inch", "inches", "\"", "″"], INCH, Ladder::Us),
    Unit::length("ft", &["ft", "foot", "feet", "'", "′"], FOOT, Ladder::Us),
    Unit::length("yd", &["yd", "yard", "yards"], dec!(0.9144), Ladder::ParseOnly),
    Unit::length("m", &["m", "meter", "meters", "metre", "metres"], Decimal::ONE, Ladder::Metric),
    Unit::length("km", &["km", "kilometer", "kilometers", "kilometre", "kilometres"], dec!(1000), Ladder::Metric),
    Unit::length("mi", &["mi", "mile", "miles"], MILE, Ladder::Us),
    Unit::length("AU", &["au", "astronomicalunit", "astronomicalunits"], dec!(149597870700), Ladder::Shared),
    Unit::length("ly", &["ly", "lightyear", "lightyears"], dec!(9460730472580800), Ladder::Shared),
    Unit::length("pc", &["pc", "parsec", "parsecs"], dec!(30856775814913673), Ladder::Shared),
];

/// Weight units in ascending size.
pub static WEIGHT_UNITS: &[Unit] = &[
    Unit::weight("µg", &["µg", "μg", "ug", "microgram", "micrograms", "microgramme", "microgrammes"], dec!(0.000001), Ladder::Metric),
    Unit::weight("mg", &["mg", "milligram", "milligrams", "milligramme", "milligrammes"], dec!(0.001), Ladder::Metric),
    Unit::weight("g", &["g", "gram", "grams", "gramme", "grammes"], Decimal::ONE, Ladder::Metric),
    Unit::weight("oz", &["oz", "ounce", "ounces"], dec!(28.349523125), Ladder::Us),
    Unit::weight("lb", &["lb", "lbs", "pound", "pounds"], dec!(453.59237), Ladder::Us),
    Unit::weight("kg", &["kg", "kilogram", "kilograms", "kilogramme", "kilogrammes", "kilo", "kilos"], dec!(1000), Ladder::Metric),
    Unit::weight("st", &["st", "stone", "stones"], dec!(6350.29318), Ladder::ParseOnly),
    Unit::weight("US tons", &["ton", "tons", "uston", "ustons", "shortton", "shorttons"], dec!(907184.74), Ladder::Us),
    Unit::weight("t", &["t", "tonne", "tonnes", "metricton", "metrictons"], dec!(1000000), Ladder::Metric),
    Unit::weight("Earths", &["earth", "earths", "earthmass", "earthmasses"], dec!(5972200000000000000000000000), Ladder::ParseOnly),
];

/// Normalize a unit token for lookup: lowercase, with spaces, hyphens,
/// underscores and a trailing period removed.
pub fn normalize_unit_token(token: &str) -> String {
    token
        .trim()
        .trim_end_matches('.')
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// All units of a dimension, ascending.
pub fn units_for(dimension: Dimension) -> &'static [Unit] {
    match dimension {
        Dimension::Length => LENGTH_UNITS,
        Dimension::Weight => WEIGHT_UNITS,
    }
}

/// Find a unit by any accepted spelling, case-insensitively.
pub fn find_unit(dimension: Dimension, token: &str) -> Option<&'static Unit> {
    let normalized = normalize_unit_token(token);
    units_for(dimension).iter().find(|u| u.matches(&normalized))
}

/// Find a unit by its display symbol (exact match).
pub fn unit_by_symbol(dimension: Dimension, symbol: &str) -> Option<&'static Unit> {
    units_for(dimension).iter().find(|u| u.symbol == symbol)
}

/// Display ladder for a system, ascending.
pub fn display_ladder(dimension: Dimension, system: UnitSystem) -> impl Iterator<Item = &'static Unit> {
    units_for(dimension)
        .iter()
        .filter(move |u| u.ladder.includes(system))
}
