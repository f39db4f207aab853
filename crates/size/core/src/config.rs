use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::quantity::{Length, UnitSystem, Weight};

/// Anthropometric constants and tunable display parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeConfig {
    /// Decimal places used when rendering quantities.
    pub display_precision: u32,
    /// Unit system assigned to newly registered records.
    pub unit_system: UnitSystem,
    /// Height (and base height) of a newly registered record.
    pub new_record_height: Length,
    /// Base weight of a newly registered record.
    pub new_record_weight: Weight,
}

impl SizeConfig {
    // ===== reference human =====
    /// Height of the average human, in meters.
    pub const DEFAULT_HEIGHT: Decimal = dec!(1.754);
    /// Weight of the average human, in grams.
    pub const DEFAULT_WEIGHT: Decimal = dec!(66760);
    /// Thickness of clothing thread at average height, in meters.
    pub const DEFAULT_THREAD_THICKNESS: Decimal = dec!(0.001016);
    /// Walking speed of the average human, in meters per hour.
    pub const DEFAULT_WALK_SPEED: Decimal = dec!(4023.36);
    /// Running speed of the average human, in meters per hour.
    pub const DEFAULT_RUN_SPEED: Decimal = dec!(12070.08);

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PRECISION: u32 = 3;

    pub fn new() -> Self {
        Self {
            display_precision: Self::DEFAULT_PRECISION,
            unit_system: UnitSystem::Metric,
            new_record_height: Self::average_height(),
            new_record_weight: Self::average_weight(),
        }
    }

    pub fn average_height() -> Length {
        Length::from_base(Self::DEFAULT_HEIGHT)
    }

    pub fn average_weight() -> Weight {
        Weight::from_base(Self::DEFAULT_WEIGHT)
    }

    #[must_use]
    pub fn with_display_precision(mut self, precision: u32) -> Self {
        self.display_precision = precision;
        self
    }

    #[must_use]
    pub fn with_unit_system(mut self, system: UnitSystem) -> Self {
        self.unit_system = system;
        self
    }

    /// Zero or infinite heights are ignored; a new record needs a usable base.
    #[must_use]
    pub fn with_new_record_height(mut self, height: Length) -> Self {
        if !height.is_zero() && !height.is_infinite() {
            self.new_record_height = height;
        }
        self
    }

    #[must_use]
    pub fn with_new_record_weight(mut self, weight: Weight) -> Self {
        self.new_record_weight = weight;
        self
    }
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self::new()
    }
}
