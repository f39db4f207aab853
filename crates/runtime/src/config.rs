//! Runtime configuration loaded from the environment.

use std::env;

use size_core::{Length, SizeConfig, UnitSystem, Weight};

/// Settings for a [`SizeService`](crate::SizeService).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuntimeConfig {
    pub size: SizeConfig,
}

impl RuntimeConfig {
    pub fn new(size: SizeConfig) -> Self {
        Self { size }
    }

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SIZE_UNIT_SYSTEM` - `m` or `u` for new records (default: `m`)
    /// - `SIZE_DISPLAY_PRECISION` - decimal places in sentences (default: 3)
    /// - `SIZE_DEFAULT_HEIGHT` - height of new records, e.g. `5ft10in` (default: 1.754m)
    /// - `SIZE_DEFAULT_WEIGHT` - weight of new records, e.g. `70kg` (default: 66.76kg)
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut size = SizeConfig::default();

        if let Some(system) = read_env::<UnitSystem>("SIZE_UNIT_SYSTEM") {
            size = size.with_unit_system(system);
        }
        if let Some(precision) = read_env::<u32>("SIZE_DISPLAY_PRECISION") {
            size = size.with_display_precision(precision);
        }
        if let Some(height) = read_env::<Length>("SIZE_DEFAULT_HEIGHT") {
            size = size.with_new_record_height(height);
        }
        if let Some(weight) = read_env::<Weight>("SIZE_DEFAULT_WEIGHT") {
            size = size.with_new_record_weight(weight);
        }

        Self { size }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
