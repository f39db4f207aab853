//! Deterministic proportional-scaling engine.
//!
//! `size-core` turns a person's canonical height and unscaled bases into a
//! full set of derived body measurements, applies validated height changes,
//! and compares two differently-scaled people. Quantities are arbitrary
//! precision decimals with an infinite sentinel, so scales from femtometers
//! to parsecs never raise arithmetic errors.
//!
//! Everything here is a pure function over values: records go in, new
//! records or stat sets come out. Storage belongs to the caller.
pub mod change;
pub mod compare;
pub mod config;
pub mod error;
pub mod quantity;
pub mod record;
pub mod stats;

pub use change::{Change, ChangeError, ChangeStyle, apply_change};
pub use compare::{LookDirection, PersonComparison, build_comparison, calc_view_angle, look};
pub use config::SizeConfig;
pub use error::{ArithmeticError, ErrorSeverity, SizeError};
pub use quantity::{
    Dimension, DisplayMode, FormatSpec, Length, Magnitude, UnitParseError, UnitSystem, Weight,
};
pub use record::{Gender, PersonRecord, RecordError, RecordId};
pub use stats::{
    PersonStats, ShoeSize, ShoeSizeError, StatKind, derive, foot_length_from_shoe_size,
    format_shoe_size,
};
