//! Proportion derivation.
//!
//! Every body measurement is the current height divided by a fixed
//! anthropometric denominator taken from the average human. Measurements
//! that the record overrides with a real-world length are instead scaled by
//! `1 / viewscale`, so they stay the same physical object at any height.
//!
//! Stats are never stored; derive them from a [`PersonRecord`] when needed.

mod sentence;
mod shoe;

pub use sentence::StatKind;
pub use shoe::{
    NO_SHOE_SIZE, ShoeSize, ShoeSizeError, foot_length_from_shoe_size, format_shoe_size,
};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::compare::{LookDirection, look};
use crate::config::SizeConfig;
use crate::quantity::{Length, Magnitude, UnitSystem, Weight};
use crate::record::{Gender, PersonRecord};

/// Height-to-measurement denominators for the average human.
pub mod ratios {
    use super::*;

    pub const FOOT_LENGTH: Decimal = dec!(7);
    /// Foot width is foot length over 2.5.
    pub const FOOT_WIDTH: Decimal = dec!(17.5);
    pub const TOE_HEIGHT: Decimal = dec!(65);
    pub const SHOEPRINT_DEPTH: Decimal = dec!(135);
    pub const POINTER_LENGTH: Decimal = dec!(17.26);
    pub const THUMB_WIDTH: Decimal = dec!(69.06);
    pub const NAIL_THICKNESS: Decimal = dec!(2920);
    pub const FINGERPRINT_DEPTH: Decimal = dec!(35080);
    pub const HAIR_WIDTH: Decimal = dec!(23387);
    pub const EYE_WIDTH: Decimal = dec!(73.083);
}

/// Everything derivable from one record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonStats {
    pub nickname: String,
    pub tag: String,
    pub gender: Option<Gender>,
    pub unit_system: UnitSystem,

    // ===== scale =====
    pub height: Length,
    pub base_height: Length,
    pub base_weight: Weight,
    pub weight: Weight,
    /// `base_height / height`.
    pub viewscale: Magnitude,
    /// `1 / viewscale`.
    pub scale: Magnitude,
    /// `scale³`.
    pub weight_scale: Magnitude,
    pub average_height_mult: Magnitude,
    pub average_weight_mult: Magnitude,

    // ===== body =====
    pub foot_length: Length,
    /// `None` when the foot is too small for any shoe.
    pub shoe_size: Option<ShoeSize>,
    pub foot_width: Length,
    pub toe_height: Length,
    pub shoeprint_depth: Length,
    pub pointer_length: Length,
    pub thumb_width: Length,
    pub nail_thickness: Length,
    pub fingerprint_depth: Length,
    pub thread_thickness: Length,
    pub hair_width: Length,
    pub eye_width: Length,
    pub hair_length: Option<Length>,
    pub tail_length: Option<Length>,

    // ===== locomotion, per hour =====
    pub walk_per_hour: Length,
    pub run_per_hour: Length,

    // ===== the average human, seen from this scale =====
    pub avg_height_comp: Length,
    pub avg_weight_comp: Weight,
    pub avg_look_angle: f64,
    pub avg_look_direction: LookDirection,
}

impl PersonStats {
    pub fn derive(record: &PersonRecord) -> Self {
        let height = record.height();
        let weight = record.weight();
        let viewscale = record.viewscale();
        let scale = viewscale.recip();

        let average_height_mult = height.ratio(&SizeConfig::average_height());
        let average_weight_mult = weight.ratio(&SizeConfig::average_weight());

        let proportional = |denominator: Decimal| {
            Length::new(height.magnitude().ratio(&Magnitude::new(denominator)))
        };
        let real_world = |length: &Length| Length::new(length.magnitude().ratio(&viewscale));

        let foot_length = record
            .foot_length()
            .map(real_world)
            .unwrap_or_else(|| proportional(ratios::FOOT_LENGTH));
        let women = record.gender() == Some(Gender::Female);
        let (avg_look_angle, avg_look_direction) = look(height, &SizeConfig::average_height());

        Self {
            nickname: record.nickname().to_string(),
            tag: record.tag(),
            gender: record.gender(),
            unit_system: record.unit_system(),

            shoe_size: ShoeSize::from_foot_length(&foot_length, women).ok(),
            foot_length,
            foot_width: proportional(ratios::FOOT_WIDTH),
            toe_height: proportional(ratios::TOE_HEIGHT),
            shoeprint_depth: proportional(ratios::SHOEPRINT_DEPTH),
            pointer_length: proportional(ratios::POINTER_LENGTH),
            thumb_width: proportional(ratios::THUMB_WIDTH),
            nail_thickness: proportional(ratios::NAIL_THICKNESS),
            fingerprint_depth: proportional(ratios::FINGERPRINT_DEPTH),
            thread_thickness: Length::from_base(SizeConfig::DEFAULT_THREAD_THICKNESS)
                * average_height_mult.clone(),
            hair_width: proportional(ratios::HAIR_WIDTH),
            eye_width: proportional(ratios::EYE_WIDTH),
            hair_length: record.hair_length().map(real_world),
            tail_length: record.tail_length().map(real_world),

            walk_per_hour: Length::from_base(SizeConfig::DEFAULT_WALK_SPEED)
                * average_height_mult.clone(),
            run_per_hour: Length::from_base(SizeConfig::DEFAULT_RUN_SPEED)
                * average_height_mult.clone(),

            avg_height_comp: SizeConfig::average_height() * viewscale.clone(),
            avg_weight_comp: SizeConfig::average_weight() * viewscale.powi(3),
            avg_look_angle,
            avg_look_direction,

            height: height.clone(),
            base_height: record.base_height().clone(),
            base_weight: record.base_weight().clone(),
            weight,
            viewscale,
            scale,
            weight_scale: record.weight_scale(),
            average_height_mult,
            average_weight_mult,
        }
    }
}

/// Derive the full stat set for a record.
pub fn derive(record: &PersonRecord) -> PersonStats {
    PersonStats::derive(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(height: Decimal) -> PersonRecord {
        PersonRecord::new("Ann").with_height(Length::from_base(height))
    }

    fn approx(length: &Length, expected: f64, tolerance: f64) -> bool {
        (length.magnitude().to_f64() - expected).abs() < tolerance
    }

    #[test]
    fn unscaled_average_human() {
        let stats = derive(&at(dec!(1.754)));
        assert_eq!(stats.viewscale, Magnitude::one());
        assert_eq!(stats.scale, Magnitude::one());
        assert!(approx(&stats.foot_length, 0.2506, 0.0001));
        assert!(approx(&stats.foot_width, 0.1002, 0.0001));
        assert_eq!(stats.thread_thickness, Length::from_base(dec!(0.001016)));
        assert_eq!(stats.walk_per_hour, Length::from_base(dec!(4023.36)));
        assert_eq!(stats.avg_height_comp, SizeConfig::average_height());
        assert_eq!(stats.avg_look_angle, 0.0);
        assert_eq!(stats.avg_look_direction, LookDirection::Up);
        assert!(stats.hair_length.is_none() && stats.tail_length.is_none());
    }

    #[test]
    fn viewscale_and_scale_are_reciprocal() {
        for h in [dec!(0.01), dec!(3.508), dec!(1754), dec!(123456.789)] {
            let record = at(h);
            let stats = derive(&record);
            assert_eq!(stats.viewscale, record.base_height().ratio(record.height()));
            assert_eq!(stats.scale, stats.viewscale.recip());
            let product = (&stats.viewscale * &stats.scale).to_f64();
            assert!((product - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn measurements_scale_with_height() {
        let stats = derive(&at(dec!(17.54)));
        assert_eq!(stats.viewscale, Magnitude::new(dec!(0.1)));
        assert_eq!(stats.weight, Weight::from_base(dec!(66760000)));
        assert_eq!(stats.weight_scale, Magnitude::from(1000));
        assert!(approx(&stats.toe_height, 17.54 / 65.0, 1e-12));
        assert_eq!(stats.avg_height_comp, Length::from_base(dec!(0.1754)));
        assert_eq!(stats.avg_weight_comp, Weight::from_base(dec!(66.76)));
        assert_eq!(stats.avg_look_direction, LookDirection::Down);
    }

    #[test]
    fn extreme_heights_keep_finite_non_zero_weights() {
        let light_year = derive(&PersonRecord::new("Ann").with_height("1 ly".parse().unwrap()));
        assert!(!light_year.weight.is_infinite());
        assert_eq!(light_year.weight.magnitude().exponent(), Some(52));
        assert_eq!(light_year.weight_scale.exponent(), Some(47));
        let mult = light_year.average_weight_mult.ratio(&light_year.weight_scale);
        assert!((mult.to_f64() - 1.0).abs() < 1e-30);
        assert!(!light_year.avg_weight_comp.is_zero());

        let angstrom = derive(&PersonRecord::new("Ann").with_height("0.1 nm".parse().unwrap()));
        assert!(!angstrom.weight.is_zero());
        assert_eq!(angstrom.weight.magnitude().exponent(), Some(-26));
        assert!(angstrom.average_weight_mult.is_positive());
        assert!(!angstrom.avg_weight_comp.is_infinite());
        assert_eq!(angstrom.avg_weight_comp.magnitude().exponent(), Some(35));
    }

    #[test]
    fn overrides_are_back_scaled() {
        let record = at(dec!(17.54))
            .with_foot_length(Some(Length::from_base(dec!(0.3))))
            .with_tail_length(Some(Length::from_base(dec!(1))));
        let stats = derive(&record);
        assert_eq!(stats.foot_length, Length::from_base(dec!(3)));
        assert_eq!(stats.tail_length, Some(Length::from_base(dec!(10))));
        assert!(stats.hair_length.is_none());
    }

    #[test]
    fn womens_shoe_size_follows_gender() {
        let record = at(dec!(1.754)).with_gender(Some(Gender::Female));
        let size = derive(&record).shoe_size.unwrap();
        assert!(size.women);
    }

    #[test]
    fn zero_and_infinite_heights_derive() {
        let zero = derive(&at(dec!(0)));
        assert_eq!(zero.viewscale, Magnitude::Infinity);
        assert_eq!(zero.scale, Magnitude::zero());
        assert_eq!(zero.foot_length, Length::zero());
        assert!(zero.shoe_size.is_none());
        assert!(zero.avg_height_comp.is_infinite());

        let infinite = derive(&PersonRecord::new("Ann").with_height(Length::INFINITY));
        assert_eq!(infinite.viewscale, Magnitude::zero());
        assert!(infinite.foot_length.is_infinite());
        assert!(infinite.walk_per_hour.is_infinite());
        assert_eq!(infinite.avg_weight_comp, Weight::zero());
        assert_eq!(infinite.avg_look_direction, LookDirection::Down);
        assert!((infinite.avg_look_angle - 90.0).abs() < 1e-9);
    }
}
