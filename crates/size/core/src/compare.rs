//! Two-person comparison and view-angle geometry.

use rust_decimal_macros::dec;

use crate::quantity::{Length, Magnitude};
use crate::record::PersonRecord;
use crate::stats::PersonStats;

/// Whether a viewer tilts their head up or down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LookDirection {
    Up,
    Down,
}

impl LookDirection {
    /// Non-negative angles look up.
    pub fn from_angle(degrees: f64) -> Self {
        if degrees >= 0.0 { Self::Up } else { Self::Down }
    }
}

/// Signed elevation angle, in degrees, from `viewer`'s eyes to `viewee`'s.
///
/// The two stand apart by half the *shorter* party's height, not half the
/// viewer's. Swapping the arguments therefore only flips the sign, and a
/// zero-height party sees the other at exactly ±90°. Inside a
/// [`PersonComparison`] the viewer is always the shorter party, so there the
/// distance is half the viewer's height. Positive angles look up.
///
/// Degenerate heights resolve as follows:
///
/// | viewer | viewee | treated as |
/// |--------|--------|------------|
/// | ∞      | ∞      | 1, 1       |
/// | ∞      | finite | 1, 0       |
/// | finite | ∞      | 0, 1       |
/// | 0      | 0      | 1, 1       |
pub fn calc_view_angle(viewer: &Length, viewee: &Length) -> f64 {
    let (viewer, viewee) = match (viewer.magnitude(), viewee.magnitude()) {
        (a, b) if a.is_infinite() && b.is_infinite() => (Magnitude::one(), Magnitude::one()),
        (a, _) if a.is_infinite() => (Magnitude::one(), Magnitude::zero()),
        (_, b) if b.is_infinite() => (Magnitude::zero(), Magnitude::one()),
        (a, b) if a.is_zero() && b.is_zero() => (Magnitude::one(), Magnitude::one()),
        (a, b) => (a.clone(), b.clone()),
    };
    let difference = &viewee - &viewer;
    if difference.is_zero() {
        return 0.0;
    }
    let distance = viewer.min(viewee) * dec!(0.5);
    // A zero distance divides to ±∞, which atan maps to ±90°.
    difference.ratio(&distance).to_f64().atan().to_degrees()
}

/// Absolute angle and direction for `viewer` looking at `viewee`.
pub fn look(viewer: &Length, viewee: &Length) -> (f64, LookDirection) {
    let angle = calc_view_angle(viewer, viewee);
    (angle.abs(), LookDirection::from_angle(angle))
}

/// How two people appear to each other.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonComparison {
    /// The taller party at their real scale.
    pub big: PersonStats,
    /// The shorter party at their real scale.
    pub small: PersonStats,
    /// `big.height / small.height`.
    pub multiplier: Magnitude,
    /// The taller party as the shorter one perceives them.
    pub big_to_small: PersonStats,
    /// The shorter party as the taller one perceives them.
    pub small_to_big: PersonStats,
    /// Degrees the shorter party looks up to meet the taller one's eyes.
    pub look_angle: f64,
    pub look_direction: LookDirection,
}

impl PersonComparison {
    /// Compare two records. On equal heights the first argument is `small`.
    pub fn new(first: &PersonRecord, second: &PersonRecord) -> Self {
        let (small_record, big_record) = if first.height() <= second.height() {
            (first, second)
        } else {
            (second, first)
        };
        let small = PersonStats::derive(small_record);
        let big = PersonStats::derive(big_record);

        let big_to_small =
            PersonStats::derive(&big_record.clone().with_height(&big.height * &small.viewscale));
        let small_to_big =
            PersonStats::derive(&small_record.clone().with_height(&small.height * &big.viewscale));

        let (look_angle, look_direction) = look(&small.height, &big.height);

        Self {
            multiplier: big.height.ratio(&small.height),
            big,
            small,
            big_to_small,
            small_to_big,
            look_angle,
            look_direction,
        }
    }
}

/// Build the comparison of two records.
pub fn build_comparison(first: &PersonRecord, second: &PersonRecord) -> PersonComparison {
    PersonComparison::new(first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn m(d: Decimal) -> Length {
        Length::from_base(d)
    }

    fn person(name: &str, height: Decimal) -> PersonRecord {
        PersonRecord::new(name).with_height(m(height))
    }

    #[test]
    fn equal_heights_look_level() {
        for h in [dec!(0.001), dec!(1.754), dec!(250000)] {
            assert_eq!(calc_view_angle(&m(h), &m(h)), 0.0);
        }
    }

    #[test]
    fn swapping_flips_sign_only() {
        let pairs = [(dec!(1), dec!(2)), (dec!(1.754), dec!(17.54)), (dec!(0.3), dec!(90))];
        for (a, b) in pairs {
            let up = calc_view_angle(&m(a), &m(b));
            let down = calc_view_angle(&m(b), &m(a));
            assert!(up > 0.0 && down < 0.0);
            assert!((up + down).abs() < 1e-9);
        }
        // Distance of half the shorter height: atan(1 / 0.5)
        let expected = 2.0_f64.atan().to_degrees();
        assert!((calc_view_angle(&m(dec!(1)), &m(dec!(2))) - expected).abs() < 1e-9);
        // Looking down uses the same distance, so the magnitude matches.
        assert!((calc_view_angle(&m(dec!(2)), &m(dec!(1))) + expected).abs() < 1e-9);
    }

    #[test]
    fn heights_beyond_f64_range_still_resolve() {
        let near: Length = "1e400 m".parse().unwrap();
        let far: Length = "2e400 m".parse().unwrap();
        let expected = 2.0_f64.atan().to_degrees();
        assert!((calc_view_angle(&near, &far) - expected).abs() < 1e-9);
        assert!((calc_view_angle(&far, &near) + expected).abs() < 1e-9);
    }

    #[test]
    fn degenerate_heights() {
        assert_eq!(calc_view_angle(&Length::INFINITY, &Length::INFINITY), 0.0);
        assert_eq!(calc_view_angle(&Length::zero(), &Length::zero()), 0.0);
        assert!((calc_view_angle(&m(dec!(1.754)), &Length::INFINITY) - 90.0).abs() < 1e-9);
        assert!((calc_view_angle(&Length::INFINITY, &m(dec!(1.754))) + 90.0).abs() < 1e-9);
        assert!((calc_view_angle(&Length::zero(), &m(dec!(1))) - 90.0).abs() < 1e-9);
        assert_eq!(look(&m(dec!(2)), &m(dec!(1))).1, LookDirection::Down);
        assert_eq!(look(&m(dec!(1)), &m(dec!(1))).1, LookDirection::Up);
    }

    #[test]
    fn comparison_orders_and_projects() {
        let small = person("Small", dec!(2));
        let big = person("Big", dec!(20));
        let cmp = build_comparison(&big, &small);

        assert_eq!(cmp.big.nickname, "Big");
        assert_eq!(cmp.small.nickname, "Small");
        assert_eq!(cmp.multiplier, Magnitude::from(10));

        // big.height × small.viewscale = 20 × 1.754 / 2
        assert_eq!(cmp.big_to_small.height, m(dec!(17.54)));
        // small.height × big.viewscale = 2 × 1.754 / 20
        assert_eq!(cmp.small_to_big.height, m(dec!(0.1754)));
        assert_eq!(cmp.look_direction, LookDirection::Up);
        assert!(cmp.look_angle > 0.0);
    }

    #[test]
    fn ties_keep_argument_order() {
        let a = person("A", dec!(1.754));
        let b = person("B", dec!(1.754));
        let cmp = build_comparison(&a, &b);
        assert_eq!(cmp.small.nickname, "A");
        assert_eq!(cmp.big.nickname, "B");
        assert_eq!(cmp.multiplier, Magnitude::one());
        assert_eq!(cmp.look_angle, 0.0);
    }

    #[test]
    fn infinite_party_does_not_fail() {
        let giant = PersonRecord::new("Giant").with_height(Length::INFINITY);
        let human = PersonRecord::new("Human");
        let cmp = build_comparison(&giant, &human);

        assert_eq!(cmp.big.nickname, "Giant");
        assert_eq!(cmp.multiplier, Magnitude::Infinity);
        assert!(cmp.big_to_small.height.is_infinite());
        assert_eq!(cmp.small_to_big.height, Length::zero());
        assert!((cmp.look_angle - 90.0).abs() < 1e-9);
        assert_eq!(cmp.look_direction, LookDirection::Up);
    }

    #[test]
    fn projections_keep_overrides() {
        let small = person("Small", dec!(1.754));
        let big = person("Big", dec!(17.54)).with_hair_length(Some(m(dec!(0.5))));
        let cmp = build_comparison(&small, &big);
        // 0.5 m of real hair on a body scaled 10x
        assert_eq!(cmp.big.hair_length, Some(m(dec!(5))));
        assert_eq!(cmp.big_to_small.hair_length, Some(m(dec!(5))));
    }
}
