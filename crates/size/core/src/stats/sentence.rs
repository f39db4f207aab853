//! One-line summaries of a single stat.

use super::PersonStats;
use super::shoe::{NO_SHOE_SIZE, ShoeSize};
use crate::quantity::{FormatSpec, format_scale};

/// Vocabulary accepted by [`PersonStats::stat_sentence`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Height,
    Weight,
    Foot,
    Toe,
    Shoeprint,
    Finger,
    Thumb,
    Nail,
    Fingerprint,
    Thread,
    Eye,
    Hair,
    Tail,
    Speed,
    Base,
    Compare,
    Scale,
}

impl PersonStats {
    /// Sentence describing one stat, prefixed with the person's tag.
    ///
    /// Returns `None` for hair or tail when the record has no such length.
    pub fn stat_sentence(&self, kind: StatKind, precision: u32) -> Option<String> {
        let spec = FormatSpec::both().with_precision(precision);
        let speed_metric = FormatSpec::metric().with_precision(1);
        let speed_us = FormatSpec::us().with_precision(1);

        let body = match kind {
            StatKind::Height => format!("'s current height is {}.", self.height.format(&spec)),
            StatKind::Weight => format!("'s current weight is {}.", self.weight.format(&spec)),
            StatKind::Foot => {
                let shoe = self
                    .shoe_size
                    .as_ref()
                    .map(ShoeSize::to_string)
                    .unwrap_or_else(|| NO_SHOE_SIZE.to_string());
                format!(
                    "'s foot is {} long and {} wide. ({shoe})",
                    self.foot_length.format(&spec),
                    self.foot_width.format(&spec)
                )
            }
            StatKind::Toe => format!("'s toe is {} thick.", self.toe_height.format(&spec)),
            StatKind::Shoeprint => {
                format!("'s shoe print is {} deep.", self.shoeprint_depth.format(&spec))
            }
            StatKind::Finger => {
                format!("'s pointer finger is {} long.", self.pointer_length.format(&spec))
            }
            StatKind::Thumb => format!("'s thumb is {} wide.", self.thumb_width.format(&spec)),
            StatKind::Nail => format!("'s nail is {} thick.", self.nail_thickness.format(&spec)),
            StatKind::Fingerprint => {
                format!("'s fingerprint is {} deep.", self.fingerprint_depth.format(&spec))
            }
            StatKind::Thread => format!(
                "'s clothing threads are {} thick.",
                self.thread_thickness.format(&spec)
            ),
            StatKind::Eye => format!("'s eye is {} wide.", self.eye_width.format(&spec)),
            StatKind::Hair => format!("'s hair is {} long.", self.hair_length.as_ref()?.format(&spec)),
            StatKind::Tail => format!("'s tail is {} long.", self.tail_length.as_ref()?.format(&spec)),
            StatKind::Speed => format!(
                " walks at {} per hour ({} per hour), and runs at {} per hour ({} per hour).",
                self.walk_per_hour.format(&speed_metric),
                self.walk_per_hour.format(&speed_us),
                self.run_per_hour.format(&speed_metric),
                self.run_per_hour.format(&speed_us)
            ),
            StatKind::Base => format!(
                " is {} tall and weighs {} at their base size.",
                self.base_height.format(&spec),
                self.base_weight.format(&spec)
            ),
            StatKind::Compare => format!(
                " sees an average person as being {} and weighing {}.",
                self.avg_height_comp.format(&spec),
                self.avg_weight_comp.format(&spec)
            ),
            StatKind::Scale => format!(
                " is {} their base height.",
                format_scale(&self.scale, precision)
            ),
        };
        Some(format!("{}{body}", self.tag))
    }
}
