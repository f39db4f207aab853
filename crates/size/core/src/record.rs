//! Canonical per-person state.
//!
//! A [`PersonRecord`] stores only the current height and the unscaled bases;
//! weight and scale factors are recomputed on demand. The record is an
//! immutable value: every `with_*` builder returns a new record and the
//! fallible ones re-validate the base height invariant.

use core::fmt;

use crate::config::SizeConfig;
use crate::error::{ErrorSeverity, SizeError};
use crate::quantity::{Length, Magnitude, UnitSystem, Weight, format_scale};

/// Stable identity of a record in an external store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional descriptive gender, used for shoe sizing.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    #[strum(serialize = "m")]
    #[cfg_attr(feature = "serde", serde(rename = "m"))]
    Male,
    #[strum(serialize = "f")]
    #[cfg_attr(feature = "serde", serde(rename = "f"))]
    Female,
}

/// Rejections raised while building or updating a record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordError {
    #[error("base height must be greater than zero")]
    NonPositiveBaseHeight,

    #[error("base height must be finite")]
    InfiniteBaseHeight,

    #[error("invalid unit system: {0:?} (expected \"m\" or \"u\")")]
    InvalidUnitSystem(String),
}

impl SizeError for RecordError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveBaseHeight => "RECORD_NON_POSITIVE_BASE_HEIGHT",
            Self::InfiniteBaseHeight => "RECORD_INFINITE_BASE_HEIGHT",
            Self::InvalidUnitSystem(_) => "RECORD_INVALID_UNIT_SYSTEM",
        }
    }
}

/// One character's canonical state.
///
/// Invariant: `base_height` is finite and strictly positive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PersonRecordData", into = "PersonRecordData")
)]
pub struct PersonRecord {
    id: Option<RecordId>,
    nickname: String,
    display: bool,
    height: Length,
    base_height: Length,
    base_weight: Weight,
    unit_system: UnitSystem,
    species: Option<String>,
    gender: Option<Gender>,
    foot_length: Option<Length>,
    hair_length: Option<Length>,
    tail_length: Option<Length>,
}

impl PersonRecord {
    /// A record at the average human's height and weight.
    pub fn new(nickname: impl Into<String>) -> Self {
        Self::from_config(nickname, &SizeConfig::default())
    }

    /// A record using the configured defaults for new registrations.
    pub fn from_config(nickname: impl Into<String>, config: &SizeConfig) -> Self {
        let base = Self::usable_base(config.new_record_height.clone())
            .unwrap_or_else(|_| SizeConfig::average_height());
        Self {
            id: None,
            nickname: nickname.into(),
            display: true,
            height: base.clone(),
            base_height: base,
            base_weight: config.new_record_weight.clone(),
            unit_system: config.unit_system,
            species: None,
            gender: None,
            foot_length: None,
            hair_length: None,
            tail_length: None,
        }
    }

    /// Build a record from explicit measurements.
    pub fn try_new(
        nickname: impl Into<String>,
        height: Length,
        base_height: Length,
        base_weight: Weight,
    ) -> Result<Self, RecordError> {
        Ok(Self::new(nickname)
            .with_height(height)
            .with_base_height(base_height)?
            .with_base_weight(base_weight))
    }

    fn usable_base(base_height: Length) -> Result<Length, RecordError> {
        if base_height.is_infinite() {
            Err(RecordError::InfiniteBaseHeight)
        } else if base_height.is_zero() {
            Err(RecordError::NonPositiveBaseHeight)
        } else {
            Ok(base_height)
        }
    }

    /// Validate a case-insensitive unit system code.
    pub fn parse_unit_system(code: &str) -> Result<UnitSystem, RecordError> {
        code.trim()
            .parse()
            .map_err(|_| RecordError::InvalidUnitSystem(code.to_string()))
    }

    // ===== builders =====

    #[must_use]
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    #[must_use]
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    pub fn with_base_height(mut self, base_height: Length) -> Result<Self, RecordError> {
        self.base_height = Self::usable_base(base_height)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_base_weight(mut self, base_weight: Weight) -> Self {
        self.base_weight = base_weight;
        self
    }

    #[must_use]
    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    #[must_use]
    pub fn with_species(mut self, species: Option<String>) -> Self {
        self.species = species;
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = gender;
        self
    }

    #[must_use]
    pub fn with_foot_length(mut self, foot_length: Option<Length>) -> Self {
        self.foot_length = foot_length;
        self
    }

    #[must_use]
    pub fn with_hair_length(mut self, hair_length: Option<Length>) -> Self {
        self.hair_length = hair_length;
        self
    }

    #[must_use]
    pub fn with_tail_length(mut self, tail_length: Option<Length>) -> Self {
        self.tail_length = tail_length;
        self
    }

    // ===== accessors =====

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn display(&self) -> bool {
        self.display
    }

    pub fn height(&self) -> &Length {
        &self.height
    }

    pub fn base_height(&self) -> &Length {
        &self.base_height
    }

    pub fn base_weight(&self) -> &Weight {
        &self.base_weight
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn foot_length(&self) -> Option<&Length> {
        self.foot_length.as_ref()
    }

    pub fn hair_length(&self) -> Option<&Length> {
        self.hair_length.as_ref()
    }

    pub fn tail_length(&self) -> Option<&Length> {
        self.tail_length.as_ref()
    }

    // ===== derived values =====

    /// `height / base_height`.
    pub fn scale(&self) -> Magnitude {
        self.height.ratio(&self.base_height)
    }

    /// `base_height / height`; infinite at zero height, zero at infinite height.
    pub fn viewscale(&self) -> Magnitude {
        self.base_height.ratio(&self.height)
    }

    /// Cube of the linear scale.
    pub fn weight_scale(&self) -> Magnitude {
        self.scale().powi(3)
    }

    /// Current weight by the cube law.
    pub fn weight(&self) -> Weight {
        &self.base_weight * &self.weight_scale()
    }

    /// Scale summary such as `10x` or `1/10x`.
    pub fn formatted_scale(&self) -> String {
        format_scale(&self.scale(), SizeConfig::DEFAULT_PRECISION)
    }

    /// Mention for a stored user, otherwise the nickname.
    pub fn tag(&self) -> String {
        match self.id {
            Some(id) => format!("<@{id}>"),
            None => self.nickname.clone(),
        }
    }
}

/// Persisted field set, named as external stores expect them.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PersonRecordData {
    #[serde(default)]
    id: Option<RecordId>,
    nickname: String,
    #[serde(default = "default_display")]
    display: bool,
    height: Length,
    baseheight: Length,
    baseweight: Weight,
    #[serde(default = "default_unit_system")]
    unitsystem: String,
    #[serde(default)]
    species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    footlength: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hairlength: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    taillength: Option<Length>,
}

#[cfg(feature = "serde")]
fn default_display() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_unit_system() -> String {
    UnitSystem::Metric.to_string()
}

#[cfg(feature = "serde")]
impl TryFrom<PersonRecordData> for PersonRecord {
    type Error = RecordError;

    fn try_from(data: PersonRecordData) -> Result<Self, Self::Error> {
        let unit_system = Self::parse_unit_system(&data.unitsystem)?;
        let mut record = Self::try_new(data.nickname, data.height, data.baseheight, data.baseweight)?
            .with_display(data.display)
            .with_unit_system(unit_system)
            .with_species(data.species)
            .with_gender(data.gender)
            .with_foot_length(data.footlength)
            .with_hair_length(data.hairlength)
            .with_tail_length(data.taillength);
        if let Some(id) = data.id {
            record = record.with_id(id);
        }
        Ok(record)
    }
}

#[cfg(feature = "serde")]
impl From<PersonRecord> for PersonRecordData {
    fn from(record: PersonRecord) -> Self {
        Self {
            id: record.id,
            nickname: record.nickname,
            display: record.display,
            height: record.height,
            baseheight: record.base_height,
            baseweight: record.base_weight,
            unitsystem: record.unit_system.to_string(),
            species: record.species,
            gender: record.gender,
            footlength: record.foot_length,
            hairlength: record.hair_length,
            taillength: record.tail_length,
        }
    }
}
