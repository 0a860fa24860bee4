#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record schema shared by every dashboard component.
//!
//! An [`Incident`] is one row of the static dataset. Its loosely typed raw
//! columns are normalized on the way in (see [`parsing`]) so that the rest
//! of the system only deals with typed, explicitly optional fields and the
//! fallback rules defined here.

pub mod parsing;

use chrono::{Datelike as _, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Category label used when a categorical field is missing.
pub const UNKNOWN: &str = "Unknown";

/// Raw case-closed literal denoting a closed case.
pub const CLOSED_LITERAL: &str = "Yes";

/// One incident record.
///
/// Field names follow the published dataset columns when (de)serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// City where the incident occurred.
    #[serde(rename = "City", deserialize_with = "parsing::required_text")]
    pub city: String,
    /// Free-text crime type (e.g. `"BURGLARY"`).
    #[serde(
        rename = "Crime Description",
        default,
        deserialize_with = "parsing::optional_text"
    )]
    pub crime_description: Option<String>,
    /// When the incident occurred. `None` if the raw value was unparsable.
    #[serde(
        rename = "Date of Occurrence",
        default,
        deserialize_with = "parsing::optional_date"
    )]
    pub occurred_at: Option<NaiveDateTime>,
    /// Victim age in years. `None` if absent or non-numeric.
    #[serde(
        rename = "Victim Age",
        default,
        deserialize_with = "parsing::optional_age"
    )]
    pub victim_age: Option<i64>,
    /// Raw victim gender code (`"M"`, `"F"`, `"X"`, ...).
    #[serde(
        rename = "Victim Gender",
        default,
        deserialize_with = "parsing::optional_text"
    )]
    pub victim_gender: Option<String>,
    /// Weapon used, if recorded.
    #[serde(
        rename = "Weapon Used",
        default,
        deserialize_with = "parsing::optional_text"
    )]
    pub weapon_used: Option<String>,
    /// Whether the case is closed.
    #[serde(
        rename = "Case Closed",
        default,
        deserialize_with = "parsing::closed_flag",
        serialize_with = "parsing::closed_literal"
    )]
    pub case_closed: bool,
}

impl Incident {
    /// Calendar year of the occurrence date, if the date parsed.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.occurred_at.map(|dt| dt.year())
    }

    /// Zero-based month of the occurrence date, if the date parsed.
    #[must_use]
    pub fn month0(&self) -> Option<u32> {
        self.occurred_at.map(|dt| dt.month0())
    }

    /// Victim age with missing values treated as `0`.
    #[must_use]
    pub fn age_or_zero(&self) -> i64 {
        self.victim_age.unwrap_or(0)
    }

    /// Age group of the victim. Missing ages fall in [`AgeGroup::Child`];
    /// negative ages fall in no group.
    #[must_use]
    pub fn age_group(&self) -> Option<AgeGroup> {
        AgeGroup::classify(self.age_or_zero())
    }

    /// Classified victim gender.
    #[must_use]
    pub fn gender(&self) -> Gender {
        Gender::classify(self.victim_gender.as_deref())
    }

    /// Crime description, or [`UNKNOWN`] when missing.
    #[must_use]
    pub fn crime_type_label(&self) -> &str {
        self.crime_description.as_deref().unwrap_or(UNKNOWN)
    }

    /// Victim gender as recorded, or [`UNKNOWN`] when missing.
    #[must_use]
    pub fn gender_label(&self) -> &str {
        self.victim_gender.as_deref().unwrap_or(UNKNOWN)
    }
}

/// One dataset row with every column kept as the verbatim cell text.
///
/// CSV cells carry no type information, so rows are read as text first and
/// then converted with the same rules the typed JSON path applies. Empty
/// cells are `None`; the `City` column is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawIncident {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Crime Description", default)]
    pub crime_description: Option<String>,
    #[serde(rename = "Date of Occurrence", default)]
    pub date_of_occurrence: Option<String>,
    #[serde(rename = "Victim Age", default)]
    pub victim_age: Option<String>,
    #[serde(rename = "Victim Gender", default)]
    pub victim_gender: Option<String>,
    #[serde(rename = "Weapon Used", default)]
    pub weapon_used: Option<String>,
    #[serde(rename = "Case Closed", default)]
    pub case_closed: Option<String>,
}

impl From<RawIncident> for Incident {
    fn from(raw: RawIncident) -> Self {
        let text = |cell: Option<String>| cell.filter(|s| !s.trim().is_empty());

        Self {
            city: raw.city,
            crime_description: text(raw.crime_description),
            occurred_at: raw
                .date_of_occurrence
                .as_deref()
                .and_then(parsing::parse_occurrence_date),
            victim_age: raw.victim_age.as_deref().and_then(parsing::parse_leading_int),
            victim_gender: text(raw.victim_gender),
            weapon_used: text(raw.weapon_used),
            case_closed: raw.case_closed.as_deref() == Some(CLOSED_LITERAL),
        }
    }
}

/// Victim gender, classified from the raw code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Gender {
    /// Raw code `"M"`.
    #[serde(rename = "M")]
    #[strum(serialize = "M")]
    Male,
    /// Raw code `"F"`.
    #[serde(rename = "F")]
    #[strum(serialize = "F")]
    Female,
    /// Raw code `"X"`.
    #[serde(rename = "X")]
    #[strum(serialize = "X")]
    Other,
    /// Missing or unrecognized code.
    Unknown,
}

impl Gender {
    /// Classifies a raw gender code. Anything outside the known set is
    /// [`Gender::Unknown`].
    #[must_use]
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            Some("M") => Self::Male,
            Some("F") => Self::Female,
            Some("X") => Self::Other,
            _ => Self::Unknown,
        }
    }
}

/// Victim age buckets. Boundaries are inclusive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AgeGroup {
    /// Ages 0 through 18.
    #[serde(rename = "0-18")]
    #[strum(serialize = "0-18")]
    Child,
    /// Ages 19 through 35.
    #[serde(rename = "19-35")]
    #[strum(serialize = "19-35")]
    YoungAdult,
    /// Ages 36 through 50.
    #[serde(rename = "36-50")]
    #[strum(serialize = "36-50")]
    Adult,
    /// Ages 51 through 65.
    #[serde(rename = "51-65")]
    #[strum(serialize = "51-65")]
    MiddleAged,
    /// Ages above 65.
    #[serde(rename = "65+")]
    #[strum(serialize = "65+")]
    Senior,
}

impl AgeGroup {
    /// Returns all groups in histogram order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Child,
            Self::YoungAdult,
            Self::Adult,
            Self::MiddleAged,
            Self::Senior,
        ]
    }

    /// Inclusive lower bound and optional inclusive upper bound.
    #[must_use]
    pub const fn bounds(self) -> (i64, Option<i64>) {
        match self {
            Self::Child => (0, Some(18)),
            Self::YoungAdult => (19, Some(35)),
            Self::Adult => (36, Some(50)),
            Self::MiddleAged => (51, Some(65)),
            Self::Senior => (66, None),
        }
    }

    /// Whether `age` falls inside this group.
    #[must_use]
    pub const fn contains(self, age: i64) -> bool {
        let (lo, hi) = self.bounds();
        match hi {
            Some(hi) => age >= lo && age <= hi,
            None => age >= lo,
        }
    }

    /// Finds the group containing `age`.
    ///
    /// Negative ages belong to no group. They are kept out of every bucket
    /// so that bad source data stays visible instead of inflating `0-18`.
    #[must_use]
    pub fn classify(age: i64) -> Option<Self> {
        Self::all().iter().copied().find(|group| group.contains(age))
    }
}
