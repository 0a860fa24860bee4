#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter selection and facet option types.
//!
//! A [`FilterSelection`] holds one [`Choice`] per filterable dimension. It
//! is never mutated in place: every change produces a new selection via
//! [`FilterSelection::with_change`]. The [`FilterOptionSet`] lists the
//! values the presentation layer may offer for each dimension.

use std::fmt;
use std::str::FromStr;

use crime_dashboard_incident_models::AgeGroup;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Wildcard label that matches every record.
pub const ALL: &str = "All";

/// Errors raised when turning user-supplied strings into filter values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The dimension name is not one of the known facets.
    #[error("Unknown filter dimension '{name}'")]
    UnknownDimension {
        /// The name that failed to parse.
        name: String,
    },

    /// The year value is neither `All` nor an integer.
    #[error("Invalid year '{value}': expected 'All' or a calendar year")]
    InvalidYear {
        /// The value that failed to parse.
        value: String,
    },

    /// The age group value is not one of the fixed buckets.
    #[error("Invalid age group '{value}': expected 'All', 0-18, 19-35, 36-50, 51-65, or 65+")]
    InvalidAgeGroup {
        /// The value that failed to parse.
        value: String,
    },
}

/// One dimension's selected value: the wildcard or a specific value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    /// Matches every record.
    All,
    /// Matches records whose field equals the value.
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Choice<T> {
    /// Whether this is the wildcard.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The specific value, if any.
    #[must_use]
    pub const fn as_only(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }

    /// Evaluates `test` against the specific value; the wildcard admits
    /// everything.
    pub fn admits(&self, test: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::All => true,
            Self::Only(value) => test(value),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Choice<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> Serialize for Choice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Choice<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The filterable dimensions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum FilterDimension {
    /// City.
    #[strum(to_string = "city")]
    City,
    /// Crime description.
    #[strum(to_string = "crimeType", serialize = "crime-type", serialize = "crime_type")]
    CrimeType,
    /// Calendar year of the occurrence date.
    #[strum(to_string = "year")]
    Year,
    /// Weapon used.
    #[strum(to_string = "weapon")]
    Weapon,
    /// Victim gender code.
    #[strum(to_string = "gender")]
    Gender,
    /// Victim age group.
    #[strum(to_string = "ageGroup", serialize = "age-group", serialize = "age_group")]
    AgeGroup,
}

impl FilterDimension {
    /// Returns all dimensions in control order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::City,
            Self::CrimeType,
            Self::Year,
            Self::Weapon,
            Self::Gender,
            Self::AgeGroup,
        ]
    }

    /// Label of the wildcard option for this dimension's control.
    #[must_use]
    pub const fn wildcard_label(self) -> &'static str {
        match self {
            Self::City => "All Cities",
            Self::CrimeType => "All Crime Types",
            Self::Year => "All Years",
            Self::Weapon => "All Weapons",
            Self::Gender => "All Genders",
            Self::AgeGroup => "All Ages",
        }
    }

    /// Parses a dimension name.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownDimension`] for unknown names.
    pub fn parse(name: &str) -> Result<Self, FilterError> {
        name.parse().map_err(|_| FilterError::UnknownDimension {
            name: name.to_string(),
        })
    }
}

/// Replacement of a single dimension's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// New city choice.
    City(Choice<String>),
    /// New crime description choice.
    CrimeType(Choice<String>),
    /// New year choice.
    Year(Choice<i32>),
    /// New weapon choice.
    Weapon(Choice<String>),
    /// New gender choice.
    Gender(Choice<String>),
    /// New age group choice.
    AgeGroup(Choice<AgeGroup>),
}

impl FilterChange {
    /// Builds a change from a dimension and a raw string value.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] if the value does not parse for the
    /// dimension (non-integer year, unknown age group).
    pub fn parse(dimension: FilterDimension, value: &str) -> Result<Self, FilterError> {
        let text = || -> Choice<String> {
            if value == ALL {
                Choice::All
            } else {
                Choice::Only(value.to_string())
            }
        };

        Ok(match dimension {
            FilterDimension::City => Self::City(text()),
            FilterDimension::CrimeType => Self::CrimeType(text()),
            FilterDimension::Weapon => Self::Weapon(text()),
            FilterDimension::Gender => Self::Gender(text()),
            FilterDimension::Year => {
                Self::Year(value.trim().parse().map_err(|_| FilterError::InvalidYear {
                    value: value.to_string(),
                })?)
            }
            FilterDimension::AgeGroup => {
                Self::AgeGroup(value.parse().map_err(|_| FilterError::InvalidAgeGroup {
                    value: value.to_string(),
                })?)
            }
        })
    }

    /// The dimension this change replaces.
    #[must_use]
    pub const fn dimension(&self) -> FilterDimension {
        match self {
            Self::City(_) => FilterDimension::City,
            Self::CrimeType(_) => FilterDimension::CrimeType,
            Self::Year(_) => FilterDimension::Year,
            Self::Weapon(_) => FilterDimension::Weapon,
            Self::Gender(_) => FilterDimension::Gender,
            Self::AgeGroup(_) => FilterDimension::AgeGroup,
        }
    }
}

/// The user's current choice for every dimension. Defaults to all
/// wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// City choice.
    #[serde(default)]
    pub city: Choice<String>,
    /// Crime description choice.
    #[serde(default)]
    pub crime_type: Choice<String>,
    /// Year choice.
    #[serde(default)]
    pub year: Choice<i32>,
    /// Weapon choice.
    #[serde(default)]
    pub weapon: Choice<String>,
    /// Gender choice.
    #[serde(default)]
    pub gender: Choice<String>,
    /// Age group choice.
    #[serde(default)]
    pub age_group: Choice<AgeGroup>,
}

impl FilterSelection {
    /// Returns a new selection with one dimension replaced.
    #[must_use]
    pub fn with_change(&self, change: FilterChange) -> Self {
        let mut next = self.clone();
        match change {
            FilterChange::City(v) => next.city = v,
            FilterChange::CrimeType(v) => next.crime_type = v,
            FilterChange::Year(v) => next.year = v,
            FilterChange::Weapon(v) => next.weapon = v,
            FilterChange::Gender(v) => next.gender = v,
            FilterChange::AgeGroup(v) => next.age_group = v,
        }
        next
    }

    /// Whether every dimension is the wildcard.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self == &Self::default()
    }

    /// Display label of one dimension's current value.
    #[must_use]
    pub fn value_label(&self, dimension: FilterDimension) -> String {
        match dimension {
            FilterDimension::City => self.city.to_string(),
            FilterDimension::CrimeType => self.crime_type.to_string(),
            FilterDimension::Year => self.year.to_string(),
            FilterDimension::Weapon => self.weapon.to_string(),
            FilterDimension::Gender => self.gender.to_string(),
            FilterDimension::AgeGroup => self.age_group.to_string(),
        }
    }
}

/// Selectable values per dimension, derived once from the dataset.
///
/// The wildcard is implicit and never appears in these lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionSet {
    /// Distinct cities, sorted.
    pub cities: Vec<String>,
    /// Distinct crime descriptions, sorted.
    pub crime_types: Vec<String>,
    /// Distinct weapons, sorted.
    pub weapons: Vec<String>,
    /// Distinct gender codes, sorted.
    pub genders: Vec<String>,
    /// Distinct years of parseable dates, ascending.
    pub years: Vec<i32>,
    /// The fixed age groups.
    pub age_groups: Vec<AgeGroup>,
}

impl FilterOptionSet {
    /// Option labels for a dimension, without the wildcard.
    #[must_use]
    pub fn labels(&self, dimension: FilterDimension) -> Vec<String> {
        match dimension {
            FilterDimension::City => self.cities.clone(),
            FilterDimension::CrimeType => self.crime_types.clone(),
            FilterDimension::Weapon => self.weapons.clone(),
            FilterDimension::Gender => self.genders.clone(),
            FilterDimension::Year => self.years.iter().map(ToString::to_string).collect(),
            FilterDimension::AgeGroup => self.age_groups.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether a change selects a value offered by this option set. The
    /// wildcard is always offered.
    #[must_use]
    pub fn offers(&self, change: &FilterChange) -> bool {
        match change {
            FilterChange::City(c) => c.admits(|v| self.cities.contains(v)),
            FilterChange::CrimeType(c) => c.admits(|v| self.crime_types.contains(v)),
            FilterChange::Weapon(c) => c.admits(|v| self.weapons.contains(v)),
            FilterChange::Gender(c) => c.admits(|v| self.genders.contains(v)),
            FilterChange::Year(c) => c.admits(|v| self.years.contains(v)),
            FilterChange::AgeGroup(c) => c.admits(|v| self.age_groups.contains(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_all_wildcards() {
        let selection = FilterSelection::default();
        assert!(selection.is_unfiltered());
        for dimension in FilterDimension::all() {
            assert_eq!(selection.value_label(*dimension), ALL);
        }
    }

    #[test]
    fn with_change_replaces_one_field_only() {
        let base = FilterSelection::default();
        let next = base.with_change(FilterChange::City(Choice::Only("Delhi".to_string())));
        assert_eq!(next.city, Choice::Only("Delhi".to_string()));
        assert!(next.crime_type.is_all());
        assert!(next.year.is_all());
        assert!(base.is_unfiltered());
        assert!(!next.is_unfiltered());
    }

    #[test]
    fn parses_dimension_names() {
        assert_eq!(FilterDimension::parse("city"), Ok(FilterDimension::City));
        assert_eq!(
            FilterDimension::parse("crime-type"),
            Ok(FilterDimension::CrimeType)
        );
        assert_eq!(
            FilterDimension::parse("ageGroup"),
            Ok(FilterDimension::AgeGroup)
        );
        assert_eq!(FilterDimension::CrimeType.to_string(), "crimeType");
        assert!(matches!(
            FilterDimension::parse("planet"),
            Err(FilterError::UnknownDimension { .. })
        ));
    }

    #[test]
    fn parses_change_values() {
        assert_eq!(
            FilterChange::parse(FilterDimension::Year, "2022"),
            Ok(FilterChange::Year(Choice::Only(2022)))
        );
        assert_eq!(
            FilterChange::parse(FilterDimension::Year, "All"),
            Ok(FilterChange::Year(Choice::All))
        );
        assert_eq!(
            FilterChange::parse(FilterDimension::AgeGroup, "65+"),
            Ok(FilterChange::AgeGroup(Choice::Only(AgeGroup::Senior)))
        );
        assert_eq!(
            FilterChange::parse(FilterDimension::Gender, "All"),
            Ok(FilterChange::Gender(Choice::All))
        );
        assert!(matches!(
            FilterChange::parse(FilterDimension::Year, "last year"),
            Err(FilterError::InvalidYear { .. })
        ));
        assert!(matches!(
            FilterChange::parse(FilterDimension::AgeGroup, "70+"),
            Err(FilterError::InvalidAgeGroup { .. })
        ));
    }

    #[test]
    fn selection_serializes_choices_as_strings() {
        let selection = FilterSelection::default()
            .with_change(FilterChange::Year(Choice::Only(2023)))
            .with_change(FilterChange::AgeGroup(Choice::Only(AgeGroup::Adult)));
        let value = serde_json::to_value(&selection).unwrap();
        assert_eq!(value["city"], "All");
        assert_eq!(value["year"], "2023");
        assert_eq!(value["ageGroup"], "36-50");

        let back: FilterSelection = serde_json::from_value(value).unwrap();
        assert_eq!(back, selection);
    }

    #[test]
    fn option_set_offers_wildcard_and_known_values() {
        let options = FilterOptionSet {
            cities: vec!["Delhi".to_string()],
            years: vec![2022],
            ..FilterOptionSet::default()
        };
        assert!(options.offers(&FilterChange::City(Choice::All)));
        assert!(options.offers(&FilterChange::City(Choice::Only("Delhi".to_string()))));
        assert!(!options.offers(&FilterChange::City(Choice::Only("Atlantis".to_string()))));
        assert!(!options.offers(&FilterChange::Year(Choice::Only(1999))));
        assert_eq!(options.labels(FilterDimension::Year), vec!["2022"]);
    }
}
