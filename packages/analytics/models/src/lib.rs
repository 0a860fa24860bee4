#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived statistic types for the dashboard visuals.
//!
//! Each visual consumes exactly one of these types. They are immutable
//! snapshots computed from the current filtered subset and are always
//! recomputed in full, never patched. Percentages are rounded to one
//! decimal place.

use crime_dashboard_incident_models::AgeGroup;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Sentinel shown when a "most common" or "top" field has no data.
pub const NOT_AVAILABLE: &str = "N/A";

/// Crime type labels longer than this are shortened for axis ticks.
pub const SHORT_LABEL_CHARS: usize = 12;

/// Top-N sizes for each ranked visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardLimits {
    /// Cities in the hotspot ranking.
    #[serde(alias = "city_ranking")]
    pub city_ranking: usize,
    /// Crime types in the crime-type × gender breakdown.
    #[serde(alias = "crime_types")]
    pub crime_types: usize,
    /// Cities (rows) in the heatmap.
    #[serde(alias = "cross_tab_cities")]
    pub cross_tab_cities: usize,
    /// Crime types (columns) in the heatmap.
    #[serde(alias = "cross_tab_crime_types")]
    pub cross_tab_crime_types: usize,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        Self {
            city_ranking: 10,
            crime_types: 8,
            cross_tab_cities: 6,
            cross_tab_crime_types: 6,
        }
    }
}

/// A category with its count and share of the filtered total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    /// Category label.
    pub label: String,
    /// Number of records.
    pub count: u64,
    /// Percent of the filtered total.
    pub percentage: f64,
}

/// Top cities by incident count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRanking {
    /// Ranked cities, highest count first.
    pub entries: Vec<CategoryShare>,
    /// Size of the filtered subset.
    pub total: u64,
}

impl CityRanking {
    /// The highest-ranked city, if any.
    #[must_use]
    pub fn top(&self) -> Option<&CategoryShare> {
        self.entries.first()
    }
}

/// One crime type split by victim gender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeTypeGenderEntry {
    /// Full crime description.
    pub crime_type: String,
    /// Axis label, shortened to [`SHORT_LABEL_CHARS`] characters plus `...`.
    pub short_label: String,
    /// Records of this crime type.
    pub total: u64,
    /// Percent of the filtered total.
    pub percentage: f64,
    /// Male victims.
    pub male: u64,
    /// Female victims.
    pub female: u64,
    /// All other victims (`X`, missing, or unrecognized gender).
    pub other: u64,
}

/// Top crime types with their gender split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeTypeGenderBreakdown {
    /// Ranked crime types, highest total first.
    pub entries: Vec<CrimeTypeGenderEntry>,
    /// Size of the filtered subset.
    pub total: u64,
}

impl CrimeTypeGenderBreakdown {
    /// The most frequent crime type, if any.
    #[must_use]
    pub fn top(&self) -> Option<&CrimeTypeGenderEntry> {
        self.entries.first()
    }
}

/// Shortens a crime type for axis labels.
#[must_use]
pub fn short_label(label: &str) -> String {
    if label.chars().count() > SHORT_LABEL_CHARS {
        let head: String = label.chars().take(SHORT_LABEL_CHARS).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}

/// One age bucket of the victim age histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBucket {
    /// The bucket.
    pub age_group: AgeGroup,
    /// Victims in the bucket.
    pub count: u64,
    /// Percent of the filtered total.
    pub percentage: f64,
}

/// Victim age histogram over the five fixed buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeHistogram {
    /// Buckets in fixed order.
    pub buckets: Vec<AgeBucket>,
    /// Bucket with the highest count; first in bucket order on ties.
    /// `None` when no record landed in any bucket.
    pub most_affected: Option<AgeGroup>,
    /// Records whose age fell in no bucket (negative ages).
    pub unbucketed: u64,
    /// Size of the filtered subset.
    pub total: u64,
}

impl AgeHistogram {
    /// Label of the most affected bucket, or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn most_affected_label(&self) -> &str {
        self.most_affected
            .as_ref()
            .map_or(NOT_AVAILABLE, AsRef::as_ref)
    }

    /// Count of one bucket.
    #[must_use]
    pub fn count(&self, group: AgeGroup) -> u64 {
        self.buckets
            .iter()
            .find(|bucket| bucket.age_group == group)
            .map_or(0, |bucket| bucket.count)
    }
}

/// Victim gender distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderDistribution {
    /// One entry per distinct gender value present, highest count first.
    pub entries: Vec<CategoryShare>,
    /// The highest-count entry; first encountered on ties.
    pub dominant: Option<CategoryShare>,
    /// Size of the filtered subset.
    pub total: u64,
}

impl GenderDistribution {
    /// Label of the dominant gender, or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn dominant_label(&self) -> &str {
        self.dominant
            .as_ref()
            .map_or(NOT_AVAILABLE, |entry| entry.label.as_str())
    }
}

/// Heatmap shading bucket for a cross-tab cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HeatIntensity {
    /// Zero count.
    Empty,
    /// Up to 20% of the max cell.
    Low,
    /// Above 20%, up to 40%.
    Medium,
    /// Above 40%, up to 70%.
    High,
    /// Above 70%.
    Peak,
}

impl HeatIntensity {
    /// Classifies `value` relative to the heatmap's max cell.
    #[must_use]
    pub fn classify(value: u64, max_value: u64) -> Self {
        if value == 0 {
            return Self::Empty;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = value as f64 / max_value.max(1) as f64;
        if ratio > 0.7 {
            Self::Peak
        } else if ratio > 0.4 {
            Self::High
        } else if ratio > 0.2 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// One heatmap cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabCell {
    /// Column crime type.
    pub crime_type: String,
    /// Records with this city and crime type.
    pub count: u64,
    /// Shading bucket relative to the max cell.
    pub intensity: HeatIntensity,
}

/// One heatmap row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabRow {
    /// Row city.
    pub city: String,
    /// Cells in column order.
    pub cells: Vec<CrossTabCell>,
}

/// City × crime type co-occurrence matrix over the top cities and crime
/// types by marginal totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTab {
    /// Row cities, highest marginal total first.
    pub cities: Vec<String>,
    /// Column crime types, highest marginal total first.
    pub crime_types: Vec<String>,
    /// Matrix rows, aligned with `cities`.
    pub rows: Vec<CrossTabRow>,
    /// Largest co-occurrence count over every city and crime type pair
    /// (not only the displayed ones), at least `1`.
    pub max_value: u64,
}

impl CrossTab {
    /// Count for a displayed city and crime type, or `0`.
    #[must_use]
    pub fn cell(&self, city: &str, crime_type: &str) -> u64 {
        self.rows
            .iter()
            .find(|row| row.city == city)
            .and_then(|row| row.cells.iter().find(|cell| cell.crime_type == crime_type))
            .map_or(0, |cell| cell.count)
    }
}

/// Calendar month labels for the monthly series.
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
pub enum Month {
    /// January.
    Jan,
    /// February.
    Feb,
    /// March.
    Mar,
    /// April.
    Apr,
    /// May.
    May,
    /// June.
    Jun,
    /// July.
    Jul,
    /// August.
    Aug,
    /// September.
    Sep,
    /// October.
    Oct,
    /// November.
    Nov,
    /// December.
    Dec,
}

impl Month {
    /// Returns all months, January first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Jan,
            Self::Feb,
            Self::Mar,
            Self::Apr,
            Self::May,
            Self::Jun,
            Self::Jul,
            Self::Aug,
            Self::Sep,
            Self::Oct,
            Self::Nov,
            Self::Dec,
        ]
    }
}

/// Time series shape, chosen by the year filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SeriesGranularity {
    /// One point per year present (year filter is the wildcard).
    Yearly,
    /// Twelve month points (a specific year is selected).
    Monthly,
}

impl SeriesGranularity {
    /// Caption for the average figure.
    #[must_use]
    pub const fn average_label(self) -> &'static str {
        match self {
            Self::Yearly => "Avg/Year",
            Self::Monthly => "Avg/Month",
        }
    }

    /// Caption for the peak figure.
    #[must_use]
    pub const fn peak_label(self) -> &'static str {
        match self {
            Self::Yearly => "Peak Year",
            Self::Monthly => "Peak Month",
        }
    }
}

/// A time-series data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Period label (`"2022"` or `"Mar"`).
    pub period: String,
    /// Records in this period.
    pub count: u64,
}

/// Incident counts over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    /// Yearly or monthly shape.
    pub granularity: SeriesGranularity,
    /// Points in chronological order. Empty when the filtered subset is
    /// empty.
    pub points: Vec<TimeSeriesPoint>,
    /// Filtered total divided by the number of points, rounded to a whole
    /// number; `0` without points.
    pub average: f64,
    /// Highest point; first in chronological order on ties.
    pub peak: Option<TimeSeriesPoint>,
    /// Size of the filtered subset.
    pub total: u64,
}

/// Direction of a KPI trend arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrendDirection {
    /// The signed change is positive.
    Up,
    /// The signed change is zero or negative.
    Down,
}

impl TrendDirection {
    /// Direction of a signed change.
    #[must_use]
    pub fn of(change: f64) -> Self {
        if change > 0.0 { Self::Up } else { Self::Down }
    }
}

/// Headline KPI tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    /// Size of the filtered subset.
    pub total_crimes: u64,
    /// Absolute percent change of the filtered total against the
    /// complement of the selection (`all - filtered`); `0` when the
    /// complement is empty.
    pub total_change: f64,
    /// Direction of the signed total change.
    pub total_trend: TrendDirection,
    /// Most frequent crime type, or [`NOT_AVAILABLE`].
    pub most_common_crime: String,
    /// Its percent of the filtered total.
    pub most_common_crime_percent: f64,
    /// City with the most incidents, or [`NOT_AVAILABLE`].
    pub highest_crime_city: String,
    /// Its percent of the filtered total.
    pub highest_crime_city_percent: f64,
    /// Percent of filtered records with a closed case.
    pub closure_rate: f64,
    /// Closure rate as displayed (`"0%"` without data, else one decimal).
    pub closure_rate_label: String,
    /// Absolute difference between the filtered and unfiltered closure
    /// rates, in percentage points.
    pub closure_change: f64,
    /// Direction of the signed closure-rate difference.
    pub closure_trend: TrendDirection,
}
