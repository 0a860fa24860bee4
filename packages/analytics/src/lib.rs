#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure reducers turning a filtered incident subset into dashboard
//! statistics.
//!
//! Each public function feeds exactly one visual. Reducers take the
//! filtered subset as a slice of record references (plus the full dataset
//! where a baseline is needed), hold no state, and never fail: an empty
//! subset yields zero counts, zero percentages, and `N/A`/`None` for
//! "top" fields.

pub mod age;
pub mod city;
pub mod cross_tab;
pub mod crime_type;
pub mod gender;
pub mod kpi;
pub mod trend;

mod tally;

pub use age::age_histogram;
pub use city::city_ranking;
pub use cross_tab::city_crime_cross_tab;
pub use crime_type::crime_type_gender;
pub use gender::gender_distribution;
pub use kpi::kpi_summary;
pub use trend::time_series;

/// Rounds to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percent of `count` in `total`, rounded to one decimal; `0` when `total`
/// is zero.
#[must_use]
pub fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = count as f64 / total as f64;
    round1(ratio * 100.0)
}
