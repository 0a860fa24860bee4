//! Conjunctive filter predicate.
//!
//! A record matches a selection iff every dimension admits it. The
//! wildcard admits everything; a specific value requires exact equality
//! (or, for year and age group, a successful derivation that lands on the
//! selected value).

use crime_dashboard_filter_models::FilterSelection;
use crime_dashboard_incident_models::Incident;

/// Whether `record` satisfies every dimension of `selection`.
///
/// * Text dimensions compare the raw value exactly; a missing value never
///   equals a specific selection.
/// * Year requires a parsed date whose year equals the selected year.
/// * Age group uses the victim age with missing values treated as `0`.
///   Negative ages never match a specific group.
#[must_use]
pub fn matches(record: &Incident, selection: &FilterSelection) -> bool {
    selection.city.admits(|city| record.city == *city)
        && selection
            .crime_type
            .admits(|crime_type| record.crime_description.as_deref() == Some(crime_type.as_str()))
        && selection
            .weapon
            .admits(|weapon| record.weapon_used.as_deref() == Some(weapon.as_str()))
        && selection
            .gender
            .admits(|gender| record.victim_gender.as_deref() == Some(gender.as_str()))
        && selection.year.admits(|year| record.year() == Some(*year))
        && selection
            .age_group
            .admits(|group| group.contains(record.age_or_zero()))
}

/// Returns the matching records as an order-preserving subsequence.
///
/// Accepts any iterator of record references, so an already filtered
/// subset can be filtered again without copying records.
pub fn apply_filter<'a, I>(records: I, selection: &FilterSelection) -> Vec<&'a Incident>
where
    I: IntoIterator<Item = &'a Incident>,
{
    records
        .into_iter()
        .filter(|record| matches(record, selection))
        .collect()
}
