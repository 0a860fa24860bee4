//! Facet extraction: distinct, sorted option values per dimension.

use std::collections::BTreeSet;

use crime_dashboard_filter_models::FilterOptionSet;
use crime_dashboard_incident_models::{AgeGroup, Incident};

/// Builds the option set for every filter control in a single pass.
///
/// Text facets are sorted by byte order; years ascending. Missing
/// categorical values and unparsable dates are skipped silently, so every
/// offered value exists verbatim in at least one record.
#[must_use]
pub fn extract_options(records: &[Incident]) -> FilterOptionSet {
    let mut cities = BTreeSet::new();
    let mut crime_types = BTreeSet::new();
    let mut weapons = BTreeSet::new();
    let mut genders = BTreeSet::new();
    let mut years = BTreeSet::new();

    for record in records {
        cities.insert(record.city.as_str());
        if let Some(crime_type) = record.crime_description.as_deref() {
            crime_types.insert(crime_type);
        }
        if let Some(weapon) = record.weapon_used.as_deref() {
            weapons.insert(weapon);
        }
        if let Some(gender) = record.victim_gender.as_deref() {
            genders.insert(gender);
        }
        if let Some(year) = record.year() {
            years.insert(year);
        }
    }

    let owned = |set: BTreeSet<&str>| set.into_iter().map(str::to_string).collect::<Vec<_>>();

    let options = FilterOptionSet {
        cities: owned(cities),
        crime_types: owned(crime_types),
        weapons: owned(weapons),
        genders: owned(genders),
        years: years.into_iter().collect(),
        age_groups: AgeGroup::all().to_vec(),
    };

    log::info!(
        "Extracted filter options: {} cities, {} crime types, {} weapons, {} genders, {} years",
        options.cities.len(),
        options.crime_types.len(),
        options.weapons.len(),
        options.genders.len(),
        options.years.len(),
    );

    options
}
