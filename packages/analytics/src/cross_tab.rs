//! City × crime type heatmap.

use std::collections::BTreeMap;

use crime_dashboard_analytics_models::{CrossTab, CrossTabCell, CrossTabRow, HeatIntensity};
use crime_dashboard_incident_models::Incident;

use crate::tally::count_labels;

/// Co-occurrence matrix over the top `city_limit` cities and the top
/// `crime_limit` crime types.
///
/// Rows and columns are chosen by marginal totals, independent of the cell
/// values. `max_value` scans every city and crime type pair in the subset,
/// so a hidden pair can set the scale.
#[must_use]
pub fn city_crime_cross_tab(
    filtered: &[&Incident],
    city_limit: usize,
    crime_limit: usize,
) -> CrossTab {
    let mut pairs: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for record in filtered {
        *pairs
            .entry((record.city.as_str(), record.crime_type_label()))
            .or_default() += 1;
    }

    let top = |labels: Vec<(&str, u64)>, limit: usize| -> Vec<String> {
        labels
            .into_iter()
            .take(limit)
            .map(|(label, _)| label.to_string())
            .collect()
    };

    let cities = top(
        count_labels(filtered.iter().map(|r| r.city.as_str())).into_ranked(|c| *c),
        city_limit,
    );
    let crime_types = top(
        count_labels(filtered.iter().map(|r| r.crime_type_label())).into_ranked(|c| *c),
        crime_limit,
    );

    let max_value = pairs.values().copied().max().unwrap_or(0).max(1);

    let rows = cities
        .iter()
        .map(|city| CrossTabRow {
            city: city.clone(),
            cells: crime_types
                .iter()
                .map(|crime_type| {
                    let count = pairs
                        .get(&(city.as_str(), crime_type.as_str()))
                        .copied()
                        .unwrap_or(0);
                    CrossTabCell {
                        crime_type: crime_type.clone(),
                        count,
                        intensity: HeatIntensity::classify(count, max_value),
                    }
                })
                .collect(),
        })
        .collect();

    CrossTab {
        cities,
        crime_types,
        rows,
        max_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{incident, refs, scenario};

    #[test]
    fn scenario_matrix() {
        let records = scenario();
        let tab = city_crime_cross_tab(&refs(&records), 6, 6);

        assert_eq!(tab.cities, vec!["Delhi", "Mumbai"]);
        assert_eq!(tab.crime_types, vec!["Theft", "Assault"]);
        assert_eq!(tab.cell("Delhi", "Theft"), 1);
        assert_eq!(tab.cell("Delhi", "Assault"), 1);
        assert_eq!(tab.cell("Mumbai", "Theft"), 1);
        assert_eq!(tab.cell("Mumbai", "Assault"), 0);
        assert_eq!(tab.max_value, 1);
        assert_eq!(tab.rows[1].cells[1].intensity, HeatIntensity::Empty);
        assert_eq!(tab.rows[0].cells[0].intensity, HeatIntensity::Peak);
    }

    #[test]
    fn rows_and_columns_follow_marginal_totals() {
        let records: Vec<_> = [
            ("Agra", "Theft"),
            ("Pune", "Fraud"),
            ("Pune", "Theft"),
            ("Kochi", "Arson"),
            ("Pune", "Fraud"),
        ]
        .iter()
        .map(|(city, crime)| incident(city, crime, None, None, false, None))
        .collect();

        let tab = city_crime_cross_tab(&refs(&records), 2, 2);
        assert_eq!(tab.cities, vec!["Pune", "Agra"]);
        assert_eq!(tab.crime_types, vec!["Theft", "Fraud"]);
        assert_eq!(tab.cell("Pune", "Fraud"), 2);
        assert_eq!(tab.cell("Agra", "Fraud"), 0);
        assert_eq!(tab.max_value, 2);
    }

    #[test]
    fn max_value_includes_hidden_pairs() {
        let mut records: Vec<_> = (0..10)
            .map(|_| incident("Kochi", "Arson", None, None, false, None))
            .collect();
        records.extend((0..6).map(|_| incident("Agra", "Theft", None, None, false, None)));
        records.extend((0..6).map(|_| incident("Agra", "Fraud", None, None, false, None)));

        let tab = city_crime_cross_tab(&refs(&records), 1, 2);
        assert_eq!(tab.cities, vec!["Agra"]);
        assert_eq!(tab.crime_types, vec!["Arson", "Theft"]);
        assert_eq!(tab.max_value, 10);
        assert_eq!(tab.cell("Agra", "Theft"), 6);
        assert_eq!(tab.rows[0].cells[0].intensity, HeatIntensity::Empty);
        assert_eq!(tab.rows[0].cells[1].intensity, HeatIntensity::High);
    }

    #[test]
    fn empty_subset_has_floor_of_one() {
        let tab = city_crime_cross_tab(&[], 6, 6);
        assert!(tab.cities.is_empty());
        assert!(tab.rows.is_empty());
        assert_eq!(tab.max_value, 1);
    }
}
