//! Crime type distribution split by victim gender.

use crime_dashboard_analytics_models::{
    CrimeTypeGenderBreakdown, CrimeTypeGenderEntry, short_label,
};
use crime_dashboard_incident_models::{Gender, Incident};

use crate::percent;
use crate::tally::FirstSeen;

#[derive(Debug, Default)]
struct GenderSplit {
    male: u64,
    female: u64,
    other: u64,
}

impl GenderSplit {
    const fn total(&self) -> u64 {
        self.male + self.female + self.other
    }
}

/// Top `limit` crime types by total count, each split into male, female,
/// and other victims.
///
/// "Other" covers the `X` code as well as missing or unrecognized gender
/// values, so the three sub-counts always add up to the crime type total.
/// Missing crime descriptions are grouped under `Unknown`.
#[must_use]
pub fn crime_type_gender(filtered: &[&Incident], limit: usize) -> CrimeTypeGenderBreakdown {
    let total = filtered.len() as u64;

    let mut by_type: FirstSeen<'_, GenderSplit> = FirstSeen::default();
    for record in filtered {
        let split = by_type.entry(record.crime_type_label());
        match record.gender() {
            Gender::Male => split.male += 1,
            Gender::Female => split.female += 1,
            Gender::Other | Gender::Unknown => split.other += 1,
        }
    }

    let entries = by_type
        .into_ranked(GenderSplit::total)
        .into_iter()
        .take(limit)
        .map(|(crime_type, split)| {
            let type_total = split.total();
            CrimeTypeGenderEntry {
                crime_type: crime_type.to_string(),
                short_label: short_label(crime_type),
                total: type_total,
                percentage: percent(type_total, total),
                male: split.male,
                female: split.female,
                other: split.other,
            }
        })
        .collect();

    CrimeTypeGenderBreakdown { entries, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{approx, incident, refs, scenario};

    #[test]
    fn splits_by_gender() {
        let records = scenario();
        let breakdown = crime_type_gender(&refs(&records), 8);

        assert_eq!(breakdown.entries.len(), 2);
        let theft = &breakdown.entries[0];
        assert_eq!(theft.crime_type, "Theft");
        assert_eq!((theft.male, theft.female, theft.other), (2, 0, 0));
        assert!(approx(theft.percentage, 66.7));

        let assault = &breakdown.entries[1];
        assert_eq!((assault.male, assault.female, assault.other), (0, 1, 0));
    }

    #[test]
    fn other_collects_x_missing_and_unrecognized() {
        let records = vec![
            incident("Delhi", "Fraud", None, Some("X"), false, None),
            incident("Delhi", "Fraud", None, None, false, None),
            incident("Delhi", "Fraud", None, Some("Z"), false, None),
            incident("Delhi", "Fraud", None, Some("F"), false, None),
        ];
        let breakdown = crime_type_gender(&refs(&records), 8);
        let fraud = &breakdown.entries[0];
        assert_eq!((fraud.male, fraud.female, fraud.other), (0, 1, 3));
        assert_eq!(fraud.total, 4);
    }

    #[test]
    fn sub_counts_sum_to_filtered_total() {
        let records = scenario();
        let breakdown = crime_type_gender(&refs(&records), 8);
        let sum: u64 = breakdown
            .entries
            .iter()
            .map(|e| e.male + e.female + e.other)
            .sum();
        assert_eq!(sum, breakdown.total);
        let pct: f64 = breakdown.entries.iter().map(|e| e.percentage).sum();
        assert!((pct - 100.0).abs() < 0.2);
    }

    #[test]
    fn shortens_long_crime_types() {
        let records = vec![incident(
            "Delhi",
            "IDENTITY THEFT AND FRAUD",
            None,
            Some("M"),
            false,
            None,
        )];
        let breakdown = crime_type_gender(&refs(&records), 8);
        assert_eq!(breakdown.entries[0].short_label, "IDENTITY THE...");
        assert_eq!(breakdown.entries[0].crime_type, "IDENTITY THEFT AND FRAUD");
    }

    #[test]
    fn keeps_top_limit() {
        let records: Vec<_> = ["A", "B", "B", "C", "C", "C"]
            .iter()
            .map(|crime| incident("Delhi", crime, None, Some("M"), false, None))
            .collect();
        let breakdown = crime_type_gender(&refs(&records), 2);
        let labels: Vec<&str> = breakdown
            .entries
            .iter()
            .map(|e| e.crime_type.as_str())
            .collect();
        assert_eq!(labels, vec!["C", "B"]);
    }

    #[test]
    fn empty_subset() {
        let breakdown = crime_type_gender(&[], 8);
        assert!(breakdown.top().is_none());
        assert_eq!(breakdown.total, 0);
    }
}
