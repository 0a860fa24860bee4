//! Victim gender distribution.

use crime_dashboard_analytics_models::{CategoryShare, GenderDistribution};
use crime_dashboard_incident_models::Incident;

use crate::percent;
use crate::tally::count_labels;

/// One entry per distinct gender value present, highest count first.
///
/// Values are reported as recorded; missing values are grouped under
/// `Unknown`. The dominant entry is the first-encountered value among
/// those with the highest count.
#[must_use]
pub fn gender_distribution(filtered: &[&Incident]) -> GenderDistribution {
    let total = filtered.len() as u64;

    let entries: Vec<CategoryShare> = count_labels(filtered.iter().map(|r| r.gender_label()))
        .into_ranked(|count| *count)
        .into_iter()
        .map(|(label, count)| CategoryShare {
            label: label.to_string(),
            count,
            percentage: percent(count, total),
        })
        .collect();

    GenderDistribution {
        dominant: entries.first().cloned(),
        entries,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{approx, incident, refs, scenario};

    #[test]
    fn scenario_delhi_subset_prefers_first_seen() {
        let records = scenario();
        let delhi: Vec<&Incident> = records.iter().filter(|r| r.city == "Delhi").collect();
        let distribution = gender_distribution(&delhi);

        assert_eq!(distribution.entries.len(), 2);
        assert_eq!(distribution.entries[0].label, "M");
        assert_eq!(distribution.entries[0].count, 1);
        assert_eq!(distribution.entries[1].label, "F");
        assert_eq!(distribution.entries[1].count, 1);
        assert_eq!(distribution.dominant_label(), "M");
        assert!(approx(distribution.entries[0].percentage, 50.0));
    }

    #[test]
    fn missing_gender_is_unknown() {
        let records = vec![
            incident("Delhi", "Theft", None, None, false, None),
            incident("Delhi", "Theft", None, Some("F"), false, None),
            incident("Delhi", "Theft", None, None, false, None),
        ];
        let distribution = gender_distribution(&refs(&records));
        assert_eq!(distribution.dominant_label(), "Unknown");
        assert_eq!(distribution.entries[0].count, 2);
    }

    #[test]
    fn counts_sum_to_total() {
        let records = scenario();
        let distribution = gender_distribution(&refs(&records));
        let sum: u64 = distribution.entries.iter().map(|e| e.count).sum();
        assert_eq!(sum, distribution.total);
        let pct: f64 = distribution.entries.iter().map(|e| e.percentage).sum();
        assert!((pct - 100.0).abs() < 0.2);
    }

    #[test]
    fn empty_subset() {
        let distribution = gender_distribution(&[]);
        assert!(distribution.entries.is_empty());
        assert_eq!(distribution.dominant, None);
        assert_eq!(distribution.dominant_label(), "N/A");
    }
}
