//! Crime hotspots by city.

use crime_dashboard_analytics_models::{CategoryShare, CityRanking};
use crime_dashboard_incident_models::Incident;

use crate::percent;
use crate::tally::count_labels;

/// Ranks cities by incident count, keeping the top `limit`.
///
/// Ties keep first-encountered order. Percentages are relative to the
/// whole filtered subset, not only the displayed cities.
#[must_use]
pub fn city_ranking(filtered: &[&Incident], limit: usize) -> CityRanking {
    let total = filtered.len() as u64;

    let entries = count_labels(filtered.iter().map(|r| r.city.as_str()))
        .into_ranked(|count| *count)
        .into_iter()
        .take(limit)
        .map(|(label, count)| CategoryShare {
            label: label.to_string(),
            count,
            percentage: percent(count, total),
        })
        .collect();

    CityRanking { entries, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{approx, incident, refs, scenario};

    #[test]
    fn ranks_cities_with_percentages() {
        let records = scenario();
        let ranking = city_ranking(&refs(&records), 10);

        assert_eq!(ranking.total, 3);
        assert_eq!(ranking.entries.len(), 2);
        assert_eq!(ranking.entries[0].label, "Delhi");
        assert_eq!(ranking.entries[0].count, 2);
        assert!(approx(ranking.entries[0].percentage, 66.7));
        assert_eq!(ranking.entries[1].label, "Mumbai");
        assert!(approx(ranking.entries[1].percentage, 33.3));
    }

    #[test]
    fn truncates_to_limit_and_breaks_ties_by_first_seen() {
        let records: Vec<_> = ["Pune", "Agra", "Kochi", "Agra", "Pune"]
            .iter()
            .map(|city| incident(city, "Theft", None, None, false, None))
            .collect();
        let ranking = city_ranking(&refs(&records), 2);

        let labels: Vec<&str> = ranking.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Pune", "Agra"]);
        assert_eq!(ranking.total, 5);
    }

    #[test]
    fn counts_sum_to_total_when_not_truncated() {
        let records = scenario();
        let ranking = city_ranking(&refs(&records), 10);
        let sum: u64 = ranking.entries.iter().map(|e| e.count).sum();
        assert_eq!(sum, ranking.total);
        let pct: f64 = ranking.entries.iter().map(|e| e.percentage).sum();
        assert!((pct - 100.0).abs() < 0.2);
    }

    #[test]
    fn empty_subset_has_no_top_city() {
        let ranking = city_ranking(&[], 10);
        assert_eq!(ranking.total, 0);
        assert!(ranking.top().is_none());
    }
}
