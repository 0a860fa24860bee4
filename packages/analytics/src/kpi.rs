//! Headline KPI tiles.

use crime_dashboard_analytics_models::{KpiSummary, NOT_AVAILABLE, TrendDirection};
use crime_dashboard_incident_models::Incident;

use crate::tally::most_frequent;
use crate::{percent, round1};

/// Computes the KPI tiles for `filtered` against the full dataset `all`.
///
/// The total change compares the filtered count with the count of records
/// outside the selection (`all - filtered`), which is `0` change when
/// nothing lies outside. The closure change compares the filtered closure
/// rate with the rate over all records.
#[must_use]
pub fn kpi_summary(filtered: &[&Incident], all: &[Incident]) -> KpiSummary {
    let total = filtered.len() as u64;
    let all_total = all.len() as u64;

    let previous = all_total.saturating_sub(total);
    let signed_total_change = if previous > 0 {
        #[allow(clippy::cast_precision_loss)]
        let change = (total as f64 - previous as f64) / previous as f64 * 100.0;
        round1(change)
    } else {
        0.0
    };

    let (most_common_crime, crime_count) =
        most_frequent(filtered.iter().map(|r| r.crime_type_label())).unwrap_or((NOT_AVAILABLE, 0));
    let (highest_crime_city, city_count) =
        most_frequent(filtered.iter().map(|r| r.city.as_str())).unwrap_or((NOT_AVAILABLE, 0));

    let closed = filtered.iter().filter(|r| r.case_closed).count() as u64;
    let closure_rate = percent(closed, total);

    let all_closure_rate = if all.is_empty() {
        closure_rate
    } else {
        unrounded_percent(all.iter().filter(|r| r.case_closed).count() as u64, all_total)
    };
    let signed_closure_change = round1(closure_rate - all_closure_rate);

    KpiSummary {
        total_crimes: total,
        total_change: signed_total_change.abs(),
        total_trend: TrendDirection::of(signed_total_change),
        most_common_crime: most_common_crime.to_string(),
        most_common_crime_percent: percent(crime_count, total),
        highest_crime_city: highest_crime_city.to_string(),
        highest_crime_city_percent: percent(city_count, total),
        closure_rate,
        closure_rate_label: closure_label(total, closure_rate),
        closure_change: signed_closure_change.abs(),
        closure_trend: TrendDirection::of(signed_closure_change),
    }
}

#[allow(clippy::cast_precision_loss)]
fn unrounded_percent(count: u64, total: u64) -> f64 {
    count as f64 / total as f64 * 100.0
}

fn closure_label(total: u64, rate: f64) -> String {
    if total == 0 {
        "0%".to_string()
    } else {
        format!("{rate:.1}%")
    }
}
