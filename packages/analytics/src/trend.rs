//! Incident counts over time.

use std::collections::BTreeMap;

use crime_dashboard_analytics_models::{Month, SeriesGranularity, TimeSeries, TimeSeriesPoint};
use crime_dashboard_incident_models::Incident;

/// Builds the trend line for the filtered subset.
///
/// With no year selected the series has one point per year present,
/// ascending. With a year selected it has twelve month points, January
/// first, counting every dated record in scope by its month. Records with
/// an unparsable date contribute to no point but still count toward
/// [`TimeSeries::total`] and therefore the average.
#[must_use]
pub fn time_series(filtered: &[&Incident], selected_year: Option<i32>) -> TimeSeries {
    let total = filtered.len() as u64;
    let granularity = if selected_year.is_some() {
        SeriesGranularity::Monthly
    } else {
        SeriesGranularity::Yearly
    };

    let points = if filtered.is_empty() {
        Vec::new()
    } else {
        match granularity {
            SeriesGranularity::Yearly => yearly(filtered),
            SeriesGranularity::Monthly => monthly(filtered),
        }
    };

    let average = if points.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let avg = total as f64 / points.len() as f64;
        avg.round()
    };

    let peak = points
        .iter()
        .fold(None::<&TimeSeriesPoint>, |best, point| match best {
            Some(b) if b.count >= point.count => Some(b),
            _ => Some(point),
        })
        .cloned();

    TimeSeries {
        granularity,
        points,
        average,
        peak,
        total,
    }
}

fn yearly(filtered: &[&Incident]) -> Vec<TimeSeriesPoint> {
    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for year in filtered.iter().filter_map(|r| r.year()) {
        *counts.entry(year).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| TimeSeriesPoint {
            period: year.to_string(),
            count,
        })
        .collect()
}

fn monthly(filtered: &[&Incident]) -> Vec<TimeSeriesPoint> {
    let mut counts = [0u64; 12];
    for month in filtered.iter().filter_map(|r| r.month0()) {
        if let Some(slot) = usize::try_from(month).ok().and_then(|m| counts.get_mut(m)) {
            *slot += 1;
        }
    }
    Month::all()
        .iter()
        .zip(counts)
        .map(|(month, count)| TimeSeriesPoint {
            period: month.to_string(),
            count,
        })
        .collect()
}
