//! Immutable per-transition statistics bundle.

use crime_dashboard_analytics::{
    age_histogram, city_crime_cross_tab, city_ranking, crime_type_gender, gender_distribution,
    kpi_summary, time_series,
};
use crime_dashboard_analytics_models::{
    AgeHistogram, CityRanking, CrimeTypeGenderBreakdown, CrossTab, DashboardLimits,
    GenderDistribution, KpiSummary, TimeSeries,
};
use crime_dashboard_filter::apply_filter;
use crime_dashboard_filter_models::FilterSelection;
use crime_dashboard_incident_models::Incident;
use serde::{Deserialize, Serialize};

/// Every visual's statistics for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of records matching the selection.
    pub filtered_count: u64,
    /// KPI tiles.
    pub kpis: KpiSummary,
    /// Crime hotspots by city.
    pub city_ranking: CityRanking,
    /// Crime types split by victim gender.
    pub crime_types: CrimeTypeGenderBreakdown,
    /// Victim age histogram.
    pub age_histogram: AgeHistogram,
    /// Victim gender distribution.
    pub gender_distribution: GenderDistribution,
    /// City × crime type heatmap.
    pub cross_tab: CrossTab,
    /// Yearly or monthly trend.
    pub time_series: TimeSeries,
}

/// A selection together with the statistics computed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Selection the statistics were computed for.
    pub selection: FilterSelection,
    /// Statistics for every visual.
    pub stats: DashboardStats,
}

impl DashboardSnapshot {
    /// Filters `records` by `selection` and computes every statistic.
    #[must_use]
    pub fn compute(
        records: &[Incident],
        selection: FilterSelection,
        limits: &DashboardLimits,
    ) -> Self {
        let stats = compute_stats(records, &selection, limits);
        Self { selection, stats }
    }
}

/// Filters once and runs every reducer over the shared subset.
#[must_use]
pub fn compute_stats(
    records: &[Incident],
    selection: &FilterSelection,
    limits: &DashboardLimits,
) -> DashboardStats {
    let filtered = apply_filter(records, selection);

    log::debug!(
        "compute_stats: {} of {} records match",
        filtered.len(),
        records.len()
    );

    DashboardStats {
        filtered_count: filtered.len() as u64,
        kpis: kpi_summary(&filtered, records),
        city_ranking: city_ranking(&filtered, limits.city_ranking),
        crime_types: crime_type_gender(&filtered, limits.crime_types),
        age_histogram: age_histogram(&filtered),
        gender_distribution: gender_distribution(&filtered),
        cross_tab: city_crime_cross_tab(
            &filtered,
            limits.cross_tab_cities,
            limits.cross_tab_crime_types,
        ),
        time_series: time_series(&filtered, selection.year.as_only().copied()),
    }
}
