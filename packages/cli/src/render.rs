//! Plain-text rendering of option sets and snapshots.

use std::fmt;

use crime_dashboard::DashboardSnapshot;
use crime_dashboard_analytics_models::{
    AgeHistogram, CityRanking, CrimeTypeGenderBreakdown, CrossTab, GenderDistribution,
    KpiSummary, TimeSeries, TrendDirection,
};
use crime_dashboard_filter_models::{FilterDimension, FilterOptionSet, FilterSelection};

const RULE_WIDTH: usize = 72;

/// Renders every filter control's options.
pub fn options(options: &FilterOptionSet) -> String {
    OptionsView(options).to_string()
}

/// Renders every tile of a snapshot.
pub fn snapshot(snapshot: &DashboardSnapshot) -> String {
    SnapshotView(snapshot).to_string()
}

struct OptionsView<'a>(&'a FilterOptionSet);

impl fmt::Display for OptionsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dimension in FilterDimension::all() {
            let labels = self.0.labels(*dimension);
            writeln!(f, "{} ({})", dimension.wildcard_label(), labels.len())?;
            for label in labels {
                writeln!(f, "  {label}")?;
            }
        }
        Ok(())
    }
}

struct SnapshotView<'a>(&'a DashboardSnapshot);

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.0.stats;
        selection(f, &self.0.selection)?;
        kpis(f, &stats.kpis)?;
        cities(f, &stats.city_ranking)?;
        crime_types(f, &stats.crime_types)?;
        ages(f, &stats.age_histogram)?;
        genders(f, &stats.gender_distribution)?;
        heatmap(f, &stats.cross_tab)?;
        trend(f, &stats.time_series)
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

const fn arrow(trend: TrendDirection) -> &'static str {
    match trend {
        TrendDirection::Up => "↑",
        TrendDirection::Down => "↓",
    }
}

fn selection(f: &mut fmt::Formatter<'_>, selection: &FilterSelection) -> fmt::Result {
    let parts: Vec<String> = FilterDimension::all()
        .iter()
        .map(|dimension| format!("{dimension}={}", selection.value_label(*dimension)))
        .collect();
    writeln!(f, "Filters: {}", parts.join(", "))
}

fn kpis(f: &mut fmt::Formatter<'_>, kpis: &KpiSummary) -> fmt::Result {
    heading(f, "Key indicators")?;
    writeln!(
        f,
        "{:<22} {} ({}{}%)",
        "Total crimes",
        kpis.total_crimes,
        arrow(kpis.total_trend),
        kpis.total_change
    )?;
    writeln!(
        f,
        "{:<22} {} ({}%)",
        "Most common crime", kpis.most_common_crime, kpis.most_common_crime_percent
    )?;
    writeln!(
        f,
        "{:<22} {} ({}%)",
        "Highest crime city", kpis.highest_crime_city, kpis.highest_crime_city_percent
    )?;
    writeln!(
        f,
        "{:<22} {} ({}{} pts)",
        "Case closure rate",
        kpis.closure_rate_label,
        arrow(kpis.closure_trend),
        kpis.closure_change
    )
}

fn cities(f: &mut fmt::Formatter<'_>, ranking: &CityRanking) -> fmt::Result {
    heading(f, "Crime hotspots")?;
    for entry in &ranking.entries {
        writeln!(
            f,
            "{:<24} {:>8} {:>6.1}%",
            entry.label, entry.count, entry.percentage
        )?;
    }
    Ok(())
}

fn crime_types(f: &mut fmt::Formatter<'_>, breakdown: &CrimeTypeGenderBreakdown) -> fmt::Result {
    heading(f, "Crime types by victim gender")?;
    writeln!(
        f,
        "{:<16} {:>7} {:>7} {:>7} {:>7} {:>7}",
        "TYPE", "TOTAL", "%", "M", "F", "OTHER"
    )?;
    for entry in &breakdown.entries {
        writeln!(
            f,
            "{:<16} {:>7} {:>6.1}% {:>7} {:>7} {:>7}",
            entry.short_label, entry.total, entry.percentage, entry.male, entry.female, entry.other
        )?;
    }
    Ok(())
}

fn ages(f: &mut fmt::Formatter<'_>, histogram: &AgeHistogram) -> fmt::Result {
    heading(f, "Victim age")?;
    for bucket in &histogram.buckets {
        writeln!(
            f,
            "{:<8} {:>8} {:>6.1}%",
            bucket.age_group, bucket.count, bucket.percentage
        )?;
    }
    if histogram.unbucketed > 0 {
        writeln!(f, "{:<8} {:>8}", "invalid", histogram.unbucketed)?;
    }
    writeln!(f, "Most affected: {}", histogram.most_affected_label())
}

fn genders(f: &mut fmt::Formatter<'_>, distribution: &GenderDistribution) -> fmt::Result {
    heading(f, "Victim gender")?;
    for entry in &distribution.entries {
        writeln!(
            f,
            "{:<8} {:>8} {:>6.1}%",
            entry.label, entry.count, entry.percentage
        )?;
    }
    writeln!(f, "Dominant: {}", distribution.dominant_label())
}

fn heatmap(f: &mut fmt::Formatter<'_>, tab: &CrossTab) -> fmt::Result {
    heading(f, "City x crime type")?;
    write!(f, "{:<16}", "")?;
    for crime_type in &tab.crime_types {
        write!(
            f,
            " {:>15}",
            crime_dashboard_analytics_models::short_label(crime_type)
        )?;
    }
    writeln!(f)?;
    for row in &tab.rows {
        write!(f, "{:<16}", row.city)?;
        for cell in &row.cells {
            write!(f, " {:>6} {:<8}", cell.count, cell.intensity)?;
        }
        writeln!(f)?;
    }
    writeln!(f, "Max cell: {}", tab.max_value)
}

fn trend(f: &mut fmt::Formatter<'_>, series: &TimeSeries) -> fmt::Result {
    heading(f, "Trend")?;
    for point in &series.points {
        writeln!(f, "{:<8} {:>8}", point.period, point.count)?;
    }
    writeln!(
        f,
        "{}: {}",
        series.granularity.average_label(),
        series.average
    )?;
    if let Some(peak) = &series.peak {
        writeln!(
            f,
            "{}: {} ({} crimes)",
            series.granularity.peak_label(),
            peak.period,
            peak.count
        )?;
    }
    Ok(())
}
