//! Victim age histogram.

use crime_dashboard_analytics_models::{AgeBucket, AgeHistogram};
use crime_dashboard_incident_models::{AgeGroup, Incident};

use crate::percent;

/// Buckets victims into the five fixed age groups.
///
/// Missing or non-numeric ages count as `0`. Negative ages land in no
/// bucket and are reported in [`AgeHistogram::unbucketed`].
#[must_use]
pub fn age_histogram(filtered: &[&Incident]) -> AgeHistogram {
    let total = filtered.len() as u64;
    let groups = AgeGroup::all();

    let mut counts = vec![0u64; groups.len()];
    let mut unbucketed = 0u64;

    for record in filtered {
        match record
            .age_group()
            .and_then(|group| groups.iter().position(|g| *g == group))
        {
            Some(idx) => counts[idx] += 1,
            None => unbucketed += 1,
        }
    }

    let buckets: Vec<AgeBucket> = groups
        .iter()
        .zip(counts)
        .map(|(group, count)| AgeBucket {
            age_group: *group,
            count,
            percentage: percent(count, total),
        })
        .collect();

    let most_affected = buckets
        .iter()
        .fold(None::<&AgeBucket>, |best, bucket| match best {
            Some(b) if b.count >= bucket.count => Some(b),
            _ if bucket.count > 0 => Some(bucket),
            _ => best,
        })
        .map(|bucket| bucket.age_group);

    AgeHistogram {
        buckets,
        most_affected,
        unbucketed,
        total,
    }
}
