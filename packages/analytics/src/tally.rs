//! First-seen ordered accumulation keyed by category label.

use std::collections::BTreeMap;

/// Per-label accumulators that remember the order in which labels were
/// first encountered, so rankings can break ties by that order.
#[derive(Debug)]
pub struct FirstSeen<'a, V> {
    entries: Vec<(&'a str, V)>,
    index: BTreeMap<&'a str, usize>,
}

impl<V> Default for FirstSeen<'_, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<'a, V: Default> FirstSeen<'a, V> {
    /// Accumulator for `label`, inserted with `V::default()` on first use.
    pub fn entry(&mut self, label: &'a str) -> &mut V {
        let idx = *self.index.entry(label).or_insert_with(|| {
            self.entries.push((label, V::default()));
            self.entries.len() - 1
        });
        &mut self.entries[idx].1
    }

    /// Entries ordered by `key` descending. The sort is stable, so equal
    /// keys keep first-seen order.
    pub fn into_ranked(self, key: impl Fn(&V) -> u64) -> Vec<(&'a str, V)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| key(&b.1).cmp(&key(&a.1)));
        entries
    }
}

/// Counts occurrences of each label.
pub fn count_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> FirstSeen<'a, u64> {
    let mut tally = FirstSeen::default();
    for label in labels {
        *tally.entry(label) += 1;
    }
    tally
}

/// The most frequent label and its count; first seen on ties.
pub fn most_frequent<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<(&'a str, u64)> {
    count_labels(labels).into_ranked(|c| *c).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_then_first_seen() {
        let ranked = count_labels(["b", "a", "c", "a", "c"]).into_ranked(|c| *c);
        assert_eq!(ranked, vec![("a", 2), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn most_frequent_of_nothing_is_none() {
        assert_eq!(most_frequent(std::iter::empty()), None);
    }

    #[test]
    fn most_frequent_breaks_ties_by_first_seen() {
        assert_eq!(most_frequent(["x", "y", "y", "x"]), Some(("x", 2)));
    }
}
