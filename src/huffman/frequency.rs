//! Symbol frequency counting.

use std::collections::BTreeMap;

/// Occurrence count per symbol, ordered by code point.
///
/// Counts are always positive: a symbol is present exactly when it occurs
/// in the counted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    /// Count every `char` of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for c in text.chars() {
            *counts.entry(c).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts (the number of symbols in the source text).
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Entries in ascending code point order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    /// Entries by descending count, ties broken by code point.
    pub fn sorted_by_count(&self) -> Vec<(char, u64)> {
        let mut entries: Vec<(char, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }
}

impl FromIterator<(char, u64)> for FrequencyTable {
    /// Collect counts, summing duplicates and dropping zero counts.
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (c, n) in iter.into_iter().filter(|&(_, n)| n > 0) {
            *counts.entry(c).or_insert(0) += n;
        }
        Self { counts }
    }
}
