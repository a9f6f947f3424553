// Symbol frequency table.
//
// Backed by a BTreeMap so iteration is always in ascending symbol order,
// which the tree builder relies on for its deterministic tie-break.

use std::collections::BTreeMap;

/// Occurrence count of every distinct symbol in a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every symbol of `text` in one pass.
    pub fn from_text(text: &str) -> Self {
        let mut table = Self::new();
        for symbol in text.chars() {
            table.add(symbol, 1);
        }
        table
    }

    /// Add `count` occurrences of `symbol`. A zero count is ignored so that
    /// every entry in the table has a positive weight.
    pub fn add(&mut self, symbol: char, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(symbol).or_insert(0) += count;
        self.total += count;
    }

    /// Occurrences of `symbol` (0 if absent).
    pub fn get(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl FromIterator<char> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut table = Self::new();
        for symbol in iter {
            table.add(symbol, 1);
        }
        table
    }
}
