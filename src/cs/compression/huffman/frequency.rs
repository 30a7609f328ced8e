use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An atomic unit of input.
///
/// Text is scanned one UTF-16 code unit at a time, so characters outside the
/// basic multilingual plane become two symbols. The end marker is its own
/// variant and therefore can never appear in real input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// One UTF-16 code unit of the input text.
    Unit(u16),
    /// Reserved sentinel that terminates an encoded stream.
    EndMarker,
}

impl Symbol {
    /// Returns `true` for the end-of-stream sentinel.
    pub fn is_end_marker(&self) -> bool {
        matches!(self, Symbol::EndMarker)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::EndMarker => write!(f, "EOF"),
            Symbol::Unit(unit) => match char::from_u32(u32::from(unit)) {
                Some(' ') => write!(f, "SPACE"),
                Some('\n') => write!(f, "NEWLINE"),
                Some('\t') => write!(f, "TAB"),
                Some(ch) if !ch.is_control() => write!(f, "{}", ch),
                _ => write!(f, "U+{:04X}", unit),
            },
        }
    }
}

/// Iterates over the symbols of `text` without the end marker.
pub fn symbols(text: &str) -> impl Iterator<Item = Symbol> + '_ {
    text.encode_utf16().map(Symbol::Unit)
}

/// Mapping from symbol to occurrence count.
///
/// Entries keep the order in which symbols were first seen; the end marker is
/// always the last entry, with a count of exactly 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    entries: Vec<(Symbol, usize)>,
    index: HashMap<Symbol, usize>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the symbols of `text` in one pass and appends the end marker.
    pub fn from_text(text: &str) -> Self {
        let mut table = Self::new();
        for symbol in symbols(text) {
            table.increment(symbol);
        }
        table.set(Symbol::EndMarker, 1);
        table
    }

    /// Builds a table from explicit `(symbol, count)` pairs, in order.
    ///
    /// Repeated symbols accumulate into their first entry.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (Symbol, usize)>,
    {
        let mut table = Self::new();
        for (symbol, count) in counts {
            match table.index.get(&symbol) {
                Some(&i) => table.entries[i].1 += count,
                None => table.push(symbol, count),
            }
        }
        table
    }

    fn increment(&mut self, symbol: Symbol) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 += 1,
            None => self.push(symbol, 1),
        }
    }

    fn set(&mut self, symbol: Symbol, count: usize) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 = count,
            None => self.push(symbol, count),
        }
    }

    fn push(&mut self, symbol: Symbol, count: usize) {
        self.index.insert(symbol, self.entries.len());
        self.entries.push((symbol, count));
    }

    /// Count recorded for `symbol`, if any.
    pub fn get(&self, symbol: Symbol) -> Option<usize> {
        self.index.get(&symbol).map(|&i| self.entries[i].1)
    }

    /// Number of distinct symbols, end marker included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Entries sorted by descending count, ties kept in first-occurrence order.
    pub fn by_descending_count(&self) -> Vec<(Symbol, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(ch: char) -> Symbol {
        Symbol::Unit(ch as u16)
    }

    #[test]
    fn test_counts_and_end_marker() {
        let table = FrequencyTable::from_text("aabccc");
        assert_eq!(table.get(unit('a')), Some(2));
        assert_eq!(table.get(unit('b')), Some(1));
        assert_eq!(table.get(unit('c')), Some(3));
        assert_eq!(table.get(Symbol::EndMarker), Some(1));
        assert_eq!(table.len(), 4);
        assert_eq!(table.total(), 7);
    }

    #[test]
    fn test_first_occurrence_order() {
        let table = FrequencyTable::from_text("cab");
        let order: Vec<Symbol> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![unit('c'), unit('a'), unit('b'), Symbol::EndMarker]);
    }

    #[test]
    fn test_empty_text_has_only_end_marker() {
        let table = FrequencyTable::from_text("");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Symbol::EndMarker), Some(1));
    }

    #[test]
    fn test_surrogate_pairs_are_two_symbols() {
        let table = FrequencyTable::from_text("😀");
        // two code units plus the end marker
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_u_ffff_does_not_collide_with_end_marker() {
        let table = FrequencyTable::from_text("\u{FFFF}\u{FFFF}");
        assert_eq!(table.get(Symbol::Unit(0xFFFF)), Some(2));
        assert_eq!(table.get(Symbol::EndMarker), Some(1));
    }

    #[test]
    fn test_descending_count_is_stable() {
        let table = FrequencyTable::from_text("abcb");
        let sorted = table.by_descending_count();
        assert_eq!(sorted[0], (unit('b'), 2));
        assert_eq!(sorted[1], (unit('a'), 1));
        assert_eq!(sorted[2], (unit('c'), 1));
        assert_eq!(sorted[3], (Symbol::EndMarker, 1));
    }

    #[test]
    fn test_from_counts_accumulates() {
        let table = FrequencyTable::from_counts(vec![(unit('x'), 2), (unit('y'), 1), (unit('x'), 3)]);
        assert_eq!(table.get(unit('x')), Some(5));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(unit(' ').to_string(), "SPACE");
        assert_eq!(unit('\n').to_string(), "NEWLINE");
        assert_eq!(unit('q').to_string(), "q");
        assert_eq!(Symbol::EndMarker.to_string(), "EOF");
        assert_eq!(Symbol::Unit(0xD83D).to_string(), "U+D83D");
    }
}
