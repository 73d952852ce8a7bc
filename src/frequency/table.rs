// FrequencyTable — token counts that remember first-insertion order.
//
// Insertion order is what makes `most_common` deterministic: entries with
// equal counts come back in the order their tokens were first seen.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    positions: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every token in `tokens`.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for token in tokens {
            table.add(token.as_ref(), 1);
        }
        table
    }

    /// Add `count` occurrences of `token`.
    pub fn add(&mut self, token: &str, count: usize) {
        match self.positions.get(token) {
            Some(&pos) => self.entries[pos].1 += count,
            None => {
                self.positions.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), count));
            }
        }
    }

    /// Add every count from `other`. Tokens new to this table are appended
    /// in `other`'s order.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (token, count) in &other.entries {
            self.add(token, *count);
        }
    }

    pub fn get(&self, token: &str) -> usize {
        self.positions
            .get(token)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// The `n` highest counts, descending; ties keep insertion order.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        // sort_by is stable, which preserves insertion order within ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (token, count) in &self.entries {
            map.serialize_entry(token, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_total() {
        let table = FrequencyTable::from_tokens(["a", "b", "a", "c", "a"]);
        assert_eq!(table.get("a"), 3);
        assert_eq!(table.get("b"), 1);
        assert_eq!(table.get("missing"), 0);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let table = FrequencyTable::from_tokens(["pear", "fig", "kiwi", "fig", "pear", "kiwi"]);
        let top = table.most_common(3);
        assert_eq!(
            top,
            vec![
                ("pear".to_string(), 2),
                ("fig".to_string(), 2),
                ("kiwi".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_most_common_truncates() {
        let table = FrequencyTable::from_tokens(["x", "y", "y", "z", "z", "z"]);
        assert_eq!(
            table.most_common(2),
            vec![("z".to_string(), 3), ("y".to_string(), 2)]
        );
        assert!(table.most_common(0).is_empty());
        assert_eq!(table.most_common(50).len(), 3);
    }

    #[test]
    fn test_merge_appends_new_tokens() {
        let mut left = FrequencyTable::from_tokens(["a", "b"]);
        let right = FrequencyTable::from_tokens(["c", "a", "d"]);
        left.merge(&right);
        let order: Vec<&str> = left.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
        assert_eq!(left.get("a"), 2);
        assert_eq!(left.total(), 5);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let table = FrequencyTable::from_tokens(["b", "a", "b"]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);
    }
}
