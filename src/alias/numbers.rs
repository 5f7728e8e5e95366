//! Disambiguation numbers allocated under each prefix.

use std::collections::{BTreeMap, BTreeSet};

/// Numbers in use under one prefix, with their running maximum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberSet {
    used: BTreeSet<u32>,
    max: u32,
}

impl NumberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `number` as used. Returns false if it already was.
    pub fn insert(&mut self, number: u32) -> bool {
        let fresh = self.used.insert(number);
        self.max = self.max.max(number);
        fresh
    }

    pub fn contains(&self, number: u32) -> bool {
        self.used.contains(&number)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Ascending.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.used.iter().copied()
    }

    /// Smallest unused number at or above the floor (1 when `force_non_zero`,
    /// else 0).
    pub fn smallest_free(&self, force_non_zero: bool) -> u32 {
        let floor = u32::from(force_non_zero);
        if self.used.is_empty() {
            return floor;
        }
        (floor..=self.max)
            .find(|n| !self.used.contains(n))
            .unwrap_or(self.max + 1)
    }
}

/// Smallest free number for `prefix`, or the floor when the prefix is unused.
pub fn smallest_free_number(
    prefix: &str,
    numbers_in_use: &BTreeMap<String, NumberSet>,
    force_non_zero: bool,
) -> u32 {
    match numbers_in_use.get(prefix) {
        Some(set) => set.smallest_free(force_non_zero),
        None => u32::from(force_non_zero),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(numbers: &[u32]) -> NumberSet {
        let mut s = NumberSet::new();
        for &n in numbers {
            s.insert(n);
        }
        s
    }

    #[test]
    fn unused_prefix_starts_at_floor() {
        let map = BTreeMap::new();
        assert_eq!(smallest_free_number("Gob", &map, false), 0);
        assert_eq!(smallest_free_number("Gob", &map, true), 1);
    }

    #[test]
    fn fills_gaps_before_extending() {
        assert_eq!(set(&[0, 1, 3]).smallest_free(false), 2);
        assert_eq!(set(&[0, 1, 2]).smallest_free(false), 3);
        assert_eq!(set(&[1, 2]).smallest_free(false), 0);
    }

    #[test]
    fn forced_numbers_skip_zero() {
        assert_eq!(set(&[0]).smallest_free(true), 1);
        assert_eq!(set(&[2]).smallest_free(true), 1);
        assert_eq!(set(&[1, 2]).smallest_free(true), 3);
    }

    #[test]
    fn tracks_running_max() {
        let mut s = NumberSet::new();
        assert!(s.insert(4));
        assert!(!s.insert(4));
        assert!(s.insert(1));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(s.smallest_free(true), 2);
        assert_eq!(s.len(), 2);
    }
}
