//! Ranking results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Finalization record of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    /// Dense position among finalized vertices in the final sorted order.
    pub rank: usize,
    /// Sorted position at the pass that finalized the vertex.
    pub final_index: usize,
    /// Pass that finalized the vertex.
    pub resolution_step: usize,
}

/// Per-label ranking produced by refinement.
///
/// Only finalized vertices appear. Their `rank` values form `0..len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: BTreeMap<String, RankEntry>,
}

impl Ranking {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, label: String, entry: RankEntry) {
        self.entries.insert(label, entry);
    }

    pub fn get(&self, label: &str) -> Option<&RankEntry> {
        self.entries.get(label)
    }

    pub fn rank(&self, label: &str) -> Option<usize> {
        self.get(label).map(|entry| entry.rank)
    }

    pub fn resolution_step(&self, label: &str) -> Option<usize> {
        self.get(label).map(|entry| entry.resolution_step)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RankEntry)> {
        self.entries.iter().map(|(label, entry)| (label.as_str(), entry))
    }

    /// Labels ordered by rank.
    pub fn order(&self) -> Vec<&str> {
        let mut labels: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|(label, entry)| (label.as_str(), entry.rank))
            .collect();
        labels.sort_by_key(|(_, rank)| *rank);
        labels.into_iter().map(|(label, _)| label).collect()
    }

    /// Highest resolution step in the ranking, i.e. the pass that finished it.
    pub fn max_resolution_step(&self) -> Option<usize> {
        self.entries.values().map(|entry| entry.resolution_step).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: usize, resolution_step: usize) -> RankEntry {
        RankEntry {
            rank,
            final_index: rank,
            resolution_step,
        }
    }

    #[test]
    fn test_order_follows_rank() {
        let mut ranking = Ranking::new();
        ranking.insert("C".to_string(), entry(0, 1));
        ranking.insert("A".to_string(), entry(2, 3));
        ranking.insert("B".to_string(), entry(1, 1));

        assert_eq!(ranking.order(), vec!["C", "B", "A"]);
        assert_eq!(ranking.rank("A"), Some(2));
        assert_eq!(ranking.resolution_step("B"), Some(1));
        assert_eq!(ranking.max_resolution_step(), Some(3));
        assert!(ranking.rank("Z").is_none());
    }

    #[test]
    fn test_empty_ranking() {
        let ranking = Ranking::new();
        assert!(ranking.is_empty());
        assert!(ranking.order().is_empty());
        assert_eq!(ranking.max_resolution_step(), None);
    }
}
