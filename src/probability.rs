//! Empirical launch position model.
//!
//! Every enemy mobile spawn observed during the match increments a count for
//! its launch position. The normalized counts form the distribution the
//! planner tries to cover. Evidence only accumulates; nothing decays.

use crate::location::*;
use fnv::{FnvHashMap, FnvHashSet};

#[derive(Clone, Debug, Default)]
pub struct PositionProbabilityModel {
    counts: FnvHashMap<Position, u32>,
    /// Positions in order of first observation.
    order: Vec<Position>,
    total: u32,
}

impl PositionProbabilityModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, position: Position) {
        let count = self.counts.entry(position).or_insert_with(|| {
            self.order.push(position);
            0
        });
        *count += 1;
        self.total += 1;
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, position: Position) -> u32 {
        self.counts.get(&position).copied().unwrap_or(0)
    }

    /// `None` until at least one launch has been observed.
    pub fn probability(&self, position: Position) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.count(position) as f64 / self.total as f64)
        }
    }

    /// Snapshot of `count / total` for every observed position. Empty when
    /// nothing has been observed yet, which callers read as "no prediction".
    pub fn distribution(&self) -> Distribution {
        if self.total == 0 {
            return Distribution::default();
        }

        let total = self.total as f64;
        Distribution {
            entries: self
                .order
                .iter()
                .map(|position| (*position, self.counts[position] as f64 / total))
                .collect(),
        }
    }
}

/// An owned probability distribution over launch positions.
///
/// Iteration order is stable so that floating point accumulation over it is
/// reproducible from run to run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution {
    entries: Vec<(Position, f64)>,
}

impl Distribution {
    /// Build a distribution from explicit weights. No normalization is applied.
    pub fn from_entries(entries: impl IntoIterator<Item = (Position, f64)>) -> Self {
        let mut seen = FnvHashSet::default();
        Distribution {
            entries: entries
                .into_iter()
                .filter(|(position, _)| seen.insert(*position))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.entries.iter().map(|(_, probability)| probability).sum()
    }

    pub fn remove_all(&mut self, positions: &FnvHashSet<Position>) {
        self.entries.retain(|(p, _)| !positions.contains(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_model_has_no_prediction() {
        let model = PositionProbabilityModel::new();
        assert!(model.is_empty());
        assert!(model.distribution().is_empty());
        assert_eq!(model.probability(Position::new(4, 9)), None);
    }

    #[test]
    fn counts_accumulate() {
        let mut model = PositionProbabilityModel::new();
        for _ in 0..3 {
            model.record(Position::new(4, 9));
        }
        for _ in 0..2 {
            model.record(Position::new(23, 9));
        }

        assert_eq!(model.total(), 5);
        assert_eq!(model.count(Position::new(4, 9)), 3);
        assert_eq!(model.count(Position::new(0, 13)), 0);

        let entries: Vec<(Position, f64)> = model.distribution().iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, Position::new(4, 9));
        assert!((entries[0].1 - 0.6).abs() < 1e-12);
        assert!((entries[1].1 - 0.4).abs() < 1e-12);
        assert!((model.probability(Position::new(23, 9)).unwrap() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn distribution_is_in_first_seen_order() {
        let mut model = PositionProbabilityModel::new();
        model.record(Position::new(20, 6));
        model.record(Position::new(3, 10));
        model.record(Position::new(20, 6));

        let order: Vec<Position> = model.distribution().iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec![Position::new(20, 6), Position::new(3, 10)]);
    }

    #[test]
    fn removing_from_a_snapshot_leaves_the_model_alone() {
        let mut model = PositionProbabilityModel::new();
        model.record(Position::new(4, 9));
        model.record(Position::new(23, 9));

        let mut working = model.distribution();
        working.remove_all(&[Position::new(4, 9)].into_iter().collect());
        assert_eq!(working.len(), 1);
        assert!((working.total_mass() - 0.5).abs() < 1e-12);
        assert_eq!(model.distribution().len(), 2);
    }

    #[test]
    fn explicit_entries_keep_first_duplicate() {
        let distribution = Distribution::from_entries([
            (Position::new(4, 9), 0.6),
            (Position::new(4, 9), 0.1),
            (Position::new(23, 9), 0.4),
        ]);
        assert_eq!(
            distribution.iter().collect::<Vec<_>>(),
            vec![(Position::new(4, 9), 0.6), (Position::new(23, 9), 0.4)]
        );
    }

    proptest! {
        #[test]
        fn distribution_sums_to_one(launches in prop::collection::vec((0u8..28, 14u8..28), 1..200)) {
            let mut model = PositionProbabilityModel::new();
            for (x, y) in &launches {
                model.record(Position::new(*x, *y));
            }

            let counted: u32 = launches
                .iter()
                .map(|(x, y)| Position::new(*x, *y))
                .collect::<FnvHashSet<_>>()
                .into_iter()
                .map(|p| model.count(p))
                .sum();
            prop_assert_eq!(counted, model.total());
            prop_assert!((model.distribution().total_mass() - 1.0).abs() < 1e-9);
        }
    }
}
