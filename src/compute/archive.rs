//! Hall of fame: the best individuals seen over a whole run.

use serde::{Deserialize, Serialize};

use super::genome::Individual;
use super::population::Population;

/// Bounded archive of the best evaluated individuals, best first.
///
/// Entries are independent clones, so later variation of the population
/// never reaches them. Individuals with identical genes are stored once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HallOfFame {
    /// Stored individuals in ascending fitness order.
    entries: Vec<Individual>,
    /// Maximum number of entries.
    capacity: usize,
}

impl HallOfFame {
    /// Create an empty archive. A capacity of 0 stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Offer every evaluated individual of `population` to the archive.
    pub fn update(&mut self, population: &Population) {
        for ind in population {
            self.insert(ind);
        }
    }

    /// Offer a single individual. Returns whether it was stored.
    pub fn insert(&mut self, candidate: &Individual) -> bool {
        let Some(value) = candidate.fitness().value() else {
            return false;
        };
        if self.capacity == 0 {
            return false;
        }

        if self.entries.len() >= self.capacity {
            let worst = self.worst_value().unwrap_or(f64::INFINITY);
            if value >= worst {
                return false;
            }
        }

        if self.entries.iter().any(|e| e.genes() == candidate.genes()) {
            return false;
        }

        // Insert after any entry with equal fitness to keep arrival order
        let pos = self
            .entries
            .partition_point(|e| e.fitness().value().is_some_and(|f| f <= value));
        self.entries.insert(pos, candidate.clone());
        self.entries.truncate(self.capacity);
        true
    }

    /// Best individual ever offered.
    pub fn best(&self) -> Option<&Individual> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn worst_value(&self) -> Option<f64> {
        self.entries.last().and_then(|e| e.fitness().value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::fitness::SumOfGenes;

    fn evaluated(genes: &[f64]) -> Population {
        let mut pop = Population::from_individuals(
            genes.iter().map(|&g| Individual::new(vec![g, g])).collect(),
        );
        pop.evaluate_invalid(&SumOfGenes).unwrap();
        pop
    }

    fn fitnesses(hof: &HallOfFame) -> Vec<f64> {
        hof.iter().filter_map(|i| i.fitness().value()).collect()
    }

    #[test]
    fn test_keeps_best_in_order() {
        let mut hof = HallOfFame::new(3);
        hof.update(&evaluated(&[3.0, 1.0, 4.0, 1.5, 5.0]));

        assert_eq!(hof.len(), 3);
        assert_eq!(fitnesses(&hof), vec![2.0, 3.0, 6.0]);
        assert_eq!(hof.best().unwrap().genes(), &[1.0, 1.0]);
    }

    #[test]
    fn test_worse_candidates_rejected_when_full() {
        let mut hof = HallOfFame::new(2);
        hof.update(&evaluated(&[1.0, 2.0]));
        hof.update(&evaluated(&[3.0, 4.0]));
        assert_eq!(fitnesses(&hof), vec![2.0, 4.0]);

        hof.update(&evaluated(&[0.5]));
        assert_eq!(fitnesses(&hof), vec![1.0, 2.0]);
    }

    #[test]
    fn test_duplicates_stored_once() {
        let mut hof = HallOfFame::new(5);
        hof.update(&evaluated(&[1.0, 1.0, 1.0]));
        assert_eq!(hof.len(), 1);
    }

    #[test]
    fn test_invalid_and_zero_capacity() {
        let mut hof = HallOfFame::new(0);
        hof.update(&evaluated(&[1.0]));
        assert!(hof.is_empty());

        let mut hof = HallOfFame::new(2);
        assert!(!hof.insert(&Individual::new(vec![0.0])));
        assert!(hof.is_empty());
    }

    #[test]
    fn test_huge_capacity_grows_on_demand() {
        let mut hof = HallOfFame::new(usize::MAX / 64);
        hof.update(&evaluated(&[2.0, 1.0]));

        assert_eq!(hof.capacity(), usize::MAX / 64);
        assert_eq!(fitnesses(&hof), vec![2.0, 4.0]);
    }

    #[test]
    fn test_entries_are_independent() {
        let mut pop = evaluated(&[1.0]);
        let mut hof = HallOfFame::new(1);
        hof.update(&pop);

        pop.individuals_mut()[0].genes_mut()[0] = 99.0;

        assert_eq!(hof.best().unwrap().genes(), &[1.0, 1.0]);
        assert_eq!(hof.best().unwrap().fitness().value(), Some(2.0));
    }
}
