//! Individuals and the random source shared by every stochastic operator.
//!
//! An [`Individual`] is a fixed-length vector of real genes plus a
//! [`Fitness`] record. Fitness is either unset or holds the score computed
//! for the current genes. Mutable gene access always goes through
//! [`Individual::genes_mut`], which invalidates unconditionally, or
//! [`Individual::modify_genes`], which invalidates when the edit reports a
//! change.

use rand::prelude::*;
use rand::seq::index;
use serde::{Deserialize, Serialize};

/// Fitness record of an individual. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Fitness {
    /// Must be recomputed before it can be trusted.
    #[default]
    Invalid,
    /// Score computed for the current genes.
    Valid(f64),
}

impl Fitness {
    /// Whether the score matches the current genes.
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Fitness::Valid(_))
    }

    /// The score, if valid.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            Fitness::Valid(v) => Some(*v),
            Fitness::Invalid => None,
        }
    }
}

/// One candidate solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    genes: Vec<f64>,
    fitness: Fitness,
}

impl Individual {
    /// Create an unevaluated individual from explicit genes.
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: Fitness::Invalid,
        }
    }

    /// Create an individual of `length` genes drawn uniformly from [0, 1).
    pub fn random(length: usize, rng: &mut RandomSource) -> Self {
        let genes = (0..length).map(|_| rng.uniform()).collect();
        Self::new(genes)
    }

    #[inline]
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Mutable gene access. The fitness is invalidated up front.
    #[inline]
    pub fn genes_mut(&mut self) -> &mut [f64] {
        self.fitness = Fitness::Invalid;
        &mut self.genes
    }

    /// Edit the genes in place. `edit` returns whether any value changed;
    /// only then is the fitness invalidated.
    pub fn modify_genes<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut [f64]) -> bool,
    {
        let changed = edit(&mut self.genes);
        if changed {
            self.fitness = Fitness::Invalid;
        }
        changed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    #[inline]
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    /// Mark the fitness as stale.
    #[inline]
    pub fn invalidate(&mut self) {
        self.fitness = Fitness::Invalid;
    }

    /// Record a freshly computed score. Only the evaluation phase calls this.
    #[inline]
    pub(crate) fn assign_fitness(&mut self, value: f64) {
        self.fitness = Fitness::Valid(value);
    }
}

/// Random number generator wrapper for every stochastic operator.
///
/// Owned by the engine and passed by `&mut` so that a fixed seed replays a
/// run draw for draw.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform float in [0, 1).
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Gaussian sample with the given mean and standard deviation.
    #[inline]
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let noise: f64 = self.rng.sample(rand_distr::StandardNormal);
        mean + noise * std_dev
    }

    /// Uniform index in [0, n). `n` must be non-zero.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Two distinct indices in [0, n), drawn without replacement and returned
    /// in ascending order. `n` must be at least 2.
    pub fn distinct_pair(&mut self, n: usize) -> (usize, usize) {
        let picked = index::sample(&mut self.rng, n, 2);
        let (a, b) = (picked.index(0), picked.index(1));
        if a < b { (a, b) } else { (b, a) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_random_individual() {
        let mut rng = RandomSource::new(42);
        let ind = Individual::random(10, &mut rng);

        assert_eq!(ind.len(), 10);
        assert!(!ind.fitness().is_valid());
        assert!(ind.genes().iter().all(|&g| (0.0..1.0).contains(&g)));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut parent = Individual::new(vec![1.0, 2.0, 3.0]);
        parent.assign_fitness(6.0);

        let mut child = parent.clone();
        assert_eq!(child.fitness(), Fitness::Valid(6.0));

        child.genes_mut()[0] = 10.0;

        assert_eq!(parent.genes(), &[1.0, 2.0, 3.0]);
        assert_eq!(parent.fitness(), Fitness::Valid(6.0));
        assert_eq!(child.fitness(), Fitness::Invalid);
    }

    #[test]
    fn test_modify_genes_invalidates_on_change_only() {
        let mut ind = Individual::new(vec![1.0, 2.0]);
        ind.assign_fitness(3.0);

        assert!(!ind.modify_genes(|_| false));
        assert!(ind.fitness().is_valid());

        assert!(ind.modify_genes(|genes| {
            genes[1] = 5.0;
            true
        }));
        assert_eq!(ind.genes(), &[1.0, 5.0]);
        assert!(!ind.fitness().is_valid());
    }

    #[test]
    fn test_fitness_value() {
        assert_eq!(Fitness::Valid(1.5).value(), Some(1.5));
        assert_eq!(Fitness::Invalid.value(), None);
        assert_eq!(Fitness::default(), Fitness::Invalid);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = RandomSource::new(7);
        let mut b = RandomSource::new(7);

        for _ in 0..100 {
            assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
            assert_eq!(a.gaussian(0.0, 1.0).to_bits(), b.gaussian(0.0, 1.0).to_bits());
        }
    }

    #[test]
    fn test_gaussian_zero_std_dev_is_mean() {
        let mut rng = RandomSource::new(1);
        for _ in 0..10 {
            assert_eq!(rng.gaussian(3.0, 0.0), 3.0);
        }
    }

    proptest! {
        #[test]
        fn prop_distinct_pair_ordered(seed in any::<u64>(), n in 2usize..64) {
            let mut rng = RandomSource::new(seed);
            let (a, b) = rng.distinct_pair(n);
            prop_assert!(a < b);
            prop_assert!(b < n);
        }

        #[test]
        fn prop_uniform_in_unit_interval(seed in any::<u64>()) {
            let mut rng = RandomSource::new(seed);
            for _ in 0..32 {
                let x = rng.uniform();
                prop_assert!((0.0..1.0).contains(&x));
            }
        }
    }
}
