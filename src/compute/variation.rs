//! Variation operators: two-point crossover and Gaussian mutation.

use crate::schema::GaussianMutationConfig;

use super::genome::{Individual, RandomSource};

/// Recombines two individuals in place.
pub trait Crossover {
    /// Returns whether any genes were exchanged. Implementations invalidate
    /// the fitness of both individuals when they were.
    fn crossover(&self, a: &mut Individual, b: &mut Individual, rng: &mut RandomSource) -> bool;
}

/// Perturbs a single individual in place.
pub trait Mutation {
    /// Returns whether any gene value changed. Implementations invalidate the
    /// fitness exactly when it did.
    fn mutate(&self, individual: &mut Individual, rng: &mut RandomSource) -> bool;
}

/// Two-point crossover.
///
/// Two distinct cut points `p1 < p2` are drawn without replacement from
/// `0..=N` and the half-open range `[p1, p2)` is swapped. With fewer than two
/// genes there is no valid pair of points and the call is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPointCrossover;

impl Crossover for TwoPointCrossover {
    fn crossover(&self, a: &mut Individual, b: &mut Individual, rng: &mut RandomSource) -> bool {
        cx_two_point(a, b, rng)
    }
}

/// Swap a random gene range between `a` and `b`.
///
/// Only the common prefix is considered when lengths differ.
pub fn cx_two_point(a: &mut Individual, b: &mut Individual, rng: &mut RandomSource) -> bool {
    let size = a.len().min(b.len());
    if size < 2 {
        return false;
    }

    // Both records are invalidated by taking mutable access
    let (p1, p2) = rng.distinct_pair(size + 1);
    a.genes_mut()[p1..p2].swap_with_slice(&mut b.genes_mut()[p1..p2]);
    true
}

/// Gaussian mutation without clamping.
#[derive(Debug, Clone, Copy)]
pub struct GaussianMutation {
    /// Mean of the added noise.
    pub mean: f64,
    /// Standard deviation of the added noise.
    pub std_dev: f64,
    /// Probability that each gene is perturbed.
    pub gene_rate: f64,
}

impl From<&GaussianMutationConfig> for GaussianMutation {
    fn from(config: &GaussianMutationConfig) -> Self {
        Self {
            mean: config.mean,
            std_dev: config.std_dev,
            gene_rate: config.gene_rate,
        }
    }
}

impl Mutation for GaussianMutation {
    fn mutate(&self, individual: &mut Individual, rng: &mut RandomSource) -> bool {
        mut_gaussian(individual, self.mean, self.std_dev, self.gene_rate, rng)
    }
}

/// Add Gaussian noise to each gene independently with probability
/// `gene_rate`.
pub fn mut_gaussian(
    individual: &mut Individual,
    mean: f64,
    std_dev: f64,
    gene_rate: f64,
    rng: &mut RandomSource,
) -> bool {
    individual.modify_genes(|genes| {
        let mut changed = false;
        for gene in genes {
            if rng.uniform() < gene_rate {
                let mutated = *gene + rng.gaussian(mean, std_dev);
                changed |= mutated != *gene;
                *gene = mutated;
            }
        }
        changed
    })
}
