//! Fixed-size ordered collection of individuals.

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::GenerationStats;

use super::error::EvolutionError;
use super::fitness::{FitnessEvaluator, evaluate_checked};
use super::genome::{Individual, RandomSource};

/// An ordered population of individuals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Create `size` random individuals of `genome_length` genes each.
    pub fn random(size: usize, genome_length: usize, rng: &mut RandomSource) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(genome_length, rng))
            .collect();
        Self { individuals }
    }

    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    #[inline]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[inline]
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    /// Number of individuals whose fitness must be recomputed.
    pub fn invalid_count(&self) -> usize {
        self.individuals
            .iter()
            .filter(|ind| !ind.fitness().is_valid())
            .count()
    }

    /// Whether every individual carries a valid fitness.
    pub fn all_valid(&self) -> bool {
        self.individuals.iter().all(|ind| ind.fitness().is_valid())
    }

    /// Evaluate every individual with invalid fitness, in order.
    ///
    /// Returns the number of evaluations performed. The first failure aborts
    /// the pass; a NaN score counts as a failure.
    pub fn evaluate_invalid<E: FitnessEvaluator + ?Sized>(
        &mut self,
        evaluator: &E,
    ) -> Result<usize, EvolutionError> {
        let mut evaluations = 0;
        for (index, ind) in self.individuals.iter_mut().enumerate() {
            if ind.fitness().is_valid() {
                continue;
            }
            let value = evaluate_checked(evaluator, ind.genes())
                .map_err(|source| EvolutionError::EvaluationFailure { index, source })?;
            ind.assign_fitness(value);
            evaluations += 1;
        }
        Ok(evaluations)
    }

    /// Parallel variant of [`Population::evaluate_invalid`].
    ///
    /// Consumes no random draws, so the outcome matches the sequential pass.
    /// When several individuals fail, the lowest index is reported.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn par_evaluate_invalid<E: FitnessEvaluator + ?Sized>(
        &mut self,
        evaluator: &E,
    ) -> Result<usize, EvolutionError> {
        let results: Vec<Option<Result<(), EvolutionError>>> = self
            .individuals
            .par_iter_mut()
            .enumerate()
            .map(|(index, ind)| {
                if ind.fitness().is_valid() {
                    return None;
                }
                Some(
                    evaluate_checked(evaluator, ind.genes())
                        .map(|value| ind.assign_fitness(value))
                        .map_err(|source| EvolutionError::EvaluationFailure { index, source }),
                )
            })
            .collect();

        let mut evaluations = 0;
        for result in results.into_iter().flatten() {
            result?;
            evaluations += 1;
        }
        Ok(evaluations)
    }

    /// Sequential fallback on targets without threads.
    #[cfg(target_arch = "wasm32")]
    pub fn par_evaluate_invalid<E: FitnessEvaluator + ?Sized>(
        &mut self,
        evaluator: &E,
    ) -> Result<usize, EvolutionError> {
        self.evaluate_invalid(evaluator)
    }

    /// Individual with the lowest valid fitness. Ties go to the earliest.
    pub fn best(&self) -> Option<&Individual> {
        let mut best: Option<(&Individual, f64)> = None;
        for ind in &self.individuals {
            if let Some(value) = ind.fitness().value()
                && best.is_none_or(|(_, b)| value < b)
            {
                best = Some((ind, value));
            }
        }
        best.map(|(ind, _)| ind)
    }

    /// Summary statistics over the valid fitness values.
    pub fn stats(&self, evaluations: usize) -> Option<GenerationStats> {
        let values: Vec<f64> = self
            .individuals
            .iter()
            .filter_map(|ind| ind.fitness().value())
            .collect();
        GenerationStats::from_values(&values, evaluations)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
