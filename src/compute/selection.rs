//! Selection strategies.

use super::error::EvolutionError;
use super::genome::{Individual, RandomSource};
use super::population::Population;

/// Picks `k` individuals out of a fully evaluated population.
///
/// The returned references borrow from `population`; the engine clones them
/// before applying any variation.
pub trait SelectionStrategy {
    fn select<'a>(
        &self,
        population: &'a Population,
        k: usize,
        rng: &mut RandomSource,
    ) -> Result<Vec<&'a Individual>, EvolutionError>;
}

/// Tournament selection for minimization.
///
/// Each output slot is the best of `size` individuals drawn uniformly with
/// replacement. Ties go to the contestant drawn first.
///
/// When `size` is at least the population length the tournament is defined
/// to cover the whole population instead of sampling it: every slot gets the
/// earliest individual with the lowest fitness and no random draws are made.
/// A full tournament therefore always returns the population minimum.
#[derive(Debug, Clone, Copy)]
pub struct Tournament {
    pub size: usize,
}

impl Tournament {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl SelectionStrategy for Tournament {
    fn select<'a>(
        &self,
        population: &'a Population,
        k: usize,
        rng: &mut RandomSource,
    ) -> Result<Vec<&'a Individual>, EvolutionError> {
        let individuals = population.individuals();
        let fitness: Vec<f64> = individuals
            .iter()
            .enumerate()
            .map(|(index, ind)| {
                ind.fitness()
                    .value()
                    .ok_or(EvolutionError::SelectionPrecondition { index })
            })
            .collect::<Result<_, _>>()?;

        if k == 0 {
            return Ok(Vec::new());
        }
        if individuals.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }

        let rounds = self.size.max(1);
        if rounds >= individuals.len() {
            let best_idx = (1..individuals.len()).fold(0, |best, idx| {
                if fitness[idx] < fitness[best] { idx } else { best }
            });
            return Ok(vec![&individuals[best_idx]; k]);
        }

        let mut chosen = Vec::with_capacity(k);
        for _ in 0..k {
            let mut best_idx = rng.index(individuals.len());
            for _ in 1..rounds {
                let idx = rng.index(individuals.len());
                if fitness[idx] < fitness[best_idx] {
                    best_idx = idx;
                }
            }
            chosen.push(&individuals[best_idx]);
        }
        Ok(chosen)
    }
}
