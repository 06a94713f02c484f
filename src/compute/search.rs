//! The generational evolution loop.

use std::time::Instant;

use log::{debug, info, warn};

use crate::schema::{
    ConfigError, EvolutionConfig, EvolutionHistory, EvolutionPhase, EvolutionProgress,
    EvolutionStats,
};

use super::archive::HallOfFame;
use super::error::EvolutionError;
use super::fitness::FitnessEvaluator;
use super::genome::RandomSource;
use super::population::Population;
use super::selection::{SelectionStrategy, Tournament};
use super::variation::{Crossover, GaussianMutation, Mutation, TwoPointCrossover};

/// Final result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Final population, every individual evaluated.
    pub population: Population,
    /// Best individuals seen during the run.
    pub hall_of_fame: HallOfFame,
    /// Per-generation statistics.
    pub history: EvolutionHistory,
    /// Run summary.
    pub stats: EvolutionStats,
}

/// Bookkeeping shared by the loop iterations of one run.
struct RunRecord {
    hall_of_fame: HallOfFame,
    history: EvolutionHistory,
    best_fitness: f64,
}

/// Evolution engine that runs the generational loop.
///
/// Every run goes through the same cycle: select a full offspring pool,
/// clone it, cross adjacent pairs and mutate, re-evaluate the individuals
/// whose fitness was invalidated, then replace the population wholesale.
pub struct EvolutionEngine<E: FitnessEvaluator> {
    config: EvolutionConfig,
    seed: u64,
    rng: RandomSource,
    evaluator: E,
    selection: Box<dyn SelectionStrategy>,
    crossover: Box<dyn Crossover>,
    mutation: Box<dyn Mutation>,
    phase: EvolutionPhase,
}

impl<E: FitnessEvaluator> EvolutionEngine<E> {
    /// Create a new evolution engine. Fails fast on an invalid configuration.
    pub fn new(config: EvolutionConfig, evaluator: E) -> Result<Self, EvolutionError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(|| {
            let seed = rand::random();
            warn!("No random seed configured, using {seed}");
            seed
        });
        let rng = RandomSource::new(seed);
        let selection = Box::new(Tournament::new(config.algorithm.tournament_size));
        let mutation = Box::new(GaussianMutation::from(&config.algorithm.mutation));

        Ok(Self {
            config,
            seed,
            rng,
            evaluator,
            selection,
            crossover: Box::new(TwoPointCrossover),
            mutation,
            phase: EvolutionPhase::Initializing,
        })
    }

    /// Replace the selection strategy.
    pub fn with_selection(mut self, selection: impl SelectionStrategy + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Replace the crossover operator.
    pub fn with_crossover(mut self, crossover: impl Crossover + 'static) -> Self {
        self.crossover = Box::new(crossover);
        self
    }

    /// Replace the mutation operator.
    pub fn with_mutation(mut self, mutation: impl Mutation + 'static) -> Self {
        self.mutation = Box::new(mutation);
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Seed the random source was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    /// Build a fresh, unevaluated population.
    pub fn initialize(&mut self) -> Population {
        self.phase = EvolutionPhase::Initializing;
        Population::random(
            self.config.population.size,
            self.config.genome_length,
            &mut self.rng,
        )
    }

    /// Evaluate every individual with invalid fitness.
    fn evaluate(&self, population: &mut Population) -> Result<usize, EvolutionError> {
        if self.config.parallel_evaluation {
            population.par_evaluate_invalid(&self.evaluator)
        } else {
            population.evaluate_invalid(&self.evaluator)
        }
    }

    /// Produce the next generation from a fully evaluated population.
    ///
    /// Returns the offspring and the number of evaluations it took.
    pub fn step(&mut self, population: &Population) -> Result<(Population, usize), EvolutionError> {
        self.phase = EvolutionPhase::Selecting;
        let chosen = self
            .selection
            .select(population, population.len(), &mut self.rng)?;

        // Selected entries may repeat; each slot gets its own copy
        let mut offspring = Population::from_individuals(chosen.into_iter().cloned().collect());

        self.phase = EvolutionPhase::Varying;
        let (crossed, mutated) = self.vary(&mut offspring);

        self.phase = EvolutionPhase::ReEvaluating;
        let evaluations = self.evaluate(&mut offspring)?;
        debug!("{crossed} crossovers, {mutated} mutations, {evaluations} evaluations");

        Ok((offspring, evaluations))
    }

    /// Cross adjacent pairs (0,1), (2,3), ... then mutate each individual.
    ///
    /// An odd trailing individual never takes part in crossover. Returns the
    /// number of pairs crossed and individuals mutated.
    fn vary(&mut self, offspring: &mut Population) -> (usize, usize) {
        let crossover_rate = self.config.algorithm.crossover_rate;
        let mutation_rate = self.config.algorithm.mutation_rate;
        let individuals = offspring.individuals_mut();

        let mut crossed = 0;
        for pair in individuals.chunks_exact_mut(2) {
            if self.rng.uniform() < crossover_rate {
                let (first, second) = pair.split_at_mut(1);
                if self
                    .crossover
                    .crossover(&mut first[0], &mut second[0], &mut self.rng)
                {
                    crossed += 1;
                }
            }
        }

        let mut mutated = 0;
        for individual in individuals.iter_mut() {
            if self.rng.uniform() < mutation_rate
                && self.mutation.mutate(individual, &mut self.rng)
            {
                mutated += 1;
            }
        }

        (crossed, mutated)
    }

    /// Update run bookkeeping and notify the observer.
    fn record<F>(
        &self,
        generation: usize,
        population: &Population,
        evaluations: usize,
        record: &mut RunRecord,
        callback: &mut F,
    ) where
        F: FnMut(&EvolutionProgress),
    {
        record.hall_of_fame.update(population);

        let Some(stats) = population.stats(evaluations) else {
            return;
        };
        record.best_fitness = record.best_fitness.min(stats.best);
        record.history.push(stats);

        info!(
            "gen {generation:>4}  nevals {:>5}  best {:.6}  mean {:.6}  worst {:.6}  std {:.6}",
            stats.evaluations, stats.best, stats.mean, stats.worst, stats.std_dev
        );

        callback(&EvolutionProgress {
            generation,
            total_generations: self.config.population.generations,
            phase: self.phase,
            population_size: population.len(),
            stats,
            best_fitness: record.best_fitness,
        });
    }

    /// Run evolution from a caller-supplied initial population.
    ///
    /// The population must match the configured size and genome length.
    /// Individuals that already carry a valid fitness are not re-evaluated.
    pub fn run_from<F>(
        &mut self,
        mut population: Population,
        mut callback: F,
    ) -> Result<EvolutionResult, EvolutionError>
    where
        F: FnMut(&EvolutionProgress),
    {
        self.check_population(&population)?;

        let start_time = Instant::now();
        let generations = self.config.population.generations;
        info!(
            "Evolving {} individuals of {} genes for {} generations (seed {})",
            population.len(),
            self.config.genome_length,
            generations,
            self.seed
        );

        let mut record = RunRecord {
            hall_of_fame: HallOfFame::new(self.config.hall_of_fame_size),
            history: EvolutionHistory::default(),
            best_fitness: f64::INFINITY,
        };

        // Evaluate initial population
        self.phase = EvolutionPhase::Evaluating;
        let evaluations = self.evaluate(&mut population)?;
        self.record(0, &population, evaluations, &mut record, &mut callback);

        // Evolution loop
        for generation in 1..=generations {
            let (offspring, evaluations) = self.step(&population)?;

            self.phase = EvolutionPhase::Replacing;
            population = offspring;
            self.record(generation, &population, evaluations, &mut record, &mut callback);
        }

        self.phase = EvolutionPhase::Done;
        debug_assert!(population.all_valid());

        Ok(self.finish(population, record, start_time))
    }

    /// Run evolution with progress callback.
    pub fn run_with_callback<F>(&mut self, callback: F) -> Result<EvolutionResult, EvolutionError>
    where
        F: FnMut(&EvolutionProgress),
    {
        let population = self.initialize();
        self.run_from(population, callback)
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> Result<EvolutionResult, EvolutionError> {
        self.run_with_callback(|_| {})
    }

    fn check_population(&self, population: &Population) -> Result<(), ConfigError> {
        let expected = self.config.population.size;
        if population.len() != expected {
            return Err(ConfigError::PopulationSizeMismatch {
                expected,
                actual: population.len(),
            });
        }

        let genome_length = self.config.genome_length;
        if let Some((index, ind)) = population
            .iter()
            .enumerate()
            .find(|(_, ind)| ind.len() != genome_length)
        {
            return Err(ConfigError::GenomeLengthMismatch {
                index,
                expected: genome_length,
                actual: ind.len(),
            });
        }

        Ok(())
    }

    fn finish(
        &self,
        population: Population,
        record: RunRecord,
        start_time: Instant,
    ) -> EvolutionResult {
        let elapsed = start_time.elapsed().as_secs_f64();
        let final_mean_fitness = record.history.last().map(|s| s.mean).unwrap_or(f64::NAN);

        EvolutionResult {
            stats: EvolutionStats {
                generations: self.config.population.generations,
                total_evaluations: record.history.total_evaluations(),
                best_fitness: record.best_fitness,
                final_mean_fitness,
                elapsed_seconds: elapsed,
                random_seed: self.seed,
            },
            population,
            hall_of_fame: record.hall_of_fame,
            history: record.history,
        }
    }
}
