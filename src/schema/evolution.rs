//! Progress, statistics and result types reported by an evolution run.

use serde::{Deserialize, Serialize};

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Lowest fitness.
    pub best: f64,
    /// Mean fitness.
    pub mean: f64,
    /// Highest fitness.
    pub worst: f64,
    /// Population standard deviation of fitness.
    pub std_dev: f64,
    /// Evaluations performed to produce this generation.
    pub evaluations: usize,
}

impl GenerationStats {
    /// Summarize a set of fitness values. `None` when empty.
    pub fn from_values(values: &[f64], evaluations: usize) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let best = values.iter().copied().fold(f64::INFINITY, f64::min);
        let worst = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            best,
            mean,
            worst,
            std_dev: variance.sqrt(),
            evaluations,
        })
    }
}

/// Per-generation statistics for a whole run. Index 0 is the initial
/// evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionHistory {
    pub generations: Vec<GenerationStats>,
}

impl EvolutionHistory {
    pub fn push(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn last(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    /// Best fitness per generation, for plotting.
    pub fn best_fitness(&self) -> Vec<f64> {
        self.generations.iter().map(|s| s.best).collect()
    }

    /// Total evaluations across the run.
    pub fn total_evaluations(&self) -> u64 {
        self.generations.iter().map(|s| s.evaluations as u64).sum()
    }
}

/// Phase of the generational loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EvolutionPhase {
    /// Building the initial population.
    #[default]
    Initializing,
    /// First evaluation of the initial population.
    Evaluating,
    /// Tournament selection of the offspring pool.
    Selecting,
    /// Crossover and mutation of the cloned offspring.
    Varying,
    /// Evaluating offspring whose fitness was invalidated.
    ReEvaluating,
    /// Offspring replacing the population.
    Replacing,
    /// Run complete.
    Done,
}

/// Snapshot handed to the progress observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Completed generations (0 after the initial evaluation).
    pub generation: usize,
    /// Configured number of generations.
    pub total_generations: usize,
    /// Current phase.
    pub phase: EvolutionPhase,
    /// Population size.
    pub population_size: usize,
    /// Statistics of the current population.
    pub stats: GenerationStats,
    /// Best fitness seen so far in the run.
    pub best_fitness: f64,
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Generations run.
    pub generations: usize,
    /// Total fitness evaluations performed.
    pub total_evaluations: u64,
    /// Best fitness seen in the run.
    pub best_fitness: f64,
    /// Mean fitness of the final population.
    pub final_mean_fitness: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Seed the random source was created from.
    pub random_seed: u64,
}
