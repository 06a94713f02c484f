//! Run configuration for the generational algorithm.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level configuration for an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Number of genes per individual.
    #[serde(default = "default_genome_length")]
    pub genome_length: usize,
    /// Population and generation settings.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Variation and selection parameters.
    #[serde(default)]
    pub algorithm: GeneticAlgorithmConfig,
    /// Number of best individuals kept across the run (0 disables).
    #[serde(default = "default_hall_of_fame_size")]
    pub hall_of_fame_size: usize,
    /// Evaluate invalid individuals on the rayon thread pool.
    #[serde(default)]
    pub parallel_evaluation: bool,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            genome_length: default_genome_length(),
            population: PopulationConfig::default(),
            algorithm: GeneticAlgorithmConfig::default(),
            hall_of_fame_size: default_hall_of_fame_size(),
            parallel_evaluation: false,
            random_seed: None,
        }
    }
}

fn default_genome_length() -> usize {
    10
}
fn default_hall_of_fame_size() -> usize {
    1
}

/// Population and generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals in population.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Number of generations to run. Zero only evaluates the initial
    /// population.
    #[serde(default = "default_generations")]
    pub generations: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            generations: default_generations(),
        }
    }
}

fn default_population_size() -> usize {
    50
}
fn default_generations() -> usize {
    20
}

/// Genetic algorithm parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticAlgorithmConfig {
    /// Probability that an adjacent pair is crossed over (0.0-1.0).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Probability that an individual is mutated (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Contestants per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Gaussian mutation parameters.
    #[serde(default)]
    pub mutation: GaussianMutationConfig,
}

impl Default for GeneticAlgorithmConfig {
    fn default() -> Self {
        Self {
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            tournament_size: default_tournament_size(),
            mutation: GaussianMutationConfig::default(),
        }
    }
}

fn default_crossover_rate() -> f64 {
    0.6
}
fn default_mutation_rate() -> f64 {
    0.001
}
fn default_tournament_size() -> usize {
    3
}

/// Gaussian mutation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianMutationConfig {
    /// Mean of the added noise.
    #[serde(default)]
    pub mean: f64,
    /// Standard deviation of the added noise.
    #[serde(default = "default_std_dev")]
    pub std_dev: f64,
    /// Probability that each gene is perturbed (0.0-1.0).
    #[serde(default = "default_gene_rate")]
    pub gene_rate: f64,
}

impl Default for GaussianMutationConfig {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: default_std_dev(),
            gene_rate: default_gene_rate(),
        }
    }
}

fn default_std_dev() -> f64 {
    1.0
}
fn default_gene_rate() -> f64 {
    0.1
}

impl EvolutionConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Pretty-printed JSON representation.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.genome_length == 0 {
            return Err(ConfigError::InvalidGenomeLength);
        }
        if self.population.size == 0 {
            return Err(ConfigError::PopulationTooSmall);
        }

        let check_probability = |value: f64, name: &'static str| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::InvalidProbability { name, value })
            }
        };

        check_probability(self.algorithm.crossover_rate, "crossover_rate")?;
        check_probability(self.algorithm.mutation_rate, "mutation_rate")?;
        check_probability(self.algorithm.mutation.gene_rate, "gene_rate")?;

        let tournament = self.algorithm.tournament_size;
        if tournament == 0 || tournament > self.population.size {
            return Err(ConfigError::InvalidTournamentSize {
                size: tournament,
                population: self.population.size,
            });
        }

        let mutation = &self.algorithm.mutation;
        if !mutation.mean.is_finite() || !mutation.std_dev.is_finite() || mutation.std_dev < 0.0 {
            return Err(ConfigError::InvalidMutationParameters {
                mean: mutation.mean,
                std_dev: mutation.std_dev,
            });
        }

        Ok(())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Genome length must be non-zero")]
    InvalidGenomeLength,
    #[error("Population size must be non-zero")]
    PopulationTooSmall,
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Tournament size {size} must be between 1 and the population size {population}")]
    InvalidTournamentSize { size: usize, population: usize },
    #[error("Mutation noise needs a finite mean and a finite non-negative std_dev, got mean {mean}, std_dev {std_dev}")]
    InvalidMutationParameters { mean: f64, std_dev: f64 },
    #[error("Initial population has {actual} individuals, expected {expected}")]
    PopulationSizeMismatch { expected: usize, actual: usize },
    #[error("Individual {index} has {actual} genes, expected {expected}")]
    GenomeLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.genome_length, 10);
        assert_eq!(config.algorithm.tournament_size, 3);
    }

    #[test]
    fn test_rejects_zero_sizes() {
        let mut config = EvolutionConfig::default();
        config.genome_length = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGenomeLength)));

        let mut config = EvolutionConfig::default();
        config.population.size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::PopulationTooSmall)));
    }

    #[test]
    fn test_zero_generations_allowed() {
        let mut config = EvolutionConfig::default();
        config.population.generations = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_probabilities() {
        let mut config = EvolutionConfig::default();
        config.algorithm.crossover_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "crossover_rate",
                ..
            })
        ));

        let mut config = EvolutionConfig::default();
        config.algorithm.mutation_rate = -0.1;
        assert!(config.validate().is_err());

        let mut config = EvolutionConfig::default();
        config.algorithm.mutation.gene_rate = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_tournament_size() {
        let mut config = EvolutionConfig::default();
        config.algorithm.tournament_size = 0;
        assert!(config.validate().is_err());

        config.algorithm.tournament_size = config.population.size + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTournamentSize { .. })
        ));

        config.algorithm.tournament_size = config.population.size;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_mutation_noise() {
        let mut config = EvolutionConfig::default();
        config.algorithm.mutation.std_dev = -1.0;
        assert!(config.validate().is_err());

        config.algorithm.mutation.std_dev = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = EvolutionConfig {
            random_seed: Some(7),
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        let parsed = EvolutionConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed = EvolutionConfig::from_json_str(
            r#"{ "population": { "size": 8 }, "algorithm": { "tournament_size": 2 } }"#,
        )
        .unwrap();

        assert_eq!(parsed.population.size, 8);
        assert_eq!(parsed.population.generations, 20);
        assert_eq!(parsed.algorithm.tournament_size, 2);
        assert_eq!(parsed.algorithm.crossover_rate, 0.6);
        assert_eq!(parsed.algorithm.mutation.std_dev, 1.0);
        assert_eq!(parsed.random_seed, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "genome_length": 4, "random_seed": 11 }}"#).unwrap();

        let config = EvolutionConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.genome_length, 4);
        assert_eq!(config.random_seed, Some(11));
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            EvolutionConfig::from_json_file("/nonexistent/config.json"),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(
            EvolutionConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
