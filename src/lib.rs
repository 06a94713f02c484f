//! Simple EA - Generational evolutionary optimization over real-valued genes.
//!
//! This crate evolves a fixed-size population of real-valued individuals
//! toward lower fitness with tournament selection, two-point crossover and
//! Gaussian mutation. Fitness is cached per individual and only recomputed
//! for individuals whose genes changed.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Run configuration and reporting types
//! - `compute`: Individuals, variation and selection operators, the engine
//!
//! # Example
//!
//! ```rust,no_run
//! use simple_ea::{
//!     compute::{EvolutionEngine, SumOfGenes},
//!     schema::{EvolutionConfig, PopulationConfig},
//! };
//!
//! // Create configuration
//! let config = EvolutionConfig {
//!     population: PopulationConfig {
//!         size: 100,
//!         generations: 40,
//!     },
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! // Create the engine and run
//! let mut engine = EvolutionEngine::new(config, SumOfGenes)?;
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {:.3}",
//!         progress.generation, progress.stats.best);
//! })?;
//!
//! println!("Best individual: {:?}", result.hall_of_fame.best());
//! # Ok::<(), simple_ea::compute::EvolutionError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{
    EvolutionEngine, EvolutionError, EvolutionResult, FitnessEvaluator, Individual, Population,
};
pub use schema::{EvolutionConfig, EvolutionProgress};
