//! Errors raised while running an evolution.

use crate::schema::ConfigError;

use super::fitness::EvaluationError;

/// Evolution run errors.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Fitness evaluation failed for individual {index}: {source}")]
    EvaluationFailure {
        index: usize,
        #[source]
        source: EvaluationError,
    },
    #[error("Selection requires evaluated individuals, individual {index} has invalid fitness")]
    SelectionPrecondition { index: usize },
    #[error("Cannot select from an empty population")]
    EmptyPopulation,
}
