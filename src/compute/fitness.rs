//! Fitness evaluation.
//!
//! The scoring function is injected by the caller. Anything implementing
//! [`FitnessEvaluator`] can be plugged into the engine, including plain
//! closures of the form `Fn(&[f64]) -> Result<f64, EvaluationError>`.

/// Error returned by a fitness function for a given gene vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EvaluationError {
    message: String,
}

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Scores a gene vector. Lower is better.
///
/// Must be deterministic for identical genes. `Sync` so that evaluation can be
/// spread over worker threads.
pub trait FitnessEvaluator: Sync {
    fn evaluate(&self, genes: &[f64]) -> Result<f64, EvaluationError>;
}

impl<F> FitnessEvaluator for F
where
    F: Fn(&[f64]) -> Result<f64, EvaluationError> + Sync,
{
    fn evaluate(&self, genes: &[f64]) -> Result<f64, EvaluationError> {
        self(genes)
    }
}

/// Run `evaluator` on `genes`, rejecting a NaN score.
///
/// NaN has no place in a minimization order, so it is reported as a failure
/// rather than stored as a fitness.
pub(crate) fn evaluate_checked<E: FitnessEvaluator + ?Sized>(
    evaluator: &E,
    genes: &[f64],
) -> Result<f64, EvaluationError> {
    let value = evaluator.evaluate(genes)?;
    if value.is_nan() {
        return Err(EvaluationError::new("fitness evaluated to NaN"));
    }
    Ok(value)
}

/// Sum of all genes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOfGenes;

impl FitnessEvaluator for SumOfGenes {
    fn evaluate(&self, genes: &[f64]) -> Result<f64, EvaluationError> {
        let sum: f64 = genes.iter().sum();
        if sum.is_nan() {
            return Err(EvaluationError::new("gene sum is NaN"));
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_of_genes() {
        assert_eq!(SumOfGenes.evaluate(&[1.0, 2.0, 3.5]), Ok(6.5));
        assert_eq!(SumOfGenes.evaluate(&[]), Ok(0.0));
    }

    #[test]
    fn test_sum_of_genes_rejects_nan() {
        assert!(SumOfGenes.evaluate(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_closure_evaluator() {
        let sphere = |genes: &[f64]| -> Result<f64, EvaluationError> {
            Ok(genes.iter().map(|g| g * g).sum())
        };
        assert_eq!(sphere.evaluate(&[1.0, 2.0]), Ok(5.0));
    }

    #[test]
    fn test_checked_evaluation_rejects_nan() {
        let nan = |_: &[f64]| -> Result<f64, EvaluationError> { Ok(f64::NAN) };
        assert!(evaluate_checked(&nan, &[0.0]).is_err());

        let inf = |_: &[f64]| -> Result<f64, EvaluationError> { Ok(f64::INFINITY) };
        assert_eq!(evaluate_checked(&inf, &[0.0]), Ok(f64::INFINITY));
    }

    #[test]
    fn test_error_message() {
        let err = EvaluationError::new("out of domain");
        assert_eq!(err.to_string(), "out of domain");
    }
}
