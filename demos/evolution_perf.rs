//! Quick evolution performance test

use simple_ea::{
    EvolutionConfig, EvolutionEngine,
    compute::{EvaluationError, SumOfGenes},
    schema::{GaussianMutationConfig, GeneticAlgorithmConfig, PopulationConfig},
};
use std::time::Instant;

/// Rastrigin function, a heavier fitness than summing genes.
fn rastrigin(genes: &[f64]) -> Result<f64, EvaluationError> {
    let a = 10.0;
    Ok(a * genes.len() as f64
        + genes
            .iter()
            .map(|x| x * x - a * (2.0 * std::f64::consts::PI * x).cos())
            .sum::<f64>())
}

fn main() {
    println!("=== Evolution Performance Test ===\n");

    // Test different genome lengths
    for genome_length in [10, 50, 200] {
        println!("Genome length: {}", genome_length);

        let config = EvolutionConfig {
            genome_length,
            population: PopulationConfig {
                size: 100,
                generations: 50,
            },
            algorithm: GeneticAlgorithmConfig {
                crossover_rate: 0.6,
                mutation_rate: 0.2,
                tournament_size: 3,
                mutation: GaussianMutationConfig {
                    mean: 0.0,
                    std_dev: 0.3,
                    gene_rate: 0.1,
                },
            },
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = EvolutionEngine::new(config, rastrigin).unwrap();
        let result = engine.run().unwrap();
        let elapsed = start.elapsed();

        let total_evals = result.stats.total_evaluations;
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", result.stats.generations);
        println!("  Evaluations:    {}", total_evals);
        println!("  Elapsed:        {:.3}s", elapsed.as_secs_f64());
        println!("  Evals/sec:      {:.1}", evals_per_sec);
        println!("  Best fitness:   {:.4}", result.stats.best_fitness);
        println!();
    }

    println!("=== Scalability Test (sum of 10 genes) ===\n");

    // Test different population sizes, sequential vs parallel evaluation
    for pop_size in [100, 1000, 10000] {
        for parallel in [false, true] {
            let config = EvolutionConfig {
                population: PopulationConfig {
                    size: pop_size,
                    generations: 20,
                },
                parallel_evaluation: parallel,
                random_seed: Some(42),
                ..Default::default()
            };

            let start = Instant::now();
            let mut engine = EvolutionEngine::new(config, SumOfGenes).unwrap();
            let result = engine.run().unwrap();
            let elapsed = start.elapsed();

            let total_evals = result.stats.total_evaluations;
            println!(
                "Population {} ({}): {} evals in {:.3}s ({:.1} evals/sec)",
                pop_size,
                if parallel { "parallel" } else { "sequential" },
                total_evals,
                elapsed.as_secs_f64(),
                total_evals as f64 / elapsed.as_secs_f64()
            );
        }
    }
}
