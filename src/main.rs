//! Simple EA CLI - Run an evolution from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;

use simple_ea::{
    compute::{EvolutionEngine, SumOfGenes},
    schema::EvolutionConfig,
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> | --example", args[0]);
        eprintln!();
        eprintln!("Minimize the sum of genes with a generational genetic algorithm.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to evolution configuration file");
        eprintln!("  --example    Print the default configuration and exit");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let config = EvolutionConfig::from_json_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config {}: {}", config_path.display(), e);
        std::process::exit(1);
    });

    println!("Simple EA");
    println!("=========");
    println!(
        "Population: {} x {} genes",
        config.population.size, config.genome_length
    );
    println!("Generations: {}", config.population.generations);
    println!(
        "CXPB: {}  MUTPB: {}  Tournament: {}",
        config.algorithm.crossover_rate,
        config.algorithm.mutation_rate,
        config.algorithm.tournament_size
    );
    println!();

    let mut engine = EvolutionEngine::new(config, SumOfGenes).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let total = engine.config().population.generations;
    let report_every = (total / 10).max(1);

    let result = engine
        .run_with_callback(|progress| {
            if progress.generation % report_every == 0 || progress.generation == total {
                println!(
                    "  Gen {}/{}: best={:.6}, mean={:.6}, worst={:.6}, evals={}",
                    progress.generation,
                    total,
                    progress.stats.best,
                    progress.stats.mean,
                    progress.stats.worst,
                    progress.stats.evaluations
                );
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Evolution failed: {}", e);
            std::process::exit(1);
        });

    println!();
    println!("Seed: {}", result.stats.random_seed);
    println!("Evaluations: {}", result.stats.total_evaluations);
    println!("Best fitness: {:.6}", result.stats.best_fitness);
    println!("Final mean fitness: {:.6}", result.stats.final_mean_fitness);
    if let Some(best) = result.hall_of_fame.best() {
        println!("Best genes: {:?}", best.genes());
    }
    println!("Time: {:.3}s", result.stats.elapsed_seconds);
}

fn print_example_config() {
    let config = EvolutionConfig::default();
    match config.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing config: {}", e);
            std::process::exit(1);
        }
    }
}
