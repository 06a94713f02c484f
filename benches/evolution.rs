//! Benchmarks for the generational loop.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use simple_ea::{
    compute::{EvolutionEngine, RandomSource, SumOfGenes, cx_two_point, mut_gaussian},
    schema::{EvolutionConfig, PopulationConfig},
};

fn bench_generation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_step");

    for size in [50, 200, 1000] {
        let config = EvolutionConfig {
            genome_length: 10,
            population: PopulationConfig {
                size,
                generations: 1,
            },
            random_seed: Some(42),
            ..Default::default()
        };

        let mut engine = EvolutionEngine::new(config, SumOfGenes).unwrap();
        let mut population = engine.initialize();
        population.evaluate_invalid(&SumOfGenes).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let (offspring, _) = engine.step(black_box(&population)).unwrap();
                black_box(offspring);
            });
        });
    }

    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");
    let mut rng = RandomSource::new(7);

    for length in [10, 100] {
        let mut a = simple_ea::Individual::random(length, &mut rng);
        let mut b = simple_ea::Individual::random(length, &mut rng);

        group.bench_with_input(
            BenchmarkId::new("cx_two_point", length),
            &length,
            |bench, _| {
                bench.iter(|| cx_two_point(black_box(&mut a), black_box(&mut b), &mut rng));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("mut_gaussian", length),
            &length,
            |bench, _| {
                bench.iter(|| mut_gaussian(black_box(&mut a), 0.0, 1.0, 0.1, &mut rng));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_generation_step, bench_operators);
criterion_main!(benches);
