//! Performance benchmarks for instability

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use instability::mutation::MutationEngine;
use instability::{Cell, Config, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    for grid_size in [50usize, 100, 200].iter() {
        let mut config = Config::default();
        config.world.width = *grid_size;
        config.world.height = *grid_size;
        config.world.initial_population = grid_size * grid_size / 100;
        config.cells.initial_fitness = 5.0;

        let mut world = World::new_with_seed(config, 42).unwrap();

        // Warm up so the lattice carries a realistic population
        for _ in 0..20 {
            world.step();
        }

        group.bench_with_input(
            BenchmarkId::new("grid_size", grid_size),
            grid_size,
            |b, _| {
                b.iter(|| {
                    world.step();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_mutation(c: &mut Criterion) {
    let config = Config::default();
    let engine = MutationEngine::new(&config.mutation, config.cells.max_fitness).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let parent = Cell::with_fitness(5.0);

    c.bench_function("mutate_daughter", |b| {
        b.iter(|| engine.mutate(black_box(&parent), 0.5, &mut rng));
    });
}

criterion_group!(benches, benchmark_world_step, benchmark_mutation);
criterion_main!(benches);
