use cpath::{
    algorithms::{Ellers, MazeGenerator as _, Params, Random},
    dims::Dims,
    grid::Grid,
    search::{Heuristic, Strategy},
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng as _;

const DIMS: Dims = Dims(201, 201);

fn maze() -> Grid {
    let mut rng = Random::seed_from_u64(7);
    let walls = Ellers.generate(DIMS, &mut rng, &Params::default()).unwrap();
    Grid::build(DIMS, &walls).unwrap()
}

pub fn strategies(c: &mut Criterion) {
    let grid = maze();
    let open = Grid::build(DIMS, &[]).unwrap();
    let (start, end) = (Dims(1, 1), DIMS - Dims(2, 2));

    for strategy in [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::AStar(Heuristic::Manhattan),
        Strategy::AStar(Heuristic::Euclidean),
    ] {
        c.bench_function(&format!("{strategy}_maze"), |b| {
            b.iter(|| strategy.search(black_box(&grid), start, end))
        });
        c.bench_function(&format!("{strategy}_open"), |b| {
            b.iter(|| strategy.search(black_box(&open), start, end))
        });
    }
}

pub fn grid_build(c: &mut Criterion) {
    let mut rng = Random::seed_from_u64(7);
    let walls = Ellers.generate(DIMS, &mut rng, &Params::default()).unwrap();
    c.bench_function("grid_build", |b| {
        b.iter(|| Grid::build(black_box(DIMS), black_box(&walls)).unwrap())
    });
}

criterion_group! {name = benches; config = Criterion::default().sample_size(20); targets = strategies, grid_build}
criterion_main!(benches);
