use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flat_engine::foundation::math::Vec2;
use flat_engine::physics::{
    Body, BodyArena, BodyType, BroadPhase, ExhaustiveBroadPhase, PhysicsSystem,
    StaticGridBroadPhase,
};

// Deterministic scatter over the covered region keeps runs comparable;
// the 0.9 spacing leaves some overlapping pairs for the narrow phase.
fn scatter_position(i: usize) -> Vec2 {
    let x = ((i * 37) % 97) as f32 * 0.9 - 43.0;
    let y = ((i * 53) % 89) as f32 * 0.9 - 40.0;
    Vec2::new(x, y)
}

fn scattered_arena(num_bodies: usize) -> (BodyArena, StaticGridBroadPhase) {
    let mut arena = BodyArena::new();
    let mut grid = StaticGridBroadPhase::new(Vec2::new(2.0, 2.0), 50, 50);
    for i in 0..num_bodies {
        let body = Body {
            position: scatter_position(i),
            ..Body::default()
        };
        let handle = arena.add(body);
        grid.update_body(handle, scatter_position(i));
    }
    (arena, grid)
}

fn count_pairs(broad_phase: &dyn BroadPhase, arena: &BodyArena) -> usize {
    let mut pairs = 0usize;
    broad_phase.each(arena, &mut |a, b| {
        pairs += 1;
        black_box((a, b));
    });
    pairs
}

// Candidate enumeration alone, grid versus the all-pairs baseline
fn bench_pair_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair_enumeration");

    for &n in &[100usize, 500, 2000] {
        let (arena, grid) = scattered_arena(n);
        let exhaustive = ExhaustiveBroadPhase::new();

        group.bench_with_input(BenchmarkId::new("grid", n), &n, |b, _| {
            b.iter(|| black_box(count_pairs(&grid, &arena)));
        });
        group.bench_with_input(BenchmarkId::new("exhaustive", n), &n, |b, _| {
            b.iter(|| black_box(count_pairs(&exhaustive, &arena)));
        });
    }
    group.finish();
}

fn run_simulation(mut physics: PhysicsSystem, num_bodies: usize) {
    for i in 0..num_bodies {
        let handle = physics.add_body();
        if let Some(body) = physics.body_mut(handle) {
            body.body_type = BodyType::Dynamic;
            body.position = scatter_position(i);
            body.gravity = Vec2::new(0.0, -10.0);
            body.drag = Vec2::new(1.0, 1.0);
        }
    }

    let dt = 1.0 / 60.0;
    for _ in 0..30 {
        physics.update(black_box(dt), 4);
    }
}

// The whole pipeline: integration, enumeration, contacts, resolution
fn bench_full_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_step");

    for &n in &[100usize, 500, 2000] {
        group.bench_with_input(BenchmarkId::new("grid", n), &n, |b, &n| {
            b.iter(|| run_simulation(PhysicsSystem::new(), black_box(n)));
        });
        group.bench_with_input(BenchmarkId::new("exhaustive", n), &n, |b, &n| {
            b.iter(|| {
                let physics = PhysicsSystem::new()
                    .with_broad_phase(Box::new(ExhaustiveBroadPhase::new()));
                run_simulation(physics, black_box(n));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pair_enumeration, bench_full_step);
criterion_main!(benches);
