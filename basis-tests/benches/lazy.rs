use basis::Lazy;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn mapped_chain(depth: usize) -> Lazy<'static, u64> {
    let mut cell = Lazy::delay(|| 0u64);
    for _ in 0..depth {
        cell = cell.map(|x| x + 1);
    }
    cell
}

fn bench_lazy(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("force lazy cells");

    for depth in [16, 128, 512] {
        group.bench_with_input(
            BenchmarkId::new("build and force a suspended map chain", depth),
            &depth,
            |b, &depth| b.iter(|| mapped_chain(depth).force()),
        );

        let forced = mapped_chain(depth);
        forced.force();
        group.bench_with_input(
            BenchmarkId::new("re-force an evaluated cell", depth),
            &forced,
            |b, cell| b.iter(|| cell.force()),
        );
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = bench_lazy
}
criterion_main!(benches);
