use basis::Function;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn composed(depth: usize) -> Function<'static, u64, u64> {
    let inc = Function::new(|x: u64| x.wrapping_add(1));
    let mut f = Function::new(|x: u64| x);
    for _ in 0..depth {
        f = f >> inc.clone();
    }
    f
}

fn bench_compose(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("apply composed functions");

    for depth in [4, 32, 256] {
        let pipeline = composed(depth);
        group.bench_with_input(
            BenchmarkId::new("function composed with >>", depth),
            &pipeline,
            |b, f| b.iter(|| f.apply(black_box(7))),
        );

        group.bench_with_input(BenchmarkId::new("plain loop", depth), &depth, |b, &depth| {
            b.iter(|| (0..depth).fold(black_box(7u64), |x, _| x.wrapping_add(1)))
        });

        let paired = pipeline.clone() & pipeline;
        group.bench_with_input(
            BenchmarkId::new("fanout of two pipelines", depth),
            &paired,
            |b, f| b.iter(|| f.apply(black_box(7))),
        );
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = bench_compose
}
criterion_main!(benches);
