//! Benchmarks for parameter matrix construction and collection ordering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fabmatrix::{defer_mr_exhaustion, rma_bw_combinations, MemoryTypeMatrix, RangeSpec, SizeAxes};

fn bench_range_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_expansion");

    for descriptor in ["r:0,4,64", "r:8000,4,9000", "r:0,1024,1048576"] {
        let spec: RangeSpec = descriptor.parse().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(descriptor), &spec, |bench, spec| {
            bench.iter(|| black_box(spec.iter().sum::<u64>()))
        });
    }

    group.finish();
}

fn bench_axis_construction(c: &mut Criterion) {
    c.bench_function("size_axes_default", |bench| {
        bench.iter(|| black_box(SizeAxes::default()))
    });

    let matrix = MemoryTypeMatrix::default();
    c.bench_function("rma_bw_combinations", |bench| {
        bench.iter(|| black_box(rma_bw_combinations(black_box(&matrix))))
    });
}

/// Collected test names with every tenth one an exhaustion test
fn collected_names(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            if i % 10 == 0 {
                format!("test_mr_exhaustion_rdm_pingpong[{i}]")
            } else {
                format!("test_rdm_pingpong[{i}]")
            }
        })
        .collect()
}

fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("defer_mr_exhaustion");

    for n in [100, 10_000] {
        let names = collected_names(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &names, |bench, names| {
            bench.iter(|| black_box(defer_mr_exhaustion(names.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_range_expansion, bench_axis_construction, bench_ordering);
criterion_main!(benches);
