use compute::ElementwiseAdd;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_add(c: &mut Criterion) {
    let kernel = ElementwiseAdd::default();
    let mut group = c.benchmark_group("elementwise_add");
    for n in [1_024usize, 65_536, 1_048_576] {
        let a: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..n).map(|i| (n - i) as f64).collect();
        let mut z = vec![0.0; n];
        let count = i32::try_from(n).unwrap();

        group.bench_with_input(BenchmarkId::new("checked", n), &n, |bench, _| {
            bench.iter(|| kernel.run(black_box(count), black_box(&a), black_box(&b), &mut z));
        });
        group.bench_with_input(BenchmarkId::new("unchecked", n), &n, |bench, _| {
            bench.iter(|| unsafe {
                kernel.run_unchecked(black_box(count), a.as_ptr(), b.as_ptr(), z.as_mut_ptr())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add);
criterion_main!(benches);
