extern crate bloom_bench;

use bloom_bench::benchmarks::{replay, synthetic_keys, synthetic_trace};
use bloom_bench::filter::{bloom::BloomFilter, exact::ExactSet, Filter};
use bloom_bench::params::FilterParams;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;

fn insert_n(keys: &[String], params: FilterParams) -> BloomFilter {
    let mut filter = BloomFilter::with_params(params).expect("valid parameters");
    keys.iter().for_each(|key| filter.insert(key));
    filter
}

fn contains(f: &dyn Filter, key: &str) -> bool {
    f.contains(key)
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(1337);
    let small_keys = synthetic_keys(10_000, &mut rng);
    let small_params = FilterParams::optimal(10_000, 0.01).expect("valid parameters");
    c.bench_function("insert_n 10_000, p = 0.01", |b| {
        b.iter(|| insert_n(black_box(&small_keys), black_box(small_params)))
    });
    let small_filter = insert_n(&small_keys, small_params);
    c.bench_function("contains member on 10k (small filter)", |b| {
        b.iter(|| contains(black_box(&small_filter), black_box(&small_keys[0])))
    });
    c.bench_function("contains outsider on 10k (small filter)", |b| {
        b.iter(|| contains(black_box(&small_filter), black_box("never inserted")))
    });
}

fn replay_bench_vary_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay_varying_n");
    for n in [10_000, 100_000] {
        let operations = synthetic_trace(n, n, 0.5, 1337).expect("valid trace");
        let params = FilterParams::optimal(n as u64, 0.01).expect("valid parameters");
        group.bench_with_input(BenchmarkId::new("bloom", n), &operations, |b, ops| {
            b.iter(|| {
                let mut filter = BloomFilter::with_params(params).expect("valid parameters");
                replay(&mut filter, black_box(ops))
            })
        });
        group.bench_with_input(BenchmarkId::new("exact", n), &operations, |b, ops| {
            b.iter(|| replay(&mut ExactSet::new(), black_box(ops)))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark, replay_bench_vary_n);
criterion_main!(benches);
