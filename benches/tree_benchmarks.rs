use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::prelude::*;
use rand::rngs::StdRng;
use ranked_avl::{AvlMap, RankList};
use std::collections::BTreeMap;

const N: usize = 10_000;
const SEED: u64 = 0x5eed_1e5b_a1a9_ced0;

// ─── Helper functions to generate key and position sequences ────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn shuffled_keys(n: usize) -> Vec<i64> {
    let mut keys = ordered_keys(n);
    keys.shuffle(&mut StdRng::seed_from_u64(SEED));
    keys
}

fn random_positions(n: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..n).map(|i| rng.gen_range(0..=i)).collect()
}

// ─── Map benchmarks ──────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    for (name, keys) in [
        ("map_insert_ordered", ordered_keys(N)),
        ("map_insert_reverse", reverse_ordered_keys(N)),
        ("map_insert_random", shuffled_keys(N)),
    ] {
        let mut group = c.benchmark_group(name);

        group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
            b.iter(|| {
                let mut map = AvlMap::new();
                for &key in &keys {
                    map.insert(key, key).unwrap();
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &key in &keys {
                    map.insert(key, key);
                }
                map
            });
        });

        group.finish();
    }
}

fn bench_map_get(c: &mut Criterion) {
    let keys = shuffled_keys(N);

    let mut avl = AvlMap::new();
    let mut btree = BTreeMap::new();
    for &key in &keys {
        avl.insert(key, key).unwrap();
        btree.insert(key, key);
    }

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for &key in &keys {
                if avl.get(key).is_some() {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for &key in &keys {
                if btree.get(&key).is_some() {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

fn bench_map_remove(c: &mut Criterion) {
    let keys = shuffled_keys(N);

    let mut group = c.benchmark_group("map_remove_random");

    group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
        b.iter_batched(
            || {
                let mut map = AvlMap::new();
                for &key in &keys {
                    map.insert(key, key).unwrap();
                }
                map
            },
            |mut map| {
                for &key in &keys {
                    map.remove(key).unwrap();
                }
                map
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || {
                let mut map = BTreeMap::new();
                for &key in &keys {
                    map.insert(key, key);
                }
                map
            },
            |mut map| {
                for &key in &keys {
                    map.remove(&key);
                }
                map
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ─── List benchmarks ─────────────────────────────────────────────────────────

fn bench_list_insert(c: &mut Criterion) {
    let positions = random_positions(N);

    let mut group = c.benchmark_group("list_insert_random_position");

    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter(|| {
            let mut list = RankList::new();
            for (i, &index) in positions.iter().enumerate() {
                list.insert(index, i as i64, i as i64).unwrap();
            }
            list
        });
    });

    group.bench_function(BenchmarkId::new("Vec", N), |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for (i, &index) in positions.iter().enumerate() {
                vec.insert(index, i as i64);
            }
            vec
        });
    });

    group.finish();
}

fn bench_list_retrieve(c: &mut Criterion) {
    let positions = random_positions(N);

    let mut list = RankList::new();
    let mut vec = Vec::new();
    for (i, &index) in positions.iter().enumerate() {
        list.insert(index, i as i64, i as i64).unwrap();
        vec.insert(index, i as i64);
    }

    let lookups: Vec<usize> = {
        let mut rng = StdRng::seed_from_u64(SEED);
        (0..N).map(|_| rng.gen_range(0..N)).collect()
    };

    let mut group = c.benchmark_group("list_retrieve_random");

    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &index in &lookups {
                sum += list.retrieve(index).unwrap().0;
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("Vec", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &index in &lookups {
                sum += vec[index];
            }
            sum
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_map_insert,
    bench_map_get,
    bench_map_remove,
    bench_list_insert,
    bench_list_retrieve
);
criterion_main!(benches);
