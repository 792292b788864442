use core::hash::BuildHasher;
use core::hash::Hash;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

#[derive(Clone, Copy, Default)]
struct SipBuilder;

impl BuildHasher for SipBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

trait BenchKey: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

impl BenchKey for u64 {
    fn new(key: u64) -> Self {
        black_box(key)
    }
}

impl BenchKey for String {
    fn new(key: u64) -> Self {
        black_box(format!("key_{:016X}", key))
    }
}

/// The operations shared by every map under comparison.
trait BenchMap<K>: Sized {
    const NAME: &'static str;

    fn with_hasher(hasher: SipBuilder) -> Self;
    fn insert(&mut self, key: K, value: u64) -> Option<u64>;
    fn get(&self, key: &K) -> Option<&u64>;
    fn remove(&mut self, key: &K) -> Option<u64>;
}

impl<K: BenchKey> BenchMap<K> for chain_hash::HashMap<K, u64, SipBuilder> {
    const NAME: &'static str = "chain_hash";

    fn with_hasher(hasher: SipBuilder) -> Self {
        chain_hash::HashMap::with_hasher(hasher)
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        chain_hash::HashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        chain_hash::HashMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        chain_hash::HashMap::remove(self, key)
    }
}

impl<K: BenchKey> BenchMap<K> for hashbrown::HashMap<K, u64, SipBuilder> {
    const NAME: &'static str = "hashbrown";

    fn with_hasher(hasher: SipBuilder) -> Self {
        hashbrown::HashMap::with_hasher(hasher)
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        hashbrown::HashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        hashbrown::HashMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        hashbrown::HashMap::remove(self, key)
    }
}

impl<K: BenchKey> BenchMap<K> for std::collections::HashMap<K, u64, SipBuilder> {
    const NAME: &'static str = "std";

    fn with_hasher(hasher: SipBuilder) -> Self {
        std::collections::HashMap::with_hasher(hasher)
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        std::collections::HashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        std::collections::HashMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        std::collections::HashMap::remove(self, key)
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
    (1 << 18),
];

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Find,
    Remove,
}

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn filled<K: BenchKey, M: BenchMap<K>>(keys: &[K]) -> M {
    let mut map = M::with_hasher(SipBuilder);
    for (i, key) in keys.iter().enumerate() {
        map.insert(key.clone(), i as u64);
    }
    map
}

fn run_insert<K: BenchKey, M: BenchMap<K>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    keys: &[K],
) {
    group.bench_function(M::NAME, |b| {
        b.iter_batched(
            || {
                let mut keys = keys.to_vec();
                keys.shuffle(&mut SmallRng::from_os_rng());
                keys
            },
            |keys| {
                let mut map = M::with_hasher(SipBuilder);
                for (i, key) in keys.into_iter().enumerate() {
                    black_box(map.insert(key, i as u64));
                }
                black_box(map)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));
        run_insert::<K, chain_hash::HashMap<K, u64, SipBuilder>>(&mut group, &keys);
        run_insert::<K, hashbrown::HashMap<K, u64, SipBuilder>>(&mut group, &keys);
        run_insert::<K, std::collections::HashMap<K, u64, SipBuilder>>(&mut group, &keys);
    }

    group.finish();
}

fn run_find<K: BenchKey, M: BenchMap<K>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    keys: &[K],
    probes: &[K],
) {
    let map: M = filled(keys);
    group.bench_function(M::NAME, |b| {
        b.iter(|| {
            for probe in probes {
                black_box(map.get(probe));
            }
        })
    });
}

fn bench_find_hit_miss<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    for (label, hit_ratio) in [("hit", 1.0), ("miss", 0.0), ("hit_miss", 0.5)] {
        let mut group = c.benchmark_group(format!(
            "find_{}_{}",
            label,
            core::any::type_name::<K>()
        ));
        group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

        for &size in SIZES[..=MAX_SIZE].iter() {
            let keys = random_keys::<K>(size);
            let misses = random_keys::<K>(size);
            let mut rng = SmallRng::from_os_rng();
            let probes = (0..size)
                .map(|i| {
                    if rng.random_bool(hit_ratio) {
                        keys[i].clone()
                    } else {
                        misses[i].clone()
                    }
                })
                .collect::<Vec<K>>();

            group.throughput(Throughput::Elements(size as u64));
            run_find::<K, chain_hash::HashMap<K, u64, SipBuilder>>(&mut group, &keys, &probes);
            run_find::<K, hashbrown::HashMap<K, u64, SipBuilder>>(&mut group, &keys, &probes);
            run_find::<K, std::collections::HashMap<K, u64, SipBuilder>>(
                &mut group, &keys, &probes,
            );
        }

        group.finish();
    }
}

fn run_remove<K: BenchKey, M: BenchMap<K>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    keys: &[K],
) {
    group.bench_function(M::NAME, |b| {
        b.iter_batched(
            || filled::<K, M>(keys),
            |mut map| {
                for key in keys {
                    black_box(map.remove(key));
                }
                black_box(map)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));
        run_remove::<K, chain_hash::HashMap<K, u64, SipBuilder>>(&mut group, &keys);
        run_remove::<K, hashbrown::HashMap<K, u64, SipBuilder>>(&mut group, &keys);
        run_remove::<K, std::collections::HashMap<K, u64, SipBuilder>>(&mut group, &keys);
    }

    group.finish();
}

fn run_mixed<K: BenchKey, M: BenchMap<K>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    operations: &[(Operation, K)],
) {
    group.bench_function(M::NAME, |b| {
        b.iter(|| {
            let mut map = M::with_hasher(SipBuilder);
            for (operation, key) in operations {
                match operation {
                    Operation::Insert => {
                        black_box(map.insert(key.clone(), 0));
                    }
                    Operation::Find => {
                        black_box(map.get(key));
                    }
                    Operation::Remove => {
                        black_box(map.remove(key));
                    }
                }
            }
            black_box(map)
        })
    });
}

fn bench_mixed_zipf<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    for exponent in [1.0, 1.3] {
        let mut group = c.benchmark_group(format!(
            "mixed_zipf_{:.01}_{}",
            exponent,
            core::any::type_name::<K>()
        ));
        group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

        for &size in SIZES[..=MAX_SIZE].iter() {
            let mut rng = SmallRng::from_os_rng();
            let op_distr = Zipf::new(3.0, exponent).unwrap();
            let key_distr = Zipf::new(size as f64 * 2.0, 1.0).unwrap();

            let operations = (0..size * 3)
                .map(|_| {
                    let op_choice: f64 = rng.sample(op_distr);
                    let operation = if op_choice <= 1.0 {
                        Operation::Find
                    } else if op_choice <= 2.0 {
                        Operation::Insert
                    } else {
                        Operation::Remove
                    };
                    let key: f64 = rng.sample(key_distr);
                    (operation, K::new(key as u64))
                })
                .collect::<Vec<_>>();

            group.throughput(Throughput::Elements(operations.len() as u64));
            run_mixed::<K, chain_hash::HashMap<K, u64, SipBuilder>>(&mut group, &operations);
            run_mixed::<K, hashbrown::HashMap<K, u64, SipBuilder>>(&mut group, &operations);
            run_mixed::<K, std::collections::HashMap<K, u64, SipBuilder>>(
                &mut group,
                &operations,
            );
        }

        group.finish();
    }
}

criterion_group!(
    benches,
    bench_insert::<u64, 4>,
    bench_insert::<String, 3>,
    bench_find_hit_miss::<u64, 4>,
    bench_find_hit_miss::<String, 3>,
    bench_remove::<u64, 4>,
    bench_remove::<String, 3>,
    bench_mixed_zipf::<u64, 4>,
    bench_mixed_zipf::<String, 3>,
);

criterion_main!(benches);
