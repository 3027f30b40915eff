use criterion::measurement::WallTime;
use criterion::{
    criterion_group, criterion_main, AxisScale, BenchmarkGroup, BenchmarkId, Criterion,
    PlotConfiguration, SamplingMode, Throughput,
};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dlp::dlog::{solve, DlogParameters};
use dlp::factor::find_factor;
use dlp::math::benchmark::brute_force_dlog_bounded;

const RNG_SEED: u64 = 0xf012_3456_789a_bcde;

fn solver_material(p: u64, g: u64) -> (DlogParameters, BigInt) {
    let params = DlogParameters {
        p: BigInt::from(p),
        g: BigInt::from(g),
    };
    let order = params.order();
    (params, order)
}

fn prepare_benchmark<'a>(
    c: &'a mut Criterion,
    group_name: &str,
    sampling_mode: SamplingMode,
    axis_scale: AxisScale,
) -> BenchmarkGroup<'a, WallTime> {
    let plotting_config = PlotConfiguration::default().summary_scale(axis_scale);
    let mut group = c.benchmark_group(group_name);
    group
        .sampling_mode(sampling_mode)
        .plot_config(plotting_config);
    group
}

fn bench_solve_growing_primes(c: &mut Criterion) {
    // Primitive roots checked against the full factorization of p - 1. The
    // last modulus has p - 1 = 2 * 500000003 and exercises a large
    // prime-order baby-step/giant-step leaf; the others split smoothly.
    let moduli: [(u64, u64); 5] = [
        (1009, 11),
        (104_729, 12),
        (15_485_863, 6),
        (2_147_483_647, 7),
        (1_000_000_007, 5),
    ];

    let mut group = prepare_benchmark(
        c,
        "Discrete log by prime size",
        SamplingMode::Flat,
        AxisScale::Logarithmic,
    );

    for (p, g) in moduli.iter() {
        let (params, order) = solver_material(*p, *g);
        let exponent = BigInt::from(2 * p / 3);
        let target = params.g.modpow(&exponent, &params.p);

        println!("Solving one query modulo {}", p);
        group.sample_size(10).bench_with_input(
            BenchmarkId::from_parameter(p),
            &target,
            |b, target| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(RNG_SEED);
                    let x = solve(target, &params.g, &order, &params.p, &mut rng).unwrap();
                    assert_eq!(params.g.modpow(&x, &params.p), *target);
                })
            },
        );
    }
    group.finish();
}

fn bench_query_batches(c: &mut Criterion) {
    let (params, order) = solver_material(104_729, 12);
    let batch_sizes = [10u64, 100, 1000];

    let mut group = prepare_benchmark(
        c,
        "Query batch",
        SamplingMode::Flat,
        AxisScale::Logarithmic,
    );

    for count in batch_sizes.iter() {
        let queries: Vec<BigInt> = (0..*count)
            .map(|e| params.g.modpow(&BigInt::from(e * 97 + 3), &params.p))
            .collect();
        assert_eq!(queries.len(), *count as usize);

        println!("Solving a batch of {} queries", queries.len());
        group.throughput(Throughput::Elements(*count));
        group.sample_size(10).bench_with_input(
            BenchmarkId::from_parameter(count),
            &queries,
            |b, queries| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(RNG_SEED);
                    for target in queries {
                        let x = solve(target, &params.g, &order, &params.p, &mut rng).unwrap();
                        assert_eq!(params.g.modpow(&x, &params.p), *target);
                    }
                })
            },
        );
    }
    group.finish();
}

fn bench_factor_semiprimes(c: &mut Criterion) {
    // 101 * 103, 1009 * 1013, and a product of two ten-digit primes.
    let semiprimes: [u64; 3] = [10_403, 1_022_117, 1_470_626_929_934_143_021];

    let mut group = prepare_benchmark(
        c,
        "Factor finder",
        SamplingMode::Flat,
        AxisScale::Logarithmic,
    );

    for n in semiprimes.iter() {
        let n_big = BigInt::from(*n);

        println!("Splitting {}", n);
        group.sample_size(10).bench_with_input(
            BenchmarkId::from_parameter(n),
            &n_big,
            |b, n_big| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(RNG_SEED);
                    let mut d = find_factor(n_big, &mut rng);
                    while d == *n_big {
                        d = find_factor(n_big, &mut rng);
                    }
                    assert!(d > BigInt::one() && (n_big % &d).is_zero());
                })
            },
        );
    }
    group.finish();
}

fn bench_small_prime_baseline(c: &mut Criterion) {
    let (params, order) = solver_material(1009, 11);
    let exponent = BigInt::from(700);
    let target = params.g.modpow(&exponent, &params.p);

    let mut group = prepare_benchmark(
        c,
        "Small prime baseline",
        SamplingMode::Auto,
        AxisScale::Logarithmic,
    );

    group.bench_with_input(
        BenchmarkId::new("bounded brute force", 1009),
        &target,
        |b, target| {
            b.iter(|| {
                let x = brute_force_dlog_bounded(target, &params.g, &params.p, 1008).unwrap();
                assert_eq!(x, BigInt::from(700));
            })
        },
    );
    group.bench_with_input(
        BenchmarkId::new("recursive solver", 1009),
        &target,
        |b, target| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(RNG_SEED);
                let x = solve(target, &params.g, &order, &params.p, &mut rng).unwrap();
                assert_eq!(x, BigInt::from(700));
            })
        },
    );
    group.finish();
}

criterion_group!(
    benches,
    bench_solve_growing_primes,
    bench_query_batches,
    bench_factor_semiprimes,
    bench_small_prime_baseline
);
criterion_main!(benches);
