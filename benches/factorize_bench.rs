use criterion::{black_box, criterion_group, criterion_main, Criterion};
use primecore::{factorize, get_single_factor_ecm, get_single_factor_pollard_rho, is_prime};

fn bench_is_prime(c: &mut Criterion) {
    let mut group = c.benchmark_group("IsPrime");

    group.bench_function("u64_large_prime", |b| {
        let n: u128 = 18_446_744_073_709_551_557; // 2^64 - 59
        b.iter(|| black_box(is_prime(n)));
    });

    group.bench_function("u64_carmichael_number", |b| {
        let n: u128 = 41041; // known Carmichael number, adversarial for Fermat-style tests
        b.iter(|| black_box(is_prime(n)));
    });

    group.finish();
}

fn bench_factorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Factorize");

    group.bench_function("medium_composite", |b| {
        let n: u128 = 40_000_000_025; // 5 * 5 * 1_600_000_001
        b.iter(|| {
            let mut sink: Vec<u128> = Vec::new();
            let mut loc_lcg = 0u64;
            factorize(black_box(n), &mut sink, &mut loc_lcg);
            sink
        });
    });

    group.finish();
}

fn bench_factor_finders(c: &mut Criterion) {
    let mut group = c.benchmark_group("FactorFinders");

    group.bench_function("pollard_rho_60_bit", |b| {
        let n: u128 = 104_729 * 9_223_372_036_854_671; // small factor under 2^20
        b.iter(|| {
            let mut loc_lcg = 0u64;
            black_box(get_single_factor_pollard_rho(n, &mut loc_lcg, 4_096))
        });
    });

    group.bench_function("ecm_60_bit", |b| {
        let n: u128 = 104_729 * 9_223_372_036_854_671;
        b.iter(|| {
            let mut loc_lcg = 0u64;
            black_box(get_single_factor_ecm(n, &mut loc_lcg, 32))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_is_prime, bench_factorize, bench_factor_finders);
criterion_main!(benches);
