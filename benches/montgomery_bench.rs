use criterion::{black_box, criterion_group, criterion_main, Criterion};
use primecore::{Full, MontgomeryForm, Quarter};

fn bench_montgomery_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("MontgomeryMultiply");

    group.bench_function("quarter_range_u64", |b| {
        let modulus = 97u64;
        let ctx: MontgomeryForm<u64, Quarter> = MontgomeryForm::new(modulus);
        let a = ctx.convert_in(5);
        let x = ctx.convert_in(7);
        b.iter(|| black_box(ctx.multiply(a, x)));
    });

    group.bench_function("full_range_u64_near_2_64", |b| {
        let modulus = 0xFFFF_FFFF_FFFF_FFFBu64; // 2^64 - 5
        let ctx: MontgomeryForm<u64, Full> = MontgomeryForm::new(modulus);
        let a = ctx.convert_in(0xABCD_EF01_2345_6789u64 % modulus);
        let x = ctx.convert_in(0x0123_4567_89AB_CDEFu64 % modulus);
        b.iter(|| black_box(ctx.multiply(a, x)));
    });

    group.bench_function("full_range_u128", |b| {
        let modulus: u128 = u128::MAX - 58;
        let ctx: MontgomeryForm<u128, Full> = MontgomeryForm::new(modulus);
        let a = ctx.convert_in(modulus - 1);
        let x = ctx.convert_in(modulus - 3);
        b.iter(|| black_box(ctx.multiply(a, x)));
    });

    group.finish();
}

fn bench_montgomery_pow(c: &mut Criterion) {
    let mut group = c.benchmark_group("MontgomeryPow");

    group.bench_function("pow_u64_small_modulus", |b| {
        let modulus = 1_000_000_007u64;
        let ctx: MontgomeryForm<u64, Full> = MontgomeryForm::new(modulus);
        let base = ctx.convert_in(123_456);
        b.iter(|| black_box(ctx.pow(base, modulus - 1)));
    });

    group.finish();
}

criterion_group!(benches, bench_montgomery_multiply, bench_montgomery_pow);
criterion_main!(benches);
