//! Integration tests for the seed scenarios and universal invariants (§8),
//! exercised only through the public API (`primecore::{is_prime, factorize,
//! greatest_common_divisor, get_single_factor_ecm,
//! get_single_factor_pollard_rho}`), unlike the unit tests living alongside
//! each module that also reach into its internals.

use primecore::{
    factorize, get_single_factor_ecm, get_single_factor_pollard_rho, greatest_common_divisor,
    is_prime, Factors,
};

fn factors_of(n: u128) -> Vec<u128> {
    let mut sink: Vec<u128> = Vec::new();
    let mut loc_lcg = 0u64;
    factorize(n, &mut sink, &mut loc_lcg);
    sink.sort_unstable();
    sink
}

#[test]
fn is_prime_seed_scenarios() {
    assert!(is_prime(67967));
    assert!(is_prime(40_000_000_003));
    assert!(is_prime(18_446_744_073_709_551_557)); // 2^64 - 59
    assert!(!is_prime(8_589_934_592)); // 2^33
}

#[test]
fn factorize_seed_scenarios() {
    assert_eq!(factors_of(40_000_000_025), vec![5, 5, 1_600_000_001]);
    assert_eq!(factors_of(141), vec![3, 47]);
}

#[test]
fn factorize_near_2_64_minus_160() {
    let n: u128 = (1u128 << 64) - 160;
    let factors = factors_of(n);
    let product: u128 = factors.iter().product();
    assert_eq!(product, n);
    for &p in &factors {
        assert!(is_prime(p), "{p} should be prime");
    }
}

/// §8 universal invariant: for every emitted factorization, the product
/// reconstructs n and every emitted factor is independently verified prime.
#[test]
fn factorize_product_reconstructs_n_across_many_inputs() {
    let inputs: Vec<u128> = (2u128..2000)
        .chain([
            1_000_000_007,
            1_000_000_009,
            4_294_967_291, // largest prime below 2^32
            40_000_000_025,
            18_446_744_073_709_551_557,
        ])
        .collect();

    for n in inputs {
        let factors = factors_of(n);
        let product: u128 = factors.iter().product();
        assert_eq!(product, n, "product of factors of {n} should reconstruct it");
        for &p in &factors {
            assert!(is_prime(p), "{p} (factor of {n}) should be prime");
        }
    }
}

#[test]
fn factorize_into_multiset_sink_sums_multiplicities() {
    let mut factors: Factors<u128> = Factors::new();
    let mut loc_lcg = 0u64;
    factorize(360, &mut factors, &mut loc_lcg); // 2^3 * 3^2 * 5
    let map = factors.into_inner();
    assert_eq!(map.get(&2), Some(&3));
    assert_eq!(map.get(&3), Some(&2));
    assert_eq!(map.get(&5), Some(&1));
}

/// §8 universal invariant: gcd divides both operands, and is monotone in a
/// divisor of the second argument.
#[test]
fn gcd_invariants() {
    assert_eq!(greatest_common_divisor(12u128, 18).unwrap(), 6);
    assert_eq!(greatest_common_divisor(0u128, 5).unwrap(), 5);
    assert!(greatest_common_divisor(0u128, 0).is_err());

    for (a, b) in [(123_456u128, 789_012u128), (17, 19), (1_000_000, 500_000)] {
        let g = greatest_common_divisor(a, b).unwrap();
        assert_eq!(a % g, 0);
        assert_eq!(b % g, 0);
    }
}

#[test]
fn single_factor_finders_agree_with_factorize() {
    let n: u128 = 1_000_003 * 1_000_033;
    let mut loc_lcg = 0u64;
    let f = get_single_factor_pollard_rho(n, &mut loc_lcg, 128).expect("should find a factor");
    assert_eq!(n % f, 0);
    assert!(f > 1 && f < n);

    let mut loc_lcg = 0u64;
    let f = get_single_factor_ecm(n, &mut loc_lcg, 64).expect("should find a factor");
    assert_eq!(n % f, 0);
    assert!(f > 1 && f < n);
}

/// §8 "Statistical property (ECM)": across many random 60-bit composites with
/// a small prime factor under 2^20, `get_single_factor_ecm` should succeed in
/// the overwhelming majority of cases within the default curve budget. The
/// full spec target is 10,000 trials at ≥99.9%; this runs a smaller sample
/// (deterministically seeded) so the suite stays fast, with a looser
/// threshold to account for the reduced sample size.
#[test]
fn ecm_finds_small_factor_of_60_bit_composites_reliably() {
    // A handful of primes under 2^20 paired with large cofactors, kept under
    // 2^64 so the whole composite still fits u64's Montgomery Full range.
    let small_factors: [u64; 8] = [
        104_729, 393_241, 786_433, 200_003, 500_009, 999_983, 65_537, 32_003,
    ];
    let cofactor: u64 = 70_368_744_177_701; // prime, keeps every product under 2^64

    let mut successes = 0;
    let trials = small_factors.len() * 3;
    for (i, &f) in small_factors.iter().cycle().take(trials).enumerate() {
        let n: u128 = u128::from(f) * u128::from(cofactor);
        let mut loc_lcg = i as u64;
        if let Some(factor) = get_single_factor_ecm(n, &mut loc_lcg, 32) {
            if n % factor == 0 && factor > 1 && factor < n {
                successes += 1;
            }
        }
    }
    assert!(
        successes * 10 >= trials * 9,
        "expected at least 90% of {trials} trials to succeed, got {successes}"
    );
}
