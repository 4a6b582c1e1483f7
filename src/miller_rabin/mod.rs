//! Miller-Rabin primality testing (§4.3). Grounded in
//! `is_prime_miller_rabin.h`'s `IPMR_internal::mr_trial` and
//! `miller_rabin_trials` batching, reimplemented over the generic Montgomery
//! core in `montgomery/mod.rs` instead of the source's per-width template
//! instantiations.
//!
//! Deterministic bases below 2^64 come from the well-published minimal
//! witness sets (Pomerance, Selfridge & Wagstaff 1980; Jaeschke 1993; Sinclair
//! 2011's 7-base `u64`-complete set) rather than the source's undisclosed
//! hash-indexed tables — see `bases.rs` and the Open Question resolution in
//! `DESIGN.md`. `u128` inputs fall back to the probabilistic first-127-primes
//! test the source itself uses once no deterministic set is practical.

pub mod bases;

use crate::montgomery::{CanonicalValue, MontgomeryForm, MontgomeryRange, MontgomeryValue};
use crate::uint::Uint;

/// How many independent bases are exponentiated together per `pow_array`
/// call (§4.3 "batched trials"). All bases share the same modulus and the
/// same `d`/`s` decomposition of `n - 1`, so batching them only changes how
/// the squarings are scheduled, never the result.
const TRIAL_SIZE: usize = 4;

/// `(d, s)` such that `n - 1 == d * 2^s` with `d` odd.
fn extract_powers_of_two_from_num_minus_one<T: Uint>(n: T) -> (T, u32) {
    let m = n.wrapping_sub(T::ONE);
    let s = m.trailing_zeros();
    (m.wrapping_shr(s), s)
}

fn canonical_eq<T: Uint, V: MontgomeryRange>(
    ctx: &MontgomeryForm<T, V>,
    a: MontgomeryValue<T>,
    b: CanonicalValue<T>,
) -> bool {
    ctx.get_canonical_value(a) == b
}

/// Runs one Miller-Rabin trial for a single base whose `a^d` is already
/// computed (`x`). Returns `true` if this base does not prove `n` composite.
fn trial_passes<T: Uint, V: MontgomeryRange>(
    ctx: &MontgomeryForm<T, V>,
    mut x: MontgomeryValue<T>,
    s: u32,
    unity: CanonicalValue<T>,
    neg_one: CanonicalValue<T>,
) -> bool {
    if canonical_eq(ctx, x, unity) || canonical_eq(ctx, x, neg_one) {
        return true;
    }
    for _ in 0..s.saturating_sub(1) {
        let (sq, _) = ctx.square(x);
        x = sq;
        if canonical_eq(ctx, x, neg_one) {
            return true;
        }
        if canonical_eq(ctx, x, unity) {
            // a nontrivial square root of 1 mod n: n is definitely composite.
            return false;
        }
    }
    false
}

/// Runs every base in `bases` against `n` (already known odd, `> 2`), in
/// batches of [`TRIAL_SIZE`] via `pow_array`. Returns `true` iff none of the
/// bases prove `n` composite.
fn run_bases<T: Uint, V: MontgomeryRange>(ctx: &MontgomeryForm<T, V>, n: T, bases: &[T]) -> bool {
    let (d, s) = extract_powers_of_two_from_num_minus_one(n);
    let unity = ctx.get_unity_value();
    let neg_one = ctx.get_negative_one_value();

    let mut chunks = bases.chunks_exact(TRIAL_SIZE);
    for chunk in &mut chunks {
        let mut batch = [T::ZERO; TRIAL_SIZE];
        batch.copy_from_slice(chunk);
        let avals: [MontgomeryValue<T>; TRIAL_SIZE] =
            batch.map(|b| ctx.convert_in(b.div_rem(n).1));
        let xs = ctx.pow_array(avals, d);
        for x in xs {
            if !trial_passes(ctx, x, s, unity, neg_one) {
                return false;
            }
        }
    }
    for &base in chunks.remainder() {
        let a = ctx.convert_in(base.div_rem(n).1);
        let x = ctx.pow(a, d);
        if !trial_passes(ctx, x, s, unity, neg_one) {
            return false;
        }
    }
    true
}

/// `n * divisor < R`, the same check `MontgomeryForm::new` performs, exposed
/// here so the dispatcher can pick a variant before constructing its context.
fn fits<T: Uint>(n: T, divisor: u32) -> bool {
    let product = n.widening_mul(T::from_u32(divisor));
    T::double_high(product).is_zero()
}

/// Runs Miller-Rabin with the given witness bases against odd `n > 2`,
/// dispatching to the narrowest Montgomery range variant `n` fits in
/// (§9 "type-driven dispatch": Quarter/Half/Full are each monomorphized once,
/// selected here by a plain runtime comparison on `n`'s magnitude, mirroring
/// the source's `internal_is_prime` dispatch).
pub fn miller_rabin_test<T: Uint>(n: T, bases: &[T]) -> bool {
    debug_assert!(n.is_odd() && n > T::ONE);
    if fits(n, 4) {
        let ctx: MontgomeryForm<T, crate::montgomery::Quarter> = MontgomeryForm::new(n);
        run_bases(&ctx, n, bases)
    } else if fits(n, 2) {
        let ctx: MontgomeryForm<T, crate::montgomery::Half> = MontgomeryForm::new(n);
        run_bases(&ctx, n, bases)
    } else {
        let ctx: MontgomeryForm<T, crate::montgomery::Full> = MontgomeryForm::new(n);
        run_bases(&ctx, n, bases)
    }
}

/// Primality test generic over every width this crate supports (§4.6
/// "smallest width that holds x" — the factorization driver picks `T`, this
/// just makes the right call deterministic-vs-probabilistic): `T::BITS <= 64`
/// gets the published deterministic witness sets (§4.3's contract — exact,
/// not probabilistic), anything wider (only `u128`) falls back to the
/// first-127-primes probabilistic test.
pub fn is_prime<T: Uint>(n: T) -> bool {
    if n <= T::ONE {
        return false;
    }
    if !n.is_odd() {
        return n == T::from_u32(2);
    }
    let bases: Vec<T> = if T::BITS <= 64 {
        bases::deterministic_bases_u64(n.as_u128() as u64)
            .iter()
            .map(|&b| T::from_u32(b))
            .collect()
    } else {
        bases::PROBABILISTIC_BASES_128
            .iter()
            .map(|&b| T::from_u32(b))
            .collect()
    };
    miller_rabin_test(n, &bases)
}

/// Deterministic primality test for any `u64` (§4.3 "Contract").
pub fn is_prime_u64(n: u64) -> bool {
    is_prime::<u64>(n)
}

/// Probabilistic primality test for `u128` (§4.3: "probabilistic 127-base
/// testing for 128-bit inputs" — no known practical deterministic set
/// exists at this width). False-positive probability is bounded by `4^-127`.
pub fn is_probable_prime_u128(n: u128) -> bool {
    is_prime::<u128>(n)
}
