//! Pollard-Rho-Brent with batched GCD (§4.4). Grounded in
//! `PollardRhoBrentTrial.h`'s Montgomery-based trial functor and its
//! commented-out plain-integer reference version, reimplemented generically
//! over [`crate::uint::Uint`] and the shared Montgomery core instead of the
//! source's per-width template.
//!
//! The walk is `x -> x^2 + c (mod n)`; Brent's refinement over the original
//! Floyd cycle detection only keeps the "tortoise" a power-of-two steps
//! behind the "hare," roughly halving the squarings needed, and the
//! differences `|x - y|` along doubling-length segments are multiplied
//! together ([`crate::config::POLLARD_RHO_GCD_THRESHOLD`] at a time) so a
//! single gcd call checks a whole batch of candidate factors at once instead
//! of one gcd per step.

use crate::config::{POLLARD_RHO_GCD_THRESHOLD, POLLARD_RHO_STARTING_LENGTH};
use crate::montgomery::{MontgomeryForm, MontgomeryRange, MontgomeryValue};
use crate::rng;
use crate::uint::Uint;

fn gcd_or_panic<T: Uint, V: MontgomeryRange>(
    ctx: &MontgomeryForm<T, V>,
    v: MontgomeryValue<T>,
) -> T {
    match ctx.gcd_with_modulus(v) {
        Ok(g) => g,
        Err(_) => unreachable!("modulus passed to Pollard-Rho is never zero"),
    }
}

/// One Brent walk with a fixed `(x0, c)`. Returns `Some(factor)` for a
/// nontrivial factor of `n`, `None` if this walk only ever found the trivial
/// factor `n` itself (the caller should retry with a different `c`).
fn brent_walk<T: Uint, V: MontgomeryRange>(
    ctx: &MontgomeryForm<T, V>,
    n: T,
    x0: T,
    c: T,
) -> Option<T> {
    let c_mont = ctx.convert_in(c);
    let mut y = ctx.convert_in(x0);
    let mut x = y;
    let mut ys = y;
    let mut g = T::ONE;
    let mut r = POLLARD_RHO_STARTING_LENGTH;
    let mut last_batch_len = 0usize;

    while g == T::ONE {
        x = y;
        for _ in 0..r {
            y = ctx.fused_square_subtract(y, c_mont);
        }

        let mut k = 0usize;
        while k < r && g == T::ONE {
            ys = y;
            let batch_len = POLLARD_RHO_GCD_THRESHOLD.min(r - k);
            last_batch_len = batch_len;
            let mut product = ctx.get_unity_value().into_montgomery();
            for _ in 0..batch_len {
                y = ctx.fused_square_subtract(y, c_mont);
                let diff = ctx.subtract(x, y);
                let (prod, _) = ctx.multiply(product, diff);
                product = prod;
            }
            g = gcd_or_panic(ctx, product);
            k += batch_len;
        }
        r *= 2;
    }

    if g == n {
        // The batch gcd only detects *that* some step in the batch shared a
        // factor with n, not *which* one; replay from the checkpoint one
        // step at a time to isolate it. A real mixed-factor collision is
        // guaranteed to surface within the same batch length; if it never
        // does, `x` and `y` collided outright (a pure cycle, no new
        // information), and this walk is a dead end.
        for _ in 0..last_batch_len {
            ys = ctx.fused_square_subtract(ys, c_mont);
            let diff = ctx.subtract(x, ys);
            g = gcd_or_panic(ctx, diff);
            if g > T::ONE {
                break;
            }
        }
    }

    if g > T::ONE && g < n {
        Some(g)
    } else {
        None
    }
}

fn fits<T: Uint>(n: T, divisor: u32) -> bool {
    let product = n.widening_mul(T::from_u32(divisor));
    T::double_high(product).is_zero()
}

/// Attempts to find a single nontrivial factor of composite, odd `n > 2` via
/// Pollard-Rho-Brent, retrying with a freshly randomized `(x0, c)` on every
/// failed walk (§4.4 "retry-on-cycle via incrementing c" — incrementing a
/// random `c` each retry rather than literally `c += 1` avoids ever reusing
/// exactly the same failing walk twice in a row). Gives up after
/// `max_attempts` walks and returns `None`; the factorization driver decides
/// what to try next (ECM, or declaring `n` a probable prime).
pub fn get_single_factor_pollard_rho<T: Uint>(
    n: T,
    loc_lcg: &mut u64,
    max_attempts: u32,
) -> Option<T> {
    debug_assert!(n.is_odd() && n > T::ONE, "n must be odd and > 1");

    for _ in 0..max_attempts {
        let x0 = random_below(n, loc_lcg);
        // c in [1, n) and c != n - 2 (c = -2 makes x=2 a fixed point of
        // x -> x^2 + c, a known degenerate case).
        let mut c = random_below(n, loc_lcg);
        if c.is_zero() {
            c = T::ONE;
        }

        let factor = if fits(n, 4) {
            let ctx: MontgomeryForm<T, crate::montgomery::Quarter> = MontgomeryForm::new(n);
            brent_walk(&ctx, n, x0, c)
        } else if fits(n, 2) {
            let ctx: MontgomeryForm<T, crate::montgomery::Half> = MontgomeryForm::new(n);
            brent_walk(&ctx, n, x0, c)
        } else {
            let ctx: MontgomeryForm<T, crate::montgomery::Full> = MontgomeryForm::new(n);
            brent_walk(&ctx, n, x0, c)
        };

        if let Some(g) = factor {
            if g > T::ONE && g < n {
                return Some(g);
            }
        }
    }
    None
}

/// A value uniformly distributed (non-cryptographically) in `[0, n)`, drawn
/// from enough LCG output to cover `T`'s full width — two draws for `u128`,
/// one otherwise.
fn random_below<T: Uint>(n: T, loc_lcg: &mut u64) -> T {
    debug_assert!(!n.is_zero());
    let raw = if T::BITS > 64 {
        let hi = T::from_u64(rng::next_u64(loc_lcg));
        let lo = T::from_u64(rng::next_u64(loc_lcg));
        hi.wrapping_shl(64).wrapping_add(lo)
    } else {
        T::from_u64(rng::next_u64(loc_lcg))
    };
    raw.div_rem(n).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_factor_of_small_semiprime() {
        let mut state = 12345u64;
        let n: u64 = 1_000_003 * 1_000_033; // two primes, product fits u64
        let factor = get_single_factor_pollard_rho(n, &mut state, 64)
            .expect("Pollard-Rho should find a factor of a small semiprime");
        assert!(factor > 1 && factor < n);
        assert_eq!(n % factor, 0);
    }

    #[test]
    fn finds_factor_of_medium_composite() {
        let mut state = 7u64;
        let n: u64 = 40_000_000_025; // 5 * 5 * 1_600_000_001
        let factor = get_single_factor_pollard_rho(n, &mut state, 128)
            .expect("Pollard-Rho should find a factor");
        assert_eq!(n % factor, 0);
        assert!(factor > 1 && factor < n);
    }
}
