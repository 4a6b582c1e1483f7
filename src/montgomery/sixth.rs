//! Sixth-range Montgomery: requires `n < R/6`. The narrowest variant, used by
//! `get_single_factor_ecm`/`get_single_factor_pollard_rho` (§4.4/§4.5) on the
//! smallest candidates, where the extra headroom lets Pollard-Rho-Brent's
//! batched-GCD accumulator multiply several differences together before a
//! single gcd call without ever approaching `n`.

use super::{redc_loose, MontgomeryForm, MontgomeryRange};
use crate::uint::Uint;

#[derive(Clone, Copy, Debug)]
pub struct Sixth;

impl MontgomeryRange for Sixth {
    const DIVISOR: u32 = 6;
    const NAME: &'static str = "MontgomerySixth";

    #[inline]
    fn reduce<T: Uint>(t: T::Double, n: T, n_prime: T) -> T {
        redc_loose(t, n, n_prime)
    }

    #[inline]
    fn representative_bound<T: Uint>(n: T) -> T {
        n.wrapping_add(n)
    }
}

pub type MontgomerySixth<T> = MontgomeryForm<T, Sixth>;
