//! Full-range Montgomery: accepts any odd modulus `n` with `1 < n < R`. This
//! is the variant every other one trades modulus range for speed against —
//! always fully reduced into `[0, n)`, which costs the REDC-carry tracking
//! in [`super::redc_full`] and one conditional subtraction per operation that
//! the narrower variants can skip.

use super::{redc_full, MontgomeryForm, MontgomeryRange};
use crate::uint::Uint;

#[derive(Clone, Copy, Debug)]
pub struct Full;

impl MontgomeryRange for Full {
    const DIVISOR: u32 = 1;
    const NAME: &'static str = "MontgomeryFull";

    #[inline]
    fn reduce<T: Uint>(t: T::Double, n: T, n_prime: T) -> T {
        redc_full(t, n, n_prime)
    }

    #[inline]
    fn representative_bound<T: Uint>(n: T) -> T {
        n
    }
}

pub type MontgomeryFull<T> = MontgomeryForm<T, Full>;
