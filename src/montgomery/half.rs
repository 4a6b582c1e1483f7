//! Half-range Montgomery: requires `n < R/2`. The loose, no-conditional-
//! subtraction REDC (`redc_loose`) is only sound up to `n < R/4` — with an
//! `n` in `[R/4, R/2)`, operands in the loose `[0, 2n)` range make
//! `t + m*n` overflow `R^2` (not just `R`), and `redc_loose`'s plain
//! `double_add` would silently drop that carry. So Half uses the same
//! carry-tracked, fully-canonicalizing [`redc_full`] that `Full` does; it
//! exists as its own variant purely so callers who already know `n < R/2`
//! can assert that precondition, not because it's cheaper than `Full`.

use super::{redc_full, MontgomeryForm, MontgomeryRange};
use crate::uint::Uint;

#[derive(Clone, Copy, Debug)]
pub struct Half;

impl MontgomeryRange for Half {
    const DIVISOR: u32 = 2;
    const NAME: &'static str = "MontgomeryHalf";

    #[inline]
    fn reduce<T: Uint>(t: T::Double, n: T, n_prime: T) -> T {
        redc_full(t, n, n_prime)
    }

    #[inline]
    fn representative_bound<T: Uint>(n: T) -> T {
        n
    }
}

pub type MontgomeryHalf<T> = MontgomeryForm<T, Half>;
