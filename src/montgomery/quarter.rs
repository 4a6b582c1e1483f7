//! Quarter-range Montgomery: requires `n < R/4`. Used where the driver has
//! already narrowed a candidate into the lower quarter of the type's range
//! (e.g. after trial division has ruled out small factors), giving the
//! factoring engines a cheaper context than Half-range without changing the
//! observable arithmetic contract.

use super::{redc_loose, MontgomeryForm, MontgomeryRange};
use crate::uint::Uint;

#[derive(Clone, Copy, Debug)]
pub struct Quarter;

impl MontgomeryRange for Quarter {
    const DIVISOR: u32 = 4;
    const NAME: &'static str = "MontgomeryQuarter";

    #[inline]
    fn reduce<T: Uint>(t: T::Double, n: T, n_prime: T) -> T {
        redc_loose(t, n, n_prime)
    }

    #[inline]
    fn representative_bound<T: Uint>(n: T) -> T {
        n.wrapping_add(n)
    }
}

pub type MontgomeryQuarter<T> = MontgomeryForm<T, Quarter>;
