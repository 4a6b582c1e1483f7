//! Width-parameterized primitive operations shared by every algorithm in
//! this crate (§9 "Type-driven dispatch": a trait parameterized by integer
//! width replaces the source's compile-time template dispatch, and
//! monomorphization gives the same zero-cost result).

use crate::u256::U256;
use std::fmt::Debug;

/// Common bound for every unsigned width this crate operates on (`u32`,
/// `u64`, `u128`; see §3 "Integer domain" — the driver always promotes down
/// to the narrowest of these three before entering the Montgomery domain).
pub trait Uint: Copy + Clone + Debug + Eq + Ord + Default + Send + Sync + 'static {
    /// Bit width of `R = 2^BITS` in the Montgomery domain for this type.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    /// Double-width type used as the intermediate of a widening multiply.
    /// `u64` for `u32`, `u128` for `u64`, and the crate's own [`U256`] for
    /// `u128` (there is no native 256-bit integer in Rust, per §9 "Widening
    /// multiplies").
    type Double: Copy;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    fn overflowing_add(self, rhs: Self) -> (Self, bool);
    fn overflowing_sub(self, rhs: Self) -> (Self, bool);
    fn wrapping_shl(self, n: u32) -> Self;
    fn wrapping_shr(self, n: u32) -> Self;
    fn is_odd(self) -> bool;
    fn is_zero(self) -> bool;
    fn trailing_zeros(self) -> u32;
    fn leading_zeros(self) -> u32;
    fn div_rem(self, rhs: Self) -> (Self, Self);

    fn widening_mul(self, rhs: Self) -> Self::Double;
    fn double_low(d: Self::Double) -> Self;
    fn double_high(d: Self::Double) -> Self;
    fn double_from_low(x: Self) -> Self::Double;
    fn double_add(a: Self::Double, b: Self::Double) -> Self::Double;
    /// Adds two double-width values, reporting whether the true sum needed
    /// one more bit than `Double` holds. Montgomery REDC for a Full-range
    /// modulus near `R` is the one place this carry is observable (see
    /// `montgomery::redc_full`); every other range variant is restricted to
    /// `n <= R/2` specifically so this carry can never fire.
    fn double_overflowing_add(a: Self::Double, b: Self::Double) -> (Self::Double, bool);

    fn from_u32(x: u32) -> Self;
    fn from_u64(x: u64) -> Self;
    fn as_u128(self) -> u128;
}

macro_rules! impl_uint_native {
    ($t:ty, $double:ty) => {
        impl Uint for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$t>::MAX;
            type Double = $double;

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }
            #[inline]
            fn wrapping_neg(self) -> Self {
                <$t>::wrapping_neg(self)
            }
            #[inline]
            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                <$t>::overflowing_add(self, rhs)
            }
            #[inline]
            fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
                <$t>::overflowing_sub(self, rhs)
            }
            #[inline]
            fn wrapping_shl(self, n: u32) -> Self {
                <$t>::wrapping_shl(self, n)
            }
            #[inline]
            fn wrapping_shr(self, n: u32) -> Self {
                <$t>::wrapping_shr(self, n)
            }
            #[inline]
            fn is_odd(self) -> bool {
                self & 1 == 1
            }
            #[inline]
            fn is_zero(self) -> bool {
                self == 0
            }
            #[inline]
            fn trailing_zeros(self) -> u32 {
                <$t>::trailing_zeros(self)
            }
            #[inline]
            fn leading_zeros(self) -> u32 {
                <$t>::leading_zeros(self)
            }
            #[inline]
            fn div_rem(self, rhs: Self) -> (Self, Self) {
                (self / rhs, self % rhs)
            }
            #[inline]
            fn widening_mul(self, rhs: Self) -> Self::Double {
                (self as $double) * (rhs as $double)
            }
            #[inline]
            fn double_low(d: Self::Double) -> Self {
                d as Self
            }
            #[inline]
            fn double_high(d: Self::Double) -> Self {
                (d >> Self::BITS) as Self
            }
            #[inline]
            fn double_from_low(x: Self) -> Self::Double {
                x as $double
            }
            #[inline]
            fn double_add(a: Self::Double, b: Self::Double) -> Self::Double {
                a.wrapping_add(b)
            }
            #[inline]
            fn double_overflowing_add(a: Self::Double, b: Self::Double) -> (Self::Double, bool) {
                <$double>::overflowing_add(a, b)
            }
            #[inline]
            fn from_u32(x: u32) -> Self {
                x as Self
            }
            #[inline]
            fn from_u64(x: u64) -> Self {
                x as Self
            }
            #[inline]
            fn as_u128(self) -> u128 {
                self as u128
            }
        }
    };
}

impl_uint_native!(u32, u64);
impl_uint_native!(u64, u128);

impl Uint for u128 {
    const BITS: u32 = 128;
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MAX: Self = u128::MAX;
    type Double = U256;

    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        u128::wrapping_add(self, rhs)
    }
    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        u128::wrapping_sub(self, rhs)
    }
    #[inline]
    fn wrapping_mul(self, rhs: Self) -> Self {
        u128::wrapping_mul(self, rhs)
    }
    #[inline]
    fn wrapping_neg(self) -> Self {
        u128::wrapping_neg(self)
    }
    #[inline]
    fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        u128::overflowing_add(self, rhs)
    }
    #[inline]
    fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        u128::overflowing_sub(self, rhs)
    }
    #[inline]
    fn wrapping_shl(self, n: u32) -> Self {
        u128::wrapping_shl(self, n)
    }
    #[inline]
    fn wrapping_shr(self, n: u32) -> Self {
        u128::wrapping_shr(self, n)
    }
    #[inline]
    fn is_odd(self) -> bool {
        self & 1 == 1
    }
    #[inline]
    fn is_zero(self) -> bool {
        self == 0
    }
    #[inline]
    fn trailing_zeros(self) -> u32 {
        u128::trailing_zeros(self)
    }
    #[inline]
    fn leading_zeros(self) -> u32 {
        u128::leading_zeros(self)
    }
    #[inline]
    fn div_rem(self, rhs: Self) -> (Self, Self) {
        (self / rhs, self % rhs)
    }
    #[inline]
    fn widening_mul(self, rhs: Self) -> Self::Double {
        U256::widening_mul(self, rhs)
    }
    #[inline]
    fn double_low(d: Self::Double) -> Self {
        d.low128()
    }
    #[inline]
    fn double_high(d: Self::Double) -> Self {
        d.shr128()
    }
    #[inline]
    fn double_from_low(x: Self) -> Self::Double {
        U256::from_low(x)
    }
    #[inline]
    fn double_add(a: Self::Double, b: Self::Double) -> Self::Double {
        a.wrapping_add(b)
    }
    #[inline]
    fn double_overflowing_add(a: Self::Double, b: Self::Double) -> (Self::Double, bool) {
        a.overflowing_add(b)
    }
    #[inline]
    fn from_u32(x: u32) -> Self {
        x as Self
    }
    #[inline]
    fn from_u64(x: u64) -> Self {
        x as Self
    }
    #[inline]
    fn as_u128(self) -> u128 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_mul_u64_matches_u128_math() {
        let a: u64 = 0xFFFF_FFFF_FFFF_FFFF;
        let b: u64 = 12345;
        let d = Uint::widening_mul(a, b);
        assert_eq!(d, a as u128 * b as u128);
    }

    #[test]
    fn widening_mul_u128_matches_reference() {
        let a: u128 = 0x1234_5678_9ABC_DEF0_1122_3344_5566_7788;
        let b: u128 = 0x0FED_CBA9_8765_4321_8877_6655_4433_2211;
        let d = Uint::widening_mul(a, b);
        assert_eq!(d, U256::widening_mul(a, b));
    }
}
