//! Deterministic primality testing and integer factorization for unsigned
//! integers up to 128 bits.
//!
//! The entry points are [`is_prime`], [`factorize`], [`greatest_common_divisor`],
//! and the two single-factor finders [`get_single_factor_ecm`] and
//! [`get_single_factor_pollard_rho`]. Everything else (the generic
//! [`uint::Uint`] trait, the Montgomery domain, Miller-Rabin, Pollard-Rho-Brent,
//! and ECM) is exposed for callers who want to work at a specific integer
//! width directly instead of through the always-`u128` convenience layer.

mod config;
mod ecm;
mod error;
mod factorize;
mod miller_rabin;
mod modular;
mod montgomery;
mod pollard_rho;
mod rng;
mod u256;
mod uint;

pub use error::PreconditionError;
pub use factorize::{factorize, get_single_factor_ecm, get_single_factor_pollard_rho, is_prime, Factors, FactorSink};
pub use modular::greatest_common_divisor;
pub use montgomery::{CanonicalValue, Full, Half, MontgomeryForm, MontgomeryRange, MontgomeryValue, Quarter, Sixth};
pub use uint::Uint;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_seed_scenarios() {
        assert!(is_prime(67967));
        assert!(is_prime(40_000_000_003));
        assert!(is_prime(18_446_744_073_709_551_557));
        assert!(!is_prime(8_589_934_592));

        let mut sink: Vec<u128> = Vec::new();
        let mut loc_lcg = 0u64;
        factorize(40_000_000_025, &mut sink, &mut loc_lcg);
        sink.sort_unstable();
        assert_eq!(sink, vec![5, 5, 1_600_000_001]);
    }

    #[test]
    fn public_gcd_reexport() {
        assert_eq!(greatest_common_divisor(12u128, 18).unwrap(), 6);
        assert!(greatest_common_divisor(0u128, 0).is_err());
    }
}
