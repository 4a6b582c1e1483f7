//! Error types for the rare operations that have a legitimate, caller-visible
//! failure mode (as opposed to precondition violations, which abort per the
//! crate's error-handling design — see `DESIGN.md`).

use thiserror::Error;

/// Returned by operations whose contract can fail on specific, legal inputs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    /// `greatest_common_divisor(0, 0)` was requested; gcd is undefined there.
    #[error("greatest_common_divisor(0, 0) is undefined")]
    GcdOfZeroAndZero,
    /// `modinverse(a, n)` was requested but `gcd(a, n) != 1`, so no inverse
    /// exists.
    #[error("no modular inverse exists: gcd(a, n) != 1")]
    NoInverseExists,
}
