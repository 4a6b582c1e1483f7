//! Tunable constants (§6 "Configuration"), gathered in one place so the
//! driver, Pollard-Rho and ECM modules all read from a single source of
//! truth. The source spreads these across preprocessor macros
//! (`HURCHALLA_POLLARD_RHO_BRENT_GCD_THRESHOLD` and friends); a `const` module
//! is the idiomatic Rust equivalent uutils-coreutils' `src/factor` tree uses
//! for its own tunables.

/// Primes below 256, used for the driver's initial trial-division pass
/// (§4.6). Every composite with a factor this small is removed before any
/// Montgomery context is even constructed.
pub const SMALL_PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Below this bound, trial division alone has already proven primality (the
/// square of the largest prime in [`SMALL_PRIMES`] comfortably exceeds it),
/// so `is_prime` can skip Miller-Rabin entirely.
pub const ALWAYS_PRIME_LIMIT: u64 = 251 * 251;

/// Batched-GCD accumulator size for Pollard-Rho-Brent (§4.4), taken from the
/// source's `HURCHALLA_POLLARD_RHO_BRENT_GCD_THRESHOLD`: multiply this many
/// running differences together before paying for one gcd call.
pub const POLLARD_RHO_GCD_THRESHOLD: usize = 608;

/// Initial cycle-detection segment length for Pollard-Rho-Brent, from
/// `HURCHALLA_POLLARD_RHO_BRENT_STARTING_LENGTH`. Brent's algorithm doubles
/// this each time a segment completes without finding a nontrivial factor.
pub const POLLARD_RHO_STARTING_LENGTH: usize = 19;

/// Bit-width threshold above which the factorization driver prefers ECM over
/// repeated Pollard-Rho-Brent attempts for the next factor (§4.6): ECM's
/// running time depends on the size of the factor found, not of `n`, which
/// pays off once `n` itself is large enough that Pollard-Rho's `O(sqrt(p))`
/// behavior against its smallest factor becomes the bottleneck.
pub const ECM_CROSSOVER_BITS: u32 = 64;

/// Default curve budget for a single `get_single_factor_ecm` call before the
/// driver falls back to Pollard-Rho-Brent (§4.5's target: at least 99.9%
/// success within this many curves against a 60-bit composite with a factor
/// under 2^20).
pub const ECM_DEFAULT_CURVE_COUNT: u32 = 32;

/// Stage-1 bound (the largest prime power whose PRAC chain is applied to the
/// base point) for the default curve budget above.
pub const ECM_STAGE1_BOUND: u64 = 2_000;

/// Stage-2 bound: after stage 1, stage-2 baby-step/giant-step continues
/// checking prime factors of `k!`-style group orders up to this limit.
pub const ECM_STAGE2_BOUND: u64 = 100_000;

/// Upper bound on Pollard-Rho-Brent retries for one composite before the
/// driver gives up and falls back to ECM (§4.6: "no hard cap on retries" in
/// principle, but a real driver still needs a finite bound to stay
/// responsive against pathological inputs; this is generous enough that
/// exhausting it in practice only happens once ECM is already the better
/// tool for the job).
pub const POLLARD_RHO_MAX_ATTEMPTS: u32 = 4_096;
