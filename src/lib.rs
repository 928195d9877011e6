//! Fast generation of primes and prime k-tuplets (twins, triplets, ...,
//! septuplets) in arbitrary intervals up to 2^64 - 1, using a segmented
//! sieve of Eratosthenes with wheel factorization and three cross-off
//! engines tuned to the magnitude of the sieving primes.
//!
//! The convenience functions below cover the common cases; use
//! [`PrimeSieve`] or [`ParallelPrimeSieve`] directly for flags, timings
//! and status reporting.

use std::ops::ControlFlow;

pub mod erat_big;
pub mod erat_medium;
pub mod erat_small;
pub mod error;
pub mod finder;
pub mod generate;
pub mod nums;
pub mod parallel;
pub mod params;
pub mod presieve;
pub mod sieve;
pub mod timers;
pub mod wheel;

pub use error::{Error, Result};
pub use parallel::ParallelPrimeSieve;
pub use sieve::PrimeSieve;

/// Count the primes in [start, stop] using all CPU cores.
pub fn count_primes(start: u64, stop: u64) -> Result<u64> {
    ParallelPrimeSieve::new().count_primes(start, stop)
}

pub fn count_twins(start: u64, stop: u64) -> Result<u64> {
    ParallelPrimeSieve::new().count_twins(start, stop)
}

pub fn count_triplets(start: u64, stop: u64) -> Result<u64> {
    ParallelPrimeSieve::new().count_triplets(start, stop)
}

pub fn count_quadruplets(start: u64, stop: u64) -> Result<u64> {
    ParallelPrimeSieve::new().count_quadruplets(start, stop)
}

pub fn count_quintuplets(start: u64, stop: u64) -> Result<u64> {
    ParallelPrimeSieve::new().count_quintuplets(start, stop)
}

pub fn count_sextuplets(start: u64, stop: u64) -> Result<u64> {
    ParallelPrimeSieve::new().count_sextuplets(start, stop)
}

pub fn count_septuplets(start: u64, stop: u64) -> Result<u64> {
    ParallelPrimeSieve::new().count_septuplets(start, stop)
}

/// Print the primes in [start, stop] to stdout, one per line.
pub fn print_primes(start: u64, stop: u64) -> Result<()> {
    PrimeSieve::new().print_primes(start, stop)
}

pub fn print_twins(start: u64, stop: u64) -> Result<()> {
    PrimeSieve::new().print_twins(start, stop)
}

pub fn print_triplets(start: u64, stop: u64) -> Result<()> {
    PrimeSieve::new().print_triplets(start, stop)
}

pub fn print_quadruplets(start: u64, stop: u64) -> Result<()> {
    PrimeSieve::new().print_quadruplets(start, stop)
}

pub fn print_quintuplets(start: u64, stop: u64) -> Result<()> {
    PrimeSieve::new().print_quintuplets(start, stop)
}

pub fn print_sextuplets(start: u64, stop: u64) -> Result<()> {
    PrimeSieve::new().print_sextuplets(start, stop)
}

pub fn print_septuplets(start: u64, stop: u64) -> Result<()> {
    PrimeSieve::new().print_septuplets(start, stop)
}

/// The nth prime counting from start inclusive; negative n finds the
/// nth prime <= start.
pub fn nth_prime(n: i64, start: u64) -> Result<u64> {
    ParallelPrimeSieve::new().nth_prime(n, start)
}

/// All primes in [start, stop] in ascending order.
pub fn generate_primes(start: u64, stop: u64) -> Result<Vec<u64>> {
    PrimeSieve::new().generate_primes(start, stop)
}

/// The next n primes >= start.
pub fn generate_n_primes(n: u64, start: u64) -> Result<Vec<u64>> {
    PrimeSieve::new().generate_n_primes(n, start)
}

/// Invoke `callback` for every prime in [start, stop] in ascending
/// order; return ControlFlow::Break to stop early.
pub fn for_each_prime(
    start: u64,
    stop: u64,
    callback: impl FnMut(u64) -> ControlFlow<()>,
) -> Result<()> {
    PrimeSieve::new().for_each_prime(start, stop, callback)
}

/// Largest supported stop value.
pub const fn max_stop() -> u64 {
    u64::MAX
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
