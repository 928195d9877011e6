//! Tunable constants and environmental defaults. The values here are the
//! only knobs; nothing in this module is consulted by the cross-off
//! engines at runtime, the driver reads them once at construction.

use crate::nums::in_between;

/// Hard upper bound on the segment buffer; EratMedium and EratSmall rely
/// on multipleIndex staying within its packed field at this size.
pub const MAX_SIEVE_BYTES: usize = 4096 << 10;

pub const MIN_SIEVE_KIB: usize = 8;
pub const MAX_SIEVE_KIB: usize = 4096;

/// EratSmall sieves the primes <= sieveSize * FACTOR_ERAT_SMALL; these
/// have many multiples per segment and profit from the unrolled mod-30
/// inner loop.
pub const FACTOR_ERAT_SMALL: f64 = 0.175;

/// EratMedium sieves the primes <= sieveSize * FACTOR_ERAT_MEDIUM (1-5
/// multiples per segment); everything above goes to EratBig.
pub const FACTOR_ERAT_MEDIUM: u64 = 5;

/// Records per EratBig bucket page: 1024 * 8 bytes = 8 KiB per page.
pub const BUCKET_CAPACITY: usize = 1024;

/// Threads beyond interval / MIN_THREAD_INTERVAL are not worth spawning.
pub const MIN_THREAD_INTERVAL: u64 = 10_000_000;

#[derive(Copy, Clone)]
struct SizeParam {
    max_stop: u64,
    kibibytes: usize,
}

/// Default sieve sizes keyed on the magnitude of stop. Small intervals
/// want an L1 resident buffer, large stop values amortize the bigger
/// per-segment bucket work of EratBig over more bytes.
const DEFAULT_SIZES: [SizeParam; 4] = [
    SizeParam { max_stop: 1_000_000_000, kibibytes: 32 },
    SizeParam { max_stop: 1_000_000_000_000, kibibytes: 128 },
    SizeParam { max_stop: 1_000_000_000_000_000, kibibytes: 256 },
    SizeParam { max_stop: u64::MAX, kibibytes: 512 },
];

/// Default segment buffer size in bytes for sieving up to `stop`.
pub fn default_sieve_size(stop: u64) -> usize {
    for p in DEFAULT_SIZES.iter() {
        if stop <= p.max_stop {
            return p.kibibytes << 10;
        }
    }
    DEFAULT_SIZES[DEFAULT_SIZES.len() - 1].kibibytes << 10
}

pub fn default_num_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Pre-sieving limit: larger patterns pay off only on long intervals
/// (the limit-19 pattern is a 323323 byte buffer that must be built
/// before the first segment).
pub fn pre_sieve_limit(start: u64, stop: u64) -> u64 {
    let distance = stop - start;
    if distance < 100_000_000 {
        13
    } else if distance < 10_000_000_000 {
        17
    } else {
        19
    }
}

pub fn clamp_sieve_kib(kibibytes: usize) -> usize {
    crate::nums::floor_pow2(in_between(MIN_SIEVE_KIB, kibibytes, MAX_SIEVE_KIB))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clamp_sieve_kib_test() {
        assert_eq!(clamp_sieve_kib(1), 8);
        assert_eq!(clamp_sieve_kib(8), 8);
        assert_eq!(clamp_sieve_kib(100), 64);
        assert_eq!(clamp_sieve_kib(256), 256);
        assert_eq!(clamp_sieve_kib(1 << 20), 4096);
    }

    #[test]
    fn default_sieve_size_is_valid() {
        for stop in [0, 1 << 20, 1 << 40, u64::MAX] {
            let size = default_sieve_size(stop);
            assert!(size.is_power_of_two());
            assert!((MIN_SIEVE_KIB << 10..=MAX_SIEVE_BYTES).contains(&size));
        }
    }
}
