//! Pre-sieve: the multiples of the smallest sieving primes repeat with
//! period primorial(limit), so they are crossed off once into a pattern
//! buffer and every fresh segment starts as a copy of that pattern
//! instead of striking 7, 11, 13, ... individually.

use crate::erat_small::EratSmall;
use crate::params::pre_sieve_limit;
use crate::wheel::CLASS_INDEX;

const PRE_SIEVE_PRIMES: [u64; 5] = [7, 11, 13, 17, 19];

pub struct PreSieve {
    limit: u64,
    /// Primorial of limit, including the wheel factors 2 * 3 * 5.
    prime_product: u64,
    /// One period of the pattern: prime_product / 30 bytes.
    buffer: Vec<u8>,
}

impl PreSieve {
    pub fn new(start: u64, stop: u64) -> PreSieve {
        let limit = pre_sieve_limit(start, stop);
        let mut prime_product = 30u64;
        for &p in PRE_SIEVE_PRIMES.iter() {
            if p <= limit {
                prime_product *= p;
            }
        }
        let size = (prime_product / 30) as usize;
        let mut buffer = vec![0xffu8; size];

        // cross off one full period; sieving the window starting at
        // prime_product keeps every first multiple inside the buffer
        let mut erat = EratSmall::new(prime_product * 2, size, limit)
            .expect("pre-sieve buffer is within the engine limits");
        for &p in PRE_SIEVE_PRIMES.iter() {
            if p <= limit {
                erat.store(p, prime_product);
            }
        }
        erat.cross_off(&mut buffer);

        PreSieve {
            limit,
            prime_product,
            buffer,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Seed a fresh segment with the pattern, aligned to the segment's
    /// position within the pattern period.
    pub fn apply(&self, sieve: &mut [u8], segment_low: u64) {
        let index = ((segment_low % self.prime_product) / 30) as usize;
        let size = self.buffer.len();

        let mut copied = (size - index).min(sieve.len());
        sieve[..copied].copy_from_slice(&self.buffer[index..index + copied]);
        while copied < sieve.len() {
            let n = size.min(sieve.len() - copied);
            sieve[copied..copied + n].copy_from_slice(&self.buffer[..n]);
            copied += n;
        }

        // the pattern removes the pre-sieve primes themselves; set them
        // back in the lowest segment
        if segment_low <= self.limit {
            for &p in PRE_SIEVE_PRIMES.iter() {
                if p <= self.limit {
                    let bit = CLASS_INDEX[(p % 30) as usize];
                    sieve[0] |= 1 << bit as u32;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wheel::BIT_VALUES;

    #[test]
    fn pattern_matches_naive_marking() {
        // distance selects the limit-13 pattern: 30030 / 30 = 1001 bytes
        let ps = PreSieve::new(0, 1000);
        assert_eq!(ps.limit(), 13);
        assert_eq!(ps.buffer.len(), 1001);

        for (k, &byte) in ps.buffer.iter().enumerate() {
            for (b, &v) in BIT_VALUES.iter().enumerate() {
                let n = 30 * k as u64 + v;
                let composite = n % 7 == 0 || n % 11 == 0 || n % 13 == 0;
                let set = byte & (1 << b) != 0;
                assert_eq!(set, !composite, "n = {}", n);
            }
        }
    }

    #[test]
    fn apply_wraps_and_restores_small_primes() {
        let ps = PreSieve::new(0, 1000);
        let mut segment = vec![0u8; 4096];
        ps.apply(&mut segment, 0);
        // 7, 11, 13 restored in the first segment
        assert_eq!(segment[0] & 0b0000_0111, 0b0000_0111);
        // wrap-around keeps the pattern periodic
        ps.apply(&mut segment, 30030 * 3);
        assert_eq!(&segment[..1001], &ps.buffer[..]);
        let mut shifted = vec![0u8; 100];
        ps.apply(&mut shifted, 30 * 1000);
        assert_eq!(shifted[0], ps.buffer[1000]);
        assert_eq!(&shifted[1..100], &ps.buffer[..99]);
    }
}
