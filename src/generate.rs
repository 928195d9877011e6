//! Supplies the sieving primes: a flat sieve bootstraps the primes up to
//! sqrt(limit), then a windowed odd-only sieve streams every prime in
//! 7..=limit in ascending order. The driver consumes this stream lazily,
//! interleaved with segment sieving, so the limit (up to 2^32) never has
//! to be materialized as one allocation.

use bitvector::BitVector;

use crate::nums::{isqrt, prime_count_approx};

/// Flat sieve over the odd numbers in [3, bound]; bit i of the map is
/// the number 2i + 3. The generator bootstrap needs at most bound = 2^16
/// (the fourth root of the largest stop), so the map stays tiny there.
pub fn simple_primes(bound: u64) -> Vec<u64> {
    if bound < 2 {
        return Vec::new();
    }
    if bound < 3 {
        return vec![2];
    }
    let odds = ((bound - 1) / 2) as usize;
    let mut is_prime = BitVector::ones(odds);

    // crossing stops at sqrt(bound); every odd composite <= bound has an
    // odd factor at most that large
    let mut p = 3u64;
    while p * p <= bound {
        if is_prime.contains(((p - 3) / 2) as usize) {
            let mut m = p * p;
            while m <= bound {
                is_prime.remove(((m - 3) / 2) as usize);
                m += 2 * p;
            }
        }
        p += 2;
    }

    let mut primes = Vec::with_capacity(prime_count_approx(bound));
    primes.push(2);
    for i in 0..odds {
        if is_prime.contains(i) {
            primes.push(2 * i as u64 + 3);
        }
    }
    primes
}

/// Numbers per refill window of the streaming sieve.
const WINDOW: u64 = 1 << 19;

pub struct SievingPrimes {
    limit: u64,
    /// Odd primes <= sqrt(limit).
    base: Vec<u64>,
    /// First number of the next window.
    low: u64,
    buffer: Vec<u64>,
    pos: usize,
}

impl SievingPrimes {
    pub fn new(limit: u64) -> SievingPrimes {
        let base = simple_primes(isqrt(limit))
            .into_iter()
            .filter(|&p| p > 2)
            .collect();
        SievingPrimes {
            limit,
            base,
            low: 7,
            buffer: Vec::new(),
            pos: 0,
        }
    }

    fn fill(&mut self) -> bool {
        if self.low > self.limit {
            return false;
        }
        let high = self.low.saturating_add(WINDOW - 1).min(self.limit);
        let first = self.low | 1;
        let count = (high - first) / 2 + 1;

        let mut bits = BitVector::ones(count as usize);
        for &p in self.base.iter() {
            let p2 = p * p;
            if p2 > high {
                break;
            }
            // first odd multiple of p in the window, at least p^2
            let mut m = if p2 >= first {
                p2
            } else {
                let mut m = first + (p - first % p) % p;
                if m % 2 == 0 {
                    m += p;
                }
                m
            };
            while m <= high {
                bits.remove(((m - first) / 2) as usize);
                m += 2 * p;
            }
        }

        self.buffer.clear();
        for i in 0..count {
            if bits.contains(i as usize) {
                self.buffer.push(first + 2 * i);
            }
        }
        self.low = high + 1;
        self.pos = 0;
        true
    }
}

impl Iterator for SievingPrimes {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.pos >= self.buffer.len() {
            if !self.fill() {
                return None;
            }
        }
        let p = self.buffer[self.pos];
        self.pos += 1;
        Some(p)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn simple_primes_test() {
        assert_eq!(simple_primes(1), vec![]);
        assert_eq!(simple_primes(2), vec![2]);
        assert_eq!(simple_primes(3), vec![2, 3]);
        assert_eq!(simple_primes(11), vec![2, 3, 5, 7, 11]);
        assert_eq!(simple_primes(12), vec![2, 3, 5, 7, 11]);
        assert_eq!(
            simple_primes(100),
            vec![
                2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79,
                83, 89, 97
            ]
        );
        assert_eq!(simple_primes(10_000).len(), 1229);
    }

    #[test]
    fn streaming_matches_flat() {
        for limit in [6, 7, 8, 48, 49, 100, 1 << 16, (1 << 19) + 1000] {
            let streamed: Vec<u64> = SievingPrimes::new(limit).collect();
            let flat: Vec<u64> = simple_primes(limit)
                .into_iter()
                .filter(|&p| p >= 7)
                .collect();
            assert_eq!(streamed, flat, "limit {}", limit);
        }
    }

    #[test]
    fn empty_below_seven() {
        assert_eq!(SievingPrimes::new(0).count(), 0);
        assert_eq!(SievingPrimes::new(6).count(), 0);
        assert_eq!(SievingPrimes::new(7).collect::<Vec<_>>(), vec![7]);
    }
}
