//! Cross-off engine for medium sieving primes (p <= sieveSize *
//! FACTOR_ERAT_MEDIUM). Each prime has only a few multiples per segment,
//! so loop unrolling pays less than for EratSmall; instead three primes
//! are interleaved per outer iteration to expose instruction level
//! parallelism.

use crate::error::{Error, Result};
use crate::nums::prime_count_approx;
use crate::params::{FACTOR_ERAT_MEDIUM, MAX_SIEVE_BYTES};
use crate::wheel::{self, SievingPrime, INIT210, WHEEL210, WHEEL210_SIZE};

pub struct EratMedium {
    stop: u64,
    max_prime: u64,
    primes: Vec<SievingPrime>,
}

impl EratMedium {
    pub fn new(stop: u64, sieve_size: usize, max_prime: u64) -> Result<EratMedium> {
        // ensure multipleIndex stays within its packed field in cross_off
        if sieve_size > MAX_SIEVE_BYTES {
            return Err(Error::Config(
                "EratMedium: sieveSize must be <= 4096 KiB".into(),
            ));
        }
        if max_prime > sieve_size as u64 * FACTOR_ERAT_MEDIUM {
            return Err(Error::Config(
                "EratMedium: maxPrime must be <= sieveSize * 5".into(),
            ));
        }
        Ok(EratMedium {
            stop,
            max_prime,
            primes: Vec::with_capacity(prime_count_approx(max_prime)),
        })
    }

    /// Add a new sieving prime to EratMedium.
    pub fn store(&mut self, prime: u64, segment_low: u64) {
        debug_assert!(prime <= self.max_prime);
        if let Some((multiple_index, wheel_index)) =
            wheel::first_multiple(&INIT210, WHEEL210_SIZE, prime, segment_low, self.stop)
        {
            self.primes
                .push(SievingPrime::new(prime / 30, multiple_index, wheel_index));
        }
    }

    pub fn cross_off(&mut self, sieve: &mut [u8]) {
        let len = sieve.len() as u64;
        let mut trios = self.primes.chunks_exact_mut(3);

        for trio in trios.by_ref() {
            let prime0 = trio[0].sieving_prime();
            let mut mi0 = trio[0].multiple_index();
            let mut wi0 = trio[0].wheel_index();
            let prime1 = trio[1].sieving_prime();
            let mut mi1 = trio[1].multiple_index();
            let mut wi1 = trio[1].wheel_index();
            let prime2 = trio[2].sieving_prime();
            let mut mi2 = trio[2].multiple_index();
            let mut wi2 = trio[2].wheel_index();

            while mi0 < len {
                wheel::unset_bit(sieve, &WHEEL210, prime0, &mut mi0, &mut wi0);
                if mi1 >= len {
                    break;
                }
                wheel::unset_bit(sieve, &WHEEL210, prime1, &mut mi1, &mut wi1);
                if mi2 >= len {
                    break;
                }
                wheel::unset_bit(sieve, &WHEEL210, prime2, &mut mi2, &mut wi2);
            }

            // whichever lanes left the segment first get scalar tails
            while mi0 < len {
                wheel::unset_bit(sieve, &WHEEL210, prime0, &mut mi0, &mut wi0);
            }
            while mi1 < len {
                wheel::unset_bit(sieve, &WHEEL210, prime1, &mut mi1, &mut wi1);
            }
            while mi2 < len {
                wheel::unset_bit(sieve, &WHEEL210, prime2, &mut mi2, &mut wi2);
            }

            trio[0].set_indexes(mi0 - len, wi0);
            trio[1].set_indexes(mi1 - len, wi1);
            trio[2].set_indexes(mi2 - len, wi2);
        }

        for sp in trios.into_remainder() {
            let sieving_prime = sp.sieving_prime();
            let mut mi = sp.multiple_index();
            let mut wi = sp.wheel_index();
            while mi < len {
                wheel::unset_bit(sieve, &WHEEL210, sieving_prime, &mut mi, &mut wi);
            }
            sp.set_indexes(mi - len, wi);
        }
    }
}
