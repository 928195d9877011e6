//! Segment driver: walks [start, stop] in cache sized segments, seeds
//! each segment from the pre-sieve pattern, runs the three cross-off
//! engines in order (EratSmall first while the buffer is hot, EratBig
//! last because its bucket draining touches memory outside the segment),
//! then scans the finished segment for the active tasks.
//!
//! Sieving primes arrive in ascending order from the streaming generator;
//! the driver sieves segments lazily until segmentHigh >= prime^2 before
//! dispatching a prime to its engine, which bounds every stored multiple
//! offset to roughly one segment.

use std::ops::ControlFlow;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use lazy_static::lazy_static;

use crate::erat_big::EratBig;
use crate::erat_medium::EratMedium;
use crate::erat_small::EratSmall;
use crate::error::{Error, Result};
use crate::generate::SievingPrimes;
use crate::nums::isqrt;
use crate::params::{FACTOR_ERAT_MEDIUM, FACTOR_ERAT_SMALL};
use crate::presieve::PreSieve;
use crate::sieve::SharedStatus;
use crate::timers::{Phase, Timers};
use crate::wheel::{BIT_VALUES, NUMBERS_PER_BYTE};

lazy_static! {
    /// Set bits per byte value, for the prime-count scan.
    static ref POPCOUNT: [u8; 256] = {
        let mut table = [0u8; 256];
        for (i, t) in table.iter_mut().enumerate() {
            *t = (i as u8).count_ones() as u8;
        }
        table
    };
}

/// Byte masks of the admissible prime k-tuplet patterns; every pattern
/// fits inside one 30-block thanks to the bit encoding. Index 0 (plain
/// primes) is counted by popcount instead.
const TUPLET_MASKS: [&[u8]; 7] = [
    &[],
    &[0x06, 0x18, 0xc0],
    &[0x07, 0x0e, 0x1c, 0x38],
    &[0x1e],
    &[0x1f, 0x3e],
    &[0x3f],
    &[0xfe],
];

/// What to do with a finished segment.
pub struct Task<'a> {
    pub count: [bool; 7],
    pub print: [bool; 7],
    pub callback: Option<&'a mut dyn FnMut(u64) -> ControlFlow<()>>,
}

impl<'a> Task<'a> {
    fn scans_bits(&self) -> bool {
        self.print[0] || self.callback.is_some()
    }
}

pub struct Finder<'a> {
    start: u64,
    stop: u64,
    low0: u64,
    segment_low: u64,
    segment_high: u64,
    finished: bool,
    sieve: Vec<u8>,
    pre_sieve: PreSieve,
    erat_small: EratSmall,
    erat_medium: EratMedium,
    erat_big: EratBig,
    max_small: u64,
    max_medium: u64,
    pub counts: [u64; 7],
    task: Task<'a>,
    status: Option<Arc<SharedStatus>>,
    timers: Option<Rc<Timers>>,
}

impl<'a> Finder<'a> {
    /// `start` must already be clamped to >= 7 by the caller; primes and
    /// tuplets below 7 have no residue among the coprime set and are
    /// handled by the small-prime pre-pass.
    pub fn new(
        start: u64,
        stop: u64,
        sieve_size: usize,
        task: Task<'a>,
        status: Option<Arc<SharedStatus>>,
        timers: Option<Rc<Timers>>,
    ) -> Result<Finder<'a>> {
        debug_assert!((7..=stop).contains(&start));
        let sqrt_stop = isqrt(stop);
        let max_small = (sieve_size as f64 * FACTOR_ERAT_SMALL) as u64;
        let max_medium = sieve_size as u64 * FACTOR_ERAT_MEDIUM;
        let low0 = (start - 7) / 30 * 30;
        Ok(Finder {
            start,
            stop,
            low0,
            segment_low: low0,
            segment_high: segment_high(low0, sieve_size),
            finished: false,
            sieve: vec![0; sieve_size],
            pre_sieve: PreSieve::new(start, stop),
            erat_small: EratSmall::new(stop, sieve_size, max_small.min(sqrt_stop))?,
            erat_medium: EratMedium::new(stop, sieve_size, max_medium.min(sqrt_stop))?,
            erat_big: EratBig::new(stop, sieve_size, sqrt_stop)?,
            max_small,
            max_medium,
            counts: [0; 7],
            task,
            status,
            timers,
        })
    }

    pub fn sieve(&mut self) -> Result<()> {
        let sieving_primes = SievingPrimes::new(isqrt(self.stop));
        let pre_sieve_limit = self.pre_sieve.limit();
        for prime in sieving_primes {
            while self.segment_high < prime * prime {
                self.sieve_segment()?;
            }
            if prime > pre_sieve_limit {
                self.dispatch(prime);
            }
        }
        while !self.finished {
            self.sieve_segment()?;
        }
        Ok(())
    }

    fn dispatch(&mut self, prime: u64) {
        let low = self.segment_low;
        if prime <= self.max_small {
            self.erat_small.store(prime, low);
        } else if prime <= self.max_medium {
            self.erat_medium.store(prime, low);
        } else {
            self.erat_big.store(prime, low);
        }
    }

    fn sieve_segment(&mut self) -> Result<()> {
        debug_assert!(!self.finished);
        let low = self.segment_low;
        let size = self.sieve.len();

        let mut t = Instant::now();
        self.pre_sieve.apply(&mut self.sieve, low);
        if let Some(tm) = &self.timers {
            tm.record(Phase::PreSieve, t);
            t = Instant::now();
        }
        self.erat_small.cross_off(&mut self.sieve);
        if let Some(tm) = &self.timers {
            tm.record(Phase::EratSmall, t);
            t = Instant::now();
        }
        self.erat_medium.cross_off(&mut self.sieve);
        if let Some(tm) = &self.timers {
            tm.record(Phase::EratMedium, t);
            t = Instant::now();
        }
        self.erat_big.cross_off(&mut self.sieve);
        if let Some(tm) = &self.timers {
            tm.record(Phase::EratBig, t);
            t = Instant::now();
        }

        if low == self.low0 {
            self.mask_below_start();
        }
        let last = self.stop - low <= NUMBERS_PER_BYTE * size as u64 + 6;
        if last {
            self.mask_above_stop();
        }

        let scanned = self.scan(low);
        if let Some(tm) = &self.timers {
            tm.record(Phase::Scan, t);
        }

        if let Some(status) = &self.status {
            let high = self.stop.min(low.saturating_add(NUMBERS_PER_BYTE * size as u64 + 6));
            // segments tile (low + 6, low + 30 * size + 6]
            let from = if low == self.low0 { self.start } else { low + 7 };
            status.add(high - from + 1);
        }

        match low.checked_add(NUMBERS_PER_BYTE * size as u64) {
            Some(next) if next <= self.stop - 7 => {
                self.segment_low = next;
                self.segment_high = segment_high(next, size);
            }
            _ => self.finished = true,
        }
        scanned
    }

    /// Clear the bits of numbers below start in the first segment; only
    /// byte 0 can hold such bits since low0 is at most 29 below start - 7.
    fn mask_below_start(&mut self) {
        let low = self.segment_low;
        for (b, &v) in BIT_VALUES.iter().enumerate() {
            if low + v < self.start {
                self.sieve[0] &= !(1 << b);
            }
        }
    }

    /// Clear the bits of numbers above stop in the final segment.
    fn mask_above_stop(&mut self) {
        let low = self.segment_low;
        let d = self.stop - low;
        debug_assert!(d >= 7);
        let kb = ((d - 7) / 30) as usize;
        for (b, &v) in BIT_VALUES.iter().enumerate() {
            if 30 * kb as u64 + v > d {
                self.sieve[kb] &= !(1 << b);
            }
        }
        for byte in self.sieve[kb + 1..].iter_mut() {
            *byte = 0;
        }
    }

    fn scan(&mut self, low: u64) -> Result<()> {
        let sieve = &self.sieve;
        let counts = &mut self.counts;
        let task = &mut self.task;

        if task.count[0] {
            let mut c = 0u64;
            for &byte in sieve.iter() {
                c += POPCOUNT[byte as usize] as u64;
            }
            counts[0] += c;
        }

        for k in 1..7 {
            if !(task.count[k] || task.print[k]) {
                continue;
            }
            for (i, &byte) in sieve.iter().enumerate() {
                for &mask in TUPLET_MASKS[k] {
                    if byte & mask == mask {
                        if task.count[k] {
                            counts[k] += 1;
                        }
                        if task.print[k] {
                            print_tuplet(low + NUMBERS_PER_BYTE * i as u64, mask);
                        }
                    }
                }
            }
        }

        if task.scans_bits() {
            for (i, &byte) in sieve.iter().enumerate() {
                let mut bits = byte;
                while bits != 0 {
                    let bit = bits.trailing_zeros() as usize;
                    bits &= bits - 1;
                    let prime = low + NUMBERS_PER_BYTE * i as u64 + BIT_VALUES[bit];
                    if task.print[0] {
                        println!("{}", prime);
                    }
                    if let Some(callback) = task.callback.as_mut() {
                        if callback(prime).is_break() {
                            return Err(Error::Stopped);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn segment_high(low: u64, sieve_size: usize) -> u64 {
    low.saturating_add(NUMBERS_PER_BYTE * sieve_size as u64 + 6)
}

fn print_tuplet(base: u64, mask: u8) {
    let mut out = String::from("(");
    let mut bits = mask;
    while bits != 0 {
        let bit = bits.trailing_zeros() as usize;
        bits &= bits - 1;
        if out.len() > 1 {
            out.push_str(", ");
        }
        out.push_str(&(base + BIT_VALUES[bit]).to_string());
    }
    out.push(')');
    println!("{}", out);
}
