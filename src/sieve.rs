//! PrimeSieve: the single-threaded public sieving object. Holds the
//! interval, sieve size, task flags, tallies and timing of the last run.

use std::ops::ControlFlow;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::finder::{Finder, Task};
use crate::params::{clamp_sieve_kib, default_sieve_size};
use crate::timers::Timers;

pub const COUNT_PRIMES: u32 = 1 << 0;
pub const COUNT_TWINS: u32 = 1 << 1;
pub const COUNT_TRIPLETS: u32 = 1 << 2;
pub const COUNT_QUADRUPLETS: u32 = 1 << 3;
pub const COUNT_QUINTUPLETS: u32 = 1 << 4;
pub const COUNT_SEXTUPLETS: u32 = 1 << 5;
pub const COUNT_SEPTUPLETS: u32 = 1 << 6;
pub const PRINT_PRIMES: u32 = 1 << 7;
pub const PRINT_TWINS: u32 = 1 << 8;
pub const PRINT_TRIPLETS: u32 = 1 << 9;
pub const PRINT_QUADRUPLETS: u32 = 1 << 10;
pub const PRINT_QUINTUPLETS: u32 = 1 << 11;
pub const PRINT_SEXTUPLETS: u32 = 1 << 12;
pub const PRINT_SEPTUPLETS: u32 = 1 << 13;
pub const PRINT_STATUS: u32 = 1 << 14;

const PUBLIC_FLAGS: u32 = (1 << 15) - 1;

/// All printing task bits; printed output must stay in ascending order.
pub(crate) const PRINT_TASKS: u32 = PRINT_PRIMES
    | PRINT_TWINS
    | PRINT_TRIPLETS
    | PRINT_QUADRUPLETS
    | PRINT_QUINTUPLETS
    | PRINT_SEXTUPLETS
    | PRINT_SEPTUPLETS;

/// Flag counting k-tuplets of order k (1 = primes, 2 = twins, ...).
pub fn count_flag(k: usize) -> u32 {
    debug_assert!((1..=7).contains(&k));
    COUNT_PRIMES << (k - 1)
}

pub fn print_flag(k: usize) -> u32 {
    debug_assert!((1..=7).contains(&k));
    PRINT_PRIMES << (k - 1)
}

/// Processed-interval aggregator shared between the driver and the
/// caller (and between workers in a parallel run).
pub struct SharedStatus {
    processed: AtomicU64,
    total: u64,
    print: bool,
    last_percent: AtomicU64,
}

impl SharedStatus {
    pub(crate) fn new(total: u64, print: bool) -> Arc<SharedStatus> {
        Arc::new(SharedStatus {
            processed: AtomicU64::new(0),
            total: total.max(1),
            print,
            last_percent: AtomicU64::new(0),
        })
    }

    pub(crate) fn add(&self, numbers: u64) {
        let done = self.processed.fetch_add(numbers, Ordering::Relaxed) + numbers;
        if self.print {
            let percent = (done.min(self.total) * 100) / self.total;
            let previous = self.last_percent.fetch_max(percent, Ordering::Relaxed);
            if percent > previous {
                use std::io::Write;
                print!("\rStatus: {}%", percent);
                let _ = std::io::stdout().flush();
                if percent == 100 {
                    println!();
                }
            }
        }
    }

    pub fn percent(&self) -> f64 {
        let done = self.processed.load(Ordering::Relaxed);
        (done as f64 / self.total as f64 * 100.0).min(100.0)
    }
}

struct SmallPrime {
    first: u64,
    last: u64,
    index: usize,
    text: &'static str,
}

/// The primes 2, 3, 5 and the k-tuplets that begin below 7 have no
/// residue among the coprime set mod 30; they are handled by this fixed
/// table before segment sieving starts.
const SMALL_PRIMES: [SmallPrime; 8] = [
    SmallPrime { first: 2, last: 2, index: 0, text: "2" },
    SmallPrime { first: 3, last: 3, index: 0, text: "3" },
    SmallPrime { first: 5, last: 5, index: 0, text: "5" },
    SmallPrime { first: 3, last: 5, index: 1, text: "(3, 5)" },
    SmallPrime { first: 5, last: 7, index: 1, text: "(5, 7)" },
    SmallPrime { first: 5, last: 11, index: 2, text: "(5, 7, 11)" },
    SmallPrime { first: 5, last: 13, index: 3, text: "(5, 7, 11, 13)" },
    SmallPrime { first: 5, last: 17, index: 4, text: "(5, 7, 11, 13, 17)" },
];

pub struct PrimeSieve {
    start: u64,
    stop: u64,
    /// Sieve size in KiB; 0 selects a default from the magnitude of stop.
    sieve_size_kib: usize,
    flags: u32,
    counts: [u64; 7],
    seconds: f64,
    status: Option<Arc<SharedStatus>>,
    /// True when the status aggregator was created by this object (the
    /// PRINT_STATUS flag) rather than attached by a parallel parent.
    owns_status: bool,
    timers: Option<Rc<Timers>>,
}

impl Default for PrimeSieve {
    fn default() -> PrimeSieve {
        PrimeSieve::new()
    }
}

impl PrimeSieve {
    pub fn new() -> PrimeSieve {
        PrimeSieve {
            start: 0,
            stop: 0,
            sieve_size_kib: 0,
            flags: COUNT_PRIMES,
            counts: [0; 7],
            seconds: 0.0,
            status: None,
            owns_status: false,
            timers: None,
        }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn stop(&self) -> u64 {
        self.stop
    }

    /// Set the segment buffer size in KiB; clamped to [8, 4096] and
    /// rounded down to a power of 2.
    pub fn set_sieve_size(&mut self, kibibytes: usize) {
        self.sieve_size_kib = clamp_sieve_kib(kibibytes);
    }

    pub fn sieve_size(&self) -> usize {
        self.sieve_size_kib
    }

    pub fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }

    pub fn add_flags(&mut self, flags: u32) {
        self.flags |= flags;
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn is_count(&self, k: usize) -> bool {
        self.flags & count_flag(k + 1) != 0
    }

    pub fn is_print(&self, k: usize) -> bool {
        self.flags & print_flag(k + 1) != 0
    }

    /// Tallies of the last run: counts()[0] primes, counts()[1] twins, ...
    pub fn counts(&self) -> &[u64; 7] {
        &self.counts
    }

    /// Elapsed seconds of the last run.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Percent completed of the current/last run (needs PRINT_STATUS or
    /// an attached aggregator, otherwise returns 0).
    pub fn status_percent(&self) -> f64 {
        self.status.as_ref().map_or(0.0, |s| s.percent())
    }

    pub(crate) fn attach_status(&mut self, status: Arc<SharedStatus>) {
        self.status = Some(status);
        self.owns_status = false;
    }

    pub fn set_timers(&mut self, timers: Rc<Timers>) {
        self.timers = Some(timers);
    }

    /// Sieve [start, stop] performing the tasks set via flags.
    pub fn sieve(&mut self, start: u64, stop: u64) -> Result<()> {
        self.do_sieve(start, stop, None)
    }

    fn do_sieve(
        &mut self,
        start: u64,
        stop: u64,
        mut callback: Option<&mut dyn FnMut(u64) -> ControlFlow<()>>,
    ) -> Result<()> {
        if start > stop {
            return Err(Error::InvalidInterval { start, stop });
        }
        if self.flags & !PUBLIC_FLAGS != 0 {
            return Err(Error::Config("unknown flag bits set".into()));
        }
        self.start = start;
        self.stop = stop;
        self.counts = [0; 7];
        let time = Instant::now();

        if self.status.is_none() || self.owns_status {
            if self.flags & PRINT_STATUS != 0 {
                let total = (stop - start).saturating_add(1);
                self.status = Some(SharedStatus::new(total, true));
                self.owns_status = true;
            } else if self.owns_status {
                self.status = None;
                self.owns_status = false;
            }
        }

        let mut stopped = false;
        if start < 7 {
            match self.small_primes(start, stop, &mut callback) {
                Err(Error::Stopped) => stopped = true,
                other => other?,
            }
            if let Some(status) = &self.status {
                // the segmented finder only covers numbers >= 7
                status.add(stop.min(6) - start + 1);
            }
        }

        let sieve_start = start.max(7);
        if !stopped && sieve_start <= stop {
            let sieve_size = match self.sieve_size_kib {
                0 => default_sieve_size(stop),
                kib => kib << 10,
            };
            let task = Task {
                count: std::array::from_fn(|k| self.is_count(k)),
                print: std::array::from_fn(|k| self.is_print(k)),
                callback,
            };
            let mut finder = Finder::new(
                sieve_start,
                stop,
                sieve_size,
                task,
                self.status.clone(),
                self.timers.clone(),
            )?;
            match finder.sieve() {
                Ok(()) => {
                    for k in 0..7 {
                        self.counts[k] += finder.counts[k];
                    }
                }
                Err(Error::Stopped) => stopped = true,
                Err(e) => return Err(e),
            }
        }

        if stopped {
            // partial tallies are not meaningful; the callback has seen
            // every prime up to the stop signal
            self.counts = [0; 7];
        }
        self.seconds = time.elapsed().as_secs_f64();
        Ok(())
    }

    fn small_primes(
        &mut self,
        start: u64,
        stop: u64,
        callback: &mut Option<&mut dyn FnMut(u64) -> ControlFlow<()>>,
    ) -> Result<()> {
        for sp in SMALL_PRIMES.iter() {
            if sp.first >= start && sp.last <= stop {
                if self.is_count(sp.index) {
                    self.counts[sp.index] += 1;
                }
                if self.is_print(sp.index) {
                    println!("{}", sp.text);
                }
                if sp.index == 0 {
                    if let Some(cb) = callback.as_mut() {
                        if cb(sp.first).is_break() {
                            return Err(Error::Stopped);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Invoke `callback` for every prime in [start, stop] in ascending
    /// order; returning ControlFlow::Break stops the sieve cleanly.
    pub fn for_each_prime(
        &mut self,
        start: u64,
        stop: u64,
        mut callback: impl FnMut(u64) -> ControlFlow<()>,
    ) -> Result<()> {
        self.flags = 0;
        self.do_sieve(start, stop, Some(&mut callback))
    }

    pub fn generate_primes(&mut self, start: u64, stop: u64) -> Result<Vec<u64>> {
        let mut primes = Vec::new();
        self.for_each_prime(start, stop, |p| {
            primes.push(p);
            ControlFlow::Continue(())
        })?;
        Ok(primes)
    }

    /// The next n primes >= start.
    pub fn generate_n_primes(&mut self, n: u64, start: u64) -> Result<Vec<u64>> {
        let mut primes = Vec::with_capacity(n as usize);
        let mut low = start;
        while (primes.len() as u64) < n {
            let remaining = n - primes.len() as u64;
            let stop = low.saturating_add(remaining * 50 + 10_000);
            self.for_each_prime(low, stop, |p| {
                primes.push(p);
                if primes.len() as u64 == n {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })?;
            if stop == u64::MAX {
                break;
            }
            low = stop + 1;
        }
        if (primes.len() as u64) < n {
            return Err(Error::Config(format!(
                "not enough primes below 2^64 (found {})",
                primes.len()
            )));
        }
        Ok(primes)
    }

    pub fn count_primes(&mut self, start: u64, stop: u64) -> Result<u64> {
        self.count_ktuplets(1, start, stop)
    }

    pub fn count_twins(&mut self, start: u64, stop: u64) -> Result<u64> {
        self.count_ktuplets(2, start, stop)
    }

    pub fn count_triplets(&mut self, start: u64, stop: u64) -> Result<u64> {
        self.count_ktuplets(3, start, stop)
    }

    pub fn count_quadruplets(&mut self, start: u64, stop: u64) -> Result<u64> {
        self.count_ktuplets(4, start, stop)
    }

    pub fn count_quintuplets(&mut self, start: u64, stop: u64) -> Result<u64> {
        self.count_ktuplets(5, start, stop)
    }

    pub fn count_sextuplets(&mut self, start: u64, stop: u64) -> Result<u64> {
        self.count_ktuplets(6, start, stop)
    }

    pub fn count_septuplets(&mut self, start: u64, stop: u64) -> Result<u64> {
        self.count_ktuplets(7, start, stop)
    }

    /// Count prime k-tuplets of order k (1 = primes, ..., 7 = septuplets).
    pub fn count_ktuplets(&mut self, k: usize, start: u64, stop: u64) -> Result<u64> {
        self.flags = count_flag(k);
        self.sieve(start, stop)?;
        Ok(self.counts[k - 1])
    }

    pub fn print_primes(&mut self, start: u64, stop: u64) -> Result<()> {
        self.print_ktuplets(1, start, stop)
    }

    pub fn print_twins(&mut self, start: u64, stop: u64) -> Result<()> {
        self.print_ktuplets(2, start, stop)
    }

    pub fn print_triplets(&mut self, start: u64, stop: u64) -> Result<()> {
        self.print_ktuplets(3, start, stop)
    }

    pub fn print_quadruplets(&mut self, start: u64, stop: u64) -> Result<()> {
        self.print_ktuplets(4, start, stop)
    }

    pub fn print_quintuplets(&mut self, start: u64, stop: u64) -> Result<()> {
        self.print_ktuplets(5, start, stop)
    }

    pub fn print_sextuplets(&mut self, start: u64, stop: u64) -> Result<()> {
        self.print_ktuplets(6, start, stop)
    }

    pub fn print_septuplets(&mut self, start: u64, stop: u64) -> Result<()> {
        self.print_ktuplets(7, start, stop)
    }

    pub fn print_ktuplets(&mut self, k: usize, start: u64, stop: u64) -> Result<()> {
        self.flags = print_flag(k);
        self.sieve(start, stop)
    }

    /// Find the nth prime counting from start inclusive; negative n
    /// counts downwards (nth prime <= start).
    pub fn nth_prime(&mut self, n: i64, start: u64) -> Result<u64> {
        let n = if n == 0 { 1 } else { n };
        if n > 0 {
            self.nth_prime_forward(n as u64, start)
        } else {
            self.nth_prime_backward(n.unsigned_abs(), start)
        }
    }

    fn nth_prime_forward(&mut self, n: u64, start: u64) -> Result<u64> {
        let mut count = 0u64;
        let mut low = start;
        loop {
            let high = low.saturating_add(nth_prime_dist(n - count, low));
            let c = self.count_primes(low, high)?;
            if count + c >= n {
                let mut remaining = n - count;
                let mut result = 0;
                self.for_each_prime(low, high, |p| {
                    remaining -= 1;
                    if remaining == 0 {
                        result = p;
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                })?;
                return Ok(result);
            }
            count += c;
            if high == u64::MAX {
                return Err(Error::Config("nth prime exceeds 2^64 - 1".into()));
            }
            low = high + 1;
        }
    }

    fn nth_prime_backward(&mut self, n: u64, start: u64) -> Result<u64> {
        let mut remaining = n;
        let mut high = start;
        loop {
            let low = high.saturating_sub(nth_prime_dist(remaining, high));
            let c = self.count_primes(low, high)?;
            if c >= remaining {
                let mut k = c - remaining;
                let mut result = 0;
                self.for_each_prime(low, high, |p| {
                    if k == 0 {
                        result = p;
                        ControlFlow::Break(())
                    } else {
                        k -= 1;
                        ControlFlow::Continue(())
                    }
                })?;
                return Ok(result);
            }
            remaining -= c;
            if low == 0 {
                return Err(Error::Config(format!(
                    "nth prime below start does not exist (missing {})",
                    remaining
                )));
            }
            high = low - 1;
        }
    }
}

/// Estimated interval length containing the next n primes above start,
/// from the prime number theorem plus generous padding.
fn nth_prime_dist(n: u64, start: u64) -> u64 {
    let n = n.max(10) as f64;
    let x = (start as f64).max(10.0) + n * 20.0;
    let ln = x.ln();
    (n * (ln + ln.ln()) * 1.1) as u64 + 10_000
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::generate::simple_primes;
    use crate::nums::isqrt;

    /// Trial-marking oracle over [start, stop].
    fn naive_primes(start: u64, stop: u64) -> Vec<u64> {
        let mut out = vec![];
        if stop < 2 || start > stop {
            return out;
        }
        let base = simple_primes(isqrt(stop));
        let len = (stop - start + 1) as usize;
        let mut composite = vec![false; len];
        for &p in base.iter() {
            let first = ((start + p - 1) / p * p).max(p * p);
            let mut m = first;
            while m <= stop {
                composite[(m - start) as usize] = true;
                m += p;
            }
        }
        for (i, &c) in composite.iter().enumerate() {
            let n = start + i as u64;
            if n >= 2 && !c {
                out.push(n);
            }
        }
        out
    }

    /// Oracle k-tuplet counter over the admissible constellations.
    fn naive_ktuplets(k: usize, start: u64, stop: u64) -> u64 {
        const PATTERNS: [&[&[u64]]; 7] = [
            &[&[0]],
            &[&[0, 2]],
            &[&[0, 2, 6], &[0, 4, 6]],
            &[&[0, 2, 6, 8]],
            &[&[0, 2, 6, 8, 12], &[0, 4, 6, 10, 12]],
            &[&[0, 4, 6, 10, 12, 16]],
            &[&[0, 2, 6, 8, 12, 18, 20]],
        ];
        let primes = naive_primes(start, stop.saturating_add(20));
        let set: std::collections::HashSet<u64> = primes.iter().copied().collect();
        let mut count = 0;
        for &p in primes.iter() {
            for pat in PATTERNS[k - 1] {
                if pat.iter().all(|&d| set.contains(&(p + d))) && p + pat[pat.len() - 1] <= stop {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn counts_25_primes_below_100() {
        let mut ps = PrimeSieve::new();
        assert_eq!(ps.count_primes(1, 100).unwrap(), 25);
        assert_eq!(
            ps.generate_primes(1, 100).unwrap(),
            vec![
                2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79,
                83, 89, 97
            ]
        );
    }

    #[test]
    fn counts_35_twins_below_1000() {
        assert_eq!(PrimeSieve::new().count_twins(1, 1000).unwrap(), 35);
    }

    #[test]
    fn matches_oracle_on_varied_intervals() {
        let intervals = [
            (0u64, 0u64),
            (0, 1),
            (0, 2),
            (2, 2),
            (0, 30),
            (1, 1000),
            (989, 1013),
            (999_000, 1_001_000),
            (1 << 20, (1 << 20) + 50_000),
            (4_294_966_000, 4_294_968_000),
        ];
        let mut ps = PrimeSieve::new();
        for (start, stop) in intervals {
            assert_eq!(
                ps.generate_primes(start, stop).unwrap(),
                naive_primes(start, stop),
                "interval [{}, {}]",
                start,
                stop
            );
            assert_eq!(
                ps.count_primes(start, stop).unwrap(),
                naive_primes(start, stop).len() as u64
            );
        }
    }

    #[test]
    fn one_prime_between_u32_neighbors() {
        // 4294967291 is the only prime in this window around 2^32
        assert_eq!(
            PrimeSieve::new()
                .count_primes(4_294_967_280, 4_294_967_310)
                .unwrap(),
            1
        );
    }

    #[test]
    fn tuplet_counts_match_oracle() {
        let mut ps = PrimeSieve::new();
        for k in 1..=7 {
            assert_eq!(
                ps.count_ktuplets(k, 7, 200_000).unwrap(),
                naive_ktuplets(k, 7, 200_000),
                "k = {}",
                k
            );
        }
        // tuplets starting below 7 come from the fixed table
        assert_eq!(ps.count_twins(0, 10).unwrap(), naive_ktuplets(2, 0, 10) );
        // (5, 7, 11, 13, 17) from the fixed table plus (7, 11, 13, 17, 19)
        assert_eq!(ps.count_quintuplets(0, 20).unwrap(), 2);
        assert_eq!(ps.count_triplets(0, 20).unwrap(), naive_ktuplets(3, 0, 20));
    }

    #[test]
    fn interval_partition_sums() {
        // partitions aligned to 30 (P3), primes and twins
        let cuts = [0u64, 29_999, 59_999, 149_999, 299_999];
        let mut ps = PrimeSieve::new();
        let total_primes = ps.count_primes(cuts[0], *cuts.last().unwrap()).unwrap();
        let total_twins = ps.count_twins(cuts[0], *cuts.last().unwrap()).unwrap();
        let mut sum_primes = 0;
        let mut sum_twins = 0;
        for w in cuts.windows(2) {
            let lo = if w[0] == 0 { 0 } else { w[0] + 1 };
            sum_primes += ps.count_primes(lo, w[1]).unwrap();
            sum_twins += ps.count_twins(lo, w[1]).unwrap();
        }
        assert_eq!(sum_primes, total_primes);
        assert_eq!(sum_twins, total_twins);
    }

    #[test]
    fn sieve_size_invariance() {
        // all three engine regimes are populated at this magnitude
        let (start, stop) = (4_000_000_000u64, 4_010_000_000u64);
        let expected = naive_primes(start, stop).len() as u64;
        for kib in [8, 32, 128, 1024, 4096] {
            let mut ps = PrimeSieve::new();
            ps.set_sieve_size(kib);
            assert_eq!(ps.count_primes(start, stop).unwrap(), expected, "{} KiB", kib);
        }
    }

    #[test]
    fn boundary_primes_inclusive() {
        let mut ps = PrimeSieve::new();
        assert_eq!(ps.count_primes(2, 2).unwrap(), 1);
        assert_eq!(ps.count_primes(7, 7).unwrap(), 1);
        assert_eq!(ps.count_primes(97, 97).unwrap(), 1);
        assert_eq!(ps.count_primes(0, 97).unwrap() - ps.count_primes(0, 96).unwrap(), 1);
        assert_eq!(ps.count_primes(8, 10).unwrap(), 0);
    }

    #[test]
    fn callback_is_ascending_and_stoppable() {
        let mut seen = vec![];
        PrimeSieve::new()
            .for_each_prime(0, 1_000_000, |p| {
                seen.push(p);
                if seen.len() == 10 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(seen, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn generate_n_primes_test() {
        let mut ps = PrimeSieve::new();
        assert_eq!(ps.generate_n_primes(5, 0).unwrap(), vec![2, 3, 5, 7, 11]);
        assert_eq!(ps.generate_n_primes(3, 90).unwrap(), vec![97, 101, 103]);
        assert_eq!(ps.generate_n_primes(0, 0).unwrap(), vec![]);
    }

    #[test]
    fn nth_prime_law() {
        let mut ps = PrimeSieve::new();
        assert_eq!(ps.nth_prime(1, 0).unwrap(), 2);
        assert_eq!(ps.nth_prime(25, 0).unwrap(), 97);
        assert_eq!(ps.nth_prime(1, 97).unwrap(), 97);
        assert_eq!(ps.nth_prime(0, 0).unwrap(), 2);

        // P8: nthPrime(n, start) = p implies countPrimes(start, p) = n
        let p = ps.nth_prime(100, 1000).unwrap();
        assert_eq!(ps.count_primes(1000, p).unwrap(), 100);
        assert_eq!(ps.count_primes(1000, p - 1).unwrap(), 99);

        assert_eq!(ps.nth_prime(-1, 100).unwrap(), 97);
        assert_eq!(ps.nth_prime(-25, 100).unwrap(), 2);
        assert!(ps.nth_prime(-26, 100).is_err());
    }

    #[test]
    fn millionth_prime() {
        assert_eq!(PrimeSieve::new().nth_prime(1_000_000, 0).unwrap(), 15_485_863);
    }

    #[test]
    fn counts_around_1e12() {
        assert_eq!(
            PrimeSieve::new()
                .count_primes(1_000_000_000_000, 1_000_000_000_000 + 1_000_000)
                .unwrap(),
            37_607
        );
    }

    #[test]
    fn counts_below_1e8() {
        let mut ps = PrimeSieve::new();
        assert_eq!(ps.count_primes(0, 100_000_000).unwrap(), 5_761_455);
        assert_eq!(ps.count_sextuplets(1, 100_000_000).unwrap(), 1438);
    }

    #[test]
    #[ignore = "slow without optimizations"]
    fn counts_below_1e9() {
        assert_eq!(
            PrimeSieve::new().count_primes(0, 1_000_000_000).unwrap(),
            50_847_534
        );
    }

    #[test]
    fn rejects_invalid_interval() {
        assert!(matches!(
            PrimeSieve::new().count_primes(10, 5),
            Err(Error::InvalidInterval { .. })
        ));
    }

    #[test]
    fn seconds_and_counts_getters() {
        let mut ps = PrimeSieve::new();
        ps.set_flags(COUNT_PRIMES | COUNT_TWINS);
        ps.sieve(0, 1000).unwrap();
        assert_eq!(ps.counts()[0], 168);
        assert_eq!(ps.counts()[1], 35);
        assert!(ps.seconds() >= 0.0);
        assert_eq!(ps.start(), 0);
        assert_eq!(ps.stop(), 1000);
    }
}
