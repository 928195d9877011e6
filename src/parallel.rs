//! ParallelPrimeSieve: splits [start, stop] into 30-aligned chunks and
//! sieves them on crossbeam scoped worker threads, one full PrimeSieve
//! (own buffer, engines, bucket arena) per worker. Workers claim chunks
//! from a shared atomic index and hand their tallies back through the
//! join handles; no state is shared during sieving except the
//! processed-bytes aggregator.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crossbeam::thread;

use crate::error::{Error, Result};
use crate::nums::in_between;
use crate::params::{clamp_sieve_kib, default_num_threads, MIN_THREAD_INTERVAL};
use crate::sieve::{count_flag, PrimeSieve, SharedStatus, PRINT_STATUS, PRINT_TASKS};

pub struct ParallelPrimeSieve {
    /// Worker count; 0 selects the number of available CPUs.
    threads: usize,
    sieve_size_kib: usize,
    flags: u32,
    counts: [u64; 7],
    seconds: f64,
    status: Option<Arc<SharedStatus>>,
}

impl Default for ParallelPrimeSieve {
    fn default() -> ParallelPrimeSieve {
        ParallelPrimeSieve::new()
    }
}

impl ParallelPrimeSieve {
    pub fn new() -> ParallelPrimeSieve {
        ParallelPrimeSieve {
            threads: 0,
            sieve_size_kib: 0,
            flags: 0,
            counts: [0; 7],
            seconds: 0.0,
            status: None,
        }
    }

    pub fn max_threads() -> usize {
        default_num_threads()
    }

    pub fn set_num_threads(&mut self, threads: usize) {
        self.threads = in_between(1, threads, Self::max_threads());
    }

    pub fn num_threads(&self) -> usize {
        if self.threads == 0 {
            Self::max_threads()
        } else {
            self.threads
        }
    }

    pub fn set_sieve_size(&mut self, kibibytes: usize) {
        self.sieve_size_kib = clamp_sieve_kib(kibibytes);
    }

    pub fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }

    pub fn add_flags(&mut self, flags: u32) {
        self.flags |= flags;
    }

    pub fn counts(&self) -> &[u64; 7] {
        &self.counts
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn status_percent(&self) -> f64 {
        self.status.as_ref().map_or(0.0, |s| s.percent())
    }

    /// Threads beyond what the interval can keep busy are left idle.
    fn ideal_num_threads(&self, start: u64, stop: u64) -> usize {
        let interval = (stop - start).saturating_add(1);
        let max_useful = (interval / MIN_THREAD_INTERVAL).max(1);
        self.num_threads().min(max_useful.min(usize::MAX as u64) as usize)
    }

    pub fn sieve(&mut self, start: u64, stop: u64) -> Result<()> {
        if start > stop {
            return Err(Error::InvalidInterval { start, stop });
        }
        let time = Instant::now();
        self.counts = [0; 7];
        let total = (stop - start).saturating_add(1);
        let status = SharedStatus::new(total, self.flags & PRINT_STATUS != 0);
        self.status = Some(status.clone());

        // printed output must stay in ascending order
        let threads = if self.flags & PRINT_TASKS != 0 {
            1
        } else {
            self.ideal_num_threads(start, stop)
        };
        if threads <= 1 {
            let mut ps = self.make_worker(&status);
            ps.sieve(start, stop)?;
            self.counts = *ps.counts();
        } else {
            let chunks = balanced_chunks(start, stop, threads);
            let next = AtomicUsize::new(0);
            let flags = self.flags & !PRINT_STATUS;
            let sieve_size_kib = self.sieve_size_kib;

            let results = thread::scope(|s| {
                let mut handles = vec![];
                for _ in 0..threads {
                    let chunks = &chunks;
                    let next = &next;
                    let status = status.clone();
                    handles.push(s.spawn(move |_| -> Result<[u64; 7]> {
                        // workers own their full sieve: buffer, engines
                        // and bucket arena are never shared
                        let mut ps = PrimeSieve::new();
                        ps.set_flags(flags);
                        if sieve_size_kib > 0 {
                            ps.set_sieve_size(sieve_size_kib);
                        }
                        ps.attach_status(status);
                        let mut local = [0u64; 7];
                        loop {
                            let i = next.fetch_add(1, Ordering::Relaxed);
                            if i >= chunks.len() {
                                return Ok(local);
                            }
                            let (lo, hi) = chunks[i];
                            ps.sieve(lo, hi)?;
                            for k in 0..7 {
                                local[k] += ps.counts()[k];
                            }
                        }
                    }));
                }
                handles
                    .into_iter()
                    .map(|h| h.join().expect("sieve worker panicked"))
                    .collect::<Vec<_>>()
            })
            .expect("crossbeam scope");

            for result in results {
                let local = result?;
                for k in 0..7 {
                    self.counts[k] += local[k];
                }
            }
        }

        self.seconds = time.elapsed().as_secs_f64();
        Ok(())
    }

    fn make_worker(&self, status: &Arc<SharedStatus>) -> PrimeSieve {
        let mut ps = PrimeSieve::new();
        ps.set_flags(self.flags & !PRINT_STATUS);
        if self.sieve_size_kib > 0 {
            ps.set_sieve_size(self.sieve_size_kib);
        }
        ps.attach_status(status.clone());
        ps
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

    pub fn count_ktuplets(&mut self, k: usize, start: u64, stop: u64) -> Result<u64> {
        self.flags = (self.flags & PRINT_STATUS) | count_flag(k);
        self.sieve(start, stop)?;
        Ok(self.counts[k - 1])
    }

    /// Find the nth prime counting from start inclusive (negative n
    /// searches downwards); chunk counting runs in parallel, the final
    /// chunk is located with a single-threaded callback scan.
    pub fn nth_prime(&mut self, n: i64, start: u64) -> Result<u64> {
        let n = if n == 0 { 1 } else { n };
        if n < 0 {
            // descending search has little to parallelize
            let mut ps = PrimeSieve::new();
            if self.sieve_size_kib > 0 {
                ps.set_sieve_size(self.sieve_size_kib);
            }
            return ps.nth_prime(n, start);
        }
        let n = n as u64;
        let mut count = 0u64;
        let mut low = start;
        loop {
            let high = low.saturating_add(nth_prime_dist(n - count, low));
            let c = self.count_primes(low, high)?;
            if count + c >= n {
                let mut remaining = n - count;
                let mut result = 0;
                let mut ps = PrimeSieve::new();
                if self.sieve_size_kib > 0 {
                    ps.set_sieve_size(self.sieve_size_kib);
                }
                ps.for_each_prime(low, high, |p| {
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
}

/// Chunk [start, stop] for dynamic scheduling. Boundaries between chunks
/// are multiples of 30 so a k-tuplet byte never straddles two workers.
fn balanced_chunks(start: u64, stop: u64, threads: usize) -> Vec<(u64, u64)> {
    let interval = stop as u128 - start as u128 + 1;
    let mut len = (interval / (threads as u128 * 4)).max(30);
    len = (len + 29) / 30 * 30;

    let mut chunks = Vec::new();
    let mut lo = start as u128;
    while lo <= stop as u128 {
        let boundary = (lo + len) / 30 * 30;
        let hi = if boundary > stop as u128 {
            stop as u128
        } else {
            boundary - 1
        };
        chunks.push((lo as u64, hi as u64));
        lo = hi + 1;
    }
    chunks
}

fn nth_prime_dist(n: u64, start: u64) -> u64 {
    let n = n.max(10) as f64;
    let x = (start as f64).max(10.0) + n * 20.0;
    let ln = x.ln();
    (n * (ln + ln.ln()) * 1.1) as u64 + 10_000
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn chunks_are_aligned_and_cover() {
        for (start, stop, threads) in [(0u64, 1000u64, 2usize), (7, 12345, 4), (1 << 33, (1 << 33) + 999_999, 8)] {
            let chunks = balanced_chunks(start, stop, threads);
            assert_eq!(chunks.first().unwrap().0, start);
            assert_eq!(chunks.last().unwrap().1, stop);
            for w in chunks.windows(2) {
                assert_eq!(w[0].1 + 1, w[1].0);
                // interior boundaries sit on 30-block edges
                assert_eq!(w[1].0 % 30, 0);
            }
        }
    }

    #[test]
    fn full_range_chunking_does_not_overflow() {
        let chunks = balanced_chunks(0, u64::MAX, 4);
        assert_eq!(chunks.first().unwrap().0, 0);
        assert_eq!(chunks.last().unwrap().1, u64::MAX);
    }

    #[test]
    fn thread_count_invariance() {
        // P5: same tallies for 1, 2, 4, 8 threads; the interval is large
        // enough that ideal_num_threads does not collapse to one worker
        let (start, stop) = (0u64, 40_000_000u64);
        let mut reference = PrimeSieve::new();
        let expected_primes = reference.count_primes(start, stop).unwrap();
        let expected_twins = reference.count_twins(start, stop).unwrap();
        for threads in [1usize, 2, 4, 8] {
            let mut pps = ParallelPrimeSieve::new();
            pps.set_num_threads(threads);
            assert_eq!(
                pps.count_primes(start, stop).unwrap(),
                expected_primes,
                "{} threads",
                threads
            );
            assert_eq!(pps.count_twins(start, stop).unwrap(), expected_twins);
        }
    }

    #[test]
    fn parallel_nth_prime() {
        let mut pps = ParallelPrimeSieve::new();
        assert_eq!(pps.nth_prime(25, 0).unwrap(), 97);
        assert_eq!(pps.nth_prime(-1, 100).unwrap(), 97);
    }

    #[test]
    fn small_interval_runs_single_threaded() {
        let mut pps = ParallelPrimeSieve::new();
        pps.set_num_threads(8);
        assert_eq!(pps.ideal_num_threads(0, 1000), 1);
        assert_eq!(pps.count_primes(0, 1000).unwrap(), 168);
    }

    #[test]
    fn status_reaches_completion() {
        let mut pps = ParallelPrimeSieve::new();
        pps.count_primes(0, 1_000_000).unwrap();
        assert!((pps.status_percent() - 100.0).abs() < 1e-9);
    }
}
