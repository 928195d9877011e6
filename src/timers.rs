use std::cell::RefCell;
use std::time::{Duration, Instant};

/// The phases of one segment pass, in execution order.
#[derive(Copy, Clone)]
pub enum Phase {
    PreSieve,
    EratSmall,
    EratMedium,
    EratBig,
    Scan,
}

const PHASE_COUNT: usize = 5;

const PHASE_NAMES: [&str; PHASE_COUNT] =
    ["pre-sieve", "erat small", "erat medium", "erat big", "scan"];

#[derive(Copy, Clone, Default)]
struct PhaseTotal {
    segments: u64,
    elapsed: Duration,
}

/// Accumulates wall-clock time per sieve phase. The driver records into
/// a shared instance through an Rc; the CLI prints the breakdown after
/// the run when `--time` is given.
pub struct Timers {
    totals: RefCell<[PhaseTotal; PHASE_COUNT]>,
}

impl Timers {
    pub fn new() -> Timers {
        Timers {
            totals: RefCell::new([PhaseTotal::default(); PHASE_COUNT]),
        }
    }

    pub fn record(&self, phase: Phase, started: Instant) {
        let mut totals = self.totals.borrow_mut();
        let total = &mut totals[phase as usize];
        total.segments += 1;
        total.elapsed += started.elapsed();
    }

    pub fn report(&self) {
        let totals = self.totals.borrow();
        let sum: f64 = totals.iter().map(|t| t.elapsed.as_secs_f64()).sum();
        for (name, total) in PHASE_NAMES.iter().zip(totals.iter()) {
            if total.segments == 0 {
                continue;
            }
            let seconds = total.elapsed.as_secs_f64();
            let share = if sum > 0.0 { 100.0 * seconds / sum } else { 0.0 };
            println!(
                "{:12} {:10.6}s  {:5.1}%  ({} segments)",
                name, seconds, share, total.segments
            );
        }
        println!("sieve phases: {:.6}s", sum);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn records_per_phase_segments() {
        let timers = Timers::new();
        let t = Instant::now();
        timers.record(Phase::EratSmall, t);
        timers.record(Phase::EratSmall, t);
        timers.record(Phase::Scan, t);
        let totals = timers.totals.borrow();
        assert_eq!(totals[Phase::EratSmall as usize].segments, 2);
        assert_eq!(totals[Phase::Scan as usize].segments, 1);
        assert_eq!(totals[Phase::EratBig as usize].segments, 0);
    }
}
