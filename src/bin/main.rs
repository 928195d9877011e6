use std::process::exit;
use std::rc::Rc;

use clap::Parser;

use erato::sieve::{count_flag, print_flag, PRINT_STATUS};
use erato::timers::Timers;
use erato::{Error, ParallelPrimeSieve, PrimeSieve, Result};

const TUPLET_NAMES: [&str; 7] = [
    "Primes",
    "Twin primes",
    "Prime triplets",
    "Prime quadruplets",
    "Prime quintuplets",
    "Prime sextuplets",
    "Prime septuplets",
];

#[derive(Parser)]
#[command(author, version, about = "Generate primes and prime k-tuplets", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Sieve the interval [START, STOP]; one number means [0, STOP].
    /// With --nth-prime the arguments are N [START].
    #[arg(value_name = "NUM", num_args = 1..=2, required = true)]
    numbers: Vec<String>,
    /// Count primes (K = 1) or prime k-tuplets (K = 2..=7)
    #[arg(short, long, value_name = "K", num_args = 0..=1, default_missing_value = "1")]
    count: Option<usize>,
    /// Print primes or prime k-tuplets, one per line
    #[arg(short, long, value_name = "K", num_args = 0..=1, default_missing_value = "1")]
    print: Option<usize>,
    /// Find the Nth prime >= START (N < 0 searches downwards)
    #[arg(short, long)]
    nth_prime: bool,
    /// Number of worker threads
    #[arg(short, long, value_name = "N")]
    threads: Option<usize>,
    /// Sieve size in KiB (8..=4096, rounded down to a power of 2)
    #[arg(short, long, value_name = "KiB")]
    size: Option<usize>,
    /// Show sieving progress
    #[arg(long)]
    status: bool,
    /// Report a per-phase timing breakdown (single-threaded)
    #[arg(long)]
    time: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("erato: {}", e);
        exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.nth_prime {
        return nth_prime(cli);
    }

    let (start, stop) = parse_interval(cli)?;
    for &k in [cli.count, cli.print].iter().flatten() {
        if !(1..=7).contains(&k) {
            return Err(Error::Config(format!("K must be in 1..=7, got {}", k)));
        }
    }

    // printing runs single-threaded so the output stays in order; plain
    // counting fans out across all cores
    if cli.print.is_some() || cli.time {
        let mut ps = PrimeSieve::new();
        if let Some(size) = cli.size {
            ps.set_sieve_size(size);
        }
        let timers = Rc::new(Timers::new());
        if cli.time {
            ps.set_timers(timers.clone());
        }
        let mut flags = 0;
        if let Some(k) = cli.print {
            flags |= print_flag(k);
        }
        if let Some(k) = cli.count {
            flags |= count_flag(k);
        }
        if flags == 0 {
            flags = count_flag(1);
        }
        if cli.status {
            flags |= PRINT_STATUS;
        }
        ps.set_flags(flags);
        ps.sieve(start, stop)?;
        report_counts(cli, ps.counts(), ps.seconds());
        if cli.time {
            timers.report();
        }
    } else {
        let mut pps = ParallelPrimeSieve::new();
        if let Some(size) = cli.size {
            pps.set_sieve_size(size);
        }
        if let Some(threads) = cli.threads {
            pps.set_num_threads(threads);
        }
        let mut flags = count_flag(cli.count.unwrap_or(1));
        if cli.status {
            flags |= PRINT_STATUS;
        }
        pps.set_flags(flags);
        pps.sieve(start, stop)?;
        report_counts(cli, pps.counts(), pps.seconds());
    }
    Ok(())
}

fn nth_prime(cli: &Cli) -> Result<()> {
    let n: i64 = cli.numbers[0]
        .parse()
        .map_err(|_| Error::Config(format!("invalid number: {}", cli.numbers[0])))?;
    let start = match cli.numbers.get(1) {
        Some(s) => parse_u64(s)?,
        None => 0,
    };
    let mut pps = ParallelPrimeSieve::new();
    if let Some(size) = cli.size {
        pps.set_sieve_size(size);
    }
    if let Some(threads) = cli.threads {
        pps.set_num_threads(threads);
    }
    let prime = pps.nth_prime(n, start)?;
    println!("{}", prime);
    Ok(())
}

fn parse_interval(cli: &Cli) -> Result<(u64, u64)> {
    let a = parse_u64(&cli.numbers[0])?;
    match cli.numbers.get(1) {
        Some(s) => Ok((a, parse_u64(s)?)),
        None => Ok((0, a)),
    }
}

fn parse_u64(s: &str) -> Result<u64> {
    s.parse()
        .map_err(|_| Error::Config(format!("invalid number: {}", s)))
}

fn report_counts(cli: &Cli, counts: &[u64; 7], seconds: f64) {
    if let Some(k) = cli.count {
        println!("{}: {}", TUPLET_NAMES[k - 1], counts[k - 1]);
    } else if cli.print.is_none() {
        println!("{}: {}", TUPLET_NAMES[0], counts[0]);
    }
    println!("Seconds: {:.3}", seconds);
}
