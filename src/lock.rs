use crate::args::Args;
use crate::{Error, Result};
use log::debug;
use std::hint::black_box;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

pub const WORKERS_ENV: &str = "WL_WORKERS";
pub const HOLD_US_ENV: &str = "WL_HOLD_US";

/// Lock-contention configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Number of contending worker threads.
    pub workers: usize,
    /// Time each worker busy-holds the lock per increment.
    pub hold: Duration,
}

impl Config {
    /// Resolve `--workers` and `--hold-us` with their `WL_*` fallbacks.
    ///
    /// # Errors
    /// * when `--workers` is not a positive integer
    /// * when `--hold-us` is not a non-negative integer
    pub fn from_args(args: &Args) -> Result<Self> {
        let workers = match args.resolve("--workers", WORKERS_ENV) {
            Some(raw) => raw
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(Error::InvalidFlag("--workers"))?,
            None => 8,
        };
        let hold_us: u64 = match args.resolve("--hold-us", HOLD_US_ENV) {
            Some(raw) => raw.parse().map_err(|_| Error::InvalidFlag("--hold-us"))?,
            None => 0,
        };
        Ok(Self {
            workers,
            hold: Duration::from_micros(hold_us),
        })
    }
}

/// Spawn the contending workers and wait on them. Every worker loops
/// forever, so this never returns under normal operation; the process is
/// stopped externally like the other unbounded generators.
pub fn run(config: &Config) {
    debug!("spawning {} contending workers", config.workers);
    let total = Arc::new(Mutex::new(0i64));
    let mut handles = Vec::with_capacity(config.workers);
    for _ in 0..config.workers {
        let total = Arc::clone(&total);
        let hold = config.hold;
        handles.push(thread::spawn(move || contend(&total, hold)));
    }
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
    // unreachable while workers spin; gives the counter an observable use
    let total = *total.lock().expect("counter lock");
    if black_box(total) < 0 {
        println!("{}", total);
    }
}

fn contend(total: &Mutex<i64>, hold: Duration) -> ! {
    loop {
        let mut guard = total.lock().expect("counter lock");
        *guard += 1;
        if hold > Duration::from_micros(0) {
            spin_wait(hold);
        }
    }
}

/// Busy-wait without yielding, so the lock stays held for the whole
/// duration.
pub fn spin_wait(duration: Duration) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        std::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn zero_workers_are_rejected() {
        let args = Args::parse(vec!["--workers", "0"]);
        let err = Config::from_args(&args).unwrap_err();
        assert_eq!(err.to_string(), "invalid --workers");
    }

    // single test touching WL_WORKERS; cargo runs tests concurrently
    #[test]
    fn workers_prefer_flag_over_env_over_default() {
        env::remove_var(WORKERS_ENV);
        let args = Args::parse(Vec::<String>::new());
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.hold, Duration::from_micros(0));

        env::set_var(WORKERS_ENV, "2");
        assert_eq!(Config::from_args(&args).unwrap().workers, 2);
        let flagged = Args::parse(vec!["--workers", "5"]);
        assert_eq!(Config::from_args(&flagged).unwrap().workers, 5);
        env::remove_var(WORKERS_ENV);
    }

    #[test]
    fn hold_duration_comes_from_microseconds() {
        let args = Args::parse(vec!["--hold-us", "250"]);
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.hold, Duration::from_micros(250));
    }

    #[test]
    fn spin_wait_blocks_at_least_the_requested_duration() {
        let requested = Duration::from_millis(5);
        let start = Instant::now();
        spin_wait(requested);
        assert!(start.elapsed() >= requested);
    }
}
