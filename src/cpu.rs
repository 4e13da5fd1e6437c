use crate::args::Args;
use crate::{Error, Result};
use log::debug;
use std::hint::black_box;

pub const ITERATIONS_ENV: &str = "WL_ITERATIONS";

/// Busy-loop configuration, resolved once at startup.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Number of rounds to run; 0 means run forever.
    pub iterations: u64,
}

impl Config {
    /// Resolve `--iterations` with the `WL_ITERATIONS` fallback.
    ///
    /// # Errors
    /// * when the resolved value is not a non-negative integer
    pub fn from_args(args: &Args) -> Result<Self> {
        let iterations = match args.resolve("--iterations", ITERATIONS_ENV) {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::InvalidFlag("--iterations"))?,
            None => 0,
        };
        Ok(Self { iterations })
    }

    /// Loop shape, selected once from the sign of the iteration count.
    pub fn mode(&self) -> Mode {
        if self.iterations > 0 {
            Mode::Bounded(self.iterations)
        } else {
            Mode::Unbounded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Terminates after the given number of rounds.
    Bounded(u64),
    /// Runs until the process is killed.
    Unbounded,
}

/// Run the busy loop. Returns in the bounded case; in the unbounded case
/// this never returns and stopping the process is the caller's job (signal
/// or timeout wrapper).
pub fn run(config: &Config) {
    match config.mode() {
        Mode::Bounded(iterations) => {
            debug!("busy loop: {} bounded iterations", iterations);
            let total = churn(iterations);
            // never expected to trigger; keeps the accumulator observable
            if black_box(total) == 42 {
                println!("unexpected");
            }
        }
        Mode::Unbounded => churn_forever(),
    }
}

/// The bounded mix: `total += i ^ (total << 1)` on a wrapping 32-bit
/// accumulator.
pub fn churn(iterations: u64) -> u32 {
    let mut total: u32 = 0;
    for i in 0..iterations {
        total = total.wrapping_add((i as u32) ^ total.wrapping_shl(1));
    }
    total
}

fn churn_forever() -> ! {
    debug!("busy loop: unbounded");
    let mut total: u32 = 0;
    loop {
        total = step(total);
        black_box(total);
    }
}

/// One round of the unbounded mix; wrapping arithmetic keeps the
/// accumulator within 32 bits.
pub fn step(total: u32) -> u32 {
    let total = total.wrapping_add(1);
    total ^ total.wrapping_shl(1)
}
