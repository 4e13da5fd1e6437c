use crate::args::Args;
use crate::{Error, Result};
use log::debug;
use std::hint::black_box;
use std::thread;
use std::time::Duration;

pub const CHUNK_MB_ENV: &str = "WL_CHUNK_MB";
pub const STEPS_ENV: &str = "WL_STEPS";
pub const HOLD_MS_ENV: &str = "WL_HOLD_MS";
pub const RELEASE_MS_ENV: &str = "WL_RELEASE_MS";

const PAGE_SIZE: usize = 4096;

/// Memory-staircase configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Size of each step of the staircase, in MiB.
    pub chunk_mb: usize,
    /// Number of chunks allocated per climb.
    pub steps: usize,
    /// How long the peak is held.
    pub hold_ms: u64,
    /// Pause between individual chunk releases on the way down.
    pub release_ms: u64,
}

impl Config {
    /// Resolve the staircase flags with their `WL_*` fallbacks.
    ///
    /// # Errors
    /// * when `--chunk-mb` or `--steps` is not a positive integer
    /// * when `--hold-ms` or `--release-ms` is not a non-negative integer
    pub fn from_args(args: &Args) -> Result<Self> {
        let chunk_mb = match args.resolve("--chunk-mb", CHUNK_MB_ENV) {
            Some(raw) => raw
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(Error::InvalidFlag("--chunk-mb"))?,
            None => 32,
        };
        let steps = match args.resolve("--steps", STEPS_ENV) {
            Some(raw) => raw
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(Error::InvalidFlag("--steps"))?,
            None => 4,
        };
        let hold_ms = match args.resolve("--hold-ms", HOLD_MS_ENV) {
            Some(raw) => raw.parse().map_err(|_| Error::InvalidFlag("--hold-ms"))?,
            None => 500,
        };
        let release_ms = match args.resolve("--release-ms", RELEASE_MS_ENV) {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::InvalidFlag("--release-ms"))?,
            None => 500,
        };
        Ok(Self {
            chunk_mb,
            steps,
            hold_ms,
            release_ms,
        })
    }

    pub fn chunk_bytes(&self) -> usize {
        self.chunk_mb * 1024 * 1024
    }
}

/// Staircase loop: climb to the peak, hold, walk back down chunk by
/// chunk, freeing one allocation per step. Never returns; the process is
/// stopped externally.
pub fn run(config: &Config) -> ! {
    debug!(
        "memory staircase: {} steps of {} MiB",
        config.steps, config.chunk_mb
    );
    loop {
        let mut chunks = Vec::with_capacity(config.steps);
        for _ in 0..config.steps {
            chunks.push(alloc_chunk(config.chunk_bytes()));
        }
        thread::sleep(Duration::from_millis(config.hold_ms));
        while let Some(chunk) = chunks.pop() {
            drop(chunk);
            thread::sleep(Duration::from_millis(config.release_ms));
        }
    }
}

/// Allocate a chunk and touch one byte per page, so every page is resident
/// rather than lazily mapped.
pub fn alloc_chunk(bytes: usize) -> Vec<u8> {
    let mut chunk = vec![0u8; bytes];
    let mut offset = 0;
    while offset < chunk.len() {
        chunk[offset] = 1;
        offset += PAGE_SIZE;
    }
    black_box(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn defaults_apply_when_flags_absent() {
        for key in &[CHUNK_MB_ENV, STEPS_ENV, HOLD_MS_ENV, RELEASE_MS_ENV] {
            env::remove_var(key);
        }
        let args = Args::parse(Vec::<String>::new());
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.chunk_mb, 32);
        assert_eq!(config.steps, 4);
        assert_eq!(config.hold_ms, 500);
        assert_eq!(config.release_ms, 500);
    }

    #[test]
    fn chunk_sizing_is_mebibytes() {
        let config = Config {
            chunk_mb: 3,
            steps: 1,
            hold_ms: 0,
            release_ms: 0,
        };
        assert_eq!(config.chunk_bytes(), 3 * 1024 * 1024);
    }

    #[test]
    fn zero_chunk_or_steps_are_rejected() {
        let args = Args::parse(vec!["--chunk-mb", "0"]);
        assert!(Config::from_args(&args).is_err());
        let args = Args::parse(vec!["--steps", "0"]);
        assert!(Config::from_args(&args).is_err());
    }

    #[test]
    fn chunks_are_touched_per_page() {
        let chunk = alloc_chunk(2 * PAGE_SIZE + 1);
        assert_eq!(chunk.len(), 2 * PAGE_SIZE + 1);
        assert_eq!(chunk[0], 1);
        assert_eq!(chunk[PAGE_SIZE], 1);
        assert_eq!(chunk[2 * PAGE_SIZE], 1);
        assert_eq!(chunk[1], 0);
    }
}
