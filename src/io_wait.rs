use crate::args::Args;
use crate::{Error, Result};
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Write-loop configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Writes per cycle; the cycle counter resets after this many writes.
    /// Marks periodicity only, the loop itself never terminates.
    pub iterations: u64,
    /// Bytes per write.
    pub size: usize,
    /// Target file, created/truncated at startup.
    pub path: PathBuf,
    /// Force each write durably to storage. The resulting latency is the
    /// point of this generator.
    pub fsync: bool,
    /// Blocking sleep between writes, in milliseconds.
    pub sleep_ms: u64,
}

impl Config {
    /// # Errors
    /// * when `--iterations` or `--size` is not a positive integer
    /// * when `--sleep-ms` is not a non-negative integer
    pub fn from_args(args: &Args) -> Result<Self> {
        let iterations = match args.get("--iterations") {
            Some(raw) => raw
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(Error::InvalidFlag("--iterations"))?,
            None => 100,
        };
        let size = match args.get("--size") {
            Some(raw) => raw
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(Error::InvalidFlag("--size"))?,
            None => 4096,
        };
        let path = PathBuf::from(args.get("--path").unwrap_or("io_wait.dat"));
        let fsync = args.bool_flag("--fsync", true);
        let sleep_ms = match args.get("--sleep-ms") {
            Some(raw) => raw.parse().map_err(|_| Error::InvalidFlag("--sleep-ms"))?,
            None => 0,
        };
        Ok(Self {
            iterations,
            size,
            path,
            fsync,
            sleep_ms,
        })
    }

    /// Open the target for the life of the process.
    ///
    /// # Errors
    /// * when the path cannot be created or truncated for writing
    pub fn open(&self) -> io::Result<File> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
    }
}

/// The write loop. Allocates the zero buffer once and rewrites the same
/// `size`-byte region forever; the file never grows and its content is
/// never meaningful, only the act of writing matters.
///
/// Never returns under normal operation. The handle is deliberately not
/// closed anywhere; stopping the process (and the cleanup that follows) is
/// the environment's job.
///
/// # Errors
/// * when a rewind, write or fsync against the target fails
pub fn run(config: &Config, file: &mut File) -> io::Result<()> {
    let buf = vec![0u8; config.size];
    let mut cycle = 0u64;
    loop {
        write_cycle(config, file, &buf)?;
        cycle += 1;
        if cycle >= config.iterations {
            debug!(
                "completed {} writes to {}",
                cycle,
                config.path.display()
            );
            cycle = 0;
        }
        if config.sleep_ms > 0 {
            thread::sleep(Duration::from_millis(config.sleep_ms));
        }
    }
}

/// One write round: rewind to offset 0, write the whole buffer, and
/// optionally force it to storage.
pub fn write_cycle(config: &Config, file: &mut File, buf: &[u8]) -> io::Result<()> {
    file.seek(SeekFrom::Start(0))?;
    file.write_all(buf)?;
    if config.fsync {
        file.sync_all()?;
    }
    Ok(())
}
