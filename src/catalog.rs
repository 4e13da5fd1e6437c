/// One flag accepted by a generator.
#[derive(Debug, Clone, Copy)]
pub struct Flag {
    pub name: &'static str,
    /// Rendered default; "(required)" when there is none.
    pub default: &'static str,
    /// Environment fallback consulted when the flag is absent.
    pub env: Option<&'static str>,
    pub help: &'static str,
}

/// Static description of one generator binary, consumed by the table
/// printer behind the `format` feature.
#[derive(Debug, Clone, Copy)]
pub struct Generator {
    pub name: &'static str,
    pub summary: &'static str,
    /// How the process ends under normal operation.
    pub lifecycle: &'static str,
    pub flags: &'static [Flag],
}

pub const GENERATORS: &[Generator] = &[
    Generator {
        name: "wl-cpu",
        summary: "CPU-bound busy loop saturating one core",
        lifecycle: "exits 0 when bounded, runs until killed when not",
        flags: &[Flag {
            name: "--iterations",
            default: "0 (run forever)",
            env: Some(crate::cpu::ITERATIONS_ENV),
            help: "rounds of the arithmetic mix; 0 means unbounded",
        }],
    },
    Generator {
        name: "wl-io-wait",
        summary: "rewrites one zero-filled region with optional fsync",
        lifecycle: "runs until killed",
        flags: &[
            Flag {
                name: "--iterations",
                default: "100",
                env: None,
                help: "writes per cycle before the counter wraps",
            },
            Flag {
                name: "--size",
                default: "4096",
                env: None,
                help: "bytes per write",
            },
            Flag {
                name: "--path",
                default: "io_wait.dat",
                env: None,
                help: "target file, created/truncated at startup",
            },
            Flag {
                name: "--fsync",
                default: "true",
                env: None,
                help: "force each write to storage; anything but 'false' enables",
            },
            Flag {
                name: "--sleep-ms",
                default: "0",
                env: None,
                help: "blocking sleep between writes",
            },
        ],
    },
    Generator {
        name: "wl-sum",
        summary: "sums 0..count-1 and exits",
        lifecycle: "exits 0 after the loop",
        flags: &[Flag {
            name: "--count",
            default: "(required)",
            env: None,
            help: "upper bound of the summation, must be positive",
        }],
    },
    Generator {
        name: "wl-lock",
        summary: "threads incrementing one mutex-guarded counter",
        lifecycle: "runs until killed",
        flags: &[
            Flag {
                name: "--workers",
                default: "8",
                env: Some(crate::lock::WORKERS_ENV),
                help: "number of contending threads",
            },
            Flag {
                name: "--hold-us",
                default: "0",
                env: Some(crate::lock::HOLD_US_ENV),
                help: "microseconds each worker busy-holds the lock",
            },
        ],
    },
    Generator {
        name: "wl-mem",
        summary: "staircase of page-touched allocations, held then released",
        lifecycle: "runs until killed",
        flags: &[
            Flag {
                name: "--chunk-mb",
                default: "32",
                env: Some(crate::mem::CHUNK_MB_ENV),
                help: "MiB per staircase step",
            },
            Flag {
                name: "--steps",
                default: "4",
                env: Some(crate::mem::STEPS_ENV),
                help: "chunks allocated per climb",
            },
            Flag {
                name: "--hold-ms",
                default: "500",
                env: Some(crate::mem::HOLD_MS_ENV),
                help: "how long the peak is held",
            },
            Flag {
                name: "--release-ms",
                default: "500",
                env: Some(crate::mem::RELEASE_MS_ENV),
                help: "pause between chunk releases",
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_generator_is_listed() {
        let names: Vec<&str> = GENERATORS.iter().map(|g| g.name).collect();
        assert_eq!(
            names,
            vec!["wl-cpu", "wl-io-wait", "wl-sum", "wl-lock", "wl-mem"]
        );
    }

    #[test]
    fn flags_use_the_long_form_only() {
        for generator in GENERATORS {
            for flag in generator.flags {
                assert!(flag.name.starts_with("--"), "{}", flag.name);
            }
        }
    }
}
