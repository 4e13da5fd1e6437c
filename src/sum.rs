use crate::args::Args;
use crate::{Error, Result};
use std::hint::black_box;

/// Summation loop configuration. `--count` is the one required flag in the
/// suite; there is no default and no environment fallback.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub count: i64,
}

impl Config {
    /// # Errors
    /// * when `--count` is absent, unparseable, or not positive
    pub fn from_args(args: &Args) -> Result<Self> {
        let count = args
            .count_flag("--count")
            .filter(|count| *count > 0)
            .ok_or(Error::MissingFlag("--count"))?;
        Ok(Self { count })
    }
}

/// Sum `0..count-1` and exit. The negative-total print cannot trigger with
/// correct arithmetic; it keeps the loop from being optimized away.
pub fn run(config: &Config) {
    let total = sum_to(config.count);
    if black_box(total) < 0 {
        println!("{}", total);
    }
}

pub fn sum_to(count: i64) -> i64 {
    let mut total: i64 = 0;
    for i in 0..count {
        total = total.wrapping_add(i);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_match_the_closed_form() {
        for count in &[1i64, 2, 3, 10, 1_000] {
            assert_eq!(sum_to(*count), count * (count - 1) / 2);
        }
    }

    #[test]
    fn count_is_required() {
        let args = Args::parse(Vec::<String>::new());
        let err = Config::from_args(&args).unwrap_err();
        assert_eq!(err.to_string(), "missing or invalid --count");
    }

    #[test]
    fn non_positive_and_non_numeric_counts_are_rejected() {
        for raw in &["0", "-5", "ten"] {
            let args = Args::parse(vec!["--count", raw]);
            assert!(Config::from_args(&args).is_err());
        }
    }

    #[test]
    fn valid_count_is_accepted() {
        let args = Args::parse(vec!["--count", "100"]);
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.count, 100);
    }
}
