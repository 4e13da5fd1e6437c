use std::collections::HashMap;
use std::env;

/// Flag map built once from the process argument list.
///
/// Every token starting with `--` that has a following token maps to that
/// token, and the pair is consumed; a trailing `--flag` with no value is
/// dropped silently; anything else is ignored. Repeated flags keep the last
/// value. Validation of the raw values belongs to each generator's config
/// constructor, not here.
#[derive(Debug, Default)]
pub struct Args {
    flags: HashMap<String, String>,
}

impl Args {
    /// Build the map from `std::env::args`, skipping the program name.
    pub fn from_env() -> Self {
        Self::parse(env::args().skip(1))
    }

    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut flags = HashMap::new();
        let mut iter = tokens.into_iter().map(Into::into);
        while let Some(token) = iter.next() {
            if token.starts_with("--") {
                if let Some(value) = iter.next() {
                    flags.insert(token, value);
                }
            }
        }
        Self { flags }
    }

    /// Raw string value of a flag, if one was given.
    pub fn get(&self, flag: &str) -> Option<&str> {
        self.flags.get(flag).map(String::as_str)
    }

    /// Flag value if given, else the named environment variable.
    pub fn resolve(&self, flag: &str, env_key: &str) -> Option<String> {
        self.get(flag)
            .map(str::to_owned)
            .or_else(|| env::var(env_key).ok())
    }

    /// Boolean-as-string convention of the generators: any value other
    /// than the literal `false` counts as true.
    pub fn bool_flag(&self, flag: &str, default: bool) -> bool {
        match self.get(flag) {
            Some(value) => value != "false",
            None => default,
        }
    }

    /// Single-flag numeric lookup: `None` when the flag is absent or its
    /// value does not parse. Presence/positivity checks stay with the
    /// caller.
    pub fn count_flag(&self, flag: &str) -> Option<i64> {
        self.get(flag).and_then(|value| value.parse().ok())
    }
}
