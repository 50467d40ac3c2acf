//! crates/logging/src/scanner.rs
//! Translation of `-v`/`-q` style flags into a signed level offset.
//!
//! The scanner walks an argument vector once, left to right. Verbose matches
//! subtract one from the offset and quiet matches add one, so the result is
//! `quiet count - verbose count`. Callers that want `-v` to raise verbosity
//! apply the negated offset to the store.
//!
//! With bundling enabled a clustered short option such as `-qvv` is expanded
//! into `-q`, `-v`, `-v` and scanned with the same settings. When removal is
//! also enabled the cluster is deleted if every flag in it was consumed, or
//! rewritten to the surviving flags (`-qx` becomes `-x`) otherwise. Removal
//! keeps indices stable: the token following a removed one is inspected next.

mod pattern;

pub use pattern::{Pattern, PatternSet};

use crate::error::LevelError;

/// Configured matcher for verbose, quiet and stop tokens.
///
/// # Examples
///
/// ```
/// use logging::FlagScanner;
///
/// let scanner = FlagScanner::new()
///     .with_verbose("-v")
///     .with_quiet("-q")
///     .bundle(true)
///     .remove(true);
///
/// let mut args: Vec<String> = ["--foo", "-qvv", "--bar"].map(String::from).into();
/// assert_eq!(scanner.scan(&mut args), -1);
/// assert_eq!(args, ["--foo", "--bar"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FlagScanner {
    verbose: PatternSet,
    quiet: PatternSet,
    stop: PatternSet,
    bundle: bool,
    remove: bool,
}

impl FlagScanner {
    /// Creates a scanner that matches nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            verbose: PatternSet::new(),
            quiet: PatternSet::new(),
            stop: PatternSet::new(),
            bundle: false,
            remove: false,
        }
    }

    /// Returns the conventional scanner: `-v`/`--verbose`, `-q`/`--quiet`,
    /// stop at `--`, bundling on, removal off.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_verbose(["-v", "--verbose"])
            .with_quiet(["-q", "--quiet"])
            .with_stop("--")
            .bundle(true)
    }

    /// Replaces the verbose patterns.
    #[must_use]
    pub fn with_verbose(mut self, patterns: impl Into<PatternSet>) -> Self {
        self.verbose = patterns.into();
        self
    }

    /// Replaces the quiet patterns.
    #[must_use]
    pub fn with_quiet(mut self, patterns: impl Into<PatternSet>) -> Self {
        self.quiet = patterns.into();
        self
    }

    /// Replaces the stop patterns.
    #[must_use]
    pub fn with_stop(mut self, patterns: impl Into<PatternSet>) -> Self {
        self.stop = patterns.into();
        self
    }

    /// Enables or disables expansion of clustered short options.
    #[must_use]
    pub const fn bundle(mut self, bundle: bool) -> Self {
        self.bundle = bundle;
        self
    }

    /// Enables or disables in-place removal of consumed tokens.
    #[must_use]
    pub const fn remove(mut self, remove: bool) -> Self {
        self.remove = remove;
        self
    }

    /// Returns the verbose patterns.
    #[must_use]
    pub const fn verbose_patterns(&self) -> &PatternSet {
        &self.verbose
    }

    /// Returns the quiet patterns.
    #[must_use]
    pub const fn quiet_patterns(&self) -> &PatternSet {
        &self.quiet
    }

    /// Returns the stop patterns.
    #[must_use]
    pub const fn stop_patterns(&self) -> &PatternSet {
        &self.stop
    }

    /// Reports whether clustered short options are expanded.
    #[must_use]
    pub const fn bundles(&self) -> bool {
        self.bundle
    }

    /// Reports whether consumed tokens are removed.
    #[must_use]
    pub const fn removes(&self) -> bool {
        self.remove
    }

    /// Scans `tokens` and returns `quiet count - verbose count`.
    ///
    /// Consumed tokens are removed in place when removal is enabled; the
    /// vector is left untouched otherwise.
    pub fn scan(&self, tokens: &mut Vec<String>) -> i32 {
        self.scan_until_stop(tokens).0
    }

    /// Like [`scan`](Self::scan), but fails when no token sequence is
    /// supplied.
    pub fn scan_opt(&self, tokens: Option<&mut Vec<String>>) -> Result<i32, LevelError> {
        tokens
            .map(|tokens| self.scan(tokens))
            .ok_or_else(|| LevelError::argument("no argument vector supplied to scan"))
    }

    fn scan_until_stop(&self, tokens: &mut Vec<String>) -> (i32, bool) {
        let mut offset = 0i32;
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index].as_str();

            if self.stop.matches(token) {
                return (offset, true);
            }

            if self.bundle
                && let Some(mut expanded) = expand_cluster(token)
            {
                let flags = expanded.len();
                let (inner, stopped) = self.scan_until_stop(&mut expanded);
                offset = offset.saturating_add(inner);

                if self.remove && expanded.is_empty() {
                    tokens.remove(index);
                } else {
                    if self.remove && expanded.len() < flags {
                        tokens[index] = collapse_cluster(&expanded);
                    }
                    index += 1;
                }

                if stopped {
                    return (offset, true);
                }
                continue;
            }

            let delta = if self.verbose.matches(token) {
                -1
            } else if self.quiet.matches(token) {
                1
            } else {
                index += 1;
                continue;
            };

            offset = offset.saturating_add(delta);
            if self.remove {
                tokens.remove(index);
            } else {
                index += 1;
            }
        }

        (offset, false)
    }
}

/// Splits `-abc` into `-a`, `-b`, `-c`. Returns `None` unless the token is a
/// dash followed by two or more characters, none of them `-` or `=`.
fn expand_cluster(token: &str) -> Option<Vec<String>> {
    let flags = token.strip_prefix('-')?;
    if flags.chars().nth(1).is_none() || flags.contains(['-', '=']) {
        return None;
    }
    Some(flags.chars().map(|flag| format!("-{flag}")).collect())
}

fn collapse_cluster(flags: &[String]) -> String {
    flags.iter().fold(String::from("-"), |mut cluster, flag| {
        cluster.push_str(flag.strip_prefix('-').unwrap_or(flag));
        cluster
    })
}

#[cfg(test)]
mod tests;
