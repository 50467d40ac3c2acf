//! crates/logging/src/init/argv.rs
//! Command-line flag bindings.

use std::fmt;
use std::str::FromStr;

use crate::error::LevelError;
use crate::scanner::{FlagScanner, PatternSet};
use crate::store::LevelConfig;

use super::CONFIG_TARGET;

/// Named flag-scanning presets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ArgvPreset {
    /// `-v`/`--verbose`, `-q`/`--quiet`, stop at `--`, bundling, no removal.
    #[default]
    Default,
    /// As [`ArgvPreset::Default`] but consumed flags are removed.
    Consume,
}

impl ArgvPreset {
    /// Returns the preset name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Consume => "consume",
        }
    }

    /// Builds the scanner the preset describes.
    #[must_use]
    pub fn scanner(self) -> FlagScanner {
        FlagScanner::standard().remove(matches!(self, Self::Consume))
    }
}

impl fmt::Display for ArgvPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArgvPreset {
    type Err = LevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "consume" => Ok(Self::Consume),
            other => Err(LevelError::argument(format!("unknown argv preset '{other}'"))),
        }
    }
}

/// Explicit pattern lists for the flag scanner. Entries use
/// [`Pattern::parse`](crate::Pattern::parse) syntax: `/re/` for a regular
/// expression, anything else literal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ArgvPatterns {
    /// Tokens that raise verbosity.
    pub verbose: Vec<String>,
    /// Tokens that lower verbosity.
    pub quiet: Vec<String>,
    /// Tokens that end the scan.
    pub stop: Vec<String>,
    /// Expand clustered short options.
    pub bundle: bool,
    /// Remove consumed tokens.
    pub remove: bool,
}

/// How the argument vector is scanned.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum ArgvSpec {
    /// A named preset.
    Preset(ArgvPreset),
    /// Explicit patterns.
    Patterns(ArgvPatterns),
}

impl ArgvSpec {
    /// Compiles the spec into a scanner.
    pub fn scanner(&self) -> Result<FlagScanner, LevelError> {
        match self {
            Self::Preset(preset) => Ok(preset.scanner()),
            Self::Patterns(patterns) => Ok(FlagScanner::new()
                .with_verbose(PatternSet::parse(&patterns.verbose)?)
                .with_quiet(PatternSet::parse(&patterns.quiet)?)
                .with_stop(PatternSet::parse(&patterns.stop)?)
                .bundle(patterns.bundle)
                .remove(patterns.remove)),
        }
    }
}

impl Default for ArgvSpec {
    fn default() -> Self {
        Self::Preset(ArgvPreset::Default)
    }
}

impl From<ArgvPreset> for ArgvSpec {
    fn from(preset: ArgvPreset) -> Self {
        Self::Preset(preset)
    }
}

impl From<ArgvPatterns> for ArgvSpec {
    fn from(patterns: ArgvPatterns) -> Self {
        Self::Patterns(patterns)
    }
}

/// Scans `tokens` with `spec` and applies the negated scan result
/// (`quiet count - verbose count`) to the global level, so each verbose flag
/// raises it by one and each quiet flag lowers it by one.
///
/// Returns the new global level. Fails with [`LevelError::Argument`] when
/// `tokens` is `None`.
pub fn apply_argv(
    config: &LevelConfig,
    spec: &ArgvSpec,
    tokens: Option<&mut Vec<String>>,
) -> Result<i32, LevelError> {
    let offset = spec.scanner()?.scan_opt(tokens)?;
    if offset == 0 {
        return Ok(config.level());
    }
    let level = config.apply_offset(-offset);
    tracing::debug!(
        target: CONFIG_TARGET,
        offset = offset,
        level = level,
        "argv: applied verbosity flags"
    );
    Ok(level)
}
