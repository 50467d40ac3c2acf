//! crates/logging/src/init/env.rs
//! Environment-variable bindings.

use std::fmt;
use std::str::FromStr;

use crate::error::LevelError;
use crate::severity::Severity;
use crate::store::LevelConfig;
use crate::value::LevelValue;

use super::CONFIG_TARGET;

/// Named environment presets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum EnvPreset {
    /// `LOG_LEVEL`, `DEBUG`, `TRACE`, `VERBOSE`, `QUIET`.
    #[default]
    Default,
}

impl EnvPreset {
    /// Returns the variable names the preset reads.
    #[must_use]
    pub fn names(self) -> EnvNames {
        match self {
            Self::Default => EnvNames {
                level: Some("LOG_LEVEL".into()),
                debug: Some("DEBUG".into()),
                trace: Some("TRACE".into()),
                verbose: Some("VERBOSE".into()),
                quiet: Some("QUIET".into()),
            },
        }
    }
}

impl fmt::Display for EnvPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
        }
    }
}

impl FromStr for EnvPreset {
    type Err = LevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            other => Err(LevelError::argument(format!("unknown env preset '{other}'"))),
        }
    }
}

/// Variable names consulted by [`apply_env_with`]. `None` skips that role.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EnvNames {
    /// Level text, absolute or relative (`debug`, `7`, `+1`).
    pub level: Option<String>,
    /// Truthy selects `debug`.
    pub debug: Option<String>,
    /// Truthy selects `trace`.
    pub trace: Option<String>,
    /// Truthy raises the level by one.
    pub verbose: Option<String>,
    /// Truthy lowers the level by one.
    pub quiet: Option<String>,
}

/// Which environment variables are consulted.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum EnvSpec {
    /// A named preset.
    Preset(EnvPreset),
    /// Explicit variable names.
    Names(EnvNames),
}

impl EnvSpec {
    /// Returns the concrete variable names.
    #[must_use]
    pub fn names(&self) -> EnvNames {
        match self {
            Self::Preset(preset) => preset.names(),
            Self::Names(names) => names.clone(),
        }
    }
}

impl Default for EnvSpec {
    fn default() -> Self {
        Self::Preset(EnvPreset::Default)
    }
}

impl From<EnvPreset> for EnvSpec {
    fn from(preset: EnvPreset) -> Self {
        Self::Preset(preset)
    }
}

impl From<EnvNames> for EnvSpec {
    fn from(names: EnvNames) -> Self {
        Self::Names(names)
    }
}

/// Reports whether an environment value counts as set: non-empty and not `0`.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0"
}

/// Applies `spec` using the process environment.
pub fn apply_env(config: &LevelConfig, spec: &EnvSpec) -> Result<i32, LevelError> {
    apply_env_with(config, spec, |name| std::env::var(name).ok())
}

/// Applies `spec`, reading variables through `lookup`.
///
/// Roles are applied in this order: level text, debug, trace, verbose, quiet.
/// Later roles win, so `DEBUG=1 TRACE=1` selects trace. Returns the new
/// global level.
///
/// # Examples
///
/// ```
/// use logging::init::{apply_env_with, EnvSpec};
/// use logging::LevelConfig;
///
/// let config = LevelConfig::new();
/// let level = apply_env_with(&config, &EnvSpec::default(), |name| {
///     (name == "LOG_LEVEL").then(|| "warning".to_owned())
/// })?;
/// assert_eq!(level, 4);
/// # Ok::<(), logging::LevelError>(())
/// ```
pub fn apply_env_with<F>(config: &LevelConfig, spec: &EnvSpec, lookup: F) -> Result<i32, LevelError>
where
    F: Fn(&str) -> Option<String>,
{
    let names = spec.names();
    let read = |name: &Option<String>| name.as_deref().and_then(&lookup);
    let flag = |name: &Option<String>| read(name).is_some_and(|value| is_truthy(&value));

    if let Some(text) = read(&names.level)
        && !text.trim().is_empty()
    {
        config.set_level(text.parse::<LevelValue>()?)?;
    }
    if flag(&names.debug) {
        config.set_level(Severity::Debug)?;
    }
    if flag(&names.trace) {
        config.set_level(Severity::Trace)?;
    }
    if flag(&names.verbose) {
        config.apply_offset(1);
    }
    if flag(&names.quiet) {
        config.apply_offset(-1);
    }

    let level = config.level();
    tracing::debug!(target: CONFIG_TARGET, level = level, "env: applied environment");
    Ok(level)
}
