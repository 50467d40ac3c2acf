//! crates/logging/src/init/options.rs
//! Startup configuration: initial levels plus env, argv and signal wiring.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::LevelError;
use crate::store::LevelConfig;
use crate::value::LevelValue;

use super::CONFIG_TARGET;
use super::argv::{ArgvPreset, ArgvSpec, apply_argv};
use super::env::{EnvPreset, EnvSpec, apply_env_with};
use super::signals::{SignalBindings, SignalRole, parse_signal_roles};

/// Option names recognised by [`Options::from_pairs`].
pub const OPTION_NAMES: [&str; 6] = [
    "log_level",
    "log_level_min",
    "log_level_max",
    "argv",
    "env",
    "handle_signals",
];

/// Startup options for a [`LevelConfig`].
///
/// Every field is optional; an all-default value applies nothing.
///
/// # Examples
///
/// ```
/// use logging::init::Options;
/// use logging::LevelConfig;
///
/// let options = Options::from_pairs([("log_level", "notice"), ("argv", "consume")])?;
/// let config = LevelConfig::new();
/// let mut args: Vec<String> = ["prog", "-vv", "input"].map(String::from).into();
/// options.apply_with(&config, Some(&mut args), |_| None)?;
///
/// assert_eq!(config.level(), 7);
/// assert_eq!(args, ["prog", "input"]);
/// # Ok::<(), logging::LevelError>(())
/// ```
///
/// With the `serde` feature, deserialization accepts the same field names;
/// unknown fields are reported on the diagnostic channel like unknown
/// [`from_pairs`](Self::from_pairs) keys.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "OptionsRepr")
)]
pub struct Options {
    /// Initial global level text (`info`, `7`, `+1`).
    pub log_level: Option<String>,
    /// Initial global lower bound.
    pub log_level_min: Option<String>,
    /// Initial global upper bound.
    pub log_level_max: Option<String>,
    /// Argument-vector scanning.
    pub argv: Option<ArgvSpec>,
    /// Environment variables consulted.
    pub env: Option<EnvSpec>,
    /// Signal name to role.
    pub handle_signals: BTreeMap<String, SignalRole>,
}

impl Options {
    /// Builds options from a flat key/value dictionary.
    ///
    /// `argv` accepts a preset name (`default`, `consume`) or `none`; `env`
    /// accepts `default` or `none`; `handle_signals` accepts `default`,
    /// `none`, or `SIGNAL=ROLE` pairs separated by commas. Unknown keys are
    /// reported on the diagnostic channel and ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, LevelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            let key = key.as_ref().trim();
            let value = value.as_ref();
            match key {
                "log_level" => options.log_level = Some(value.to_owned()),
                "log_level_min" => options.log_level_min = Some(value.to_owned()),
                "log_level_max" => options.log_level_max = Some(value.to_owned()),
                "argv" => {
                    options.argv = if is_disabled(value) {
                        None
                    } else {
                        Some(value.parse::<ArgvPreset>()?.into())
                    };
                }
                "env" => {
                    options.env = if is_disabled(value) {
                        None
                    } else {
                        Some(value.parse::<EnvPreset>()?.into())
                    };
                }
                "handle_signals" => options.handle_signals = parse_signal_roles(value)?,
                unknown => warn_unknown(unknown),
            }
        }
        Ok(options)
    }

    /// Options with every preset enabled: default argv scanning, default
    /// environment names and the default signal roles.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            argv: Some(ArgvSpec::default()),
            env: Some(EnvSpec::default()),
            handle_signals: super::signals::default_signal_roles(),
            ..Self::default()
        }
    }

    /// Applies the options using the process environment.
    ///
    /// See [`apply_with`](Self::apply_with) for the order of operations.
    pub fn apply(
        &self,
        config: &LevelConfig,
        argv: Option<&mut Vec<String>>,
    ) -> Result<i32, LevelError> {
        self.apply_with(config, argv, |name| std::env::var(name).ok())
    }

    /// Applies the options, reading environment variables through `lookup`.
    ///
    /// Order: lower bound, upper bound, level, environment, argument vector.
    /// Scanning is skipped when `self.argv` is `None`; otherwise a missing
    /// argument vector is a [`LevelError::Argument`]. Returns the final
    /// global level.
    pub fn apply_with<F>(
        &self,
        config: &LevelConfig,
        argv: Option<&mut Vec<String>>,
        lookup: F,
    ) -> Result<i32, LevelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(min) = &self.log_level_min {
            config.set_min(min.parse::<LevelValue>()?)?;
        }
        if let Some(max) = &self.log_level_max {
            config.set_max(max.parse::<LevelValue>()?)?;
        }
        if let Some(level) = &self.log_level {
            config.set_level(level.parse::<LevelValue>()?)?;
        }
        if let Some(env) = &self.env {
            apply_env_with(config, env, lookup)?;
        }
        if let Some(spec) = &self.argv {
            apply_argv(config, spec, argv)?;
        }
        Ok(config.level())
    }

    /// Installs the configured signal handlers. Returns `None` when no
    /// signals are configured.
    pub fn install_signals(
        &self,
        config: Arc<LevelConfig>,
    ) -> Result<Option<SignalBindings>, LevelError> {
        if self.handle_signals.is_empty() {
            return Ok(None);
        }
        SignalBindings::install(config, &self.handle_signals).map(Some)
    }
}

#[cfg(feature = "serde")]
#[derive(Default, serde::Deserialize)]
#[serde(default)]
struct OptionsRepr {
    log_level: Option<String>,
    log_level_min: Option<String>,
    log_level_max: Option<String>,
    argv: Option<ArgvSpec>,
    env: Option<EnvSpec>,
    handle_signals: BTreeMap<String, SignalRole>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde::de::IgnoredAny>,
}

#[cfg(feature = "serde")]
impl From<OptionsRepr> for Options {
    fn from(repr: OptionsRepr) -> Self {
        for option in repr.unknown.keys() {
            warn_unknown(option);
        }
        Self {
            log_level: repr.log_level,
            log_level_min: repr.log_level_min,
            log_level_max: repr.log_level_max,
            argv: repr.argv,
            env: repr.env,
            handle_signals: repr.handle_signals,
        }
    }
}

fn warn_unknown(option: &str) {
    tracing::warn!(target: CONFIG_TARGET, option = option, "ignoring unknown option");
}

fn is_disabled(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || ["none", "off", "false", "0"]
            .iter()
            .any(|disabled| value.eq_ignore_ascii_case(disabled))
}
