//! crates/logging/src/init/signals.rs
//! Signal-driven level adjustment.
//!
//! Handlers never touch the store from signal context. Delivered signals are
//! queued by `signal-hook` and drained on a dedicated thread, which calls the
//! store's thread-safe setters.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::LevelError;
use crate::store::LevelConfig;

use super::SIGNAL_TARGET;

/// What a bound signal does to the global level.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SignalRole {
    /// Raise the level by one.
    Verbose,
    /// Lower the level by one.
    Quiet,
}

impl SignalRole {
    /// Level change applied when the signal arrives.
    #[must_use]
    pub const fn offset(self) -> i32 {
        match self {
            Self::Verbose => 1,
            Self::Quiet => -1,
        }
    }

    /// Returns the role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
        }
    }
}

impl fmt::Display for SignalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalRole {
    type Err = LevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "verbose" | "+1" => Ok(Self::Verbose),
            "quiet" | "-1" => Ok(Self::Quiet),
            other => Err(LevelError::argument(format!("unknown signal role '{other}'"))),
        }
    }
}

/// `SIGUSR1` raises the level, `SIGUSR2` lowers it.
#[must_use]
pub fn default_signal_roles() -> BTreeMap<String, SignalRole> {
    BTreeMap::from([
        ("SIGUSR1".to_owned(), SignalRole::Verbose),
        ("SIGUSR2".to_owned(), SignalRole::Quiet),
    ])
}

/// Parses `SIGUSR1=verbose,SIGUSR2=quiet`. `default` selects
/// [`default_signal_roles`]; `none` and the empty string select no signals.
pub fn parse_signal_roles(text: &str) -> Result<BTreeMap<String, SignalRole>, LevelError> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("default") {
        return Ok(default_signal_roles());
    }
    if text.is_empty() || text.eq_ignore_ascii_case("none") {
        return Ok(BTreeMap::new());
    }

    text.split(',')
        .map(|entry| {
            let (name, role) = entry.split_once('=').ok_or_else(|| {
                LevelError::argument(format!("expected SIGNAL=ROLE, got '{}'", entry.trim()))
            })?;
            Ok((name.trim().to_owned(), role.parse()?))
        })
        .collect()
}

/// Applies `role` to `config` and returns the new global level.
///
/// This is the step the signal thread runs for each delivery.
pub fn apply_role(config: &LevelConfig, role: SignalRole) -> i32 {
    let level = config.apply_offset(role.offset());
    tracing::debug!(
        target: SIGNAL_TARGET,
        role = role.as_str(),
        level = level,
        "signal: adjusted level"
    );
    level
}

#[cfg(unix)]
pub use self::unix::{SignalBindings, signal_number};

#[cfg(not(unix))]
pub use self::fallback::{SignalBindings, signal_number};

#[cfg(unix)]
mod unix {
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::thread::JoinHandle;

    use signal_hook::consts::signal;
    use signal_hook::iterator::{Handle, Signals};

    use super::{SignalRole, apply_role};
    use crate::error::LevelError;
    use crate::store::LevelConfig;

    const SIGNALS: &[(&str, i32)] = &[
        ("HUP", signal::SIGHUP),
        ("INT", signal::SIGINT),
        ("QUIT", signal::SIGQUIT),
        ("ALRM", signal::SIGALRM),
        ("TERM", signal::SIGTERM),
        ("USR1", signal::SIGUSR1),
        ("USR2", signal::SIGUSR2),
        ("CHLD", signal::SIGCHLD),
        ("CONT", signal::SIGCONT),
        ("TSTP", signal::SIGTSTP),
        ("TTIN", signal::SIGTTIN),
        ("TTOU", signal::SIGTTOU),
        ("WINCH", signal::SIGWINCH),
        ("PIPE", signal::SIGPIPE),
    ];

    /// Resolves a signal name (`SIGUSR1`, `usr1`) or number to its number.
    pub fn signal_number(name: &str) -> Result<i32, LevelError> {
        let trimmed = name.trim();
        if let Ok(number) = trimmed.parse::<i32>() {
            return Ok(number);
        }
        let upper = trimmed.to_ascii_uppercase();
        let bare = upper.strip_prefix("SIG").unwrap_or(&upper);
        SIGNALS
            .iter()
            .find(|(candidate, _)| *candidate == bare)
            .map(|(_, number)| *number)
            .ok_or_else(|| LevelError::argument(format!("unknown signal '{trimmed}'")))
    }

    /// Installed signal handlers and the thread that services them.
    ///
    /// Dropping the bindings closes the handle and joins the thread.
    #[derive(Debug)]
    pub struct SignalBindings {
        handle: Handle,
        thread: Option<JoinHandle<()>>,
    }

    impl SignalBindings {
        /// Registers every signal in `roles` and starts the service thread.
        pub fn install(
            config: Arc<LevelConfig>,
            roles: &BTreeMap<String, SignalRole>,
        ) -> Result<Self, LevelError> {
            let table = roles
                .iter()
                .map(|(name, role)| Ok((signal_number(name)?, *role)))
                .collect::<Result<BTreeMap<i32, SignalRole>, LevelError>>()?;

            let mut signals = Signals::new(table.keys()).map_err(|error| {
                LevelError::argument(format!("cannot register signal handlers: {error}"))
            })?;
            let handle = signals.handle();

            let thread = std::thread::Builder::new()
                .name("levelpipe-signals".into())
                .spawn(move || {
                    for delivered in signals.forever() {
                        if let Some(role) = table.get(&delivered) {
                            apply_role(&config, *role);
                        }
                    }
                })
                .map_err(|error| {
                    handle.close();
                    LevelError::argument(format!("cannot start signal thread: {error}"))
                })?;

            Ok(Self {
                handle,
                thread: Some(thread),
            })
        }

        /// Returns the `signal-hook` handle, e.g. to register more signals.
        #[must_use]
        pub fn handle(&self) -> &Handle {
            &self.handle
        }

        /// Stops servicing signals and joins the thread.
        pub fn shutdown(mut self) {
            self.stop();
        }

        fn stop(&mut self) {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }

    impl Drop for SignalBindings {
        fn drop(&mut self) {
            self.stop();
        }
    }
}

#[cfg(not(unix))]
mod fallback {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::SignalRole;
    use crate::error::LevelError;
    use crate::store::LevelConfig;

    /// Signal names cannot be resolved on this platform.
    pub fn signal_number(name: &str) -> Result<i32, LevelError> {
        Err(LevelError::argument(format!(
            "signal '{}' is not supported on this platform",
            name.trim()
        )))
    }

    /// Placeholder; installation always fails on this platform.
    #[derive(Debug)]
    pub struct SignalBindings(());

    impl SignalBindings {
        /// Always fails with [`LevelError::Argument`].
        pub fn install(
            _config: Arc<LevelConfig>,
            _roles: &BTreeMap<String, SignalRole>,
        ) -> Result<Self, LevelError> {
            Err(LevelError::argument(
                "signal handling is not supported on this platform",
            ))
        }

        /// Does nothing.
        pub fn shutdown(self) {}
    }
}
