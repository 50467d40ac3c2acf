//! crates/logging/src/init.rs
//! Startup and runtime bindings that drive a [`LevelConfig`](crate::LevelConfig)
//! from the environment, the argument vector and OS signals.
//!
//! [`Options`] collects the settings; [`Options::apply`] runs the synchronous
//! steps in a fixed order (bounds, level, environment, argv) and
//! [`Options::install_signals`] starts the signal thread separately.
//! Diagnostics are emitted through `tracing` under the `levelpipe::config`
//! and `levelpipe::signal` targets, never through the adapters.

mod argv;
mod env;
mod options;
mod signals;

pub use argv::{ArgvPatterns, ArgvPreset, ArgvSpec, apply_argv};
pub use env::{EnvNames, EnvPreset, EnvSpec, apply_env, apply_env_with, is_truthy};
pub use options::{OPTION_NAMES, Options};
pub use signals::{
    SignalBindings, SignalRole, apply_role, default_signal_roles, parse_signal_roles,
    signal_number,
};

/// `tracing` target for configuration diagnostics.
pub const CONFIG_TARGET: &str = "levelpipe::config";

/// `tracing` target for signal-driven adjustments.
pub const SIGNAL_TARGET: &str = "levelpipe::signal";
