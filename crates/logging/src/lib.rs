#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` decides, for every log call at every severity and category,
//! whether the call produces output, and lets operators change the effective
//! level at runtime through signals, environment variables or startup flags
//! without re-creating loggers.
//!
//! # Design
//!
//! - [`LevelConfig`] holds the global level, the global [`LevelClamp`] and
//!   per-category overrides and clamps. Every mutation bumps a generation
//!   counter.
//! - [`compile_for`] folds a category's effective level into a
//!   [`DispatchTable`], a bitset of enabled severities stamped with the
//!   generation. [`invalidate_all`] marks every table stale in O(1).
//! - [`Logger`] is the per-category front-end. It caches one table and
//!   recompiles it only when the generation moved, so a suppressed call costs
//!   an atomic load and a mask test.
//! - [`FlagScanner`] turns `-v`/`-q` flags, including bundles such as `-qvv`,
//!   into a signed offset and optionally removes them from the argument vector.
//! - [`init`] wires the environment, the argument vector and OS signals to the
//!   store.
//!
//! # Invariants
//!
//! - The effective level of a category is its override (or the global level)
//!   clamped into its bounds (or the global bounds), recomputed on every read.
//! - A table compiled for level `L` enables exactly the severities whose rank
//!   is `<= L`, plus [`Severity::Emergency`], which is never suppressed.
//! - A snapshot of `(effective level, generation)` is taken under the store's
//!   lock, so a dispatching logger never observes a half-applied change.
//!
//! # Errors
//!
//! Setters return [`LevelError::UnknownSeverity`] for names the resolver does
//! not know and [`LevelError::Argument`] for malformed level text. Out-of-range
//! levels are clamped, never rejected. Pattern compilation failures surface as
//! [`LevelError::InvalidPattern`]. Logger writes return [`std::io::Error`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{FlagScanner, LevelConfig, Logger, Severity};
//!
//! let config = Arc::new(LevelConfig::new());
//! let mut logger = Logger::new("app", Arc::clone(&config), Vec::new());
//!
//! logger.debug(["suppressed"])?;
//!
//! let mut args: Vec<String> = ["prog", "-v"].map(String::from).into();
//! let offset = FlagScanner::standard().remove(true).scan(&mut args);
//! config.apply_offset(-offset);
//!
//! logger.debug(["now visible"])?;
//! assert_eq!(logger.into_inner(), b"debug: now visible\n".to_vec());
//! assert_eq!(args, ["prog"]);
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for the newline-ensuring output writer.

mod adapter;
mod clamp;
mod dispatch;
mod error;
pub mod init;
mod scanner;
mod severity;
mod store;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod value;

pub use adapter::Logger;
pub use clamp::{LEVEL_CEILING, LEVEL_FLOOR, LevelClamp};
pub use dispatch::{DispatchCache, DispatchTable, compile_for, invalidate_all};
pub use error::LevelError;
pub use logging_sink::{LineMode, LineSink};
pub use scanner::{FlagScanner, Pattern, PatternSet};
pub use severity::{Severity, SeverityResolver, StandardSeverities};
pub use store::LevelConfig;
#[cfg(feature = "tracing")]
pub use tracing_bridge::{LevelLayer, init_tracing};
pub use value::LevelValue;
