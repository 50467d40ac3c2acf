//! crates/logging/src/error.rs
//! Error taxonomy for level resolution, setters, and the flag scanner.

use thiserror::Error;

/// Errors surfaced by the level controller.
///
/// Range problems are never errors: out-of-range levels are clamped. Only
/// malformed input reaches the caller.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LevelError {
    /// A severity name or alias could not be resolved to a numeric rank.
    #[error("unknown severity '{0}'")]
    UnknownSeverity(String),
    /// A setter, scanner, or option received a malformed argument.
    #[error("invalid argument: {0}")]
    Argument(String),
    /// A matcher handed to the flag scanner could not be compiled.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },
}

impl LevelError {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }
}
