//! crates/logging/src/severity.rs
//! Syslog-ordered severities and the name resolver used for level text.

use std::fmt;
use std::str::FromStr;

use crate::clamp::{LEVEL_CEILING, LEVEL_FLOOR};
use crate::error::LevelError;

/// Importance of a log call, ordered from most to least severe.
///
/// The numeric [`rank`](Self::rank) is the sole ordering key: a call at
/// severity `s` is enabled when the effective level is `>= s.rank()`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Severity {
    /// System is unusable. Always enabled.
    Emergency = 0,
    /// Action must be taken immediately.
    Alert = 1,
    /// Critical conditions.
    Critical = 2,
    /// Error conditions.
    Error = 3,
    /// Warning conditions.
    Warning = 4,
    /// Normal but significant condition.
    Notice = 5,
    /// Informational messages.
    Info = 6,
    /// Debug-level messages.
    Debug = 7,
    /// Fine-grained tracing.
    Trace = 8,
}

impl Severity {
    /// Every severity in rank order.
    pub const ALL: [Self; 9] = [
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// The severity that dispatch tables enable regardless of level.
    pub const ALWAYS_ON: Self = Self::Emergency;

    /// Returns the numeric rank (0 = emergency, 8 = trace).
    #[must_use]
    pub const fn rank(self) -> i32 {
        self as i32
    }

    /// Returns the severity with the given rank, if any.
    #[must_use]
    pub const fn from_rank(rank: i32) -> Option<Self> {
        match rank {
            0 => Some(Self::Emergency),
            1 => Some(Self::Alert),
            2 => Some(Self::Critical),
            3 => Some(Self::Error),
            4 => Some(Self::Warning),
            5 => Some(Self::Notice),
            6 => Some(Self::Info),
            7 => Some(Self::Debug),
            8 => Some(Self::Trace),
            _ => None,
        }
    }

    /// Returns the lowercase canonical name.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::Warning.as_str(), "warning");
    /// assert_eq!(Severity::Emergency.as_str(), "emergency");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Returns the line prefix written in front of prefixed output.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::Warning.prefix(), "warning: ");
    /// assert_eq!(Severity::Debug.prefix(), "debug: ");
    /// ```
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Emergency => "emergency: ",
            Self::Alert => "alert: ",
            Self::Critical => "critical: ",
            Self::Error => "error: ",
            Self::Warning => "warning: ",
            Self::Notice => "notice: ",
            Self::Info => "info: ",
            Self::Debug => "debug: ",
            Self::Trace => "trace: ",
        }
    }

    pub(crate) const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LevelError;

    /// Parses a severity name or alias, ignoring ASCII case and surrounding whitespace.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let name = input.trim();
        let lookup = |candidates: &[&str]| candidates.iter().any(|c| name.eq_ignore_ascii_case(c));

        let severity = if lookup(&["emergency", "emerg", "fatal", "panic"]) {
            Self::Emergency
        } else if lookup(&["alert"]) {
            Self::Alert
        } else if lookup(&["critical", "crit"]) {
            Self::Critical
        } else if lookup(&["error", "err"]) {
            Self::Error
        } else if lookup(&["warning", "warn"]) {
            Self::Warning
        } else if lookup(&["notice"]) {
            Self::Notice
        } else if lookup(&["info", "inform"]) {
            Self::Info
        } else if lookup(&["debug"]) {
            Self::Debug
        } else if lookup(&["trace"]) {
            Self::Trace
        } else {
            return Err(LevelError::UnknownSeverity(name.to_owned()));
        };
        Ok(severity)
    }
}

impl From<Severity> for i32 {
    fn from(severity: Severity) -> Self {
        severity.rank()
    }
}

/// Translates level names into numeric ranks.
///
/// A [`LevelConfig`](crate::LevelConfig) calls its resolver for every
/// non-numeric level value. Implementations must be pure; the store may call
/// them while holding its internal lock.
pub trait SeverityResolver: Send + Sync {
    /// Resolves `name` to a numeric rank.
    fn resolve(&self, name: &str) -> Result<i32, LevelError>;
}

/// The default resolver: severity names and aliases plus the `none`/`all`
/// pseudo-levels at either end of the range.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardSeverities;

impl SeverityResolver for StandardSeverities {
    fn resolve(&self, name: &str) -> Result<i32, LevelError> {
        let trimmed = name.trim();
        if ["none", "off", "quiet"]
            .iter()
            .any(|alias| trimmed.eq_ignore_ascii_case(alias))
        {
            return Ok(LEVEL_FLOOR);
        }
        if ["all", "any"]
            .iter()
            .any(|alias| trimmed.eq_ignore_ascii_case(alias))
        {
            return Ok(LEVEL_CEILING);
        }
        trimmed.parse::<Severity>().map(Severity::rank)
    }
}

impl<F> SeverityResolver for F
where
    F: Fn(&str) -> Result<i32, LevelError> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Result<i32, LevelError> {
        self(name)
    }
}
