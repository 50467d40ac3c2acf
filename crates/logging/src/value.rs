//! crates/logging/src/value.rs
//! Absolute, relative, and named level inputs accepted by the setters.

use std::fmt;
use std::str::FromStr;

use crate::error::LevelError;
use crate::severity::{Severity, SeverityResolver};

/// A level as supplied by a caller, before resolution against the store.
///
/// Text parses as follows: `+N` and `-N` are relative adjustments, bare `N`
/// is an absolute rank, anything else is a name handed to the store's
/// [`SeverityResolver`].
///
/// # Examples
///
/// ```
/// use logging::LevelValue;
///
/// assert_eq!("+2".parse(), Ok(LevelValue::Relative(2)));
/// assert_eq!("-1".parse(), Ok(LevelValue::Relative(-1)));
/// assert_eq!("7".parse(), Ok(LevelValue::Absolute(7)));
/// assert_eq!("debug".parse(), Ok(LevelValue::Named("debug".into())));
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LevelValue {
    /// An absolute numeric level.
    Absolute(i32),
    /// An adjustment applied to the current value.
    Relative(i32),
    /// A severity name or alias.
    Named(String),
}

impl LevelValue {
    /// Resolves the value against `current`, consulting `resolver` for names.
    ///
    /// Relative adjustments saturate instead of overflowing; the store clamps
    /// the result afterwards.
    pub fn resolve(
        &self,
        current: i32,
        resolver: &dyn SeverityResolver,
    ) -> Result<i32, LevelError> {
        match self {
            Self::Absolute(level) => Ok(*level),
            Self::Relative(delta) => Ok(current.saturating_add(*delta)),
            Self::Named(name) => resolver.resolve(name),
        }
    }

}

/// Decimal digits as an `i64`, saturating at `i64::MAX`.
fn saturating_digits(digits: &str) -> i64 {
    digits.bytes().fold(0_i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
    })
}

/// Narrows to `i32`; the store's clamp settles the final level.
fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

impl FromStr for LevelValue {
    type Err = LevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim();
        if text.is_empty() {
            return Err(LevelError::argument("empty level value"));
        }
        if text.split_whitespace().nth(1).is_some() {
            return Err(LevelError::argument(format!(
                "expected a single level value, got '{text}'"
            )));
        }

        let (sign, digits) = match text.as_bytes()[0] {
            b'+' => (Some(1), &text[1..]),
            b'-' => (Some(-1), &text[1..]),
            _ => (None, text),
        };

        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            let magnitude = saturating_digits(digits);
            return Ok(match sign {
                Some(sign) => Self::Relative(saturate(sign * magnitude)),
                None => Self::Absolute(saturate(magnitude)),
            });
        }

        if sign.is_some() {
            return Err(LevelError::argument(format!(
                "relative level '{text}' must be followed by digits"
            )));
        }

        Ok(Self::Named(text.to_owned()))
    }
}

impl fmt::Display for LevelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(level) => write!(f, "{level}"),
            Self::Relative(delta) => write!(f, "{delta:+}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<i32> for LevelValue {
    fn from(level: i32) -> Self {
        Self::Absolute(level)
    }
}

impl From<Severity> for LevelValue {
    fn from(severity: Severity) -> Self {
        Self::Absolute(severity.rank())
    }
}
