//! crates/logging/src/clamp.rs
//! Bound pairs applied to every effective level.

use crate::severity::Severity;

/// Sentinel one step below [`Severity::Emergency`]: everything except the
/// always-on severity is squelched.
pub const LEVEL_FLOOR: i32 = Severity::Emergency.rank() - 1;

/// One step above [`Severity::Trace`]: every severity is enabled.
pub const LEVEL_CEILING: i32 = Severity::Trace.rank() + 1;

/// A `(min, max)` pair with clamp arithmetic.
///
/// `min <= max` is not enforced. When the bounds cross, `max` wins, so a
/// misconfigured pair still yields a deterministic level instead of failing.
///
/// # Examples
///
/// ```
/// use logging::LevelClamp;
///
/// let clamp = LevelClamp::new(2, 6);
/// assert_eq!(clamp.apply(9), 6);
/// assert_eq!(clamp.apply(-4), 2);
/// assert_eq!(clamp.apply(4), 4);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelClamp {
    /// Lowest permitted level.
    pub min: i32,
    /// Highest permitted level.
    pub max: i32,
}

impl LevelClamp {
    /// Creates a clamp from explicit bounds.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// The unrestricted clamp, `[LEVEL_FLOOR, LEVEL_CEILING]`.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self::new(LEVEL_FLOOR, LEVEL_CEILING)
    }

    /// Restricts `value` into `[min, max]`.
    #[must_use]
    pub const fn apply(self, value: i32) -> i32 {
        let raised = if value < self.min { self.min } else { value };
        if raised > self.max { self.max } else { raised }
    }

    /// Returns a copy with a different lower bound.
    #[must_use]
    pub const fn with_min(self, min: i32) -> Self {
        Self::new(min, self.max)
    }

    /// Returns a copy with a different upper bound.
    #[must_use]
    pub const fn with_max(self, max: i32) -> Self {
        Self::new(self.min, max)
    }

    /// Reports whether `value` already lies inside the bounds.
    #[must_use]
    pub const fn contains(self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for LevelClamp {
    fn default() -> Self {
        Self::unrestricted()
    }
}
