//! crates/logging/src/store.rs
//! Shared, mutable level configuration: global level, global clamp, and
//! per-category overrides and clamps.
//!
//! Every setter performs its field update and the generation bump while
//! holding the store's lock, so readers that snapshot `(effective level,
//! generation)` see either the old or the new configuration, never a torn mix.
//! The generation lives in an atomic so adapters can detect staleness without
//! taking the lock.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::clamp::LevelClamp;
use crate::error::LevelError;
use crate::severity::{Severity, SeverityResolver, StandardSeverities};
use crate::value::LevelValue;

/// Raw per-category settings. Absent fields fall back to the global ones.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct CategoryLevel {
    level: Option<i32>,
    min: Option<i32>,
    max: Option<i32>,
}

impl CategoryLevel {
    const fn is_empty(self) -> bool {
        self.level.is_none() && self.min.is_none() && self.max.is_none()
    }
}

#[derive(Clone, Debug)]
struct LevelState {
    level: i32,
    clamp: LevelClamp,
    categories: BTreeMap<String, CategoryLevel>,
}

impl LevelState {
    fn new() -> Self {
        Self {
            level: Severity::Info.rank(),
            clamp: LevelClamp::unrestricted(),
            categories: BTreeMap::new(),
        }
    }

    fn category(&self, name: &str) -> CategoryLevel {
        self.categories.get(name).copied().unwrap_or_default()
    }

    fn category_clamp(&self, name: &str) -> LevelClamp {
        let category = self.category(name);
        LevelClamp::new(
            category.min.unwrap_or(self.clamp.min),
            category.max.unwrap_or(self.clamp.max),
        )
    }

    fn category_level(&self, name: &str) -> i32 {
        let raw = self.category(name).level.unwrap_or(self.level);
        self.category_clamp(name).apply(raw)
    }

    fn update_category(&mut self, name: &str, update: impl FnOnce(&mut CategoryLevel)) {
        let entry = self.categories.entry(name.to_owned()).or_default();
        update(entry);
        if entry.is_empty() {
            self.categories.remove(name);
        }
    }
}

/// The level configuration shared by every adapter that logs through it.
///
/// A process normally uses the lazily created [`LevelConfig::global`]
/// instance, but independent instances can be created with
/// [`LevelConfig::new`] and passed explicitly; adapters of one instance never
/// observe changes made to another.
///
/// # Examples
///
/// ```
/// use logging::{LevelConfig, LevelValue, Severity};
///
/// let config = LevelConfig::new();
/// assert_eq!(config.level(), Severity::Info.rank());
///
/// config.set_level("+1".parse::<LevelValue>()?)?;
/// assert_eq!(config.level(), Severity::Debug.rank());
///
/// config.set_category_level("net", Some(Severity::Error.into()))?;
/// config.set_level(Severity::Trace)?;
/// assert_eq!(config.category_level("net"), Severity::Error.rank());
/// assert_eq!(config.category_level("db"), Severity::Trace.rank());
/// # Ok::<(), logging::LevelError>(())
/// ```
pub struct LevelConfig {
    state: Mutex<LevelState>,
    generation: AtomicU64,
    resolver: Box<dyn SeverityResolver>,
}

impl LevelConfig {
    /// Creates a configuration with default settings and the standard resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::with_resolver(StandardSeverities)
    }

    /// Creates a configuration that resolves level names through `resolver`.
    #[must_use]
    pub fn with_resolver<R>(resolver: R) -> Self
    where
        R: SeverityResolver + 'static,
    {
        Self {
            state: Mutex::new(LevelState::new()),
            generation: AtomicU64::new(0),
            resolver: Box::new(resolver),
        }
    }

    /// Returns the process-wide default configuration.
    pub fn global() -> &'static Arc<Self> {
        static GLOBAL: OnceLock<Arc<LevelConfig>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(Self::new()))
    }

    fn lock(&self) -> MutexGuard<'_, LevelState> {
        self.state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Marks every outstanding dispatch table stale. Must be called with the
    /// state lock held when paired with a mutation.
    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Returns the current configuration generation.
    ///
    /// Any mutation increments the generation; dispatch tables stamped with an
    /// older value are stale.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Invalidates every outstanding dispatch table in O(1).
    pub fn invalidate_all(&self) {
        let _state = self.lock();
        self.bump();
    }

    /// Resolves a level name through the configured resolver.
    pub fn resolve(&self, name: &str) -> Result<i32, LevelError> {
        self.resolver.resolve(name)
    }

    /// Restores the default level, clamp, and removes every category setting.
    pub fn reset(&self) {
        let mut state = self.lock();
        *state = LevelState::new();
        self.bump();
    }

    /// Returns the global level.
    #[must_use]
    pub fn level(&self) -> i32 {
        self.lock().level
    }

    /// Returns the global clamp.
    #[must_use]
    pub fn clamp(&self) -> LevelClamp {
        self.lock().clamp
    }

    /// Returns the global lower bound.
    #[must_use]
    pub fn min(&self) -> i32 {
        self.clamp().min
    }

    /// Returns the global upper bound.
    #[must_use]
    pub fn max(&self) -> i32 {
        self.clamp().max
    }

    /// Sets the global level and returns the clamped result.
    ///
    /// Relative values adjust the current global level. Out-of-range results
    /// are clamped into the global bounds rather than rejected.
    pub fn set_level(&self, value: impl Into<LevelValue>) -> Result<i32, LevelError> {
        let value = value.into();
        let mut state = self.lock();
        let resolved = value.resolve(state.level, self.resolver.as_ref())?;
        state.level = state.clamp.apply(resolved);
        self.bump();
        Ok(state.level)
    }

    /// Adjusts the global level by `offset`, saturating at the bounds.
    pub fn apply_offset(&self, offset: i32) -> i32 {
        let mut state = self.lock();
        state.level = state.clamp.apply(state.level.saturating_add(offset));
        self.bump();
        state.level
    }

    /// Sets the global lower bound and re-clamps the global level.
    ///
    /// Relative values adjust the current lower bound.
    pub fn set_min(&self, value: impl Into<LevelValue>) -> Result<i32, LevelError> {
        let value = value.into();
        let mut state = self.lock();
        let min = value.resolve(state.clamp.min, self.resolver.as_ref())?;
        state.clamp = state.clamp.with_min(min);
        state.level = state.clamp.apply(state.level);
        self.bump();
        Ok(min)
    }

    /// Sets the global upper bound and re-clamps the global level.
    ///
    /// Relative values adjust the current upper bound.
    pub fn set_max(&self, value: impl Into<LevelValue>) -> Result<i32, LevelError> {
        let value = value.into();
        let mut state = self.lock();
        let max = value.resolve(state.clamp.max, self.resolver.as_ref())?;
        state.clamp = state.clamp.with_max(max);
        state.level = state.clamp.apply(state.level);
        self.bump();
        Ok(max)
    }

    /// Returns the effective level of `category`.
    ///
    /// This is the category override (or the global level when there is none)
    /// clamped into the category bounds (or the global bounds), recomputed on
    /// every call.
    #[must_use]
    pub fn category_level(&self, category: &str) -> i32 {
        self.lock().category_level(category)
    }

    /// Returns the effective clamp of `category`.
    #[must_use]
    pub fn category_clamp(&self, category: &str) -> LevelClamp {
        self.lock().category_clamp(category)
    }

    /// Returns the effective lower bound of `category`.
    #[must_use]
    pub fn category_min(&self, category: &str) -> i32 {
        self.category_clamp(category).min
    }

    /// Returns the effective upper bound of `category`.
    #[must_use]
    pub fn category_max(&self, category: &str) -> i32 {
        self.category_clamp(category).max
    }

    /// Reports whether `category` carries its own level override.
    #[must_use]
    pub fn has_category_override(&self, category: &str) -> bool {
        self.lock().category(category).level.is_some()
    }

    /// Lists the categories that carry any setting, in name order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.lock().categories.keys().cloned().collect()
    }

    /// Sets or clears the level override of `category`.
    ///
    /// `None` removes the override so the category tracks the global level
    /// again. Relative values adjust the category's current effective level.
    /// Returns the new effective level.
    pub fn set_category_level(
        &self,
        category: &str,
        value: Option<LevelValue>,
    ) -> Result<i32, LevelError> {
        let mut state = self.lock();
        let level = match value {
            Some(value) => Some(value.resolve(state.category_level(category), self.resolver.as_ref())?),
            None => None,
        };
        state.update_category(category, |entry| entry.level = level);
        self.bump();
        Ok(state.category_level(category))
    }

    /// Sets or clears the lower bound of `category`.
    ///
    /// `None` reverts to the global lower bound. Relative values adjust the
    /// category's current effective lower bound. Returns the new effective
    /// lower bound.
    pub fn set_category_min(
        &self,
        category: &str,
        value: Option<LevelValue>,
    ) -> Result<i32, LevelError> {
        let mut state = self.lock();
        let min = match value {
            Some(value) => {
                Some(value.resolve(state.category_clamp(category).min, self.resolver.as_ref())?)
            }
            None => None,
        };
        state.update_category(category, |entry| entry.min = min);
        self.bump();
        Ok(state.category_clamp(category).min)
    }

    /// Sets or clears the upper bound of `category`.
    ///
    /// `None` reverts to the global upper bound. Relative values adjust the
    /// category's current effective upper bound. Returns the new effective
    /// upper bound.
    pub fn set_category_max(
        &self,
        category: &str,
        value: Option<LevelValue>,
    ) -> Result<i32, LevelError> {
        let mut state = self.lock();
        let max = match value {
            Some(value) => {
                Some(value.resolve(state.category_clamp(category).max, self.resolver.as_ref())?)
            }
            None => None,
        };
        state.update_category(category, |entry| entry.max = max);
        self.bump();
        Ok(state.category_clamp(category).max)
    }

    /// Takes a consistent `(effective level, generation)` snapshot for `category`.
    pub(crate) fn snapshot(&self, category: &str) -> (i32, u64) {
        let state = self.lock();
        (state.category_level(category), self.generation())
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LevelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("LevelConfig")
            .field("level", &state.level)
            .field("clamp", &state.clamp)
            .field("categories", &state.categories)
            .field("generation", &self.generation())
            .finish()
    }
}

#[cfg(test)]
mod tests;
