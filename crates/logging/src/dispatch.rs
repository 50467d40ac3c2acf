//! crates/logging/src/dispatch.rs
//! Compiled enabled-severity tables and their generation-stamped cache.
//!
//! A [`DispatchTable`] folds the level comparison for every severity into a
//! bitset once per configuration generation. Checking a call is then a
//! single mask test, independent of how many categories or overrides exist.

use std::collections::HashMap;
use std::sync::Arc;

use crate::severity::Severity;
use crate::store::LevelConfig;

/// Enabled severities for one category under one configuration generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct DispatchTable {
    enabled: u16,
    level: i32,
    generation: u64,
}

impl DispatchTable {
    /// Builds the table for `level`, stamped with `generation`.
    ///
    /// A severity is enabled when `level >= rank`; [`Severity::ALWAYS_ON`] is
    /// enabled regardless of `level`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{DispatchTable, Severity};
    ///
    /// let table = DispatchTable::for_level(Severity::Info.rank(), 0);
    /// assert!(table.is_enabled(Severity::Warning));
    /// assert!(table.is_enabled(Severity::Info));
    /// assert!(!table.is_enabled(Severity::Debug));
    ///
    /// let squelched = DispatchTable::for_level(-1, 0);
    /// assert!(squelched.is_enabled(Severity::Emergency));
    /// assert!(!squelched.is_enabled(Severity::Alert));
    /// ```
    #[must_use]
    pub fn for_level(level: i32, generation: u64) -> Self {
        let enabled = Severity::ALL
            .iter()
            .filter(|severity| level >= severity.rank())
            .fold(Severity::ALWAYS_ON.bit(), |mask, severity| {
                mask | severity.bit()
            });
        Self {
            enabled,
            level,
            generation,
        }
    }

    /// Reports whether calls at `severity` produce output.
    #[inline]
    #[must_use]
    pub const fn is_enabled(self, severity: Severity) -> bool {
        self.enabled & severity.bit() != 0
    }

    /// Returns the raw enabled-severity bitset (bit `n` = rank `n`).
    #[must_use]
    pub const fn enabled_mask(self) -> u16 {
        self.enabled
    }

    /// Returns the effective level the table was compiled for.
    #[must_use]
    pub const fn level(self) -> i32 {
        self.level
    }

    /// Returns the configuration generation the table was compiled under.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }

    /// Reports whether the table still matches `config`'s generation.
    #[inline]
    #[must_use]
    pub fn is_current(self, config: &LevelConfig) -> bool {
        self.generation == config.generation()
    }

    /// Iterates over the enabled severities in rank order.
    pub fn enabled_severities(self) -> impl Iterator<Item = Severity> {
        Severity::ALL
            .into_iter()
            .filter(move |severity| self.is_enabled(*severity))
    }
}

/// Compiles the dispatch table for `category` from a consistent snapshot of
/// `config`.
pub fn compile_for(config: &LevelConfig, category: &str) -> DispatchTable {
    let (level, generation) = config.snapshot(category);
    DispatchTable::for_level(level, generation)
}

/// Marks every table compiled from `config` stale without enumerating them.
pub fn invalidate_all(config: &LevelConfig) {
    config.invalidate_all();
}

/// Lazily compiled tables for many categories of one configuration.
///
/// Adapters cache a single table each; this cache serves front-ends that
/// route many categories through one object, such as the tracing bridge.
#[derive(Debug)]
pub struct DispatchCache {
    config: Arc<LevelConfig>,
    entries: HashMap<String, DispatchTable>,
    compilations: u64,
}

impl DispatchCache {
    /// Creates an empty cache for `config`.
    #[must_use]
    pub fn new(config: Arc<LevelConfig>) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            compilations: 0,
        }
    }

    /// Returns the configuration the cache compiles against.
    #[must_use]
    pub fn config(&self) -> &Arc<LevelConfig> {
        &self.config
    }

    /// Returns the current table for `category`, recompiling if it is
    /// missing or stale.
    pub fn table(&mut self, category: &str) -> DispatchTable {
        if let Some(table) = self.entries.get(category)
            && table.is_current(&self.config)
        {
            return *table;
        }
        let table = compile_for(&self.config, category);
        self.compilations += 1;
        self.entries.insert(category.to_owned(), table);
        table
    }

    /// Reports whether `category` is enabled at `severity`.
    pub fn is_enabled(&mut self, category: &str, severity: Severity) -> bool {
        self.table(category).is_enabled(severity)
    }

    /// Returns how many tables have been compiled so far.
    #[must_use]
    pub const fn compilations(&self) -> u64 {
        self.compilations
    }

    /// Drops every cached table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
