//! crates/logging/src/adapter.rs
//! Per-category logging front-end.
//!
//! A [`Logger`] owns one cached [`DispatchTable`]. On each call it compares
//! the table's generation with the configuration's; only a stale or missing
//! table triggers recompilation. Suppressed calls return before any
//! formatting or I/O happens.

use std::fmt::{self, Display, Write as _};
use std::io::{self, Write};
use std::sync::Arc;

use logging_sink::LineSink;

use crate::dispatch::{DispatchTable, compile_for};
use crate::severity::Severity;
use crate::store::LevelConfig;

/// Logger for a single category, writing enabled lines to a [`LineSink`].
///
/// Output lines are the concatenation of the call's arguments with no
/// separator, prefixed by `"<severity>: "` unless the call's severity is the
/// logger's unprefixed severity (default [`Severity::Info`]).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{LevelConfig, Logger, Severity};
///
/// let config = Arc::new(LevelConfig::new());
/// let mut logger = Logger::new("app", Arc::clone(&config), Vec::new());
///
/// logger.warning(["disk ", "almost full"])?;
/// logger.info(["started"])?;
/// logger.debug(["not shown"])?;
///
/// let output = String::from_utf8(logger.into_inner()).unwrap();
/// assert_eq!(output, "warning: disk almost full\nstarted\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Logger<W> {
    category: String,
    config: Arc<LevelConfig>,
    sink: LineSink<W>,
    unprefixed: Severity,
    dispatch: Option<DispatchTable>,
    recompilations: u64,
}

impl<W> Logger<W> {
    /// Creates a logger for `category` writing newline-terminated lines to `writer`.
    pub fn new(category: impl Into<String>, config: Arc<LevelConfig>, writer: W) -> Self {
        Self::with_sink(category, config, LineSink::new(writer))
    }

    /// Creates a logger around an existing [`LineSink`].
    pub fn with_sink(
        category: impl Into<String>,
        config: Arc<LevelConfig>,
        sink: LineSink<W>,
    ) -> Self {
        Self {
            category: category.into(),
            config,
            sink,
            unprefixed: Severity::Info,
            dispatch: None,
            recompilations: 0,
        }
    }

    /// Creates a logger bound to the process-wide [`LevelConfig::global`].
    pub fn global(category: impl Into<String>, writer: W) -> Self {
        Self::new(category, Arc::clone(LevelConfig::global()), writer)
    }

    /// Selects the severity whose lines are written without a prefix.
    #[must_use]
    pub fn with_unprefixed(mut self, severity: Severity) -> Self {
        self.unprefixed = severity;
        self
    }

    /// Returns the logger's category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the configuration the logger consults.
    #[must_use]
    pub const fn config(&self) -> &Arc<LevelConfig> {
        &self.config
    }

    /// Returns the severity written without a prefix.
    #[must_use]
    pub const fn unprefixed(&self) -> Severity {
        self.unprefixed
    }

    /// Returns how many times the dispatch table has been compiled.
    #[must_use]
    pub const fn recompilations(&self) -> u64 {
        self.recompilations
    }

    /// Borrows the output sink.
    #[must_use]
    pub const fn sink(&self) -> &LineSink<W> {
        &self.sink
    }

    /// Mutably borrows the output sink.
    #[must_use]
    pub fn sink_mut(&mut self) -> &mut LineSink<W> {
        &mut self.sink
    }

    /// Consumes the logger and returns the sink's writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    /// Returns the current dispatch table, recompiling it when stale.
    pub fn dispatch(&mut self) -> DispatchTable {
        match self.dispatch {
            Some(table) if table.is_current(&self.config) => table,
            _ => {
                let table = compile_for(&self.config, &self.category);
                self.recompilations += 1;
                self.dispatch = Some(table);
                table
            }
        }
    }

    /// Reports whether a call at `severity` would produce output.
    #[inline]
    pub fn is_enabled(&mut self, severity: Severity) -> bool {
        self.dispatch().is_enabled(severity)
    }
}

impl<W> Logger<W>
where
    W: Write,
{
    /// Logs the concatenation of `parts` at `severity`.
    ///
    /// Returns `Ok(false)` without touching the sink when the severity is
    /// disabled, `Ok(true)` after writing the line otherwise.
    pub fn log<I, D>(&mut self, severity: Severity, parts: I) -> io::Result<bool>
    where
        I: IntoIterator<Item = D>,
        D: Display,
    {
        if !self.is_enabled(severity) {
            return Ok(false);
        }
        let line = render_line(severity, self.unprefixed, parts).map_err(io::Error::other)?;
        self.sink.write_line(&line)?;
        Ok(true)
    }

    /// Logs preformatted arguments at `severity`.
    pub fn log_fmt(&mut self, severity: Severity, args: fmt::Arguments<'_>) -> io::Result<bool> {
        self.log(severity, [args])
    }

    /// Flushes the sink's writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Logs at [`Severity::Emergency`].
    pub fn emergency<I: IntoIterator<Item = D>, D: Display>(&mut self, parts: I) -> io::Result<bool> {
        self.log(Severity::Emergency, parts)
    }

    /// Logs at [`Severity::Alert`].
    pub fn alert<I: IntoIterator<Item = D>, D: Display>(&mut self, parts: I) -> io::Result<bool> {
        self.log(Severity::Alert, parts)
    }

    /// Logs at [`Severity::Critical`].
    pub fn critical<I: IntoIterator<Item = D>, D: Display>(&mut self, parts: I) -> io::Result<bool> {
        self.log(Severity::Critical, parts)
    }

    /// Logs at [`Severity::Error`].
    pub fn error<I: IntoIterator<Item = D>, D: Display>(&mut self, parts: I) -> io::Result<bool> {
        self.log(Severity::Error, parts)
    }

    /// Logs at [`Severity::Warning`].
    pub fn warning<I: IntoIterator<Item = D>, D: Display>(&mut self, parts: I) -> io::Result<bool> {
        self.log(Severity::Warning, parts)
    }

    /// Logs at [`Severity::Notice`].
    pub fn notice<I: IntoIterator<Item = D>, D: Display>(&mut self, parts: I) -> io::Result<bool> {
        self.log(Severity::Notice, parts)
    }

    /// Logs at [`Severity::Info`].
    pub fn info<I: IntoIterator<Item = D>, D: Display>(&mut self, parts: I) -> io::Result<bool> {
        self.log(Severity::Info, parts)
    }

    /// Logs at [`Severity::Debug`].
    pub fn debug<I: IntoIterator<Item = D>, D: Display>(&mut self, parts: I) -> io::Result<bool> {
        self.log(Severity::Debug, parts)
    }

    /// Logs at [`Severity::Trace`].
    pub fn trace<I: IntoIterator<Item = D>, D: Display>(&mut self, parts: I) -> io::Result<bool> {
        self.log(Severity::Trace, parts)
    }
}

impl<W> fmt::Debug for Logger<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("category", &self.category)
            .field("unprefixed", &self.unprefixed)
            .field("dispatch", &self.dispatch)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

/// Renders one output line: the severity prefix (omitted for `unprefixed`)
/// followed by every part, with no separator.
pub(crate) fn render_line<I, D>(
    severity: Severity,
    unprefixed: Severity,
    parts: I,
) -> Result<String, fmt::Error>
where
    I: IntoIterator<Item = D>,
    D: Display,
{
    let mut line = String::new();
    if severity != unprefixed {
        line.push_str(severity.prefix());
    }
    for part in parts {
        write!(line, "{part}")?;
    }
    Ok(line)
}

/// Logs a line built from heterogeneous arguments, evaluating them only when
/// the severity is enabled.
///
/// ```
/// use std::sync::Arc;
/// use logging::{LevelConfig, Logger, Severity, log_line};
///
/// let mut logger = Logger::new("app", Arc::new(LevelConfig::new()), Vec::new());
/// let retries = 3;
/// log_line!(logger, Severity::Notice, "retrying (", retries, " left)")?;
/// assert_eq!(logger.into_inner(), b"notice: retrying (3 left)\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[macro_export]
macro_rules! log_line {
    ($logger:expr, $severity:expr, $($part:expr),+ $(,)?) => {{
        let severity = $severity;
        if $logger.is_enabled(severity) {
            $logger.log(
                severity,
                [$(&$part as &dyn ::std::fmt::Display),+],
            )
        } else {
            ::std::io::Result::Ok(false)
        }
    }};
}
