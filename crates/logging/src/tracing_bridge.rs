//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the level controller.
//!
//! [`LevelLayer`] is a tracing-subscriber layer that treats each event's
//! target as a category, maps the tracing level to a [`Severity`], and writes
//! the event's message through a [`LineSink`] when the category's dispatch
//! table enables that severity. Tables are cached per target and recompiled
//! only after the [`LevelConfig`] changes.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logging::{LevelConfig, init_tracing};
//!
//! let config = Arc::clone(LevelConfig::global());
//! init_tracing(Arc::clone(&config), std::io::stderr())?;
//!
//! tracing::warn!(target: "net", "connection reset");
//! config.set_level(logging::Severity::Debug)?;
//! tracing::debug!(target: "net", "retrying");
//! ```

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use logging_sink::LineSink;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::adapter::render_line;
use crate::dispatch::DispatchCache;
use crate::error::LevelError;
use crate::severity::Severity;
use crate::store::LevelConfig;

/// A tracing layer that filters events through a [`LevelConfig`].
///
/// Filtering happens in [`Layer::on_event`], so other layers stacked on the
/// same subscriber still observe every event.
pub struct LevelLayer<W> {
    cache: Mutex<DispatchCache>,
    sink: Mutex<LineSink<W>>,
    unprefixed: Severity,
}

impl<W> LevelLayer<W> {
    /// Creates a layer writing enabled events to `writer`.
    #[must_use]
    pub fn new(config: Arc<LevelConfig>, writer: W) -> Self {
        Self {
            cache: Mutex::new(DispatchCache::new(config)),
            sink: Mutex::new(LineSink::new(writer)),
            unprefixed: Severity::Info,
        }
    }

    /// Selects the severity whose lines are written without a prefix.
    #[must_use]
    pub fn with_unprefixed(mut self, severity: Severity) -> Self {
        self.unprefixed = severity;
        self
    }

    /// Maps a tracing level to the severity it is dispatched at.
    #[must_use]
    pub const fn severity_for(level: &Level) -> Severity {
        match *level {
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warning,
            Level::INFO => Severity::Info,
            Level::DEBUG => Severity::Debug,
            _ => Severity::Trace,
        }
    }

    /// Returns the configuration the layer consults.
    #[must_use]
    pub fn config(&self) -> Arc<LevelConfig> {
        Arc::clone(self.cache().config())
    }

    /// Reports whether an event for `target` at `severity` would be written.
    pub fn is_enabled(&self, target: &str, severity: Severity) -> bool {
        self.cache().is_enabled(target, severity)
    }

    /// Returns how many dispatch tables the layer has compiled.
    #[must_use]
    pub fn compilations(&self) -> u64 {
        self.cache().compilations()
    }

    fn cache(&self) -> MutexGuard<'_, DispatchCache> {
        self.cache
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<W> LevelLayer<W>
where
    W: Write,
{
    fn write(&self, severity: Severity, message: &str) {
        let Ok(line) = render_line(severity, self.unprefixed, [message]) else {
            return;
        };
        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        // Nowhere to report a failed write from inside a subscriber.
        let _ = sink.write_line(&line);
    }
}

impl<S, W> Layer<S> for LevelLayer<W>
where
    S: Subscriber,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = Self::severity_for(metadata.level());
        if !self.is_enabled(metadata.target(), severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.write(severity, &message);
        }
    }
}

impl<W> fmt::Debug for LevelLayer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelLayer")
            .field("unprefixed", &self.unprefixed)
            .finish_non_exhaustive()
    }
}

/// Visitor to extract the message from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber whose only layer is a [`LevelLayer`].
///
/// Fails with [`LevelError::Argument`] when a global subscriber is already set.
pub fn init_tracing<W>(config: Arc<LevelConfig>, writer: W) -> Result<(), LevelError>
where
    W: Write + Send + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LevelLayer::new(config, writer))
        .try_init()
        .map_err(|error| LevelError::argument(format!("cannot install tracing subscriber: {error}")))
}
