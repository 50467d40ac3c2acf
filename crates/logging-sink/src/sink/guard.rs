use std::ops::{Deref, DerefMut};

use super::LineSink;
use crate::line_mode::LineMode;

/// Scoped [`LineMode`] override for a [`LineSink`].
///
/// Returned by [`LineSink::scoped_line_mode`]. The sink is reachable through
/// the guard while it lives; dropping it puts the previous mode back.
#[must_use = "dropping the guard immediately restores the previous line mode"]
pub struct LineModeGuard<'a, W> {
    sink: &'a mut LineSink<W>,
    previous: LineMode,
}

impl<'a, W> LineModeGuard<'a, W> {
    pub(crate) const fn new(sink: &'a mut LineSink<W>, previous: LineMode) -> Self {
        Self { sink, previous }
    }

    /// The mode reinstated on drop.
    #[must_use]
    pub const fn previous_line_mode(&self) -> LineMode {
        self.previous
    }

    /// Ends the scope but keeps the override as the sink's mode.
    ///
    /// ```
    /// use logging_sink::{LineMode, LineSink};
    ///
    /// let mut sink = LineSink::new(Vec::new());
    /// let mut guard = sink.scoped_line_mode(LineMode::WithoutNewline);
    /// guard.write_line("progress 50%\r")?;
    /// guard.keep();
    ///
    /// sink.write_line("progress 100%\r")?;
    /// assert_eq!(sink.line_mode(), LineMode::WithoutNewline);
    /// assert_eq!(sink.into_inner(), b"progress 50%\rprogress 100%\r".to_vec());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn keep(mut self) {
        self.previous = self.sink.line_mode();
    }
}

impl<W> Drop for LineModeGuard<'_, W> {
    fn drop(&mut self) {
        self.sink.set_line_mode(self.previous);
    }
}

impl<W> Deref for LineModeGuard<'_, W> {
    type Target = LineSink<W>;

    fn deref(&self) -> &Self::Target {
        self.sink
    }
}

impl<W> DerefMut for LineModeGuard<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.sink
    }
}
