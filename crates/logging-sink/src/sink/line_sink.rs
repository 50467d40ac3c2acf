use std::fmt;
use std::io::{self, Write};
use std::mem;

use super::LineModeGuard;
use crate::line_mode::LineMode;

/// Streaming sink that writes rendered log lines into an [`io::Write`] target.
///
/// Each call to [`write_line`](Self::write_line) forwards the text to the
/// writer and, under [`LineMode::WithNewline`], appends a newline unless the
/// text already ends with one.
///
/// # Examples
///
/// ```
/// use logging_sink::LineSink;
///
/// let mut sink = LineSink::new(Vec::new());
/// sink.write_line("ready")?;
/// sink.write_line("notice: listening")?;
///
/// assert_eq!(sink.into_inner(), b"ready\nnotice: listening\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct LineSink<W> {
    writer: W,
    line_mode: LineMode,
}

impl<W> LineSink<W> {
    /// Creates a sink that terminates every line with a newline.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self { writer, line_mode }
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Updates the [`LineMode`] used for subsequent writes.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Temporarily overrides the line mode until the returned guard is dropped.
    pub fn scoped_line_mode(&mut self, line_mode: LineMode) -> LineModeGuard<'_, W> {
        let previous = mem::replace(&mut self.line_mode, line_mode);
        LineModeGuard::new(self, previous)
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Replaces the underlying writer, returning the previous one.
    ///
    /// Lines already written stay in the returned writer so the caller can
    /// flush or inspect them before dropping it.
    #[must_use = "the returned writer contains lines produced before the replacement"]
    pub fn replace_writer(&mut self, mut writer: W) -> W {
        mem::swap(&mut self.writer, &mut writer);
        writer
    }

    /// Maps the sink's writer into a different type while keeping the line mode.
    #[must_use]
    pub fn map_writer<F, W2>(self, f: F) -> LineSink<W2>
    where
        F: FnOnce(W) -> W2,
    {
        LineSink::with_line_mode(f(self.writer), self.line_mode)
    }
}

impl<W> LineSink<W>
where
    W: Write,
{
    /// Writes `line` using the sink's current [`LineMode`].
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_line_with_mode(line, self.line_mode)
    }

    /// Writes `line` using an explicit [`LineMode`] without mutating the sink.
    pub fn write_line_with_mode(&mut self, line: &str, line_mode: LineMode) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        if line_mode.append_newline() && !line.ends_with('\n') {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Writes each line from the iterator.
    pub fn write_lines<I, S>(&mut self, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.write_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W> fmt::Debug for LineSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSink")
            .field("writer", &self.writer)
            .field("line_mode", &self.line_mode)
            .finish()
    }
}
