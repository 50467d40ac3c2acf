#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the output side of the levelpipe workspace: a
//! line-oriented writer that the per-category adapters in the `logging` crate
//! forward enabled log calls to. The sink is deliberately dumb. It does not
//! know about severities, categories, or levels; it receives fully rendered
//! text and guarantees that each write ends up on its own line.
//!
//! # Design
//!
//! The crate exposes [`LineSink`], a lightweight wrapper around an
//! [`std::io::Write`] implementor. Callers control whether rendered lines are
//! terminated by selecting a [`LineMode`]. [`LineSink::scoped_line_mode`]
//! returns a [`LineModeGuard`] that restores the previous mode on drop.
//!
//! # Invariants
//!
//! - `LineMode::WithNewline` appends a single `\n` only when the text does not
//!   already end with one, so callers may pass either form.
//! - The sink never buffers on its own; buffering is the writer's concern.
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values originating from the
//! underlying writer.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{LineMode, LineSink};
//!
//! let mut sink = LineSink::new(Vec::new());
//! sink.write_line("warning: disk almost full").unwrap();
//! sink.write_line("already terminated\n").unwrap();
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "warning: disk almost full\nalready terminated\n");
//!
//! let mut raw = LineSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
//! raw.write_line("partial").unwrap();
//! assert_eq!(raw.into_inner(), b"partial".to_vec());
//! ```

mod line_mode;
mod sink;

pub use line_mode::LineMode;
pub use sink::{LineModeGuard, LineSink};
