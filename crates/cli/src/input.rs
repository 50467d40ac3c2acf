//! crates/cli/src/input.rs
//! Severity detection for stdin lines.

use std::io::{self, BufRead};

use logging::Severity;

/// Reads the next line into `buffer` without its `\n` or `\r\n` terminator.
///
/// Bytes are kept as read; invalid UTF-8 is left for the caller to decode.
/// Returns `false` at end of input.
pub(crate) fn read_line<R: BufRead>(reader: &mut R, buffer: &mut Vec<u8>) -> io::Result<bool> {
    buffer.clear();
    if reader.read_until(b'\n', buffer)? == 0 {
        return Ok(false);
    }
    if buffer.last() == Some(&b'\n') {
        buffer.pop();
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    }
    Ok(true)
}

/// Splits `line` into the severity it should be logged at and its text.
///
/// Lines of the form `<severity>: <text>` (names and aliases, any case) are
/// logged at that severity with the prefix stripped. Anything else is logged
/// verbatim at `fallback`.
pub(crate) fn classify(line: &str, fallback: Severity) -> (Severity, &str) {
    line.split_once(": ")
        .and_then(|(prefix, text)| prefix.parse::<Severity>().ok().map(|s| (s, text)))
        .unwrap_or((fallback, line))
}
