#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of the `levelpipe` binary: it
//! reads log lines from standard input and writes the ones the current level
//! enables to standard output, prefixed with their severity.
//!
//! # Design
//!
//! [`run`] accepts the argument vector together with handles for standard
//! input, output and error. Verbosity flags (`-v`, `-q`, bundles such as
//! `-vvq`, and their long forms) are removed by a
//! [`FlagScanner`](logging::FlagScanner) before the remaining arguments reach
//! [`clap`](https://docs.rs/clap/). The level is then configured through
//! [`Options`](logging::init::Options) in a fixed order: bounds, absolute
//! level, environment, verbosity flags. `--category` overrides come last.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Each call to `run` uses its own [`LevelConfig`], so concurrent calls do
//!   not observe each other's settings.
//! - Signal handlers installed by `--signals` live exactly as long as the
//!   input is being processed.
//!
//! # Errors
//!
//! Usage errors are rendered by clap and return its exit code (`2`; `0` for
//! `--help` and `--version`). Level, pattern, signal and I/O errors print
//! `levelpipe: <error>` on standard error and return `1`.
//!
//! # Examples
//!
//! ```
//! let input = b"debug: hidden\nwarning: shown\nplain\n";
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run_with_env(
//!     ["levelpipe", "--unprefixed", "notice"],
//!     |_| None,
//!     &input[..],
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(status, 0);
//! assert_eq!(stdout, b"warning: shown\nplain\n");
//! assert!(stderr.is_empty());
//! ```

mod command;
mod diagnostics;
mod input;

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use logging::init::{ArgvPreset, EnvSpec, Options, default_signal_roles};
use logging::{LevelConfig, LevelError, Logger, Severity};
use thiserror::Error;

use command::{DEFAULT_CATEGORY, PROGRAM_NAME, ParsedArgs, parse_args};

pub use diagnostics::{DIAGNOSTICS_ENV, init_diagnostics};

/// Largest exit code the process reports.
const MAX_EXIT_CODE: i32 = 255;

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runs the CLI with the process environment.
///
/// See [`run_with_env`].
pub fn run<I, S, In, Out, Err>(arguments: I, stdin: In, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    In: BufRead,
    Out: Write,
    Err: Write,
{
    run_with_env(
        arguments,
        |name| std::env::var(name).ok(),
        stdin,
        stdout,
        stderr,
    )
}

/// Runs the CLI, reading environment variables through `lookup`.
///
/// Every input line is logged under the `--name` category (default `main`).
/// A line of the form `<severity>: <text>` is logged at that severity with
/// the prefix stripped; any other line is logged verbatim at the
/// `--unprefixed` severity (default `info`). Enabled lines are written to
/// `stdout` with a `<severity>: ` prefix, except for the unprefixed severity.
///
/// Returns the process exit code.
pub fn run_with_env<I, S, F, In, Out, Err>(
    arguments: I,
    lookup: F,
    stdin: In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    F: Fn(&str) -> Option<String>,
    In: BufRead,
    Out: Write,
    Err: Write,
{
    let mut raw: Vec<String> = arguments
        .into_iter()
        .map(|argument| argument.into().to_string_lossy().into_owned())
        .collect();
    if raw.is_empty() {
        raw.push(PROGRAM_NAME.to_owned());
    }

    let mut remaining = raw.clone();
    ArgvPreset::Consume.scanner().scan(&mut remaining);

    let parsed = match parse_args(remaining) {
        Ok(parsed) => parsed,
        Err(error) => return report_usage_error(&error, stdout, stderr),
    };

    let config = Arc::new(LevelConfig::new());
    match execute(parsed, &mut raw, &config, lookup, stdin, stdout) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            1
        }
    }
}

fn execute<F, In, Out>(
    parsed: ParsedArgs,
    argv: &mut Vec<String>,
    config: &Arc<LevelConfig>,
    lookup: F,
    mut stdin: In,
    stdout: &mut Out,
) -> Result<(), RunError>
where
    F: Fn(&str) -> Option<String>,
    In: BufRead,
    Out: Write,
{
    let ParsedArgs {
        log_level,
        log_level_min,
        log_level_max,
        categories,
        name,
        unprefixed,
        no_env,
        signals,
    } = parsed;

    let options = Options {
        log_level,
        log_level_min,
        log_level_max,
        argv: Some(ArgvPreset::Consume.into()),
        env: (!no_env).then(EnvSpec::default),
        handle_signals: if signals {
            default_signal_roles()
        } else {
            BTreeMap::new()
        },
    };
    options.apply_with(config, Some(argv), lookup)?;

    for setting in categories {
        config.set_category_level(&setting.name, Some(setting.level))?;
    }

    let _bindings = options.install_signals(Arc::clone(config))?;

    let category = name.as_deref().unwrap_or(DEFAULT_CATEGORY);
    let mut logger = Logger::new(category, Arc::clone(config), stdout)
        .with_unprefixed(unprefixed.unwrap_or(Severity::Info));

    let mut buffer = Vec::new();
    while input::read_line(&mut stdin, &mut buffer)? {
        let line = String::from_utf8_lossy(&buffer);
        let (severity, text) = input::classify(&line, logger.unprefixed());
        logger.log(severity, [text])?;
    }
    logger.flush()?;
    Ok(())
}

fn report_usage_error<Out, Err>(error: &clap::Error, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let rendered = error.render();
    let written = if error.use_stderr() {
        write!(stderr, "{rendered}")
    } else {
        write!(stdout, "{rendered}")
    };
    if written.is_err() {
        return 1;
    }
    error.exit_code()
}

/// Converts a numeric exit code into an [`ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
