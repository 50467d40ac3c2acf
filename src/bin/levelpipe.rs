#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::{env, process::ExitCode};

/// Forwards arguments and I/O handles to the CLI crate and maps the status.
fn run_with<I, In, Out, Err>(args: I, stdin: In, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    In: BufRead,
    Out: Write,
    Err: Write,
{
    let status = cli::run(args, stdin, stdout, stderr);
    let _ = stdout.flush();
    let _ = stderr.flush();
    cli::exit_code_from(status)
}

fn main() -> ExitCode {
    cli::init_diagnostics();

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    run_with(env::args_os(), stdin, &mut stdout, &mut stderr)
}

#[cfg(test)]
mod tests {
    use super::run_with;
    use std::process::ExitCode;

    #[test]
    fn version_flag_reports_success() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_with(["levelpipe", "--version"], &b""[..], &mut stdout, &mut stderr);

        assert_eq!(exit, ExitCode::SUCCESS);
        assert!(!stdout.is_empty(), "--version should print to stdout");
        assert!(stderr.is_empty(), "--version must not write to stderr");
    }

    #[test]
    fn usage_errors_map_to_status_two() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_with(["levelpipe", "--nope"], &b""[..], &mut stdout, &mut stderr);

        assert_eq!(exit, ExitCode::from(2));
        assert!(stdout.is_empty());
        assert!(!stderr.is_empty());
    }
}
