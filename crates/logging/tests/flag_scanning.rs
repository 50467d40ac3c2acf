//! Integration tests for `-v`/`-q` scanning and its application to the store.

use logging::init::{ArgvPatterns, ArgvPreset, ArgvSpec, apply_argv};
use logging::{FlagScanner, LevelConfig, Pattern};

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| (*token).to_owned()).collect()
}

// ============================================================================
// Scanner behaviour
// ============================================================================

/// Verifies the canonical bundled example.
#[test]
fn bundled_quiet_and_verbose_cancel_to_minus_one() {
    let scanner = FlagScanner::new()
        .with_verbose("-v")
        .with_quiet("-q")
        .bundle(true)
        .remove(true);
    let mut tokens = args(&["--foo", "-qvv", "--bar"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["--foo", "--bar"]);
}

/// Verifies nothing after the stop marker is inspected or removed.
#[test]
fn stop_marker_protects_positional_arguments() {
    let scanner = FlagScanner::standard().remove(true);
    let mut tokens = args(&["-v", "--", "-v", "-qqq", "--verbose"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["--", "-v", "-qqq", "--verbose"]);
}

/// Verifies survivors of a partly consumed bundle stay together in place.
#[test]
fn partial_bundles_keep_unrelated_flags() {
    let scanner = FlagScanner::standard().remove(true);
    let mut tokens = args(&["cmd", "-avz", "-vq", "dest"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["cmd", "-az", "dest"]);
}

/// Verifies regex and literal patterns combine.
#[test]
fn mixed_pattern_kinds() {
    let scanner = FlagScanner::new()
        .with_verbose([
            Pattern::literal("--loud"),
            Pattern::regex("^--verbose(=.*)?$").expect("compiles"),
        ])
        .remove(true);
    let mut tokens = args(&["--loud", "--verbose=yes", "--verbosity"]);
    assert_eq!(scanner.scan(&mut tokens), -2);
    assert_eq!(tokens, ["--verbosity"]);
}

// ============================================================================
// Store application
// ============================================================================

/// Verifies verbose flags raise and quiet flags lower the level.
#[test]
fn argv_offsets_move_the_level() {
    let config = LevelConfig::new();
    let mut tokens = args(&["prog", "-vvv", "-q"]);
    assert_eq!(
        apply_argv(&config, &ArgvPreset::Default.into(), Some(&mut tokens)),
        Ok(8)
    );

    let mut tokens = args(&["prog", "--quiet", "-qqqqqqqqqq"]);
    assert_eq!(
        apply_argv(&config, &ArgvPreset::Default.into(), Some(&mut tokens)),
        Ok(-1),
        "saturates at the floor"
    );
}

/// Verifies explicit pattern lists behave like the equivalent scanner.
#[test]
fn explicit_specs_match_builder() {
    let spec = ArgvSpec::Patterns(ArgvPatterns {
        verbose: vec!["-d".into()],
        quiet: vec!["-s".into()],
        stop: vec!["/^[^-]/".into()],
        bundle: true,
        remove: true,
    });
    let config = LevelConfig::new();
    let mut tokens = args(&["-dd", "-x", "file", "-d"]);
    assert_eq!(apply_argv(&config, &spec, Some(&mut tokens)), Ok(8));
    assert_eq!(tokens, ["-x", "file", "-d"]);
}
