//! End-to-end tests for loggers: dispatch, prefixes and recompilation.

use std::cell::Cell;
use std::sync::Arc;

use logging::init::{EnvSpec, Options};
use logging::{LevelConfig, LineMode, LineSink, Logger, Severity, compile_for, invalidate_all, log_line};

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf-8 output")
}

// ============================================================================
// Output format
// ============================================================================

/// Verifies the default info level drops debug and prefixes warnings.
#[test]
fn info_level_output() {
    let config = Arc::new(LevelConfig::new());
    let mut logger = Logger::new("app", config, Vec::new());

    assert!(!logger.debug(["x"]).expect("write"));
    assert!(log_line!(logger, Severity::Warning, "disk ", 91, "% full").expect("write"));
    assert!(logger.info(["ready"]).expect("write"));

    assert_eq!(text(logger.into_inner()), "warning: disk 91% full\nready\n");
}

/// Verifies every severity uses its own name as prefix.
#[test]
fn prefixes_name_the_severity() {
    let config = Arc::new(LevelConfig::new());
    config.set_level(Severity::Trace).expect("level set");
    let mut logger = Logger::new("app", config, Vec::new()).with_unprefixed(Severity::Trace);

    for severity in Severity::ALL {
        logger.log(severity, [severity.as_str()]).expect("write");
    }

    let output = text(logger.into_inner());
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), Severity::ALL.len());
    assert_eq!(lines[0], "emergency: emergency");
    assert_eq!(lines[4], "warning: warning");
    assert_eq!(lines[6], "info: info");
    assert_eq!(lines[8], "trace");
}

/// Verifies trailing newlines are not doubled and line mode is honoured.
#[test]
fn sink_line_modes() {
    let config = Arc::new(LevelConfig::new());
    let sink = LineSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
    let mut logger = Logger::with_sink("app", config, sink);
    logger.info(["a"]).expect("write");
    logger.sink_mut().set_line_mode(LineMode::WithNewline);
    logger.info(["b\n"]).expect("write");
    logger.info(["c"]).expect("write");
    assert_eq!(text(logger.into_inner()), "ab\nc\n");
}

/// Verifies a squelched store still lets emergencies through.
#[test]
fn emergency_is_never_suppressed() {
    let config = Arc::new(LevelConfig::new());
    config.set_level(-1).expect("level set");
    let mut logger = Logger::new("app", config, Vec::new());
    logger.alert(["dropped"]).expect("write");
    logger.emergency(["kept"]).expect("write");
    assert_eq!(text(logger.into_inner()), "emergency: kept\n");
}

// ============================================================================
// Dispatch caching
// ============================================================================

/// Verifies a logger recompiles exactly once per configuration generation.
#[test]
fn recompiles_once_per_generation() {
    let config = Arc::new(LevelConfig::new());
    let mut logger = Logger::new("app", Arc::clone(&config), Vec::new());

    for _ in 0..10 {
        logger.info(["x"]).expect("write");
    }
    assert_eq!(logger.recompilations(), 1);

    config.set_level(Severity::Debug).expect("level set");
    config.set_level(Severity::Trace).expect("level set");
    for _ in 0..10 {
        logger.trace(["x"]).expect("write");
    }
    assert_eq!(logger.recompilations(), 2);

    invalidate_all(&config);
    logger.info(["x"]).expect("write");
    assert_eq!(logger.recompilations(), 3);
}

/// Verifies loggers for different categories see their own overrides.
#[test]
fn categories_dispatch_independently() {
    let config = Arc::new(LevelConfig::new());
    config
        .set_category_level("db", Some(Severity::Debug.into()))
        .expect("override set");

    let mut db = Logger::new("db", Arc::clone(&config), Vec::new());
    let mut web = Logger::new("web", Arc::clone(&config), Vec::new());
    db.debug(["query"]).expect("write");
    web.debug(["request"]).expect("write");

    assert_eq!(text(db.into_inner()), "debug: query\n");
    assert!(web.into_inner().is_empty());
    assert!(compile_for(&config, "db").is_enabled(Severity::Debug));
}

/// Verifies suppressed `log_line!` calls do not evaluate their arguments.
#[test]
fn suppressed_macro_calls_are_lazy() {
    let config = Arc::new(LevelConfig::new());
    let mut logger = Logger::new("app", config, Vec::new());
    let evaluated = Cell::new(0);
    let expensive = || {
        evaluated.set(evaluated.get() + 1);
        "value"
    };

    log_line!(logger, Severity::Trace, expensive()).expect("write");
    assert_eq!(evaluated.get(), 0);
    log_line!(logger, Severity::Info, "got ", expensive()).expect("write");
    assert_eq!(evaluated.get(), 1);
    assert_eq!(text(logger.into_inner()), "got value\n");
}

// ============================================================================
// Startup wiring
// ============================================================================

/// Verifies options applied at startup reach an existing logger.
#[test]
fn options_reach_existing_loggers() {
    let config = Arc::new(LevelConfig::new());
    let mut logger = Logger::new("app", Arc::clone(&config), Vec::new());
    logger.debug(["before"]).expect("write");

    let options = Options {
        env: Some(EnvSpec::default()),
        argv: Some(Default::default()),
        ..Options::default()
    };
    let mut argv: Vec<String> = vec!["prog".into(), "-v".into()];
    options
        .apply_with(&config, Some(&mut argv), |name| {
            (name == "QUIET").then(|| "1".to_owned())
        })
        .expect("options apply");
    assert_eq!(config.level(), 6);

    config.apply_offset(1);
    logger.debug(["after"]).expect("write");
    assert_eq!(text(logger.into_inner()), "debug: after\n");
}
