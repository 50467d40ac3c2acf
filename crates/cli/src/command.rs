//! crates/cli/src/command.rs
//! clap command definition and argument extraction.

use std::ffi::OsString;

use clap::{Arg, ArgAction, Command, builder::NonEmptyStringValueParser};
use logging::{LevelValue, Severity};

/// Program name used when the argument vector is empty.
pub(crate) const PROGRAM_NAME: &str = "levelpipe";

/// Category used when `--name` is absent.
pub(crate) const DEFAULT_CATEGORY: &str = "main";

pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Filter stdin log lines through a runtime-adjustable level")
        .after_help(
            "Verbosity flags -v/--verbose and -q/--quiet may be repeated and \
             bundled (-vvq); they are applied after --log-level.\n\
             Input lines of the form '<severity>: <text>' are logged at that \
             severity; other lines use the unprefixed severity.",
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Initial level: a severity name, a rank, or +N/-N")
                .action(ArgAction::Set)
                .allow_hyphen_values(true)
                .value_parser(NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("log-level-min")
                .long("log-level-min")
                .value_name("LEVEL")
                .help("Lowest level flags and signals may reach")
                .action(ArgAction::Set)
                .allow_hyphen_values(true)
                .value_parser(NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("log-level-max")
                .long("log-level-max")
                .value_name("LEVEL")
                .help("Highest level flags and signals may reach")
                .action(ArgAction::Set)
                .allow_hyphen_values(true)
                .value_parser(NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .value_name("NAME=LEVEL")
                .help("Override the level of one category (repeatable)")
                .action(ArgAction::Append)
                .value_parser(parse_category),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("CATEGORY")
                .help("Category the input lines are logged under")
                .action(ArgAction::Set)
                .value_parser(NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("unprefixed")
                .long("unprefixed")
                .value_name("SEVERITY")
                .help("Severity written without a prefix [default: info]")
                .action(ArgAction::Set)
                .value_parser(|text: &str| text.parse::<Severity>().map_err(|e| e.to_string())),
        )
        .arg(
            Arg::new("no-env")
                .long("no-env")
                .help("Ignore LOG_LEVEL, DEBUG, TRACE, VERBOSE and QUIET")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("signals")
                .long("signals")
                .help("SIGUSR1 raises and SIGUSR2 lowers the level while running")
                .action(ArgAction::SetTrue),
        )
}

/// `NAME=LEVEL` as accepted by `--category`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CategorySetting {
    pub(crate) name: String,
    pub(crate) level: LevelValue,
}

fn parse_category(text: &str) -> Result<CategorySetting, String> {
    let (name, level) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=LEVEL, got '{text}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing category name in '{text}'"));
    }
    let level = level.parse::<LevelValue>().map_err(|e| e.to_string())?;
    Ok(CategorySetting {
        name: name.to_owned(),
        level,
    })
}

/// Parsed command line, minus the verbosity flags the scanner consumed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ParsedArgs {
    pub(crate) log_level: Option<String>,
    pub(crate) log_level_min: Option<String>,
    pub(crate) log_level_max: Option<String>,
    pub(crate) categories: Vec<CategorySetting>,
    pub(crate) name: Option<String>,
    pub(crate) unprefixed: Option<Severity>,
    pub(crate) no_env: bool,
    pub(crate) signals: bool,
}

pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    Ok(ParsedArgs {
        log_level: matches.remove_one::<String>("log-level"),
        log_level_min: matches.remove_one::<String>("log-level-min"),
        log_level_max: matches.remove_one::<String>("log-level-max"),
        categories: matches
            .remove_many::<CategorySetting>("category")
            .map(|values| values.collect())
            .unwrap_or_default(),
        name: matches.remove_one::<String>("name"),
        unprefixed: matches.remove_one::<Severity>("unprefixed"),
        no_env: matches.get_flag("no-env"),
        signals: matches.get_flag("signals"),
    })
}
