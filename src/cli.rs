//! Command-line interface for the akinator binary.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::game::Language;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Game language (overrides config file).
    pub language: Option<Language>,
    /// Play in child mode.
    pub child_mode: bool,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Path to the session store file.
    pub cache: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Print every result as JSON.
    pub json: bool,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('l') | Long("language") => {
                let value: String = parser.value()?.parse()?;
                result.language = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("language", value))?,
                );
            }
            Long("child-mode") => {
                result.child_mode = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Long("cache") => {
                result.cache = Some(parser.value()?.parse()?);
            }
            Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Long("json") => {
                result.json = true;
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"akinator {version}
Play Akinator from the terminal

USAGE:
    akinator [OPTIONS]

OPTIONS:
    -l, --language <LANG>   Game language code or name [default: en]
        --child-mode        Child-safe characters only
    -c, --config <FILE>     Path to configuration file (JSON)
        --cache <FILE>      Session store file [default: cache/akinator.json]
        --log-level <LVL>   Log level (error, warn, info, debug, trace)
        --json              Print raw results as JSON
    -h, --help              Print help
    -V, --version           Print version

IN GAME:
    y, n, idk, p, pn        Answer yes, no, don't know, probably, probably not
    b                       Go back to the previous question
    q                       Quit

ENVIRONMENT VARIABLES:
    AKINATOR_LANGUAGE       Game language (overrides config)
    AKINATOR_CHILD_MODE     Child mode, true or false (overrides config)
    AKINATOR_BASE_URL       Service base URL (overrides config)
    AKINATOR_CACHE_PATH     Session store file (overrides config)
    AKINATOR_LOG_LEVEL      Log level (overrides config)
    RUST_LOG                Alternative log level setting

EXAMPLES:
    # English game
    akinator

    # French game in child mode
    akinator -l fr --child-mode
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("akinator {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
