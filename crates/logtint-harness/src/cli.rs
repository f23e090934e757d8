#![forbid(unsafe_code)]

//! Command-line argument parsing for the `logtint` binary.
//!
//! Arguments are parsed by hand. Environment variables supply defaults that
//! explicit flags override.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use logtint_decorate::Severity;
use logtint_style::ColorProfile;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
logtint: print a diagnostic log with severity labels and quoted literals highlighted

USAGE:
    logtint [OPTIONS] [PATH]

ARGS:
    PATH                 Log file to read (default: $LOGTINT_LOG_FILE)

OPTIONS:
    --hide SEVERITY      Hide lines of SEVERITY (error, warning, note, debug, trace).
                         May be repeated.
    --show SEVERITY      Show lines of SEVERITY even if LOGTINT_HIDE hides them.
    --app-tag TAG        Strip TAG from the start of each line (default: keep tags)
    --budget-ms N        Time one decoration slice may take (default: 20)
    --no-color           Print plain text
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    LOGTINT_LOG_FILE         Log file used when PATH is omitted
    LOGTINT_HIDE             Comma-separated severities hidden at start-up
    LOGTINT_APP_TAG          Default for --app-tag
    LOGTINT_BATCH_BUDGET_MS  Default for --budget-ms
    LOGTINT_LOG              Diagnostics filter for stderr (default: warn)
    NO_COLOR, COLORTERM      Terminal color capability";

pub const ENV_LOG_FILE: &str = "LOGTINT_LOG_FILE";

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Options for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub path: PathBuf,
    /// Visibility toggles in command-line order.
    pub toggles: Vec<(Severity, bool)>,
    pub app_tag: Option<String>,
    pub budget: Option<Duration>,
    pub no_color: bool,
}

impl Opts {
    /// Terminal color profile, honoring `--no-color`.
    pub fn color_profile(&self, detected: ColorProfile) -> ColorProfile {
        if self.no_color {
            ColorProfile::Mono
        } else {
            detected
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, value: String },
    UnknownArgument(String),
    ExtraPath(String),
    NoPath,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
            Self::ExtraPath(arg) => write!(f, "only one log file may be given (extra: {arg})"),
            Self::NoPath => write!(f, "no log file given and {ENV_LOG_FILE} is not set"),
        }
    }
}

impl std::error::Error for CliError {}

/// Parse arguments (without the program name).
///
/// `lookup` reads environment variables.
pub fn parse<I>(args: I, lookup: impl Fn(&str) -> Option<String>) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut path: Option<PathBuf> = None;
    let mut toggles = Vec::new();
    let mut app_tag = None;
    let mut budget = None;
    let mut no_color = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &'static str| -> Result<String, CliError> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => args.next().ok_or(CliError::MissingValue(name)),
            }
        };
        match flag.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--no-color" => no_color = true,
            "--hide" | "--show" => {
                let name = if flag == "--hide" { "--hide" } else { "--show" };
                let raw = value(name)?;
                let severity = raw.parse::<Severity>().map_err(|_| CliError::InvalidValue {
                    flag: name,
                    value: raw.clone(),
                })?;
                toggles.push((severity, name == "--show"));
            }
            "--app-tag" => app_tag = Some(value("--app-tag")?),
            "--budget-ms" => {
                let raw = value("--budget-ms")?;
                let ms = raw.trim().parse::<u64>().map_err(|_| CliError::InvalidValue {
                    flag: "--budget-ms",
                    value: raw.clone(),
                })?;
                budget = Some(Duration::from_millis(ms));
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(CliError::UnknownArgument(arg));
            }
            _ => {
                if path.is_some() {
                    return Err(CliError::ExtraPath(arg));
                }
                path = Some(PathBuf::from(arg));
            }
        }
    }

    let path = match path {
        Some(path) => path,
        None => lookup(ENV_LOG_FILE)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .ok_or(CliError::NoPath)?,
    };

    Ok(Command::Run(Opts {
        path,
        toggles,
        app_tag,
        budget,
        no_color,
    }))
}
