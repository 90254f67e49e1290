//! Command-line argument parsing.

use std::path::PathBuf;

use crate::logstream::LogSource;

/// Overrides given on the command line. `None` leaves the environment or
/// default value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub source: Option<LogSource>,
    pub capacity: Option<usize>,
    pub refresh_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Help,
    /// Run the dashboard (default)
    RunTui(CliOverrides),
    /// Bad arguments; the message explains which.
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: surimon [OPTIONS]

Options:
      --url <URL>             Dashboard backend base URL [env: SURIMON_URL]
      --source <eve|suricata> Start tailing this log [env: SURIMON_SOURCE]
      --capacity <N>          Live log lines kept [env: SURIMON_BUFFER_CAPACITY]
      --refresh-secs <N>      Refresh charts every N seconds [env: SURIMON_REFRESH_SECS]
      --log-file <PATH>       Diagnostic log file [env: SURIMON_LOG_FILE]
  -h, --help                  Print help
  -V, --version               Print version";

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{} expects a number, got '{}'", flag, value))
}

/// Parse command-line arguments (program name first).
///
/// ```
/// use surimon::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["surimon".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        // Accept both `--flag value` and `--flag=value`
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--url" | "--source" | "--capacity" | "--refresh-secs" | "--log-file" => {
                let Some(value) = inline.or_else(|| args.next()) else {
                    return CliCommand::Invalid(format!("{} expects a value", flag));
                };
                let applied = match flag.as_str() {
                    "--url" => {
                        overrides.url = Some(value);
                        Ok(())
                    }
                    "--source" => value.parse().map(|s| overrides.source = Some(s)),
                    "--capacity" => parse_number(&flag, &value).map(|n| overrides.capacity = Some(n)),
                    "--refresh-secs" => {
                        parse_number(&flag, &value).map(|n| overrides.refresh_secs = Some(n))
                    }
                    _ => {
                        overrides.log_file = Some(PathBuf::from(value));
                        Ok(())
                    }
                };
                if let Err(message) = applied {
                    return CliCommand::Invalid(message);
                }
            }
            other => return CliCommand::Invalid(format!("unknown argument '{}'", other)),
        }
    }

    CliCommand::RunTui(overrides)
}
