//! Command-line argument parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Options for viewing a discussion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Forecast office; falls back to the configured default
    pub office: Option<String>,
    /// Local file to read instead of the API
    pub file: Option<PathBuf>,
    /// Issuance time for raw text files
    pub issued: Option<String>,
    /// Print to stdout instead of running the viewer
    pub print: bool,
    /// Wrap width for `--print`
    pub width: Option<u16>,
    /// Disable terminal hyperlinks
    pub no_links: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// View a discussion (default)
    View(ViewOptions),
}

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("invalid width: {0}")]
    InvalidWidth(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Parse command-line arguments.
///
/// `--version` and `--help` win over everything else on the line.
///
/// # Examples
///
/// ```
/// use afdview::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["afdview".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = ViewOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
        };

        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--print" | "-p" => options.print = true,
            "--no-links" => options.no_links = true,
            "--office" => options.office = Some(value("--office")?),
            "--file" => options.file = Some(PathBuf::from(value("--file")?)),
            "--issued" => options.issued = Some(value("--issued")?),
            "--width" | "-w" => {
                let raw = value("--width")?;
                let width = raw
                    .parse::<u16>()
                    .ok()
                    .filter(|w| *w > 0)
                    .ok_or(ArgsError::InvalidWidth(raw))?;
                options.width = Some(width);
            }
            flag if flag.starts_with('-') => {
                return Err(ArgsError::UnknownOption(flag.to_string()))
            }
            _ if options.office.is_none() => options.office = Some(arg),
            _ => return Err(ArgsError::UnexpectedArgument(arg)),
        }
    }

    Ok(CliCommand::View(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let args: Vec<String> = std::iter::once("afdview")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    fn view(args: &[&str]) -> ViewOptions {
        match parse(args) {
            Ok(CliCommand::View(options)) => options,
            other => panic!("expected view options, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["KPQR", "-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["-h"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(view(&[]), ViewOptions::default());
    }

    #[test]
    fn test_parse_positional_office() {
        assert_eq!(view(&["KPQR"]).office.as_deref(), Some("KPQR"));
    }

    #[test]
    fn test_parse_all_options() {
        let options = view(&[
            "--office", "KSEW", "--file", "afd.txt", "--issued", "2024-05-01T15:42:00Z", "--print",
            "--width", "72", "--no-links",
        ]);
        assert_eq!(
            options,
            ViewOptions {
                office: Some("KSEW".to_string()),
                file: Some(PathBuf::from("afd.txt")),
                issued: Some("2024-05-01T15:42:00Z".to_string()),
                print: true,
                width: Some(72),
                no_links: true,
            }
        );
    }

    #[test]
    fn test_parse_missing_value() {
        assert_eq!(
            parse(&["--file"]),
            Err(ArgsError::MissingValue("--file".to_string()))
        );
    }

    #[test]
    fn test_parse_invalid_width() {
        assert_eq!(
            parse(&["-w", "wide"]),
            Err(ArgsError::InvalidWidth("wide".to_string()))
        );
        assert_eq!(parse(&["-w", "0"]), Err(ArgsError::InvalidWidth("0".to_string())));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            Err(ArgsError::UnknownOption("--unknown".to_string()))
        );
    }

    #[test]
    fn test_parse_second_positional_rejected() {
        assert_eq!(
            parse(&["KPQR", "KSEW"]),
            Err(ArgsError::UnexpectedArgument("KSEW".to_string()))
        );
    }
}
