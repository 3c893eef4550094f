//! Command-line interface.
//!
//! [`parse_args`] turns the command line into a [`CliCommand`]; `main`
//! handles `--version` and `--help` before touching the terminal.

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, ViewOptions};
pub use version::{version_string, USAGE, VERSION};
