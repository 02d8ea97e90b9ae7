//! Core library entry for the `linksweep` CLI.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod logger;
pub mod pipeline;
pub mod ports;

use clap::error::ErrorKind;
use clap::Parser;

/// A failed run: the message to report and the process exit status to use.
///
/// Pre-flight failures carry the distinct codes 9 (working directory
/// missing) and 8 (dataset missing); usage errors carry 2; everything else
/// carries 1.
#[derive(Debug)]
pub struct RunFailure {
    code: u8,
    message: String,
}

impl RunFailure {
    /// Creates a failure with an explicit exit code.
    #[must_use]
    pub fn with_code(code: u8, message: String) -> Self {
        Self { code, message }
    }

    /// The process exit status to report.
    #[must_use]
    pub fn code(&self) -> u8 {
        self.code
    }
}

impl From<String> for RunFailure {
    fn from(message: String) -> Self {
        Self { code: 1, message }
    }
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns a [`RunFailure`] when argument parsing fails or command
/// execution fails; its code distinguishes usage errors, pre-flight
/// failures, and pipeline failures.
pub fn run<I, T>(args: I) -> Result<(), RunFailure>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(RunFailure::with_code(2, err.to_string())),
    };
    commands::dispatch(&cli.command, cli.config.as_deref())
}
