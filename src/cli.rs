//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `linksweep`.
#[derive(Debug, Parser)]
#[command(name = "linksweep", version, about = "Batch link checking via an external checker")]
pub struct Cli {
    /// Path to a YAML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: split, extract, submit, correlate, archive.
    Run,
    /// Split the source dataset into bounded part files.
    Split,
    /// Write a URL-only link file for every part file.
    Extract,
    /// Pass each link file to the external checker, one at a time.
    Submit,
    /// Match flagged checker responses back to source identifiers.
    Correlate,
    /// Move this run's artifacts into an archive directory.
    Archive,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_run_subcommand() {
        let cli = Cli::parse_from(["linksweep", "run"]);
        assert!(matches!(cli.command, Command::Run));
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_stage_subcommands() {
        assert!(matches!(Cli::parse_from(["linksweep", "split"]).command, Command::Split));
        assert!(matches!(Cli::parse_from(["linksweep", "extract"]).command, Command::Extract));
        assert!(matches!(Cli::parse_from(["linksweep", "submit"]).command, Command::Submit));
        assert!(matches!(Cli::parse_from(["linksweep", "correlate"]).command, Command::Correlate));
        assert!(matches!(Cli::parse_from(["linksweep", "archive"]).command, Command::Archive));
    }

    #[test]
    fn parses_global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["linksweep", "run", "--config", "custom.yaml"]);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("custom.yaml")));
    }
}
