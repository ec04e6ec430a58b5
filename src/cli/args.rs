//! Command-line argument definitions for file ripper
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::models::FieldNameMap;
use crate::app::services::record_parser::ErrorPolicy;
use crate::config::RipperConfig;
use crate::constants::{DEFAULT_LOG_LEVEL, MAX_WORKERS};
use crate::error::{Result, RipperError};

/// CLI arguments for the file ripper
///
/// Extracts records from delimited, fixed-width and XML files according to a
/// JSON file definition and writes them as JSON.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "file-ripper",
    version,
    about = "Extract records from delimited, fixed-width and XML files",
    long_about = "Reads files described by a JSON file definition and extracts one record per \
                  line or XML element. Each record is written to stdout as a JSON object whose \
                  keys are the defined field names; a per-file summary goes to stderr."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract records from files and print them as JSON
    Rip(RipArgs),
    /// Check a file definition and print its resolved layout
    Validate(ValidateArgs),
}

/// Arguments for the rip command
#[derive(Debug, Clone, Parser)]
pub struct RipArgs {
    /// JSON file definition describing the input layout
    #[arg(short = 's', long = "schema", value_name = "FILE")]
    pub schema: PathBuf,

    /// Files to rip
    ///
    /// When omitted, files are discovered from the definition's
    /// inputDirectory and fileMask.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// JSON ripper configuration; flags override its values
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rename an output field (repeatable)
    #[arg(
        short = 'r',
        long = "rename",
        value_name = "FROM=TO",
        value_parser = parse_rename
    )]
    pub renames: Vec<(String, String)>,

    /// Stop at the first malformed record
    #[arg(long = "abort-on-error", conflicts_with = "skip_errors")]
    pub abort_on_error: bool,

    /// Skip malformed records and report them in the summary
    #[arg(long = "skip-errors")]
    pub skip_errors: bool,

    /// Number of files ripped concurrently
    #[arg(
        short = 'w',
        long = "workers",
        value_name = "N",
        help = "Number of files ripped concurrently (default: CPU count)"
    )]
    pub workers: Option<usize>,

    /// Pretty-print records instead of one JSON object per line
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// JSON file definition to check
    #[arg(short = 's', long = "schema", value_name = "FILE")]
    pub schema: PathBuf,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

fn parse_rename(pair: &str) -> std::result::Result<(String, String), String> {
    FieldNameMap::parse_pair(pair).map_err(|e| e.to_string())
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => DEFAULT_LOG_LEVEL,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

impl RipArgs {
    /// Validate the arguments that clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.workers {
            if workers == 0 || workers > MAX_WORKERS {
                return Err(RipperError::configuration(format!(
                    "--workers must be between 1 and {}, got {}",
                    MAX_WORKERS, workers
                )));
            }
        }
        Ok(())
    }

    /// Get log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level_for(self.verbose)
        }
    }

    /// Layer these flags over a base configuration
    pub fn apply_overrides(&self, mut config: RipperConfig) -> RipperConfig {
        if self.abort_on_error {
            config.error_policy = ErrorPolicy::Abort;
        }
        if self.skip_errors {
            config.error_policy = ErrorPolicy::Skip;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.pretty {
            config.pretty_output = true;
        }
        config
            .renames
            .extend(self.renames.iter().cloned().collect::<FieldNameMap>());
        config
    }
}

impl ValidateArgs {
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    fn rip_args(args: &[&str]) -> RipArgs {
        match parse(args).command {
            Some(Commands::Rip(rip)) => rip,
            other => panic!("Expected rip command, got {:?}", other),
        }
    }

    #[test]
    fn test_rip_defaults() {
        let args = rip_args(&["file-ripper", "rip", "--schema", "people.json"]);

        assert_eq!(args.schema, PathBuf::from("people.json"));
        assert!(args.files.is_empty());
        assert!(args.renames.is_empty());
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_rip_with_files_and_renames() {
        let args = rip_args(&[
            "file-ripper",
            "rip",
            "-s",
            "people.json",
            "a.txt",
            "b.txt",
            "--rename",
            "name=personName",
            "-r",
            "dob=dateOfBirth",
            "-vv",
        ]);

        assert_eq!(args.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(
            args.renames,
            vec![
                ("name".to_string(), "personName".to_string()),
                ("dob".to_string(), "dateOfBirth".to_string())
            ]
        );
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_invalid_rename_is_rejected() {
        assert!(
            Args::try_parse_from(["file-ripper", "rip", "-s", "x.json", "--rename", "name"])
                .is_err()
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["file-ripper", "rip", "-s", "x.json", "-q", "-v"]).is_err());

        let quiet = rip_args(&["file-ripper", "rip", "-s", "x.json", "-q"]);
        assert_eq!(quiet.get_log_level(), "error");
    }

    #[test]
    fn test_workers_validation() {
        let args = rip_args(&["file-ripper", "rip", "-s", "x.json", "--workers", "0"]);
        assert!(args.validate().is_err());

        let args = rip_args(&["file-ripper", "rip", "-s", "x.json", "-w", "4"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_flags_override_config() {
        let base = RipperConfig::default()
            .with_error_policy(ErrorPolicy::Skip)
            .with_renames(FieldNameMap::new().with("age", "years"));
        let args = rip_args(&[
            "file-ripper",
            "rip",
            "-s",
            "x.json",
            "--abort-on-error",
            "--workers",
            "2",
            "--pretty",
            "--rename",
            "name=personName",
        ]);

        let config = args.apply_overrides(base);

        assert_eq!(config.error_policy, ErrorPolicy::Abort);
        assert_eq!(config.workers, 2);
        assert!(config.pretty_output);
        assert_eq!(config.renames.resolve("age"), "years");
        assert_eq!(config.renames.resolve("name"), "personName");
    }

    #[test]
    fn test_validate_command() {
        match parse(&["file-ripper", "validate", "--schema", "people.json", "-v"]).command {
            Some(Commands::Validate(args)) => {
                assert_eq!(args.schema, PathBuf::from("people.json"));
                assert_eq!(args.get_log_level(), "info");
            }
            other => panic!("Expected validate command, got {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand() {
        assert!(parse(&["file-ripper"]).command.is_none());
    }
}
