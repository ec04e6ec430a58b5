//! Command implementations for the file ripper CLI
//!
//! Each command is implemented in its own module; `run` dispatches on the
//! parsed subcommand.

pub mod rip;
pub mod shared;
pub mod validate;

use crate::app::services::record_parser::ParseStats;
use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// - `rip`: extract records and print them as JSON
/// - `validate`: check a file definition and print its layout
pub async fn run(args: Args) -> anyhow::Result<ParseStats> {
    match args.command {
        Some(Commands::Rip(rip_args)) => rip::run_rip(rip_args).await,
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        None => Ok(ParseStats::new()),
    }
}
