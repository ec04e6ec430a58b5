//! Validate command implementation
//!
//! Loads a file definition, resolves it into a record layout and prints it.

use anyhow::Context;
use colored::Colorize;
use tracing::info;

use super::shared::setup_logging;
use crate::app::models::FileDefinition;
use crate::app::services::record_parser::{ParseStats, ParserSelector};
use crate::cli::args::ValidateArgs;

pub async fn run_validate(args: ValidateArgs) -> anyhow::Result<ParseStats> {
    setup_logging(args.get_log_level(), false);

    let definition = FileDefinition::load(&args.schema)?;
    let layout = definition
        .layout()
        .with_context(|| format!("Invalid file definition {}", args.schema.display()))?;

    info!(
        "{} uses the {:?} parser",
        args.schema.display(),
        ParserSelector::select(definition.file_type)
    );

    println!("{} {}", "✓".green(), args.schema.display().to_string().bright_cyan());
    print!("{}", layout);
    if let (Some(directory), Some(mask)) = (&definition.input_directory, &definition.file_mask) {
        println!("  input: {} ({})", directory.display(), mask);
    }

    Ok(ParseStats::new())
}
