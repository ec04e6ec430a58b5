//! Rip command implementation
//!
//! Loads the file definition and configuration, rips the requested or
//! discovered files in parallel and prints the records as JSON.

use anyhow::Context;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::shared::{report_summary, setup_logging, write_records};
use crate::app::models::FileDefinition;
use crate::app::services::file_ripper::FileRipper;
use crate::app::services::record_parser::ParseStats;
use crate::cli::args::RipArgs;
use crate::config::RipperConfig;

pub async fn run_rip(args: RipArgs) -> anyhow::Result<ParseStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet);
    debug!("Rip arguments: {:?}", args);

    args.validate()?;

    let definition = Arc::new(FileDefinition::load(&args.schema)?);
    let base_config = match &args.config {
        Some(path) => RipperConfig::load(path)?,
        None => RipperConfig::default(),
    };
    let config = args.apply_overrides(base_config);
    config.validate()?;

    info!(
        "Ripping {} files with {} workers",
        definition.file_type, config.workers
    );

    let ripper = FileRipper::new(config);
    let outputs = if args.files.is_empty() {
        ripper
            .rip_files_parallel(definition)
            .await
            .context("Failed to rip discovered files")?
    } else {
        ripper
            .rip_paths_parallel(definition, args.files.clone())
            .await
            .context("Failed to rip files")?
    };

    write_records(io::stdout().lock(), &outputs, ripper.config().pretty_output)
        .context("Failed to write records")?;

    Ok(report_summary(&outputs, start_time.elapsed(), args.quiet))
}
