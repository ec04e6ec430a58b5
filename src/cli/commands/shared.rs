//! Shared utilities for CLI commands
//!
//! Logging setup, record output and the human-readable summary.

use colored::Colorize;
use std::io::{self, BufWriter, Write};
use std::time::Duration;
use tracing::debug;

use crate::app::services::file_ripper::FileRipResult;
use crate::app::services::record_parser::ParseStats;
use crate::constants::LOG_TARGET;

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over `level`.
pub fn setup_logging(level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", level);
}

/// Write every record as JSON, one object per line unless `pretty`
pub fn write_records<W: Write>(
    writer: W,
    outputs: &[FileRipResult],
    pretty: bool,
) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(writer);

    for output in outputs {
        for record in &output.result.records {
            if pretty {
                serde_json::to_writer_pretty(&mut writer, record)?;
            } else {
                serde_json::to_writer(&mut writer, record)?;
            }
            writer.write_all(b"\n")?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Print a per-file summary to stderr and return the combined statistics
pub fn report_summary(outputs: &[FileRipResult], elapsed: Duration, quiet: bool) -> ParseStats {
    let mut totals = ParseStats::new();

    for output in outputs {
        let stats = &output.result.stats;
        totals.merge(stats);

        if quiet {
            continue;
        }

        let marker = if stats.records_skipped == 0 {
            "✓".green()
        } else {
            "!".yellow()
        };
        eprintln!(
            "{} {}: {} records",
            marker,
            output.path.display().to_string().bright_cyan(),
            stats.records_parsed
        );
        if stats.records_skipped > 0 {
            eprintln!(
                "    {} skipped ({:.1}% parsed)",
                stats.records_skipped.to_string().yellow(),
                stats.success_rate()
            );
            for error in &stats.errors {
                eprintln!("    {}", error.bright_black());
            }
        }
    }

    if !quiet {
        eprintln!(
            "{} {} files, {} records, {} skipped in {:.2?}",
            "Done:".bright_green().bold(),
            outputs.len(),
            totals.records_parsed,
            totals.records_skipped,
            elapsed
        );
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Record;
    use crate::app::services::record_parser::RipResult;
    use std::path::PathBuf;

    fn output(name: &str, records: Vec<Record>, skipped: usize) -> FileRipResult {
        let parsed = records.len();
        FileRipResult {
            path: PathBuf::from(name),
            result: RipResult {
                records,
                stats: ParseStats {
                    total_records: parsed + skipped,
                    records_parsed: parsed,
                    records_skipped: skipped,
                    errors: vec![],
                },
            },
        }
    }

    #[test]
    fn test_write_records_as_json_lines() {
        let outputs = vec![
            output("a.txt", vec![Record::from_iter([("name", "Aaron"), ("age", "39")])], 0),
            output("b.txt", vec![Record::from_iter([("name", "Gene"), ("age", "61")])], 0),
        ];
        let mut buffer = Vec::new();

        write_records(&mut buffer, &outputs, false).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\"name\":\"Aaron\",\"age\":\"39\"}\n{\"name\":\"Gene\",\"age\":\"61\"}\n"
        );
    }

    #[test]
    fn test_report_summary_totals() {
        let outputs = vec![
            output("a.txt", vec![Record::from_iter([("name", "Aaron")])], 1),
            output("b.txt", vec![], 0),
        ];

        let totals = report_summary(&outputs, Duration::from_millis(5), true);

        assert_eq!(totals.total_records, 2);
        assert_eq!(totals.records_parsed, 1);
        assert_eq!(totals.records_skipped, 1);
    }
}
