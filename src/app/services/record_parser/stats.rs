//! Parsing statistics and result structures
//!
//! The parsing service only reports record failures. Whether a caller skips
//! a bad record or stops at the first one is an [`ErrorPolicy`] applied here
//! when the lazy sequence is collected.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::app::models::Record;
use crate::constants::{MAX_RECORDED_ERRORS, SUCCESS_RATE_THRESHOLD};
use crate::error::Result;

/// What to do when a record fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Record the failure and continue with the next record
    Skip,
    /// Return the first failure
    #[default]
    Abort,
}

/// Parsing result with records and basic statistics
#[derive(Debug, Clone)]
pub struct RipResult {
    /// Successfully parsed records, in source order
    pub records: Vec<Record>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

impl RipResult {
    /// Drain a record sequence under the given error policy
    ///
    /// Only record-level errors are subject to the policy; anything else is
    /// returned immediately.
    pub fn collect<I>(records: I, policy: ErrorPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let mut stats = ParseStats::new();
        let mut parsed = Vec::new();

        for result in records {
            stats.total_records += 1;

            match result {
                Ok(record) => {
                    parsed.push(record);
                    stats.records_parsed += 1;
                }
                Err(e) if policy == ErrorPolicy::Skip && e.is_record_error() => {
                    warn!("Skipped {}", e);
                    stats.record_error(e.to_string());
                }
                Err(e) => {
                    debug!("Aborting after {} records: {}", stats.total_records, e);
                    return Err(e);
                }
            }
        }

        Ok(Self {
            records: parsed,
            stats,
        })
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of data records encountered (header excluded)
    pub total_records: usize,

    /// Number of records successfully parsed
    pub records_parsed: usize,

    /// Number of records skipped due to errors
    pub records_skipped: usize,

    /// First parsing errors, for reporting
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a skipped record and keep its message while there is room
    pub fn record_error(&mut self, message: String) {
        self.records_skipped += 1;
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(message);
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.total_records as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > SUCCESS_RATE_THRESHOLD
    }

    /// Fold another file's statistics into this one
    pub fn merge(&mut self, other: &ParseStats) {
        self.total_records += other.total_records;
        self.records_parsed += other.records_parsed;
        self.records_skipped += other.records_skipped;
        let room = MAX_RECORDED_ERRORS.saturating_sub(self.errors.len());
        self.errors.extend(other.errors.iter().take(room).cloned());
    }
}
