//! Fixed-width line parsing
//!
//! Offsets and lengths count characters, not bytes. Values are right-padded
//! with spaces in the source, so trailing whitespace is stripped while
//! leading whitespace is kept. Overlapping columns are not rejected; they
//! simply read overlapping text.

use super::LineParser;
use super::layout::{FixedColumn, RecordLayout};
use crate::app::models::{FileDefinition, Record};
use crate::error::{Result, RipperError};

/// Slices a line into fields by declared character spans
#[derive(Debug, Clone)]
pub struct FixedWidthRecordParser {
    columns: Vec<FixedColumn>,
}

impl FixedWidthRecordParser {
    pub fn new(columns: Vec<FixedColumn>) -> Result<Self> {
        if columns.is_empty() {
            return Err(RipperError::configuration(
                "Fixed-width parser requires columns",
            ));
        }
        Ok(Self { columns })
    }

    /// Build from a FIXED file definition
    pub fn from_definition(definition: &FileDefinition) -> Result<Self> {
        match RecordLayout::try_from(definition)? {
            RecordLayout::FixedWidth { columns, .. } => Self::new(columns),
            other => Err(RipperError::configuration(format!(
                "Fixed-width parser cannot read a {} file definition",
                other.file_type()
            ))),
        }
    }

    /// Minimum line length (in characters) that satisfies every column
    pub fn record_width(&self) -> usize {
        self.columns.iter().map(FixedColumn::end).max().unwrap_or(0)
    }
}

impl LineParser for FixedWidthRecordParser {
    fn parse_line(&self, line: &str, position: usize) -> Result<Record> {
        // Byte offset of every char boundary, including the end of the line
        let boundaries: Vec<usize> = line
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(line.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let mut record = Record::with_capacity(self.columns.len());
        for column in &self.columns {
            if column.end() > char_count {
                return Err(RipperError::malformed_record(
                    position,
                    format!(
                        "line has {} characters but field '{}' spans [{}, {})",
                        char_count,
                        column.name,
                        column.start,
                        column.end()
                    ),
                ));
            }

            let value = &line[boundaries[column.start]..boundaries[column.end()]];
            record.push(column.name.as_str(), value.trim_end());
        }

        Ok(record)
    }
}
