//! Delimited line parsing
//!
//! Lines are split on the literal delimiter string. There is no quoting or
//! escaping: a value containing the delimiter shifts every following column.

use tracing::trace;

use super::LineParser;
use super::layout::{DelimitedColumn, RecordLayout};
use crate::app::models::{FileDefinition, Record};
use crate::error::{Result, RipperError};

/// Splits a line by a delimiter and picks columns by position
#[derive(Debug, Clone)]
pub struct DelimitedRecordParser {
    delimiter: String,
    columns: Vec<DelimitedColumn>,
    /// Token count needed to satisfy the highest referenced column
    required_tokens: usize,
}

impl DelimitedRecordParser {
    pub fn new(delimiter: impl Into<String>, columns: Vec<DelimitedColumn>) -> Result<Self> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(RipperError::configuration(
                "Delimited parser requires a non-empty delimiter",
            ));
        }

        let required_tokens = columns
            .iter()
            .map(|column| {
                column.position.checked_add(1).ok_or_else(|| {
                    RipperError::configuration(format!(
                        "Delimited column '{}' position {} is out of range",
                        column.name, column.position
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .max()
            .ok_or_else(|| RipperError::configuration("Delimited parser requires columns"))?;

        Ok(Self {
            delimiter,
            columns,
            required_tokens,
        })
    }

    /// Build from a DELIMITED file definition
    pub fn from_definition(definition: &FileDefinition) -> Result<Self> {
        match RecordLayout::try_from(definition)? {
            RecordLayout::Delimited {
                delimiter, columns, ..
            } => Self::new(delimiter, columns),
            other => Err(RipperError::configuration(format!(
                "Delimited parser cannot read a {} file definition",
                other.file_type()
            ))),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn required_tokens(&self) -> usize {
        self.required_tokens
    }
}

impl LineParser for DelimitedRecordParser {
    fn parse_line(&self, line: &str, position: usize) -> Result<Record> {
        let tokens: Vec<&str> = line.split(self.delimiter.as_str()).collect();

        if tokens.len() < self.required_tokens {
            return Err(RipperError::malformed_record(
                position,
                format!(
                    "expected at least {} fields separated by {:?}, found {}",
                    self.required_tokens,
                    self.delimiter,
                    tokens.len()
                ),
            ));
        }

        let mut record = Record::with_capacity(self.columns.len());
        for column in &self.columns {
            record.push(column.name.as_str(), tokens[column.position]);
        }

        trace!("Line {}: {} tokens", position, tokens.len());
        Ok(record)
    }
}
