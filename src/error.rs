//! Error handling for record extraction.
//!
//! Configuration errors are raised before any content is read. Record-level
//! errors carry the 1-based position of the offending line or element so a
//! caller can report it and decide whether to keep going.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RipperError {
    /// File definition is internally inconsistent or names an unknown type
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A line or element could not yield every declared field
    #[error("Malformed record {position}: {reason}")]
    MalformedRecord { position: usize, reason: String },

    /// An XML record lacks a declared child element
    #[error("Record {position} is missing field '{field}'")]
    MissingField { position: usize, field: String },

    /// The XML document itself could not be read
    #[error("XML error at record {position}: {message}")]
    Xml { position: usize, message: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema or configuration document could not be decoded
    #[error("Schema error: {message}")]
    Schema {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be converted into the requested type
    #[error("Record {position} could not be converted: {source}")]
    Conversion {
        position: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("File discovery failed: {message}")]
    Discovery { message: String },

    #[error("Background task failed: {message}")]
    TaskFailed { message: String },
}

impl RipperError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed_record(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            position,
            reason: reason.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(position: usize, field: impl Into<String>) -> Self {
        Self::MissingField {
            position,
            field: field.into(),
        }
    }

    /// Create an XML document error
    pub fn xml(position: usize, message: impl Into<String>) -> Self {
        Self::Xml {
            position,
            message: message.into(),
        }
    }

    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a schema decoding error
    pub fn schema(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Schema {
            message: message.into(),
            source,
        }
    }

    /// Create a discovery error
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }

    /// Position of the failing record, for record-level errors only
    pub fn record_position(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { position, .. }
            | Self::MissingField { position, .. }
            | Self::Xml { position, .. }
            | Self::Conversion { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Whether this error belongs to a single record rather than the whole file
    pub fn is_record_error(&self) -> bool {
        self.record_position().is_some()
    }
}

pub type Result<T> = std::result::Result<T, RipperError>;
