//! Schema-driven record extraction for delimited, fixed-width and XML files
//!
//! A [`FileDefinition`](crate::app::models::FileDefinition) is validated into
//! a [`RecordLayout`], the [`ParserSelector`] picks the strategy family and
//! the [`RecordParsingService`] walks the content lazily, handing each line or
//! element to the matching format parser.
//!
//! ## Architecture
//!
//! - [`layout`] - Validated, per-format view of a file definition
//! - [`selector`] - File type to parsing strategy mapping
//! - [`delimited`] - Literal-delimiter line splitting
//! - [`fixed_width`] - Offset/length line slicing
//! - [`xml`] - Record element extraction from XML documents
//! - [`service`] - Header handling, record positions and lazy iteration
//! - [`stats`] - Parsing statistics and error policy collection
//!
//! ## Usage
//!
//! ```rust
//! use file_ripper::app::models::{FieldDefinition, FileDefinition};
//! use file_ripper::app::services::record_parser::RecordParsingService;
//!
//! # fn example() -> file_ripper::Result<()> {
//! let definition = FileDefinition::delimited(",")
//!     .with_field(FieldDefinition::delimited("name", 0))
//!     .with_field(FieldDefinition::delimited("age", 1));
//!
//! let service = RecordParsingService::new(&definition)?;
//! for record in service.parse_str("Aaron,39\nGene,61") {
//!     let record = record?;
//!     println!("{} is {}", record.get("name").unwrap_or(""), record.get("age").unwrap_or(""));
//! }
//! # Ok(())
//! # }
//! ```

pub mod delimited;
pub mod fixed_width;
pub mod layout;
pub mod selector;
pub mod service;
pub mod stats;
pub mod xml;

#[cfg(test)]
pub mod tests;

pub use delimited::DelimitedRecordParser;
pub use fixed_width::FixedWidthRecordParser;
pub use layout::{DelimitedColumn, FixedColumn, RecordLayout, XmlField};
pub use selector::{ParserKind, ParserSelector};
pub use service::{FlatRecords, RecordParsingService, Records};
pub use stats::{ErrorPolicy, ParseStats, RipResult};
pub use xml::{XmlRecordParser, XmlRecords};

use crate::app::models::Record;
use crate::error::Result;

/// Parser for formats where one line holds one record
pub trait LineParser: Send + Sync {
    /// Parse one raw line into a record
    ///
    /// # Arguments
    /// * `line` - Line content without its terminator
    /// * `position` - 1-based line number in the file, used to tag errors
    fn parse_line(&self, line: &str, position: usize) -> Result<Record>;
}
