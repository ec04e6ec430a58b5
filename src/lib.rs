//! File Ripper Library
//!
//! Schema-driven extraction of records from flat and structured text files.
//! A declarative file definition describes where each named field lives in a
//! delimited line, a fixed-width line or an XML record element, and the
//! engine turns the file's content into a lazy sequence of name/value records.
//!
//! This library provides tools for:
//! - Describing file layouts as JSON-loadable definitions
//! - Parsing delimited, fixed-width and XML content with positioned errors
//! - Renaming output fields and converting records into typed values
//! - Discovering input files by mask and ripping them in parallel

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod discovery;
        pub mod file_ripper;
        pub mod record_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldDefinition, FieldNameMap, FileDefinition, FileType, Record};
pub use app::services::file_ripper::{FileRipResult, FileRipper};
pub use app::services::record_parser::{ErrorPolicy, RecordParsingService, RipResult};
pub use config::RipperConfig;
pub use error::{Result, RipperError};
