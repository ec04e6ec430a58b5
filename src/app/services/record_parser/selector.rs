//! Parser strategy selection from a declared file type

use crate::app::models::FileType;
use crate::error::Result;

/// Parsing strategy family
///
/// Delimited and fixed-width files share the line-oriented strategy; XML
/// files are read as a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserKind {
    Flat,
    Xml,
}

/// Maps a file's declared type to its parsing strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserSelector;

impl ParserSelector {
    pub fn select(file_type: FileType) -> ParserKind {
        match file_type {
            FileType::Delimited | FileType::Fixed => ParserKind::Flat,
            FileType::Xml => ParserKind::Xml,
        }
    }

    /// Select from a type name as found in a schema document
    ///
    /// Unknown names fail here, before any content is read.
    pub fn select_name(file_type: &str) -> Result<ParserKind> {
        Ok(Self::select(file_type.parse()?))
    }
}
