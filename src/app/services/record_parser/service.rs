//! Record parsing orchestration
//!
//! This module ties a validated layout to its format parser and walks file
//! content lazily: header handling, record positions and kind dispatch.

use std::iter::Enumerate;
use std::str::Lines;

use tracing::debug;

use super::LineParser;
use super::delimited::DelimitedRecordParser;
use super::fixed_width::FixedWidthRecordParser;
use super::layout::RecordLayout;
use super::selector::{ParserKind, ParserSelector};
use super::xml::{XmlRecordParser, XmlRecords};
use crate::app::models::{FileDefinition, FileType, Record};
use crate::error::{Result, RipperError};

#[derive(Debug, Clone)]
enum FormatParser {
    Delimited(DelimitedRecordParser),
    FixedWidth(FixedWidthRecordParser),
    Xml(XmlRecordParser),
}

/// Turns raw file content into a lazy sequence of records
///
/// Construction validates the file definition; configuration errors are
/// returned here, before any content is read. The service is immutable and
/// may be shared between threads.
#[derive(Debug, Clone)]
pub struct RecordParsingService {
    file_type: FileType,
    kind: ParserKind,
    has_header: bool,
    parser: FormatParser,
}

impl RecordParsingService {
    pub fn new(definition: &FileDefinition) -> Result<Self> {
        let kind = ParserSelector::select(definition.file_type);
        let layout = RecordLayout::try_from(definition)?;
        let has_header = layout.has_header();

        debug!(
            "Resolved {} layout ({:?} parser, header: {}): {:?}",
            definition.file_type,
            kind,
            has_header,
            layout.field_names()
        );

        let parser = match layout {
            RecordLayout::Delimited {
                delimiter, columns, ..
            } => FormatParser::Delimited(DelimitedRecordParser::new(delimiter, columns)?),
            RecordLayout::FixedWidth { columns, .. } => {
                FormatParser::FixedWidth(FixedWidthRecordParser::new(columns)?)
            }
            RecordLayout::Xml {
                record_element,
                fields,
            } => FormatParser::Xml(XmlRecordParser::new(record_element, fields)?),
        };

        Ok(Self {
            file_type: definition.file_type,
            kind,
            has_header,
            parser,
        })
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn kind(&self) -> ParserKind {
        self.kind
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    fn line_parser(&self) -> Option<&dyn LineParser> {
        match &self.parser {
            FormatParser::Delimited(parser) => Some(parser),
            FormatParser::FixedWidth(parser) => Some(parser),
            FormatParser::Xml(_) => None,
        }
    }

    /// Parse a sequence of lines from a delimited or fixed-width file
    ///
    /// When the definition declares a header the first line is discarded
    /// unconditionally. Errors carry the 1-based line number in the file.
    pub fn parse_lines<I>(&self, lines: I) -> Result<FlatRecords<'_, I::IntoIter>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let parser = self.line_parser().ok_or_else(|| {
            RipperError::configuration("XML content must be parsed as a document, not as lines")
        })?;

        Ok(FlatRecords {
            parser,
            lines: lines.into_iter().enumerate(),
            skip_header: self.has_header,
        })
    }

    /// Parse a whole XML document
    ///
    /// Errors carry the 1-based ordinal of the record element.
    pub fn parse_document<'a>(&'a self, document: &'a str) -> Result<XmlRecords<'a>> {
        match &self.parser {
            FormatParser::Xml(parser) => Ok(parser.records(document)),
            _ => Err(RipperError::configuration(format!(
                "{} content must be parsed as lines, not as a document",
                self.file_type
            ))),
        }
    }

    /// Parse raw content according to the service's format
    pub fn parse_str<'a>(&'a self, content: &'a str) -> Records<'a> {
        match &self.parser {
            FormatParser::Xml(parser) => Records::Xml(parser.records(content)),
            FormatParser::Delimited(parser) => Records::Flat(FlatRecords {
                parser,
                lines: content.lines().enumerate(),
                skip_header: self.has_header,
            }),
            FormatParser::FixedWidth(parser) => Records::Flat(FlatRecords {
                parser,
                lines: content.lines().enumerate(),
                skip_header: self.has_header,
            }),
        }
    }
}

/// Lazy iterator over the records of a line-oriented file
pub struct FlatRecords<'a, I> {
    parser: &'a dyn LineParser,
    lines: Enumerate<I>,
    skip_header: bool,
}

impl<I> Iterator for FlatRecords<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, line) = self.lines.next()?;

        if index == 0 && self.skip_header {
            let (index, line) = self.lines.next()?;
            return Some(self.parser.parse_line(line.as_ref(), index + 1));
        }

        Some(self.parser.parse_line(line.as_ref(), index + 1))
    }
}

/// Records of either strategy family, as produced by
/// [`RecordParsingService::parse_str`]
pub enum Records<'a> {
    Flat(FlatRecords<'a, Lines<'a>>),
    Xml(XmlRecords<'a>),
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Records::Flat(records) => records.next(),
            Records::Xml(records) => records.next(),
        }
    }
}
