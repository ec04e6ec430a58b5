//! Validated record layouts
//!
//! A [`FileDefinition`] carries every attribute for every format as optional
//! values. [`RecordLayout`] is the checked form: one variant per format, each
//! holding only the attributes that format reads. Building a layout is where
//! configuration errors surface, before any content is touched.

use std::collections::HashSet;
use std::fmt;

use super::selector::ParserKind;
use crate::app::models::{FileDefinition, FileType};
use crate::error::{Result, RipperError};

/// Column of a delimited line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedColumn {
    pub name: String,
    pub position: usize,
}

/// Character span of a fixed-width line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedColumn {
    pub name: String,
    pub start: usize,
    pub length: usize,
}

impl FixedColumn {
    /// Exclusive end offset of the span
    ///
    /// Layout validation guarantees `start + length` fits in a `usize`.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }
}

/// Child element of an XML record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlField {
    pub name: String,
    pub tag: String,
}

/// Format-specific, validated shape of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLayout {
    Delimited {
        delimiter: String,
        has_header: bool,
        columns: Vec<DelimitedColumn>,
    },
    FixedWidth {
        has_header: bool,
        columns: Vec<FixedColumn>,
    },
    Xml {
        record_element: String,
        fields: Vec<XmlField>,
    },
}

impl RecordLayout {
    pub fn file_type(&self) -> FileType {
        match self {
            RecordLayout::Delimited { .. } => FileType::Delimited,
            RecordLayout::FixedWidth { .. } => FileType::Fixed,
            RecordLayout::Xml { .. } => FileType::Xml,
        }
    }

    pub fn kind(&self) -> ParserKind {
        match self {
            RecordLayout::Delimited { .. } | RecordLayout::FixedWidth { .. } => ParserKind::Flat,
            RecordLayout::Xml { .. } => ParserKind::Xml,
        }
    }

    /// Whether the first line is skipped; always false for XML
    pub fn has_header(&self) -> bool {
        match self {
            RecordLayout::Delimited { has_header, .. }
            | RecordLayout::FixedWidth { has_header, .. } => *has_header,
            RecordLayout::Xml { .. } => false,
        }
    }

    /// Output field names in emission order
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            RecordLayout::Delimited { columns, .. } => {
                columns.iter().map(|c| c.name.as_str()).collect()
            }
            RecordLayout::FixedWidth { columns, .. } => {
                columns.iter().map(|c| c.name.as_str()).collect()
            }
            RecordLayout::Xml { fields, .. } => fields.iter().map(|f| f.name.as_str()).collect(),
        }
    }
}

impl TryFrom<&FileDefinition> for RecordLayout {
    type Error = RipperError;

    fn try_from(definition: &FileDefinition) -> Result<Self> {
        if definition.field_definitions.is_empty() {
            return Err(RipperError::configuration(format!(
                "{} file definition has no field definitions",
                definition.file_type
            )));
        }

        let mut seen = HashSet::new();
        for field in &definition.field_definitions {
            if field.field_name.trim().is_empty() {
                return Err(RipperError::configuration(
                    "Field definition has an empty field name",
                ));
            }
            if !seen.insert(field.field_name.as_str()) {
                return Err(RipperError::configuration(format!(
                    "Field '{}' is defined more than once",
                    field.field_name
                )));
            }
        }

        match definition.file_type {
            FileType::Delimited => delimited_layout(definition),
            FileType::Fixed => fixed_width_layout(definition),
            FileType::Xml => xml_layout(definition),
        }
    }
}

fn delimited_layout(definition: &FileDefinition) -> Result<RecordLayout> {
    let delimiter = match definition.delimiter.as_deref() {
        Some(delimiter) if !delimiter.is_empty() => delimiter.to_string(),
        _ => {
            return Err(RipperError::configuration(
                "DELIMITED file definition requires a non-empty delimiter",
            ));
        }
    };

    let columns = definition
        .field_definitions
        .iter()
        .map(|field| -> Result<DelimitedColumn> {
            let position = field.position_in_row.ok_or_else(|| {
                RipperError::configuration(format!(
                    "Delimited field '{}' has no positionInRow",
                    field.field_name
                ))
            })?;
            if position.checked_add(1).is_none() {
                return Err(RipperError::configuration(format!(
                    "Delimited field '{}' has positionInRow {} out of range",
                    field.field_name, position
                )));
            }
            Ok(DelimitedColumn {
                name: field.field_name.clone(),
                position,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RecordLayout::Delimited {
        delimiter,
        has_header: definition.has_header,
        columns,
    })
}

fn fixed_width_layout(definition: &FileDefinition) -> Result<RecordLayout> {
    let columns = definition
        .field_definitions
        .iter()
        .map(|field| -> Result<FixedColumn> {
            let (start, length) = match (field.start_position, field.field_length) {
                (Some(start), Some(length)) => (start, length),
                _ => {
                    return Err(RipperError::configuration(format!(
                        "Fixed-width field '{}' requires startPosition and fieldLength",
                        field.field_name
                    )));
                }
            };
            if length == 0 {
                return Err(RipperError::configuration(format!(
                    "Fixed-width field '{}' has zero fieldLength",
                    field.field_name
                )));
            }
            if start.checked_add(length).is_none() {
                return Err(RipperError::configuration(format!(
                    "Fixed-width field '{}' span [{}, +{}) is out of range",
                    field.field_name, start, length
                )));
            }
            Ok(FixedColumn {
                name: field.field_name.clone(),
                start,
                length,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RecordLayout::FixedWidth {
        has_header: definition.has_header,
        columns,
    })
}

fn xml_layout(definition: &FileDefinition) -> Result<RecordLayout> {
    let record_element = match definition.record_xml_element.as_deref() {
        Some(element) if !element.trim().is_empty() => element.trim().to_string(),
        _ => {
            return Err(RipperError::configuration(
                "XML file definition requires a recordXmlElement",
            ));
        }
    };

    let fields = definition
        .field_definitions
        .iter()
        .map(|field| XmlField {
            name: field.field_name.clone(),
            tag: field.xml_tag().to_string(),
        })
        .collect();

    Ok(RecordLayout::Xml {
        record_element,
        fields,
    })
}

impl fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLayout::Delimited {
                delimiter,
                has_header,
                columns,
            } => {
                writeln!(f, "DELIMITED (delimiter {:?}, header: {})", delimiter, has_header)?;
                for column in columns {
                    writeln!(f, "  {:<24} column {}", column.name, column.position)?;
                }
            }
            RecordLayout::FixedWidth {
                has_header,
                columns,
            } => {
                writeln!(f, "FIXED (header: {})", has_header)?;
                for column in columns {
                    writeln!(
                        f,
                        "  {:<24} chars [{}, {})",
                        column.name,
                        column.start,
                        column.end()
                    )?;
                }
            }
            RecordLayout::Xml {
                record_element,
                fields,
            } => {
                writeln!(f, "XML (record element <{}>)", record_element)?;
                for field in fields {
                    writeln!(f, "  {:<24} <{}>", field.name, field.tag)?;
                }
            }
        }
        Ok(())
    }
}
