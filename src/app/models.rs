//! Data models for schema-driven record extraction
//!
//! This module contains the declarative schema types: [`FileDefinition`]
//! describes the shape of a whole file and [`FieldDefinition`] describes how
//! to locate one field inside a record. Both are plain data holders that
//! deserialize from camelCase JSON schema documents.

pub mod record;

pub use record::{FieldNameMap, Record};

use crate::app::services::record_parser::RecordLayout;
use crate::constants::file_type_names;
use crate::error::{Result, RipperError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// =============================================================================
// File Type
// =============================================================================

/// Declared format of a flat file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    /// Lines split by a literal delimiter string
    Delimited,
    /// Lines sliced by character offset and length
    Fixed,
    /// Sibling elements whose child tags hold the values
    Xml,
}

impl FileType {
    /// Canonical upper-case name as used in schema documents
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Delimited => file_type_names::DELIMITED,
            FileType::Fixed => file_type_names::FIXED,
            FileType::Xml => file_type_names::XML,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = RipperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            file_type_names::DELIMITED => Ok(FileType::Delimited),
            file_type_names::FIXED => Ok(FileType::Fixed),
            file_type_names::XML => Ok(FileType::Xml),
            _ => Err(RipperError::configuration(format!(
                "Invalid file type '{}': must be one of {}",
                s,
                file_type_names::ALL.join(", ")
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for FileType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Field Definition
// =============================================================================

/// How to extract one named field from a raw record
///
/// Only the attributes relevant to the owning file's format are read; the
/// others are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Output key for the extracted value
    pub field_name: String,

    /// 0-based character offset (fixed-width only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<usize>,

    /// Character count (fixed-width only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_length: Option<usize>,

    /// 0-based column index (delimited only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_in_row: Option<usize>,

    /// Child element name (XML only); defaults to `field_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_field_name: Option<String>,
}

impl FieldDefinition {
    /// Create a field with no positional attributes set
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            start_position: None,
            field_length: None,
            position_in_row: None,
            xml_field_name: None,
        }
    }

    /// Field read from a delimited column
    pub fn delimited(field_name: impl Into<String>, position_in_row: usize) -> Self {
        Self {
            position_in_row: Some(position_in_row),
            ..Self::new(field_name)
        }
    }

    /// Field sliced from a fixed-width line
    pub fn fixed(field_name: impl Into<String>, start_position: usize, field_length: usize) -> Self {
        Self {
            start_position: Some(start_position),
            field_length: Some(field_length),
            ..Self::new(field_name)
        }
    }

    /// Field read from an XML child element
    pub fn xml(field_name: impl Into<String>, xml_field_name: impl Into<String>) -> Self {
        Self {
            xml_field_name: Some(xml_field_name.into()),
            ..Self::new(field_name)
        }
    }

    /// Tag name to look up in an XML record element
    pub fn xml_tag(&self) -> &str {
        self.xml_field_name.as_deref().unwrap_or(&self.field_name)
    }
}

// =============================================================================
// File Definition
// =============================================================================

/// Shape of an entire file: format, delimiter, header and field schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDefinition {
    pub file_type: FileType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// First line is a header and never parsed as data (flat formats only)
    #[serde(default)]
    pub has_header: bool,

    /// Ordered schema; defines emission order of every record
    pub field_definitions: Vec<FieldDefinition>,

    /// Tag wrapping one record (XML only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_xml_element: Option<String>,

    /// Directory searched by file discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_directory: Option<PathBuf>,

    /// Glob mask matched against file names during discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_mask: Option<String>,
}

impl FileDefinition {
    /// Create a definition of the given type with no fields
    pub fn new(file_type: FileType) -> Self {
        Self {
            file_type,
            delimiter: None,
            has_header: false,
            field_definitions: Vec::new(),
            record_xml_element: None,
            input_directory: None,
            file_mask: None,
        }
    }

    /// Delimited file split on `delimiter`
    pub fn delimited(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: Some(delimiter.into()),
            ..Self::new(FileType::Delimited)
        }
    }

    /// Fixed-width file
    pub fn fixed() -> Self {
        Self::new(FileType::Fixed)
    }

    /// XML file whose records are `record_xml_element` elements
    pub fn xml(record_xml_element: impl Into<String>) -> Self {
        Self {
            record_xml_element: Some(record_xml_element.into()),
            ..Self::new(FileType::Xml)
        }
    }

    /// Set header presence
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Append a field to the schema
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.field_definitions.push(field);
        self
    }

    /// Replace the field schema
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        self.field_definitions = fields.into_iter().collect();
        self
    }

    /// Set discovery location and mask
    pub fn with_input(mut self, directory: impl Into<PathBuf>, mask: impl Into<String>) -> Self {
        self.input_directory = Some(directory.into());
        self.file_mask = Some(mask.into());
        self
    }

    /// Field names in schema order
    pub fn field_names(&self) -> Vec<&str> {
        self.field_definitions
            .iter()
            .map(|field| field.field_name.as_str())
            .collect()
    }

    /// Validate the definition into its format-specific layout
    pub fn layout(&self) -> Result<RecordLayout> {
        RecordLayout::try_from(self)
    }

    /// Decode a definition from a JSON schema document
    ///
    /// An unrecognised `fileType` is a configuration error; any other decoding
    /// failure is a schema error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::decode(json, "Failed to decode file definition")
    }

    /// Load a definition from a JSON schema file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RipperError::io(path, e))?;
        Self::decode(
            &content,
            &format!("Failed to decode file definition {}", path.display()),
        )
    }

    fn decode(json: &str, context: &str) -> Result<Self> {
        let document: serde_json::Value =
            serde_json::from_str(json).map_err(|e| RipperError::schema(context, e))?;

        if let Some(name) = document.get("fileType").and_then(serde_json::Value::as_str) {
            name.parse::<FileType>()?;
        }

        serde_json::from_value(document).map_err(|e| RipperError::schema(context, e))
    }
}
