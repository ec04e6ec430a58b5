//! XML record extraction
//!
//! Records are the elements named by the record element tag that sit
//! directly under the document root, or the root itself when it carries that
//! tag. Each field reads the text of the first child element carrying its
//! tag. Names match on the full qualified name or on the local part, so
//! `<ns:Person>` is a `Person` record. Text is entity-unescaped and trimmed, so
//! pretty-printed documents yield clean values; CDATA is taken verbatim.
//!
//! The document is read with a pull parser, one record at a time.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::Event;
use quick_xml::name::QName;
use tracing::trace;

use super::layout::{RecordLayout, XmlField};
use crate::app::models::{FileDefinition, Record};
use crate::error::{Result, RipperError};

/// Extracts records from XML elements by child-tag name
#[derive(Debug, Clone)]
pub struct XmlRecordParser {
    record_element: String,
    fields: Vec<XmlField>,
}

impl XmlRecordParser {
    pub fn new(record_element: impl Into<String>, fields: Vec<XmlField>) -> Result<Self> {
        let record_element = record_element.into();
        if record_element.is_empty() {
            return Err(RipperError::configuration(
                "XML parser requires a record element name",
            ));
        }
        if fields.is_empty() {
            return Err(RipperError::configuration("XML parser requires fields"));
        }
        Ok(Self {
            record_element,
            fields,
        })
    }

    /// Build from an XML file definition
    pub fn from_definition(definition: &FileDefinition) -> Result<Self> {
        match RecordLayout::try_from(definition)? {
            RecordLayout::Xml {
                record_element,
                fields,
            } => Self::new(record_element, fields),
            other => Err(RipperError::configuration(format!(
                "XML parser cannot read a {} file definition",
                other.file_type()
            ))),
        }
    }

    pub fn record_element(&self) -> &str {
        &self.record_element
    }

    /// Lazily iterate the records of a whole document
    pub fn records<'a>(&'a self, document: &'a str) -> XmlRecords<'a> {
        XmlRecords {
            parser: self,
            reader: Reader::from_str(document),
            depth: 0,
            position: 0,
            finished: false,
        }
    }

    /// Parse one standalone record element, e.g. `<Person>...</Person>`
    pub fn parse_element(&self, element: &str, position: usize) -> Result<Record> {
        let mut reader = Reader::from_str(element);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    self.expect_record_element(e.name(), position)?;
                    let values = read_children(&mut reader, position)?;
                    return self.build_record(&values, position);
                }
                Ok(Event::Empty(e)) => {
                    self.expect_record_element(e.name(), position)?;
                    return self.build_record(&HashMap::new(), position);
                }
                Ok(Event::Eof) => {
                    return Err(RipperError::xml(
                        position,
                        format!("no <{}> element found", self.record_element),
                    ));
                }
                Err(e) => {
                    return Err(RipperError::xml(
                        position,
                        format!("{} at byte {}", e, reader.error_position()),
                    ));
                }
                Ok(_) => {}
            }
        }
    }

    fn is_record_element(&self, name: QName<'_>) -> bool {
        let expected = self.record_element.as_bytes();
        name.as_ref() == expected || name.local_name().as_ref() == expected
    }

    fn expect_record_element(&self, name: QName<'_>, position: usize) -> Result<()> {
        if self.is_record_element(name) {
            Ok(())
        } else {
            Err(RipperError::xml(
                position,
                format!(
                    "expected <{}> element, found <{}>",
                    self.record_element,
                    element_name(name)
                ),
            ))
        }
    }

    /// Assemble a record in schema order from collected child values
    fn build_record(&self, values: &HashMap<String, String>, position: usize) -> Result<Record> {
        let mut record = Record::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = values
                .get(&field.tag)
                .ok_or_else(|| RipperError::missing_field(position, field.name.as_str()))?;
            record.push(field.name.as_str(), value.as_str());
        }
        Ok(record)
    }
}

/// Lazy iterator over the records of one XML document
///
/// A malformed document yields a single XML error and then ends.
pub struct XmlRecords<'a> {
    parser: &'a XmlRecordParser,
    reader: Reader<&'a [u8]>,
    depth: usize,
    position: usize,
    finished: bool,
}

impl Iterator for XmlRecords<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    self.depth += 1;
                    if self.depth <= 2 && self.parser.is_record_element(e.name()) {
                        self.position += 1;
                        let position = self.position;

                        let result = match read_children(&mut self.reader, position) {
                            Ok(values) => self.parser.build_record(&values, position),
                            Err(e) => {
                                self.finished = true;
                                Err(e)
                            }
                        };
                        // read_children consumed the closing tag
                        self.depth -= 1;

                        trace!("Record element {} read", position);
                        return Some(result);
                    }
                }
                Ok(Event::Empty(e)) => {
                    if self.depth <= 1 && self.parser.is_record_element(e.name()) {
                        self.position += 1;
                        return Some(self.parser.build_record(&HashMap::new(), self.position));
                    }
                }
                Ok(Event::End(_)) => {
                    self.depth = self.depth.saturating_sub(1);
                }
                Ok(Event::Eof) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(RipperError::xml(
                        self.position + 1,
                        format!("{} at byte {}", e, self.reader.error_position()),
                    )));
                }
                Ok(_) => {}
            }
        }
    }
}

/// Read the children of an open record element up to and including its end tag
///
/// Returns the text of the first occurrence of every direct child tag.
fn read_children(
    reader: &mut Reader<&[u8]>,
    position: usize,
) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();
    let mut depth = 0usize;
    let mut current: Option<(Vec<u8>, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                if depth == 1 {
                    current = Some((e.name().as_ref().to_vec(), String::new()));
                }
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    insert_child(&mut values, e.name(), String::new());
                }
            }
            Ok(Event::Text(text)) => {
                if let Some((_, value)) = current.as_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| RipperError::xml(position, e.to_string()))?;
                    value.push_str(&unescaped);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    return Ok(values);
                }
                depth -= 1;
                if depth == 0 {
                    if let Some((name, value)) = current.take() {
                        insert_child(&mut values, QName(&name), value.trim().to_string());
                    }
                }
            }
            Ok(Event::Eof) => {
                return Err(RipperError::xml(
                    position,
                    "document ended inside a record element",
                ));
            }
            Err(e) => {
                return Err(RipperError::xml(
                    position,
                    format!("{} at byte {}", e, reader.error_position()),
                ));
            }
            Ok(_) => {}
        }
    }
}

/// Keep the first value seen under both the qualified and the local name
fn insert_child(values: &mut HashMap<String, String>, name: QName<'_>, value: String) {
    let local = name.local_name();
    if local.as_ref() != name.as_ref() {
        values
            .entry(String::from_utf8_lossy(local.as_ref()).into_owned())
            .or_insert_with(|| value.clone());
    }
    values.entry(element_name(name)).or_insert(value);
}

fn element_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}
