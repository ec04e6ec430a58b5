//! Test utilities for record parser testing
//!
//! Builders for the people fixtures shared by every format: four people
//! written as delimited lines, fixed-width lines or an XML document, and the
//! matching file definitions.

use crate::app::models::{FieldDefinition, FileDefinition, Record};

// Test modules
mod delimited_tests;

/// The people every fixture file contains, in order
pub const PEOPLE: [[&str; 3]; 4] = [
    ["Aaron", "39", "09/04/1980"],
    ["Gene", "61", "01/15/1958"],
    ["Alexander", "4", "11/22/2014"],
    ["Mason", "12", "04/13/2007"],
];

/// Delimited definition: name, age, dob in columns 0..3
pub fn build_delimited_file_definition(delimiter: &str) -> FileDefinition {
    FileDefinition::delimited(delimiter)
        .with_field(FieldDefinition::delimited("name", 0))
        .with_field(FieldDefinition::delimited("age", 1))
        .with_field(FieldDefinition::delimited("dob", 2))
        .with_input("/path", "Valid-Delimited-*.txt")
}

/// Fixed-width definition: name[0,20) age[20,25) dob[25,35), with header
pub fn build_fixed_file_definition() -> FileDefinition {
    FileDefinition::fixed()
        .with_header(true)
        .with_field(FieldDefinition::fixed("name", 0, 20))
        .with_field(FieldDefinition::fixed("age", 20, 5))
        .with_field(FieldDefinition::fixed("dob", 25, 10))
        .with_input("/path", "Valid-Fixed-*.txt")
}

/// XML definition over `<Person>` records; tags default to field names
pub fn build_xml_file_definition() -> FileDefinition {
    FileDefinition::xml("Person")
        .with_field(FieldDefinition::new("name"))
        .with_field(FieldDefinition::new("age"))
        .with_field(FieldDefinition::new("dob"))
        .with_input("/path", "Valid-Xml-*.xml")
}

/// Delimited lines for [`PEOPLE`], optionally preceded by a header line
pub fn build_delimited_lines(delimiter: &str, has_header: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if has_header {
        lines.push(["name", "age", "dob"].join(delimiter));
    }
    lines.extend(PEOPLE.iter().map(|person| person.join(delimiter)));
    lines
}

/// Fixed-width lines for [`PEOPLE`], optionally preceded by a header line
pub fn build_fixed_lines(has_header: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if has_header {
        lines.push(format!("{}{}{}", right_pad("name", 20), right_pad("age", 5), right_pad("dob", 10)));
    }
    lines.extend(
        PEOPLE
            .iter()
            .map(|[name, age, dob]| format!("{}{}{}", right_pad(name, 20), right_pad(age, 5), dob)),
    );
    lines
}

/// Pretty-printed XML document for [`PEOPLE`]
pub fn build_xml_document() -> String {
    let mut lines = vec!["<People>".to_string()];
    for person in PEOPLE {
        lines.extend(build_xml_record(&person));
    }
    lines.push("</People>".to_string());
    lines.join("\n")
}

pub fn build_xml_record(fields: &[&str; 3]) -> Vec<String> {
    vec![
        "\t<Person>".to_string(),
        format!("\t\t<name>{}</name>", fields[0]),
        format!("\t\t<age>{}</age>", fields[1]),
        format!("\t\t<dob>{}</dob>", fields[2]),
        "\t</Person>".to_string(),
    ]
}

pub fn right_pad(value: &str, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}

pub fn person_record(name: &str, age: &str, dob: &str) -> Record {
    Record::from_iter([("name", name), ("age", age), ("dob", dob)])
}

/// Assert records match [`PEOPLE`] exactly and in order
pub fn assert_file_records(records: &[Record]) {
    assert_eq!(records.len(), PEOPLE.len());
    for (record, [name, age, dob]) in records.iter().zip(PEOPLE) {
        assert_file_record(record, name, age, dob);
    }
}

pub fn assert_file_record(record: &Record, name: &str, age: &str, dob: &str) {
    assert_eq!(record.get("name"), Some(name));
    assert_eq!(record.get("age"), Some(age));
    assert_eq!(record.get("dob"), Some(dob));
}
