//! Tests for delimited line parsing

use super::*;
use crate::app::services::record_parser::{DelimitedRecordParser, LineParser};
use crate::error::RipperError;

#[test]
fn test_parse_comma_line() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition(",")).unwrap();

    let record = parser.parse_line("Aaron,39,09/04/1980", 1).unwrap();

    assert_eq!(record, person_record("Aaron", "39", "09/04/1980"));
}

#[test]
fn test_parse_multi_character_delimiter() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition("||")).unwrap();

    let record = parser.parse_line("Gene||61||01/15/1958", 1).unwrap();

    assert_eq!(record, person_record("Gene", "61", "01/15/1958"));
}

#[test]
fn test_delimiter_is_literal_not_regex() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition(".")).unwrap();

    let record = parser.parse_line("Mason.12.04/13/2007", 1).unwrap();

    assert_eq!(record, person_record("Mason", "12", "04/13/2007"));
}

#[test]
fn test_columns_follow_position_in_row() {
    let definition = FileDefinition::delimited("\t")
        .with_field(FieldDefinition::delimited("dob", 3))
        .with_field(FieldDefinition::delimited("name", 0));
    let parser = DelimitedRecordParser::from_definition(&definition).unwrap();

    let record = parser.parse_line("Aaron\t39\tignored\t09/04/1980", 1).unwrap();

    assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["dob", "name"]);
    assert_eq!(record.get("dob"), Some("09/04/1980"));
    assert_eq!(record.get("name"), Some("Aaron"));
}

#[test]
fn test_extra_tokens_are_ignored() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition(",")).unwrap();

    let record = parser.parse_line("Aaron,39,09/04/1980,extra,more", 1).unwrap();

    assert_eq!(record.len(), 3);
    assert_eq!(record.get("dob"), Some("09/04/1980"));
}

#[test]
fn test_empty_tokens_are_kept() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition(",")).unwrap();

    let record = parser.parse_line("Aaron,,09/04/1980", 1).unwrap();

    assert_eq!(record.get("age"), Some(""));
}

#[test]
fn test_values_are_not_trimmed() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition(",")).unwrap();

    let record = parser.parse_line(" Aaron , 39,09/04/1980", 1).unwrap();

    assert_eq!(record.get("name"), Some(" Aaron "));
    assert_eq!(record.get("age"), Some(" 39"));
}

#[test]
fn test_short_line_is_malformed() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition(",")).unwrap();

    let err = parser.parse_line("Aaron,39", 5).unwrap_err();

    match err {
        RipperError::MalformedRecord { position, reason } => {
            assert_eq!(position, 5);
            assert!(reason.contains("expected at least 3"));
            assert!(reason.contains("found 2"));
        }
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_empty_line_is_malformed() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition(",")).unwrap();

    assert!(matches!(
        parser.parse_line("", 2),
        Err(RipperError::MalformedRecord { position: 2, .. })
    ));
}

#[test]
fn test_delimiter_inside_value_shifts_columns() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition(",")).unwrap();

    let record = parser.parse_line("Smith, Aaron,39,09/04/1980", 1).unwrap();

    assert_eq!(record.get("name"), Some("Smith"));
    assert_eq!(record.get("age"), Some(" Aaron"));
}

#[test]
fn test_parsing_is_deterministic() {
    let parser =
        DelimitedRecordParser::from_definition(&build_delimited_file_definition(";")).unwrap();

    for line in build_delimited_lines(";", false) {
        let first = parser.parse_line(&line, 1).unwrap();
        let second = parser.parse_line(&line, 1).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_required_tokens() {
    let definition = FileDefinition::delimited(",")
        .with_field(FieldDefinition::delimited("a", 0))
        .with_field(FieldDefinition::delimited("b", 6));
    let parser = DelimitedRecordParser::from_definition(&definition).unwrap();

    assert_eq!(parser.required_tokens(), 7);
    assert_eq!(parser.delimiter(), ",");
}

#[test]
fn test_from_non_delimited_definition() {
    let err = DelimitedRecordParser::from_definition(&build_fixed_file_definition()).unwrap_err();

    assert!(matches!(err, RipperError::Configuration { .. }));
}

#[test]
fn test_constructor_rejects_position_overflow() {
    let columns = vec![crate::app::services::record_parser::DelimitedColumn {
        name: "name".to_string(),
        position: usize::MAX,
    }];

    assert!(matches!(
        DelimitedRecordParser::new(",", columns),
        Err(RipperError::Configuration { .. })
    ));
}
