mod common;

use common::{
    CATALOG_HEADER, PHONE_ROW, TABLET_ROW, assert_record_eq, catalog_schema, phone_fields,
    tablet_fields,
};
use strictcsv::{Error, SchemaReaderBuilder};

/// A five-line banner of the kind report generators put above the data.
fn preamble() -> &'static str {
    "Generated by Autobot 2000 - V0.1.2\n\
     ----------\n\
     This next is intentionally left blank\n\
     \n\
     -- Beginning of content\n"
}

#[test]
fn skips_preamble_without_header() {
    let data = format!("{}{PHONE_ROW}\n{TABLET_ROW}\n", preamble());

    let reader = SchemaReaderBuilder::new(catalog_schema())
        .header_included(false)
        .skip_lines(5)
        .from_reader(data.as_bytes())
        .unwrap();

    let phone = reader.read().unwrap().unwrap();
    assert_record_eq(&phone, &phone_fields());

    let tablet = reader.read().unwrap().unwrap();
    assert_record_eq(&tablet, &tablet_fields());

    assert!(reader.read().unwrap().is_none());
}

#[test]
fn skips_preamble_then_consumes_header() {
    let data = format!("{}{CATALOG_HEADER}\n{PHONE_ROW}\n{TABLET_ROW}\n", preamble());

    let reader = SchemaReaderBuilder::new(catalog_schema())
        .skip_lines(5)
        .from_reader(data.as_bytes())
        .unwrap();

    let phone = reader.read().unwrap().unwrap();
    assert_record_eq(&phone, &phone_fields());

    let tablet = reader.read().unwrap().unwrap();
    assert_record_eq(&tablet, &tablet_fields());

    assert!(reader.read().unwrap().is_none());
}

#[test]
fn first_row_offered_is_line_after_the_skipped_ones() {
    let data = format!("junk one\njunk two\n{PHONE_ROW}\n");

    let reader = SchemaReaderBuilder::new(catalog_schema())
        .header_included(false)
        .skip_lines(2)
        .from_reader(data.as_bytes())
        .unwrap();

    let phone = reader.read().unwrap().unwrap();
    assert_record_eq(&phone, &phone_fields());
}

#[test]
fn skip_equal_to_available_lines_is_an_exhausted_reader() {
    let reader = SchemaReaderBuilder::new(catalog_schema())
        .header_included(false)
        .skip_lines(2)
        .from_reader("line one\nline two\n".as_bytes())
        .unwrap();

    assert!(reader.read().unwrap().is_none());
    assert!(reader.read().unwrap().is_none());
}

#[test]
fn skip_beyond_available_lines_fails_at_construction() {
    let data = format!("{}{PHONE_ROW}\n{TABLET_ROW}\n", preamble());

    let result = SchemaReaderBuilder::new(catalog_schema())
        .skip_lines(10)
        .from_reader(data.as_bytes());

    match result {
        Err(Error::Configuration(message)) => {
            assert!(message.contains("skip_lines is 10"), "{message}");
        }
        Ok(_) => panic!("construction should fail before any row is read"),
        Err(other) => panic!("expected a configuration error, got {other}"),
    }
}

#[test]
fn zero_skip_reads_from_the_first_line() {
    let data = format!("{PHONE_ROW}\n");

    let reader = SchemaReaderBuilder::new(catalog_schema())
        .header_included(false)
        .skip_lines(0)
        .from_reader(data.as_bytes())
        .unwrap();

    assert!(reader.read().unwrap().is_some());
}
