// src/tests/specimen_tests.rs

//! tests for `specimen.rs`

#![allow(non_snake_case)]

use crate::common::{ScanError, SpecimenField};
use crate::readers::specimen::extract_specimen;
use crate::tests::common::{logbuffer, logfile, offset_of, ts_jan5};

use ::test_case::test_case;

#[test]
fn test_extract_specimen() {
    let data = logfile(&[
        ("14:00:00", ":USER: Start"),
        ("14:00:05", "spe specimen"),
        ("14:00:06", "specimencategory=QC lot=77 disposable=B123456"),
    ]);
    let buffer = logbuffer(&data);
    let specimen = extract_specimen(&buffer, offset_of(&data, ":USER: Start")).unwrap();
    assert_eq!(specimen.barcode, "B123456");
    assert_eq!(specimen.category, "QC");
    assert_eq!(specimen.timestamp, Some(ts_jan5("14:00:06")));
}

#[test]
fn test_extract_specimen_keywords_on_separate_lines() {
    let data = logfile(&[
        ("14:00:00", ":USER: Start"),
        ("14:00:05", "spe specimen"),
        ("14:00:06", "disposable=B000042\tmore"),
        ("14:00:07", "specimencategory=Patient"),
    ]);
    let buffer = logbuffer(&data);
    let specimen = extract_specimen(&buffer, 0).unwrap();
    assert_eq!(specimen.barcode, "B000042");
    assert_eq!(specimen.category, "Patient");
    assert_eq!(specimen.timestamp, Some(ts_jan5("14:00:06")));
}

#[test]
fn test_extract_specimen_value_at_end_of_buffer() {
    let mut data = logfile(&[
        ("14:00:00", ":USER: Start"),
        ("14:00:05", "spe specimen"),
        ("14:00:06", "specimencategory=QC"),
    ]);
    data.push_str("Jan  5 14:00:07.000 ucm 0412 cct032_2024-01-05T14:00:07 disposable=B9");
    let buffer = logbuffer(&data);
    let specimen = extract_specimen(&buffer, 0).unwrap();
    assert_eq!(specimen.barcode, "B9");
}

#[test]
fn test_extract_specimen_keyword_on_declaration_line_ignored() {
    let data = logfile(&[
        ("14:00:00", ":USER: Start"),
        ("14:00:05", "spe specimen disposable=OLD specimencategory=OLD"),
        ("14:00:06", "specimencategory=QC disposable=NEW"),
    ]);
    let buffer = logbuffer(&data);
    let specimen = extract_specimen(&buffer, 0).unwrap();
    assert_eq!(specimen.barcode, "NEW");
    assert_eq!(specimen.category, "QC");
}

#[test]
fn test_extract_specimen_declaration_before_run_ignored() {
    let data = logfile(&[
        ("13:00:05", "spe specimen"),
        ("13:00:06", "specimencategory=QC disposable=B1"),
        ("14:00:00", ":USER: Start"),
    ]);
    let buffer = logbuffer(&data);
    match extract_specimen(&buffer, offset_of(&data, ":USER: Start")) {
        Err(ScanError::MissingField { field, .. }) => assert_eq!(field, SpecimenField::Declaration),
        ret => panic!("expected MissingField, got {:?}", ret),
    }
}

#[test_case("disposable=B1", SpecimenField::Category)]
#[test_case("specimencategory=QC", SpecimenField::Barcode)]
fn test_extract_specimen_MissingField(
    attrs: &str,
    expect_field: SpecimenField,
) {
    let data = logfile(&[
        ("14:00:00", ":USER: Start"),
        ("14:00:05", "spe specimen"),
        ("14:00:06", attrs),
    ]);
    let buffer = logbuffer(&data);
    match extract_specimen(&buffer, 0) {
        Err(ScanError::MissingField { field, .. }) => assert_eq!(field, expect_field),
        ret => panic!("expected MissingField, got {:?}", ret),
    }
}

#[test_case("Xyz  5 14:00:06.000 ucm 0412 cct032_2024-01-05T14:00:06 specimencategory=QC disposable=B1\n"; "unknown month")]
#[test_case("specimencategory=QC disposable=B1\n"; "no line prefix")]
fn test_extract_specimen_barcode_line_MalformedLog(line: &str) {
    let mut data = logfile(&[
        ("14:00:00", ":USER: Start"),
        ("14:00:05", "spe specimen"),
    ]);
    data.push_str(line);
    let buffer = logbuffer(&data);
    match extract_specimen(&buffer, 0) {
        Err(ScanError::MalformedLog { offset, .. }) => assert_eq!(offset, offset_of(&data, "B1")),
        ret => panic!("expected MalformedLog, got {:?}", ret),
    }
}
