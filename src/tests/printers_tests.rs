// src/tests/printers_tests.rs

//! tests for `printers.rs`

#![allow(non_snake_case)]

use crate::data::datetime::{NaiveDate, NaiveTime};
use crate::data::phaseresult::{Phase, PhaseResult};
use crate::debug::printers::{buffer_to_String_noraw, peek_noraw};
use crate::printer::printers::{write_report, ColorSpec, COLOR_FAIL, COLOR_PASS};
use crate::printer::report::{Report, ReportHeader};
use crate::tests::common::ts_jan5;

use ::test_case::test_case;

fn report() -> Report {
    let header = ReportHeader::new(
        String::from("cct032"),
        NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    );
    let phases = vec![
        PhaseResult::pass(Phase::IlluminationCalibration, Some(ts_jan5("14:05:00")), None),
        PhaseResult::fail(Phase::DataCollection, None),
    ];

    Report::assemble(&header, None, &phases)
}

fn color_specs() -> (ColorSpec, ColorSpec) {
    let mut pass = ColorSpec::new();
    pass.set_fg(Some(COLOR_PASS));
    let mut fail = ColorSpec::new();
    fail.set_fg(Some(COLOR_FAIL));

    (pass, fail)
}

#[test]
fn test_write_report_no_color() {
    let report = report();
    let (pass, fail) = color_specs();
    let mut buffer = termcolor::Buffer::no_color();
    write_report(&mut buffer, &report, &pass, &fail).unwrap();
    assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), report.to_text());
}

#[test]
fn test_write_report_ansi() {
    let report = report();
    let (pass, fail) = color_specs();
    let mut buffer = termcolor::Buffer::ansi();
    write_report(&mut buffer, &report, &pass, &fail).unwrap();
    let text = String::from_utf8(buffer.into_inner()).unwrap();
    // green, then red, each reset after the line
    assert!(text.contains("\x1b[0m\x1b[32m    (pass)  Illumination Calibration"), "{:?}", text);
    assert!(text.contains("\x1b[0m\x1b[31m    (fail)  Data Collection Aborted\x1b[0m\n"), "{:?}", text);
    assert!(text.starts_with("VisionGate CCT QC Report\n"), "{:?}", text);
}

#[test_case(b"ab\ncd", "ab␊cd")]
#[test_case(b"\t\r", "␉␍")]
#[test_case(b"", "")]
fn test_buffer_to_String_noraw(
    buffer: &[u8],
    expect: &str,
) {
    assert_eq!(buffer_to_String_noraw(buffer), expect);
}

#[test_case(b"abc\ndef", 2, 3, "c␊d")]
#[test_case(b"abc", 1, 99, "bc")]
#[test_case(b"abc", 3, 1, "")]
fn test_peek_noraw(
    buffer: &[u8],
    at: usize,
    max: usize,
    expect: &str,
) {
    assert_eq!(peek_noraw(buffer, at, max), expect);
}
