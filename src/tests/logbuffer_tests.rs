// src/tests/logbuffer_tests.rs

//! tests for `logbuffer.rs`

#![allow(non_snake_case)]

use crate::common::{FPath, ScanError};
use crate::debug::helpers::{create_temp_file, ntf_fpath};
use crate::readers::logbuffer::LogBuffer;
use crate::tests::common::logbuffer;

use ::test_case::test_case;

const DATA1: &str = "abc\nabc def\nxyz";

#[test_case(b"abc", 0, Some(0))]
#[test_case(b"abc", 1, Some(4))]
#[test_case(b"abc", 5, None)]
#[test_case(b"xyz", 0, Some(12))]
#[test_case(b"xyz", 15, None; "from at len")]
#[test_case(b"xyz", 99, None; "from past len")]
#[test_case(b"ABC", 0, None; "case sensitive")]
fn test_LogBuffer_find(
    needle: &[u8],
    from: usize,
    expect: Option<usize>,
) {
    let buffer = logbuffer(DATA1);
    assert_eq!(buffer.find(needle, from), expect);
}

#[test_case(b"abc", Some(4))]
#[test_case(b"xyz", Some(12))]
#[test_case(b"qqq", None)]
fn test_LogBuffer_rfind(
    needle: &[u8],
    expect: Option<usize>,
) {
    let buffer = logbuffer(DATA1);
    assert_eq!(buffer.rfind(needle), expect);
}

#[test_case(b"abc", 7, Some(4))]
#[test_case(b"abc", 6, Some(0); "occurrence must end before end")]
#[test_case(b"abc", 2, None)]
#[test_case(b"abc", 999, Some(4))]
fn test_LogBuffer_rfind_before(
    needle: &[u8],
    end: usize,
    expect: Option<usize>,
) {
    let buffer = logbuffer(DATA1);
    assert_eq!(buffer.rfind_before(needle, end), expect);
}

#[test_case(0, 3)]
#[test_case(3, 3)]
#[test_case(4, 11)]
#[test_case(12, 15; "last line without newline")]
fn test_LogBuffer_line_end(
    from: usize,
    expect: usize,
) {
    let buffer = logbuffer(DATA1);
    assert_eq!(buffer.line_end(from), expect);
}

#[test]
fn test_LogBuffer_rfind_newline_before() {
    let buffer = logbuffer(DATA1);
    assert_eq!(buffer.rfind_newline_before(3), None);
    assert_eq!(buffer.rfind_newline_before(4), Some(3));
    assert_eq!(buffer.rfind_newline_before(15), Some(11));
}

#[test_case(0, 3, Some(b"abc".as_slice()))]
#[test_case(12, 15, Some(b"xyz".as_slice()))]
#[test_case(5, 5, Some(b"".as_slice()))]
#[test_case(5, 4, None; "end before start")]
#[test_case(12, 16, None; "end past len")]
fn test_LogBuffer_slice(
    start: usize,
    end: usize,
    expect: Option<&[u8]>,
) {
    let buffer = logbuffer(DATA1);
    match (buffer.slice(start, end), expect) {
        (Ok(slice), Some(expect)) => assert_eq!(slice, expect),
        (Err(ScanError::OutOfRange { start: s, end: e, len }), None) => {
            assert_eq!((s, e, len), (start, end, DATA1.len()));
        }
        (ret, expect) => panic!("slice({}, {}) returned {:?}, expected {:?}", start, end, ret, expect),
    }
}

#[test]
fn test_LogBuffer_open_mapped() {
    let ntf = create_temp_file(DATA1);
    let path = ntf_fpath(&ntf);
    let buffer = LogBuffer::open(&path).unwrap();
    assert_eq!(buffer.path(), &path);
    assert_eq!(buffer.as_bytes(), DATA1.as_bytes());
    assert_eq!(buffer.find(b"def", 0), Some(8));
}

#[test]
fn test_LogBuffer_open_empty() {
    let ntf = create_temp_file("");
    let path = ntf_fpath(&ntf);
    let buffer = LogBuffer::open(&path).unwrap();
    assert!(buffer.is_empty());
    assert_eq!(buffer.find(b"abc", 0), None);
    assert_eq!(buffer.rfind(b"abc"), None);
    assert_eq!(buffer.line_end(0), 0);
}

#[test]
fn test_LogBuffer_open_FileOpenFailure() {
    let path = FPath::from("/this/log/does/not/exist.log");
    match LogBuffer::open(&path) {
        Err(ScanError::FileOpenFailure { path: path_err, .. }) => assert_eq!(path_err, path),
        ret => panic!("expected FileOpenFailure, got {:?}", ret),
    }
}
