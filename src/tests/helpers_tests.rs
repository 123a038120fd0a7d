// src/tests/helpers_tests.rs

//! tests for `helpers.rs` functions

use crate::common::FPath;
use crate::debug::helpers::{create_log_in_tmpdir, create_temp_dir, tmpdir_fpath};
use crate::readers::helpers::{basename, file_stem, log_files_in_dir, log_name_to_fpath};

use ::test_case::test_case;

#[test_case("/logs/ucm_0130.log", "ucm_0130.log")]
#[test_case("ucm_0130.log", "ucm_0130.log")]
#[test_case("/logs/", ""; "trailing separator")]
#[test_case("", ""; "empty path")]
fn test_basename(
    path: &str,
    expect: &str,
) {
    assert_eq!(basename(&FPath::from(path)), expect);
}

#[test_case("/logs/ucm_0130.log", "ucm_0130")]
#[test_case("/logs/ucm_0130.log.1", "ucm_0130")]
#[test_case("/lo.gs/ucm_0130", "ucm_0130")]
fn test_file_stem(
    path: &str,
    expect: &str,
) {
    assert_eq!(file_stem(&FPath::from(path)), expect);
}

#[test]
fn test_log_name_to_fpath() {
    assert_eq!(log_name_to_fpath(&FPath::from("/logs"), "ucm_0131"), "/logs/ucm_0131.log");
}

#[test]
fn test_log_files_in_dir() {
    let tmpdir = create_temp_dir();
    create_log_in_tmpdir("b", "ucm_0131", &tmpdir);
    create_log_in_tmpdir("a", "ucm_0130", &tmpdir);
    std::fs::create_dir(tmpdir.path().join("old")).unwrap();
    let paths = log_files_in_dir(&tmpdir_fpath(&tmpdir));
    let names: Vec<FPath> = paths.iter().map(basename).collect();
    assert_eq!(names, vec![FPath::from("ucm_0130.log"), FPath::from("ucm_0131.log")]);
}

#[test]
fn test_log_files_in_dir_missing() {
    let paths = log_files_in_dir(&FPath::from("/this/directory/does/not/exist"));
    assert!(paths.is_empty());
}

#[cfg(unix)]
#[test]
fn test_log_files_in_dir_broken_link() {
    let tmpdir = create_temp_dir();
    create_log_in_tmpdir("a", "ucm_0130", &tmpdir);
    std::os::unix::fs::symlink("/this/target/does/not/exist", tmpdir.path().join("ucm_0131.log")).unwrap();
    // the dangling link is skipped, the readable log is still listed
    let paths = log_files_in_dir(&tmpdir_fpath(&tmpdir));
    let names: Vec<FPath> = paths.iter().map(basename).collect();
    assert_eq!(names, vec![FPath::from("ucm_0130.log")]);
}
