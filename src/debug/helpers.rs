// src/debug/helpers.rs

//! Miscellaneous helper functions for testing; temporary log files and
//! temporary log directories.

use crate::common::{FPath, LOG_FILE_SUFFIX};
use crate::readers::helpers::path_to_fpath;

use std::fs::File;
#[allow(unused_imports)] // XXX: clippy wrongly marks this as unused
use std::io::Write; // for `NamedTempFile.write_all`

extern crate lazy_static;
use lazy_static::lazy_static;

extern crate si_trace_print;
use si_trace_print::{dpfo, dpfñ};

extern crate tempfile;

#[doc(hidden)]
pub use tempfile::NamedTempFile;
#[doc(hidden)]
pub use tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile and TempDir instances default to this file name prefix.
///
/// See <https://github.com/Stebalien/tempfile/issues/183>.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-qcr-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Testing helper function to write a `str` to a temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    let mut ntf = match tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("NamedTempFile::new() return Err {}", err);
        }
    };
    match ntf.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }

    ntf
}

/// Create a temporary directory, stands in for a log directory.
pub fn create_temp_dir() -> TempDir {
    dpfñ!();
    match tempfile::Builder::new()
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempdir()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new().tempdir() return Err {}", err);
        }
    }
}

/// `FPath` of the passed `TempDir`.
pub fn tmpdir_fpath(tempdir: &TempDir) -> FPath {
    path_to_fpath(tempdir.path())
}

/// Testing helper to write log file `<tempdir>/<name>.log`, the same path
/// a `:n3d <name>` chain pointer resolves to.
pub fn create_log_in_tmpdir(
    data: &str,
    name: &str,
    tempdir: &TempDir,
) -> FPath {
    let path_file = tempdir
        .path()
        .join(format!("{}{}", name, LOG_FILE_SUFFIX));
    dpfo!("File::create({:?})", path_file);
    let mut file_ = match File::create(&path_file) {
        Ok(f) => f,
        Err(err) => panic!("File::create({:?}) Error {:?}", path_file, err),
    };
    match file_.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => panic!("File::write_all({:?}) Error {:?}", path_file, err),
    }

    path_to_fpath(&path_file)
}
