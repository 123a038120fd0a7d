// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_.

#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{FPath, FPaths, LOG_FILE_SUFFIX};
use crate::debug::printers::e_wrn;

/// Return the basename of an `FPath`.
pub fn basename(path: &FPath) -> FPath {
    let mut riter = path.rsplit(std::path::MAIN_SEPARATOR);

    FPath::from(riter.next().unwrap_or(""))
}

/// Return the basename of an `FPath` without the first extension, e.g.
/// `/logs/ucm_0130.log` is `ucm_0130`.
///
/// The report file names are derived from this.
pub fn file_stem(path: &FPath) -> FPath {
    let name = basename(path);
    match name.split('.').next() {
        Some(stem) => FPath::from(stem),
        None => name,
    }
}

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &std::path::Path {
    std::path::Path::new(path)
}

/// Path of the log file named by a chain pointer, `<logdir>/<name>.log`.
pub fn log_name_to_fpath(
    logdir: &FPath,
    name: &str,
) -> FPath {
    defñ!("({:?}, {:?})", logdir, name);
    let pathb = fpath_to_path(logdir).join(format!("{}{}", name, LOG_FILE_SUFFIX));

    path_to_fpath(pathb.as_path())
}

/// Regular files directly in `logdir`, sorted by file name.
///
/// Entries that can not be read are warned about on stderr and skipped.
/// Sub-directories are not entered; successor log files are found through
/// chain pointers.
pub fn log_files_in_dir(logdir: &FPath) -> FPaths {
    defn!("({:?})", logdir);
    let mut paths: FPaths = FPaths::new();
    for entry in walkdir::WalkDir::new(logdir.as_str())
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let path_entry = match entry {
            Ok(val) => val,
            Err(err) => {
                e_wrn!("can't read entry in {:?}; {}", logdir, err);
                continue;
            }
        };
        if !path_entry
            .file_type()
            .is_file()
        {
            defo!("not a file {:?}", path_entry);
            continue;
        }
        paths.push(path_to_fpath(path_entry.path()));
    }
    defx!("return {} paths", paths.len());

    paths
}
