// src/readers/runlocator.rs

//! Locates where the last run of a log file begins.

use crate::common::{FileOffset, FileOffsetOpt, ResultScan, ScanError};
use crate::readers::logbuffer::LogBuffer;

use ::min_max::max;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// The operator started a run.
pub const MARKER_RUN_START: &[u8] = b":USER: Start";
/// The operator restarted a run.
pub const MARKER_RUN_RESTART: &[u8] = b":USER: Restart";
/// A run was started from a queue.
pub const MARKER_RUN_RUN: &[u8] = b":USER: Run";

/// Offset of the latest run begin marker in `buffer`.
///
/// Earlier runs in the same file were superseded by the latest one. A file
/// without any begin marker is a [`ScanError::MissingRunMarker`].
pub fn locate_run_start(buffer: &LogBuffer) -> ResultScan<FileOffset> {
    defn!("({:?})", buffer.path());
    let start: FileOffsetOpt = buffer.rfind(MARKER_RUN_START);
    let restart: FileOffsetOpt = buffer.rfind(MARKER_RUN_RESTART);
    let run: FileOffsetOpt = buffer.rfind(MARKER_RUN_RUN);
    defo!("start {:?} restart {:?} run {:?}", start, restart, run);
    // `None` orders before every `Some`
    match max!(start, restart, run) {
        Some(at) => {
            defx!("return {}", at);
            Ok(at)
        }
        None => {
            defx!("no run begin marker");
            Err(ScanError::MissingRunMarker {
                path: buffer.path().clone(),
            })
        }
    }
}
