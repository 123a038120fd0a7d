// src/common.rs

//! Common imports, type aliases, and other globals for _qcrlib_
//! (avoids circular imports).

use std::fmt;

#[doc(hidden)]
pub use std::fs::File;
#[doc(hidden)]
pub use std::path::{Path, PathBuf};

use ::thiserror::Error;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;

/// Offset into a mapped log file in bytes.
///
/// Zero based. Always an index into the buffer it was taken from.
pub type FileOffset = usize;
pub type FileOffsetOpt = Option<FileOffset>;

/// Sequence of Bytes
pub type Bytes = Vec<u8>;

/// File extension appended to the name in a `:n3d` chain pointer.
pub const LOG_FILE_SUFFIX: &str = ".log";

/// Single-byte newLine char as u8
#[allow(non_upper_case_globals)]
pub const NLu8: u8 = b'\n';

/// Is `b` one of the bytes that separate fields of a log line?
#[inline(always)]
pub const fn is_field_sep(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Named pieces of a specimen declaration, for [`ScanError::MissingField`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpecimenField {
    /// the `spe specimen` log entry itself
    Declaration,
    /// `specimencategory=`
    Category,
    /// `disposable=`
    Barcode,
}

impl fmt::Display for SpecimenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecimenField::Declaration => write!(f, "specimen log entry"),
            SpecimenField::Category => write!(f, "specimen type"),
            SpecimenField::Barcode => write!(f, "barcode"),
        }
    }
}

/// Failures while scanning one run.
///
/// A search that finds nothing is not an error, it is `None`.
/// Any `ScanError` aborts the processing of the run it occurred in, never the
/// batch of runs.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Slice bounds do not fit the buffer.
    #[error("offsets {start}..{end} out of range for buffer of len {len}")]
    OutOfRange {
        start: FileOffset,
        end: FileOffset,
        len: usize,
    },
    /// A line expected to carry the fixed log line prefix does not parse.
    #[error("malformed log {path:?} at offset {offset}: {reason}")]
    MalformedLog {
        path: FPath,
        offset: FileOffset,
        reason: String,
    },
    /// None of the run begin markers are in the file.
    #[error("no run start marker in {path:?}")]
    MissingRunMarker { path: FPath },
    /// The specimen declaration or one of its keywords is missing.
    #[error("can't locate {field} in {path:?}")]
    MissingField { path: FPath, field: SpecimenField },
    /// A log file could not be opened or mapped.
    #[error("file not found: {path:?}; {source}")]
    FileOpenFailure {
        path: FPath,
        #[source]
        source: std::io::Error,
    },
    /// A chain pointer leads back to a file already scanned for this run.
    #[error("log file chain revisits {path:?}")]
    ChainCycle { path: FPath },
}

impl ScanError {
    /// Helper for the most common error constructor.
    pub fn malformed(path: &FPath, offset: FileOffset, reason: impl Into<String>) -> ScanError {
        ScanError::MalformedLog {
            path: path.clone(),
            offset,
            reason: reason.into(),
        }
    }

    /// The file is not a run at all (as opposed to a run that failed to scan).
    pub const fn is_not_a_run(&self) -> bool {
        matches!(self, ScanError::MissingRunMarker { .. })
    }
}

/// `Result` for scanning functions.
pub type ResultScan<T> = std::result::Result<T, ScanError>;
