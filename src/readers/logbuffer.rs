// src/readers/logbuffer.rs

//! Implements a [`LogBuffer`], a read-only view of the bytes of one
//! instrument log file with literal substring search.
//!
//! [`LogBuffer`]: crate::readers::logbuffer::LogBuffer

use crate::common::{
    Bytes,
    FPath,
    File,
    FileOffset,
    FileOffsetOpt,
    NLu8,
    ResultScan,
    ScanError,
};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};

use std::fmt;

use ::memchr::memmem;
use ::memmap2::Mmap;
#[allow(unused_imports)]
use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Storage behind a [`LogBuffer`].
enum LogBytes {
    /// Read-only memory map of a non-empty file.
    Mapped(Mmap),
    /// Owned bytes; empty files (which can not be mapped) and in-memory logs.
    Owned(Bytes),
}

/// The bytes of one log file and the path it was opened from.
///
/// A `LogBuffer` is never shared. The chase drops it before opening the
/// successor file, which releases the map and the file handle.
pub struct LogBuffer {
    path: FPath,
    bytes: LogBytes,
}

impl fmt::Debug for LogBuffer {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        let kind = match self.bytes {
            LogBytes::Mapped(_) => "Mapped",
            LogBytes::Owned(_) => "Owned",
        };
        f.debug_struct("LogBuffer")
            .field("path", &self.path)
            .field("bytes", &kind)
            .field("len", &self.len())
            .finish()
    }
}

impl LogBuffer {
    /// Open and map the file at `path`.
    ///
    /// Any failure to open, stat, or map the file is a
    /// [`ScanError::FileOpenFailure`].
    pub fn open(path: &FPath) -> ResultScan<LogBuffer> {
        defn!("({:?})", path);
        let open_failure = |err: std::io::Error| ScanError::FileOpenFailure {
            path: path.clone(),
            source: err,
        };
        let file: File = File::open(path).map_err(open_failure)?;
        let filesz: u64 = file
            .metadata()
            .map_err(open_failure)?
            .len();
        if filesz == 0 {
            defx!("empty file, return LogBytes::Owned");
            return Ok(LogBuffer {
                path: path.clone(),
                bytes: LogBytes::Owned(Bytes::new()),
            });
        }
        // SAFETY: the map is read-only and the log files of a finished run are
        // not written to while reports are made.
        let mmap: Mmap = unsafe { Mmap::map(&file) }.map_err(open_failure)?;
        defx!("mapped {} bytes", mmap.len());

        Ok(LogBuffer {
            path: path.clone(),
            bytes: LogBytes::Mapped(mmap),
        })
    }

    /// Create a `LogBuffer` over bytes already in memory. `path` is only
    /// used for reporting.
    pub fn from_bytes(
        path: FPath,
        bytes: Bytes,
    ) -> LogBuffer {
        defñ!("({:?}, len {})", path, bytes.len());

        LogBuffer {
            path,
            bytes: LogBytes::Owned(bytes),
        }
    }

    /// Path this buffer was opened from.
    #[inline(always)]
    pub fn path(&self) -> &FPath {
        &self.path
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.bytes {
            LogBytes::Mapped(mmap) => &mmap[..],
            LogBytes::Owned(bytes) => bytes.as_slice(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First occurrence of `needle` at or after `from`.
    pub fn find(
        &self,
        needle: &[u8],
        from: FileOffset,
    ) -> FileOffsetOpt {
        let bytes = self.as_bytes();
        if from > bytes.len() {
            return None;
        }

        memmem::find(&bytes[from..], needle).map(|at| at + from)
    }

    /// Last occurrence of `needle` anywhere in the buffer.
    pub fn rfind(
        &self,
        needle: &[u8],
    ) -> FileOffsetOpt {
        memmem::rfind(self.as_bytes(), needle)
    }

    /// Last occurrence of `needle` lying entirely before `end`.
    pub fn rfind_before(
        &self,
        needle: &[u8],
        end: FileOffset,
    ) -> FileOffsetOpt {
        let bytes = self.as_bytes();
        let end = std::cmp::min(end, bytes.len());

        memmem::rfind(&bytes[..end], needle)
    }

    /// First newline at or after `from`.
    pub fn find_newline(
        &self,
        from: FileOffset,
    ) -> FileOffsetOpt {
        let bytes = self.as_bytes();
        if from > bytes.len() {
            return None;
        }

        ::memchr::memchr(NLu8, &bytes[from..]).map(|at| at + from)
    }

    /// Last newline before `end`.
    pub fn rfind_newline_before(
        &self,
        end: FileOffset,
    ) -> FileOffsetOpt {
        let bytes = self.as_bytes();
        let end = std::cmp::min(end, bytes.len());

        ::memchr::memrchr(NLu8, &bytes[..end])
    }

    /// Offset of the end of the line containing `from`; the newline, or the
    /// end of the buffer for a last line without one.
    pub fn line_end(
        &self,
        from: FileOffset,
    ) -> FileOffset {
        match self.find_newline(from) {
            Some(at) => at,
            None => self.len(),
        }
    }

    /// Bytes `start..end`.
    pub fn slice(
        &self,
        start: FileOffset,
        end: FileOffset,
    ) -> ResultScan<&[u8]> {
        let bytes = self.as_bytes();
        if end < start || end > bytes.len() {
            de_wrn!("slice({}, {}) out of range len {} {:?}", start, end, bytes.len(), self.path);
            return Err(ScanError::OutOfRange {
                start,
                end,
                len: bytes.len(),
            });
        }
        debug_assert_le!(start, end);

        Ok(&bytes[start..end])
    }
}
