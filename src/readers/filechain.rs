// src/readers/filechain.rs

//! Implements the [`ChainResolver`], which finds the successor of a log file,
//! and the [`ScanCursor`], the owned position in a chain of log files that is
//! handed from one phase scan to the next.
//!
//! The instrument ends a log file that is continued elsewhere with a line
//!
//! ```text
//! Jan  5 14:59:59.999 ucm 0412 cct032_2024-01-05T14:59:59 :n3d ucm_0131
//! ```
//!
//! naming the next log file, `ucm_0131.log` in the log directory.
//!
//! [`ChainResolver`]: crate::readers::filechain::ChainResolver
//! [`ScanCursor`]: crate::readers::filechain::ScanCursor

use crate::common::{FPath, FileOffset, ResultScan, ScanError};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::helpers::log_name_to_fpath;
use crate::readers::logbuffer::LogBuffer;

use std::collections::BTreeSet;

use ::bstr::ByteSlice; // provides `trim` and `to_str_lossy` on `&[u8]`
#[allow(unused_imports)]
use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// The "next file" directive.
pub const NEXT_FILE_DIRECTIVE: &[u8] = b":n3d ";

/// Resolves `:n3d` pointers to paths within the log directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainResolver {
    logdir: FPath,
}

impl ChainResolver {
    pub fn new(logdir: FPath) -> ChainResolver {
        ChainResolver { logdir }
    }

    /// The log directory successor file names are relative to.
    pub fn logdir(&self) -> &FPath {
        &self.logdir
    }

    /// Path of the log file that continues `buffer`, taken from the _last_
    /// `:n3d ` directive in `buffer`.
    ///
    /// `None` means the chain ends here; the instrument stopped without
    /// writing a pointer. A directive with an empty name also ends the chain.
    pub fn resolve_next(
        &self,
        buffer: &LogBuffer,
    ) -> Option<FPath> {
        defn!("({:?})", buffer.path());
        let at: FileOffset = match buffer.rfind(NEXT_FILE_DIRECTIVE) {
            Some(val) => val,
            None => {
                defx!("no {:?}, return None", NEXT_FILE_DIRECTIVE.as_bstr());
                return None;
            }
        };
        let name_beg: FileOffset = at + NEXT_FILE_DIRECTIVE.len();
        let name_end: FileOffset = buffer.line_end(name_beg);
        let name: &[u8] = buffer
            .slice(name_beg, name_end)
            .ok()?
            .trim();
        if name.is_empty() {
            de_wrn!("empty {:?} file name at offset {} in {:?}", NEXT_FILE_DIRECTIVE.as_bstr(), at, buffer.path());
            defx!("return None");
            return None;
        }
        let fpath: FPath = log_name_to_fpath(&self.logdir, &name.to_str_lossy());
        defx!("return {:?}", fpath);

        Some(fpath)
    }
}

/// The owned position of a scan: the active [`LogBuffer`] and an offset
/// into it.
///
/// A `ScanCursor` moves; a phase scan takes it by value and returns it at the
/// point the phase resolved, so the next phase never re-scans earlier file
/// content. The buffer of a predecessor file is dropped before its successor
/// is opened.
#[derive(Debug)]
pub struct ScanCursor {
    buffer: LogBuffer,
    offset: FileOffset,
    /// interrupt markers of `buffer` are searched from here
    interrupt_base: FileOffset,
    /// paths of every buffer this chain has been at
    visited: BTreeSet<FPath>,
}

impl ScanCursor {
    /// Cursor at `offset` of `buffer`.
    pub fn new(
        buffer: LogBuffer,
        offset: FileOffset,
    ) -> ScanCursor {
        defñ!("({:?}, {})", buffer.path(), offset);
        debug_assert_le!(offset, buffer.len(), "offset {} past end of {:?}", offset, buffer.path());
        let mut visited = BTreeSet::<FPath>::new();
        visited.insert(buffer.path().clone());

        ScanCursor {
            buffer,
            offset,
            interrupt_base: offset,
            visited,
        }
    }

    /// Open `path` and create a cursor at `offset`.
    pub fn open(
        path: &FPath,
        offset: FileOffset,
    ) -> ResultScan<ScanCursor> {
        let buffer = LogBuffer::open(path)?;
        if offset > buffer.len() {
            return Err(ScanError::OutOfRange {
                start: offset,
                end: offset,
                len: buffer.len(),
            });
        }

        Ok(ScanCursor::new(buffer, offset))
    }

    #[inline(always)]
    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    #[inline(always)]
    pub fn path(&self) -> &FPath {
        self.buffer.path()
    }

    #[inline(always)]
    pub fn offset(&self) -> FileOffset {
        self.offset
    }

    #[inline(always)]
    pub fn interrupt_base(&self) -> FileOffset {
        self.interrupt_base
    }

    /// Number of log files this cursor has been at.
    pub fn chain_len(&self) -> usize {
        self.visited.len()
    }

    /// Move within the current buffer.
    pub fn set_offset(
        &mut self,
        offset: FileOffset,
    ) {
        debug_assert_le!(offset, self.buffer.len());
        self.offset = std::cmp::min(offset, self.buffer.len());
    }

    /// Start of a new phase; interrupt markers are now searched from the
    /// current offset.
    pub fn begin_phase(&mut self) {
        defñ!("{:?} offset {}", self.buffer.path(), self.offset);
        self.interrupt_base = self.offset;
    }

    /// Cross into the successor file at `path`, offset 0.
    ///
    /// The current buffer is released first, also when opening `path`
    /// fails. A `path` this cursor has already been at is a
    /// [`ScanError::ChainCycle`].
    pub fn advance_to(
        self,
        path: FPath,
    ) -> ResultScan<ScanCursor> {
        defn!("({:?}) from {:?}", path, self.buffer.path());
        let ScanCursor {
            buffer,
            offset: _,
            interrupt_base: _,
            mut visited,
        } = self;
        drop(buffer);
        if visited.contains(&path) {
            defx!("cycle at {:?}", path);
            return Err(ScanError::ChainCycle { path });
        }
        let buffer = LogBuffer::open(&path)?;
        visited.insert(path);
        defx!("chain_len {}", visited.len());

        Ok(ScanCursor {
            buffer,
            offset: 0,
            interrupt_base: 0,
            visited,
        })
    }
}
