// src/readers/phasescanner.rs

//! Implements the [`PhaseScanner`], the chase of one phase's result marker
//! through a run's chain of log files.
//!
//! ## The chase
//!
//! Within one log file, the scanner searches forward for the phase's success
//! marker. An occurrence _counts_ only if it is at or before both interrupt
//! markers of that file, the operator stop `:USER: Stop` and the timeout
//! `Fifteen minute`. A counting occurrence is handed to the phase's
//! [`Evaluator`] which accepts it (the phase passed) or rejects it (the search
//! resumes past it, in the same file).
//!
//! When the file holds no counting occurrence, an operator stop fails the
//! phase, else a timeout fails the phase. The operator stop is checked first;
//! both fail the phase, the choice only decides which timestamp is reported.
//!
//! When the file holds neither an occurrence nor an interrupt, the scan
//! continues in the file named by the file's `:n3d` pointer. Without a
//! pointer the run stopped abruptly and the phase fails without a timestamp.
//!
//! Interrupt markers are located once per file. In the file the phase begins
//! in, they are searched from the phase's starting offset; in every successor
//! file, from the start of the file.
//!
//! [`PhaseScanner`]: crate::readers::phasescanner::PhaseScanner
//! [`Evaluator`]: crate::readers::phasescanner::Evaluator

use crate::common::{FileOffset, FileOffsetOpt, ResultScan};
use crate::data::datetime::{timestamp_at, TimestampOpt};
use crate::data::phaseresult::{Phase, PhaseResult};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::filechain::{ChainResolver, ScanCursor};
use crate::readers::logbuffer::LogBuffer;

use std::fmt;

use ::bstr::ByteSlice;
#[allow(unused_imports)]
use ::more_asserts::debug_assert_gt;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Operator stop interrupt marker.
pub const MARKER_USER_STOP: &[u8] = b":USER: Stop";
/// Timeout interrupt marker. The instrument logs this, the scanner never
/// measures time itself.
pub const MARKER_TIMEOUT: &[u8] = b"Fifteen minute";

/// A phase's decision about one counting occurrence of its success marker.
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    /// The phase passed. The result is stamped with the log line at
    /// `stamp_at` and the scan ends there.
    Accept {
        stamp_at: FileOffset,
        detail: Option<String>,
    },
    /// This occurrence does not count as a pass; search again from
    /// `resume_at`, which is past the occurrence.
    Reject { resume_at: FileOffset },
}

/// Decides about the success marker found at `at`, the last argument.
/// The middle argument is the offset the search for that marker began at.
pub type Evaluator = fn(&LogBuffer, FileOffset, FileOffset) -> ResultScan<Verdict>;

/// The [`Evaluator`] for phases where the presence of the success marker
/// is a pass.
pub fn accept_presence(
    _buffer: &LogBuffer,
    _from: FileOffset,
    at: FileOffset,
) -> ResultScan<Verdict> {
    Ok(Verdict::Accept {
        stamp_at: at,
        detail: None,
    })
}

/// Everything that distinguishes the chase of one phase from another.
#[derive(Clone, Copy)]
pub struct PhaseConfig {
    pub phase: Phase,
    pub success_marker: &'static [u8],
    pub evaluate: Evaluator,
    /// is a phase failed by timeout stamped with the timeout's log line?
    pub timeout_stamped: bool,
}

impl fmt::Debug for PhaseConfig {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("PhaseConfig")
            .field("phase", &self.phase)
            .field("success_marker", &self.success_marker.as_bstr())
            .field("timeout_stamped", &self.timeout_stamped)
            .finish()
    }
}

/// Offsets of the interrupt markers of one log file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Interrupts {
    pub user_stop: FileOffsetOpt,
    pub timeout: FileOffsetOpt,
}

impl Interrupts {
    /// First interrupt markers in `buffer` at or after `base`.
    pub fn locate(
        buffer: &LogBuffer,
        base: FileOffset,
    ) -> Interrupts {
        let interrupts = Interrupts {
            user_stop: buffer.find(MARKER_USER_STOP, base),
            timeout: buffer.find(MARKER_TIMEOUT, base),
        };
        defñ!("({:?}, {}) {:?}", buffer.path(), base, interrupts);

        interrupts
    }

    /// Does a success marker at `at` precede both interrupts?
    /// An absent interrupt never blocks.
    pub fn admits(
        &self,
        at: FileOffset,
    ) -> bool {
        let before_stop = match self.user_stop {
            Some(stop) => at <= stop,
            None => true,
        };
        let before_timeout = match self.timeout {
            Some(timeout) => at <= timeout,
            None => true,
        };

        before_stop && before_timeout
    }
}

/// A resolved phase and the cursor at the point it resolved.
#[derive(Debug)]
pub struct PhaseOutcome {
    pub result: PhaseResult,
    /// starting point for the next phase
    pub cursor: ScanCursor,
}

/// Drives the chase for one [`PhaseConfig`].
pub struct PhaseScanner<'a> {
    config: &'a PhaseConfig,
    resolver: &'a ChainResolver,
    /// successor files opened
    files_chased: usize,
    /// success marker occurrences rejected by the evaluator
    markers_rejected: usize,
}

impl<'a> PhaseScanner<'a> {
    pub fn new(
        config: &'a PhaseConfig,
        resolver: &'a ChainResolver,
    ) -> PhaseScanner<'a> {
        PhaseScanner {
            config,
            resolver,
            files_chased: 0,
            markers_rejected: 0,
        }
    }

    pub fn files_chased(&self) -> usize {
        self.files_chased
    }

    pub fn markers_rejected(&self) -> usize {
        self.markers_rejected
    }

    /// Resolve the phase, beginning at `cursor`.
    ///
    /// A phase always resolves to pass or fail; errors are only for logs that
    /// can not be read ([`FileOpenFailure`], [`ChainCycle`]) or lines that
    /// do not have the fixed prefix ([`MalformedLog`]).
    ///
    /// [`FileOpenFailure`]: crate::common::ScanError::FileOpenFailure
    /// [`ChainCycle`]: crate::common::ScanError::ChainCycle
    /// [`MalformedLog`]: crate::common::ScanError::MalformedLog
    pub fn scan(
        &mut self,
        mut cursor: ScanCursor,
    ) -> ResultScan<PhaseOutcome> {
        defn!("({:?}) {:?} offset {}", self.config, cursor.path(), cursor.offset());
        let phase: Phase = self.config.phase;
        let marker: &[u8] = self.config.success_marker;
        cursor.begin_phase();

        loop {
            let interrupts = Interrupts::locate(cursor.buffer(), cursor.interrupt_base());
            let mut offset: FileOffset = cursor.offset();

            while let Some(at) = cursor.buffer().find(marker, offset) {
                if !interrupts.admits(at) {
                    defo!("{:?} at {} after interrupts {:?}", marker.as_bstr(), at, interrupts);
                    break;
                }
                match (self.config.evaluate)(cursor.buffer(), offset, at)? {
                    Verdict::Accept { stamp_at, detail } => {
                        let ts = timestamp_at(cursor.buffer(), stamp_at)?;
                        cursor.set_offset(stamp_at);
                        defx!("{:?} pass {} in {:?} at {}", phase, ts, cursor.path(), stamp_at);
                        return Ok(PhaseOutcome {
                            result: PhaseResult::pass(phase, Some(ts), detail),
                            cursor,
                        });
                    }
                    Verdict::Reject { resume_at } => {
                        debug_assert_gt!(resume_at, at, "evaluator for {:?} did not move past {}", phase, at);
                        defo!("{:?} rejected at {}, resume at {}", marker.as_bstr(), at, resume_at);
                        self.markers_rejected += 1;
                        // always progress so a file is scanned at most once
                        offset = std::cmp::max(resume_at, at + 1);
                    }
                }
            }

            if let Some(stop) = interrupts.user_stop {
                let ts = timestamp_at(cursor.buffer(), stop)?;
                cursor.set_offset(stop);
                defx!("{:?} fail, user stop {} at {}", phase, ts, stop);
                return Ok(PhaseOutcome {
                    result: PhaseResult::fail(phase, Some(ts)),
                    cursor,
                });
            }

            if let Some(timeout) = interrupts.timeout {
                let ts: TimestampOpt = match self.config.timeout_stamped {
                    true => Some(timestamp_at(cursor.buffer(), timeout)?),
                    false => None,
                };
                cursor.set_offset(timeout);
                defx!("{:?} fail, timeout {:?} at {}", phase, ts, timeout);
                return Ok(PhaseOutcome {
                    result: PhaseResult::fail(phase, ts),
                    cursor,
                });
            }

            let next = match self.resolver.resolve_next(cursor.buffer()) {
                Some(val) => val,
                None => {
                    defx!("{:?} fail, chain ends at {:?}; files chased {}", phase, cursor.path(), self.files_chased);
                    return Ok(PhaseOutcome {
                        result: PhaseResult::fail(phase, None),
                        cursor,
                    });
                }
            };
            defo!("{:?} continues in {:?}", phase, next);
            cursor = cursor.advance_to(next)?;
            self.files_chased += 1;
        }
    }
}

/// Resolve the phase of `config` beginning at `cursor`.
pub fn scan_phase(
    config: &PhaseConfig,
    resolver: &ChainResolver,
    cursor: ScanCursor,
) -> ResultScan<PhaseOutcome> {
    PhaseScanner::new(config, resolver).scan(cursor)
}
