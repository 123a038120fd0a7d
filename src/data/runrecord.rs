// src/data/runrecord.rs

//! Implements [`RunRecord`], everything known about one processed run, and
//! the [`Specimen`] declared for it.
//!
//! [`RunRecord`]: crate::data::runrecord::RunRecord
//! [`Specimen`]: crate::data::runrecord::Specimen

use crate::common::{FPath, FileOffset};
use crate::data::datetime::TimestampOpt;
use crate::data::phaseresult::{Phase, PhaseResult};

/// Barcode and specimen category of the run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Specimen {
    pub barcode: String,
    pub category: String,
    /// when the barcode was logged
    pub timestamp: TimestampOpt,
}

/// Where a run began.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunStart {
    /// the log file the run began in
    pub path: FPath,
    /// offset of the last run begin marker in `path`
    pub offset: FileOffset,
}

/// One per processed log file; finalized when all five phases resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunRecord {
    pub run_start: RunStart,
    pub specimen: Specimen,
    /// one result per [`Phase::ALL`], in that order
    pub phases: Vec<PhaseResult>,
}

/// Pass code in report file names for a run where every phase passed.
pub const PASS_CODE: char = 'p';
/// Pass code in report file names for a run where some phase failed.
pub const FAIL_CODE: char = 'f';

impl RunRecord {
    pub fn barcode(&self) -> &str {
        self.specimen.barcode.as_str()
    }

    /// The result of `phase`, if that phase was resolved.
    pub fn result(
        &self,
        phase: Phase,
    ) -> Option<&PhaseResult> {
        self.phases
            .iter()
            .find(|result| result.phase() == phase)
    }

    /// Did every phase of the run pass?
    pub fn passed_all(&self) -> bool {
        Phase::ALL
            .iter()
            .all(|phase| matches!(self.result(*phase), Some(result) if result.passed()))
    }

    /// `p` if every phase of the run passed, else `f`.
    pub fn pass_code(&self) -> char {
        if self.passed_all() {
            PASS_CODE
        } else {
            FAIL_CODE
        }
    }
}
