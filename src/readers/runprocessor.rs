// src/readers/runprocessor.rs

//! Implements a [`RunProcessor`], the driver of the processing stages for
//! one instrument log file.
//!
//! A log file is processed in stages:
//! 1. locate the start of the latest run
//! 2. extract the specimen declared for the run
//! 3. resolve the five phases, chasing them into successor log files
//!
//! Find capillary, illumination calibration, and the pressure/velocity test
//! each begin at the run start. Capillary calibration continues where the
//! pressure/velocity test resolved and data collection continues where
//! capillary calibration resolved.
//!
//! Results of resolved phases are kept when a later stage fails, so a
//! partial report can be printed.
//!
//! This is a _qcrlib_ structure used by the binary program _qcr_.
//!
//! [`RunProcessor`]: crate::readers::runprocessor::RunProcessor

use crate::common::{FPath, ResultScan, ScanError};
use crate::data::phaseresult::{Phase, PhaseResult};
use crate::data::runrecord::{RunRecord, RunStart, Specimen};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::filechain::{ChainResolver, ScanCursor};
use crate::readers::logbuffer::LogBuffer;
use crate::readers::phases::{
    scan_find_capillary,
    CONFIG_CAPILLARY_CALIBRATION,
    CONFIG_DATA_COLLECTION,
    CONFIG_ILLUMINATION_CALIBRATION,
    CONFIG_PRESSURE_VELOCITY,
};
use crate::readers::phasescanner::{scan_phase, PhaseOutcome};
use crate::readers::runlocator::locate_run_start;
use crate::readers::specimen::extract_specimen;

use std::fmt;

#[allow(unused_imports)]
use ::more_asserts::{debug_assert_ge, debug_assert_le};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// The [`RunProcessor`] processing stages, in order.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ProcessingStage {
    /// Open the log file and find the latest run begin marker.
    Stage0LocateRun,
    /// Find the specimen declaration of the run.
    Stage1Specimen,
    /// Resolve every phase.
    Stage2Phases,
    /// All phases resolved; the [`RunRecord`] is complete.
    Stage3Done,
}

/// Processes the run of one log file into a [`RunRecord`].
pub struct RunProcessor {
    path: FPath,
    resolver: ChainResolver,
    stage: ProcessingStage,
    /// cursor at the run start, taken by the first phase
    entry: Option<ScanCursor>,
    run_start: Option<RunStart>,
    specimen: Option<Specimen>,
    phases: Vec<PhaseResult>,
}

impl fmt::Debug for RunProcessor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("RunProcessor")
            .field("path", &self.path)
            .field("stage", &self.stage)
            .field("run_start", &self.run_start)
            .field("specimen", &self.specimen)
            .field("phases", &self.phases.len())
            .finish()
    }
}

impl RunProcessor {
    /// `resolver` resolves chain pointers of `path` and its successors.
    pub fn new(
        path: FPath,
        resolver: ChainResolver,
    ) -> RunProcessor {
        defñ!("({:?}, {:?})", path, resolver);

        RunProcessor {
            path,
            resolver,
            stage: ProcessingStage::Stage0LocateRun,
            entry: None,
            run_start: None,
            specimen: None,
            phases: Vec::with_capacity(Phase::ALL.len()),
        }
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }

    pub fn stage(&self) -> ProcessingStage {
        self.stage
    }

    pub fn run_start(&self) -> Option<&RunStart> {
        self.run_start.as_ref()
    }

    /// The specimen, once extracted.
    pub fn specimen(&self) -> Option<&Specimen> {
        self.specimen.as_ref()
    }

    /// Results of the phases resolved so far, in [`Phase::ALL`] order.
    ///
    /// [`Phase::ALL`]: crate::data::phaseresult::Phase::ALL
    pub fn phases_done(&self) -> &[PhaseResult] {
        self.phases.as_slice()
    }

    /// Fresh cursor at the run start.
    fn cursor_at_run_start(&self) -> ResultScan<ScanCursor> {
        match &self.run_start {
            Some(run_start) => ScanCursor::open(&run_start.path, run_start.offset),
            None => Err(ScanError::MissingRunMarker {
                path: self.path.clone(),
            }),
        }
    }

    fn push(
        &mut self,
        outcome: PhaseOutcome,
    ) -> ScanCursor {
        defo!("{:?} passed {}", outcome.result.phase(), outcome.result.passed());
        self.phases.push(outcome.result);

        outcome.cursor
    }

    pub fn process_stage0_locate_run(&mut self) -> ResultScan<()> {
        defn!("({:?})", self.path);
        debug_assert_eq!(self.stage, ProcessingStage::Stage0LocateRun);
        let buffer = LogBuffer::open(&self.path)?;
        let offset = locate_run_start(&buffer)?;
        self.run_start = Some(RunStart {
            path: self.path.clone(),
            offset,
        });
        self.entry = Some(ScanCursor::new(buffer, offset));
        self.stage = ProcessingStage::Stage1Specimen;
        defx!("run start {}", offset);

        Ok(())
    }

    pub fn process_stage1_specimen(&mut self) -> ResultScan<()> {
        defn!("({:?})", self.path);
        debug_assert_eq!(self.stage, ProcessingStage::Stage1Specimen);
        let entry: ScanCursor = match self.entry.take() {
            Some(cursor) => cursor,
            None => self.cursor_at_run_start()?,
        };
        let specimen = extract_specimen(entry.buffer(), entry.offset())?;
        self.entry = Some(entry);
        self.specimen = Some(specimen);
        self.stage = ProcessingStage::Stage2Phases;
        defx!();

        Ok(())
    }

    pub fn process_stage2_phases(&mut self) -> ResultScan<()> {
        defn!("({:?})", self.path);
        debug_assert_eq!(self.stage, ProcessingStage::Stage2Phases);
        let entry: ScanCursor = match self.entry.take() {
            Some(cursor) => cursor,
            None => self.cursor_at_run_start()?,
        };

        let outcome = scan_find_capillary(&self.resolver, entry)?;
        drop(self.push(outcome));

        let cursor = self.cursor_at_run_start()?;
        let outcome = scan_phase(&CONFIG_ILLUMINATION_CALIBRATION, &self.resolver, cursor)?;
        drop(self.push(outcome));

        let cursor = self.cursor_at_run_start()?;
        let outcome = scan_phase(&CONFIG_PRESSURE_VELOCITY, &self.resolver, cursor)?;
        let cursor = self.push(outcome);

        let outcome = scan_phase(&CONFIG_CAPILLARY_CALIBRATION, &self.resolver, cursor)?;
        let cursor = self.push(outcome);

        let outcome = scan_phase(&CONFIG_DATA_COLLECTION, &self.resolver, cursor)?;
        drop(self.push(outcome));

        self.stage = ProcessingStage::Stage3Done;
        defx!("{} phases", self.phases.len());

        Ok(())
    }

    /// Run all remaining stages and return the completed [`RunRecord`].
    ///
    /// After an error, [`phases_done`] and [`specimen`] hold what was
    /// resolved before it.
    ///
    /// [`phases_done`]: RunProcessor::phases_done
    /// [`specimen`]: RunProcessor::specimen
    pub fn process(&mut self) -> ResultScan<RunRecord> {
        defn!("({:?}) stage {:?}", self.path, self.stage);
        if self.stage == ProcessingStage::Stage0LocateRun {
            self.process_stage0_locate_run()?;
        }
        if self.stage == ProcessingStage::Stage1Specimen {
            self.process_stage1_specimen()?;
        }
        if self.stage == ProcessingStage::Stage2Phases {
            self.process_stage2_phases()?;
        }
        debug_assert_eq!(self.stage, ProcessingStage::Stage3Done);

        let record = RunRecord {
            run_start: self.run_start.clone().unwrap_or_else(|| RunStart {
                path: self.path.clone(),
                offset: 0,
            }),
            specimen: self.specimen.clone().unwrap_or_else(|| Specimen {
                barcode: String::new(),
                category: String::new(),
                timestamp: None,
            }),
            phases: self.phases.clone(),
        };
        defx!("passed_all {}", record.passed_all());

        Ok(record)
    }
}

/// Process the run of the log file at `path`, successor files are found in
/// `logdir`.
pub fn process_log_file(
    path: &FPath,
    logdir: &FPath,
) -> ResultScan<RunRecord> {
    RunProcessor::new(path.clone(), ChainResolver::new(logdir.clone())).process()
}
