// src/data/phaseresult.rs

//! Implements [`Phase`] and [`PhaseResult`], the outcome of one qualification
//! phase of a run.
//!
//! [`Phase`]: crate::data::phaseresult::Phase
//! [`PhaseResult`]: crate::data::phaseresult::PhaseResult

use crate::data::datetime::{Timestamp, TimestampOpt};

use std::fmt;

/// One of the five qualification phases, in report order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Phase {
    FindCapillary,
    /// Also stands for the camera calibration; both share one log entry.
    IlluminationCalibration,
    PressureVelocity,
    CapillaryCalibration,
    DataCollection,
}

/// How a report line for a [`Phase`] is worded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReportLabel {
    /// phase name on a pass line
    pub pass: &'static str,
    /// phase name on a fail line
    pub fail: &'static str,
    /// does a fail line print the timestamp (when there is one)?
    pub fail_has_timestamp: bool,
    /// does a pass line print the detail, e.g. `(automatic)`?
    pub pass_has_detail: bool,
}

const LABELS_FIND_CAPILLARY: [ReportLabel; 1] = [ReportLabel {
    pass: "Find Capillary",
    fail: "Find Capillary",
    fail_has_timestamp: true,
    pass_has_detail: true,
}];

const LABELS_ILLUMINATION: [ReportLabel; 2] = [
    ReportLabel {
        pass: "Illumination Calibration",
        fail: "Illumination Calibration",
        fail_has_timestamp: true,
        pass_has_detail: false,
    },
    ReportLabel {
        pass: "Camera Calibration",
        fail: "Camera Calibration",
        fail_has_timestamp: true,
        pass_has_detail: false,
    },
];

const LABELS_PRESSURE_VELOCITY: [ReportLabel; 1] = [ReportLabel {
    pass: "Pressure/Velocity test",
    fail: "Pressure/Velocity test",
    fail_has_timestamp: true,
    pass_has_detail: false,
}];

const LABELS_CAPILLARY_CALIBRATION: [ReportLabel; 1] = [ReportLabel {
    pass: "Capillary Calibration",
    fail: "Capillary Calibration",
    fail_has_timestamp: false,
    pass_has_detail: false,
}];

const LABELS_DATA_COLLECTION: [ReportLabel; 1] = [ReportLabel {
    pass: "Data Collection Initiated",
    fail: "Data Collection Aborted",
    fail_has_timestamp: false,
    pass_has_detail: false,
}];

impl Phase {
    /// All phases in the order they are reported.
    pub const ALL: [Phase; 5] = [
        Phase::FindCapillary,
        Phase::IlluminationCalibration,
        Phase::PressureVelocity,
        Phase::CapillaryCalibration,
        Phase::DataCollection,
    ];

    /// Report labels of this phase. The illumination phase reports two lines.
    pub const fn labels(&self) -> &'static [ReportLabel] {
        match self {
            Phase::FindCapillary => &LABELS_FIND_CAPILLARY,
            Phase::IlluminationCalibration => &LABELS_ILLUMINATION,
            Phase::PressureVelocity => &LABELS_PRESSURE_VELOCITY,
            Phase::CapillaryCalibration => &LABELS_CAPILLARY_CALIBRATION,
            Phase::DataCollection => &LABELS_DATA_COLLECTION,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}", self.labels()[0].pass)
    }
}

/// The resolution of one [`Phase`]: pass or fail, when, and a free-text
/// detail such as the capillary find method or the measured slope.
///
/// Created once per phase per run, never changed after.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhaseResult {
    phase: Phase,
    passed: bool,
    timestamp: TimestampOpt,
    detail: Option<String>,
}

impl PhaseResult {
    pub fn pass(
        phase: Phase,
        timestamp: TimestampOpt,
        detail: Option<String>,
    ) -> PhaseResult {
        PhaseResult {
            phase,
            passed: true,
            timestamp,
            detail,
        }
    }

    pub fn fail(
        phase: Phase,
        timestamp: TimestampOpt,
    ) -> PhaseResult {
        PhaseResult {
            phase,
            passed: false,
            timestamp,
            detail: None,
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn passed(&self) -> bool {
        self.passed
    }

    pub const fn timestamp(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Report line for one `label` of this result,
    /// `(pass|fail)  <phase name>[ (<detail>)][ <date> <time>]`.
    pub fn report_line(
        &self,
        label: &ReportLabel,
    ) -> String {
        let mut line: String = String::with_capacity(64);
        let show_timestamp: bool;
        if self.passed {
            line.push_str("(pass)  ");
            line.push_str(label.pass);
            if label.pass_has_detail {
                if let Some(detail) = &self.detail {
                    line.push_str(" (");
                    line.push_str(detail);
                    line.push(')');
                }
            }
            show_timestamp = true;
        } else {
            line.push_str("(fail)  ");
            line.push_str(label.fail);
            show_timestamp = label.fail_has_timestamp;
        }
        if show_timestamp {
            if let Some(ts) = &self.timestamp {
                line.push(' ');
                line.push_str(&ts.to_string());
            }
        }

        line
    }

    /// All report lines of this result, one per label of the phase.
    pub fn report_lines(&self) -> Vec<String> {
        self.phase
            .labels()
            .iter()
            .map(|label| self.report_line(label))
            .collect()
    }
}
