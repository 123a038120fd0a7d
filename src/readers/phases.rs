// src/readers/phases.rs

//! The five qualification phases of a run, as [`PhaseConfig`]s for the
//! [`PhaseScanner`], and the capillary position analysis that precedes the
//! manual capillary find.
//!
//! [`PhaseConfig`]: crate::readers::phasescanner::PhaseConfig
//! [`PhaseScanner`]: crate::readers::phasescanner::PhaseScanner

use crate::common::{FileOffset, FileOffsetOpt, ResultScan, ScanError};
use crate::data::datetime::timestamp_at;
use crate::data::phaseresult::{Phase, PhaseResult};
use crate::readers::filechain::{ChainResolver, ScanCursor};
use crate::readers::logbuffer::LogBuffer;
use crate::readers::phasescanner::{
    accept_presence,
    scan_phase,
    PhaseConfig,
    PhaseOutcome,
    Verdict,
};

use ::bstr::ByteSlice; // provides `fields` and `trim` on `&[u8]`
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// markers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Operator found the capillary by hand (note the two spaces).
pub const MARKER_MANUAL_FIND: &[u8] = b":USER: Coarse Focus Control  RESET";
/// Capillary position entry.
pub const MARKER_CAP_IS: &[u8] = b":cap is";
/// Begins the list of measured capillary positions of a `:cap is` entry.
pub const MARKER_ABSY: &[u8] = b"absY=[";
/// Ends the list of measured capillary positions.
pub const MARKER_ABSY_END: &[u8] = b"]";
/// Illumination and camera calibration succeeded.
pub const MARKER_ILLUMINATION: &[u8] = b":cal success";
/// Pressure/velocity test result, followed by the slope.
pub const MARKER_PRESSURE_VELOCITY: &[u8] = b"Pressure/PumpPos Slope";
/// Capillary calibration result entry.
pub const MARKER_CAPILLARY_CALIBRATION: &[u8] = b"mode=capcal";
/// The capillary calibration succeeded.
pub const MARKER_CAPILLARY_CALIBRATION_SUCCESS: &[u8] = b"status=success";
/// Data collection started.
pub const MARKER_DATA_COLLECTION: &[u8] = b":pse ";

/// Two capillary positions this far apart (exclusive) mean the capillary
/// was found automatically.
pub const ABSY_DIFF_MIN: f64 = 50.0;
pub const ABSY_DIFF_MAX: f64 = 70.0;

pub const DETAIL_AUTOMATIC: &str = "automatic";
pub const DETAIL_MANUAL: &str = "manual";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// evaluators
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn accept_manual_find(
    _buffer: &LogBuffer,
    _from: FileOffset,
    at: FileOffset,
) -> ResultScan<Verdict> {
    Ok(Verdict::Accept {
        stamp_at: at,
        detail: Some(String::from(DETAIL_MANUAL)),
    })
}

/// The slope following `Pressure/PumpPos Slope` must be a number and not
/// negative. `NaN` is a failed test, the next result may still pass.
fn evaluate_slope(
    buffer: &LogBuffer,
    _from: FileOffset,
    at: FileOffset,
) -> ResultScan<Verdict> {
    let value_beg: FileOffset = at + MARKER_PRESSURE_VELOCITY.len();
    let value_end: FileOffset = buffer.line_end(value_beg);
    let value: &[u8] = buffer
        .slice(value_beg, value_end)?
        .trim();
    let slope: f64 = match std::str::from_utf8(value)
        .ok()
        .and_then(|value_s| value_s.parse::<f64>().ok())
    {
        Some(val) => val,
        None => {
            return Err(ScanError::malformed(
                buffer.path(),
                at,
                format!("slope {:?} is not a number", value.as_bstr()),
            ));
        }
    };
    defñ!("slope {} at {}", slope, at);
    if slope.is_nan() || slope < 0.0 {
        return Ok(Verdict::Reject { resume_at: value_beg });
    }

    Ok(Verdict::Accept {
        stamp_at: at,
        detail: Some(value.to_str_lossy().into_owned()),
    })
}

/// A `mode=capcal` entry counts when `status=success` is logged in the same
/// file at or after `from`, where the search for the entry began. Keywords
/// of an entry are in no fixed order, so the status may precede the mode.
/// The result is stamped where the success was logged.
fn evaluate_capillary_calibration(
    buffer: &LogBuffer,
    from: FileOffset,
    at: FileOffset,
) -> ResultScan<Verdict> {
    let result_at: FileOffset = at + MARKER_CAPILLARY_CALIBRATION.len();
    match buffer.find(MARKER_CAPILLARY_CALIBRATION_SUCCESS, from) {
        Some(success_at) => Ok(Verdict::Accept {
            stamp_at: success_at,
            detail: None,
        }),
        None => Ok(Verdict::Reject { resume_at: result_at }),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// phase configurations
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Manual capillary find, chased when the positions do not show an
/// automatic find.
pub const CONFIG_FIND_CAPILLARY: PhaseConfig = PhaseConfig {
    phase: Phase::FindCapillary,
    success_marker: MARKER_MANUAL_FIND,
    evaluate: accept_manual_find,
    timeout_stamped: true,
};

pub const CONFIG_ILLUMINATION_CALIBRATION: PhaseConfig = PhaseConfig {
    phase: Phase::IlluminationCalibration,
    success_marker: MARKER_ILLUMINATION,
    evaluate: accept_presence,
    timeout_stamped: true,
};

pub const CONFIG_PRESSURE_VELOCITY: PhaseConfig = PhaseConfig {
    phase: Phase::PressureVelocity,
    success_marker: MARKER_PRESSURE_VELOCITY,
    evaluate: evaluate_slope,
    timeout_stamped: false,
};

pub const CONFIG_CAPILLARY_CALIBRATION: PhaseConfig = PhaseConfig {
    phase: Phase::CapillaryCalibration,
    success_marker: MARKER_CAPILLARY_CALIBRATION,
    evaluate: evaluate_capillary_calibration,
    timeout_stamped: true,
};

pub const CONFIG_DATA_COLLECTION: PhaseConfig = PhaseConfig {
    phase: Phase::DataCollection,
    success_marker: MARKER_DATA_COLLECTION,
    evaluate: accept_presence,
    timeout_stamped: true,
};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// capillary find
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Measured capillary positions of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapillaryPositions {
    /// every `absY` value, in log order
    pub values: Vec<f64>,
    /// offset of the last `absY=[` list
    pub last_at: FileOffsetOpt,
}

/// Collect the `absY=[…]` values of all `:cap is` entries in `buffer` from
/// `from` to the end of the buffer. Empty lists `absY=[]` are skipped.
pub fn collect_capillary_positions(
    buffer: &LogBuffer,
    from: FileOffset,
) -> ResultScan<CapillaryPositions> {
    defn!("({:?}, {})", buffer.path(), from);
    let mut positions = CapillaryPositions::default();
    let mut cap_at: FileOffsetOpt = buffer.find(MARKER_CAP_IS, from);

    while let Some(cap_at_) = cap_at {
        let absy_at: FileOffset = match buffer.find(MARKER_ABSY, cap_at_) {
            Some(val) => val,
            None => break,
        };
        positions.last_at = Some(absy_at);
        let list_beg: FileOffset = absy_at + MARKER_ABSY.len();
        let list_end: FileOffset = match buffer.find(MARKER_ABSY_END, list_beg) {
            Some(val) => val,
            None => {
                defx!("unterminated absY list at {}", absy_at);
                return Err(ScanError::malformed(buffer.path(), absy_at, "absY list without ']'"));
            }
        };
        for field in buffer
            .slice(list_beg, list_end)?
            .fields()
        {
            match std::str::from_utf8(field)
                .ok()
                .and_then(|value_s| value_s.parse::<f64>().ok())
            {
                Some(value) => positions.values.push(value),
                None => {
                    defx!("bad absY value {:?}", field.as_bstr());
                    return Err(ScanError::malformed(
                        buffer.path(),
                        absy_at,
                        format!("absY value {:?} is not a number", field.as_bstr()),
                    ));
                }
            }
        }
        cap_at = buffer.find(MARKER_CAP_IS, absy_at);
    }
    defx!("{} values, last_at {:?}", positions.values.len(), positions.last_at);

    Ok(positions)
}

/// Do any two of `values` differ by more than [`ABSY_DIFF_MIN`] and less than
/// [`ABSY_DIFF_MAX`]? The order of `values` does not matter.
pub fn found_automatically(values: &[f64]) -> bool {
    for (i, a) in values.iter().enumerate() {
        for b in values[i + 1..].iter() {
            let diff: f64 = (a - b).abs();
            if diff > ABSY_DIFF_MIN && diff < ABSY_DIFF_MAX {
                return true;
            }
        }
    }

    false
}

/// Resolve the find capillary phase beginning at `cursor` (the run start).
///
/// The capillary positions logged in the run's first file decide an
/// automatic find. Otherwise the manual find is chased like any other phase.
pub fn scan_find_capillary(
    resolver: &ChainResolver,
    cursor: ScanCursor,
) -> ResultScan<PhaseOutcome> {
    defn!("({:?}, {})", cursor.path(), cursor.offset());
    let positions = collect_capillary_positions(cursor.buffer(), cursor.offset())?;
    if found_automatically(&positions.values) {
        let stamp_at: FileOffset = positions.last_at.unwrap_or(cursor.offset());
        let ts = timestamp_at(cursor.buffer(), stamp_at)?;
        defx!("found automatically {}", ts);
        return Ok(PhaseOutcome {
            result: PhaseResult::pass(Phase::FindCapillary, Some(ts), Some(String::from(DETAIL_AUTOMATIC))),
            cursor,
        });
    }
    defx!("not found automatically, chase manual find");

    scan_phase(&CONFIG_FIND_CAPILLARY, resolver, cursor)
}
