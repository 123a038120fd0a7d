// src/printer/report.rs

//! Assembles the text of a QC [`Report`] from a run's [`PhaseResult`s] and
//! writes the report files.
//!
//! A report looks like
//!
//! ```text
//! VisionGate CCT QC Report
//! Report Date: 01/06/2024
//! Report Time: 08:00:00
//! Instrument:  cct032
//! Barcode(B123456), Specimen type(QC), 01/05/2024 14:22:03
//! Processes:
//!     (pass)  Find Capillary (automatic) 01/05/2024 14:23:10
//!     (pass)  Illumination Calibration 01/05/2024 14:24:00
//!     (pass)  Camera Calibration 01/05/2024 14:24:00
//!     (fail)  Pressure/Velocity test 01/05/2024 14:30:41
//!     (fail)  Capillary Calibration
//!     (fail)  Data Collection Aborted
//! ```
//!
//! [`Report`]: crate::printer::report::Report
//! [`PhaseResult`s]: crate::data::phaseresult::PhaseResult

use crate::common::{FPath, PathBuf};
use crate::data::datetime::{NaiveDate, NaiveTime, DATE_FORMAT, TIME_FORMAT};
use crate::data::phaseresult::PhaseResult;
use crate::data::runrecord::{RunRecord, Specimen};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::helpers::{file_stem, fpath_to_path};

use std::io::Result;

use ::chrono::Local;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// First line of every report.
pub const REPORT_TITLE: &str = "VisionGate CCT QC Report";
/// Phase lines are indented below the `Processes:` line.
pub const PHASE_INDENT: &str = "    ";
pub const PROCESSES_LINE: &str = "Processes:";
/// Sub-directory of the report directory for reports named by log file.
pub const DIR_BY_DATE: &str = "by_date";
/// Sub-directory of the report directory for reports named by barcode.
pub const DIR_BY_BCODE: &str = "by_bcode";
pub const REPORT_FILE_SUFFIX: &str = ".txt";

/// When and for which instrument a report was made.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportHeader {
    pub instrument: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl ReportHeader {
    pub fn new(
        instrument: String,
        date: NaiveDate,
        time: NaiveTime,
    ) -> ReportHeader {
        ReportHeader {
            instrument,
            date,
            time,
        }
    }

    /// Header for a report made now, local time.
    pub fn now(instrument: String) -> ReportHeader {
        let now = Local::now().naive_local();

        ReportHeader::new(instrument, now.date(), now.time())
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Report Date: {}", self.date.format(DATE_FORMAT)),
            format!("Report Time: {}", self.time.format(TIME_FORMAT)),
            format!("Instrument:  {}", self.instrument),
        ]
    }
}

/// `Barcode(<barcode>), Specimen type(<category>)[, <date> <time>]`
pub fn specimen_line(specimen: &Specimen) -> String {
    match &specimen.timestamp {
        Some(ts) => format!("Barcode({}), Specimen type({}), {}", specimen.barcode, specimen.category, ts),
        None => format!("Barcode({}), Specimen type({})", specimen.barcode, specimen.category),
    }
}

/// How a [`ReportLine`] is highlighted when printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportLineKind {
    Plain,
    Pass,
    Fail,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportLine {
    pub kind: ReportLineKind,
    pub text: String,
}

impl ReportLine {
    fn plain(text: String) -> ReportLine {
        ReportLine {
            kind: ReportLineKind::Plain,
            text,
        }
    }
}

/// The lines of one report, in print order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    lines: Vec<ReportLine>,
}

impl Report {
    /// Assemble a report from what is known of a run. A run that failed to
    /// scan may have no `specimen` and fewer `phases` than a complete one.
    pub fn assemble(
        header: &ReportHeader,
        specimen: Option<&Specimen>,
        phases: &[PhaseResult],
    ) -> Report {
        defn!("(…, {:?}, {} phases)", specimen, phases.len());
        let mut lines: Vec<ReportLine> = Vec::with_capacity(6 + phases.len() * 2);
        lines.push(ReportLine::plain(String::from(REPORT_TITLE)));
        for line in header.lines() {
            lines.push(ReportLine::plain(line));
        }
        if let Some(specimen) = specimen {
            lines.push(ReportLine::plain(specimen_line(specimen)));
        }
        lines.push(ReportLine::plain(String::from(PROCESSES_LINE)));
        for result in phases.iter() {
            let kind = match result.passed() {
                true => ReportLineKind::Pass,
                false => ReportLineKind::Fail,
            };
            for text in result.report_lines() {
                lines.push(ReportLine {
                    kind,
                    text: format!("{}{}", PHASE_INDENT, text),
                });
            }
        }
        defx!("{} lines", lines.len());

        Report { lines }
    }

    /// Report of a completed run.
    pub fn from_record(
        header: &ReportHeader,
        record: &RunRecord,
    ) -> Report {
        Report::assemble(header, Some(&record.specimen), &record.phases)
    }

    pub fn lines(&self) -> &[ReportLine] {
        self.lines.as_slice()
    }

    /// The report as text, each line ending in a newline.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.lines.len() * 48);
        for line in self.lines.iter() {
            text.push_str(&line.text);
            text.push('\n');
        }

        text
    }
}

/// Paths of the two names of a report file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportFileNames {
    /// `<rptdir>/by_date/<logstem>_<barcode>_<code>.txt`
    pub by_date: PathBuf,
    /// `<rptdir>/by_bcode/<barcode>_<logstem>_<code>.txt`
    pub by_bcode: PathBuf,
}

/// Report file names for `record`, from log file `log_path`.
pub fn report_file_names(
    rptdir: &FPath,
    log_path: &FPath,
    record: &RunRecord,
) -> ReportFileNames {
    let stem: FPath = file_stem(log_path);
    let barcode: &str = record.barcode();
    let code: char = record.pass_code();
    let rptdir = fpath_to_path(rptdir);

    ReportFileNames {
        by_date: rptdir
            .join(DIR_BY_DATE)
            .join(format!("{}_{}_{}{}", stem, barcode, code, REPORT_FILE_SUFFIX)),
        by_bcode: rptdir
            .join(DIR_BY_BCODE)
            .join(format!("{}_{}_{}{}", barcode, stem, code, REPORT_FILE_SUFFIX)),
    }
}

/// Write `text` to `names.by_date` and hard link it as `names.by_bcode`.
///
/// Missing directories are created. Files from an earlier report of the
/// same run are replaced.
pub fn write_report_files(
    names: &ReportFileNames,
    text: &str,
) -> Result<()> {
    defn!("({:?})", names);
    for path in [&names.by_date, &names.by_bcode] {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
    }
    std::fs::write(&names.by_date, text)?;
    if names.by_bcode.exists() {
        defo!("remove old {:?}", names.by_bcode);
        std::fs::remove_file(&names.by_bcode)?;
    }
    std::fs::hard_link(&names.by_date, &names.by_bcode)?;
    defx!();

    Ok(())
}
