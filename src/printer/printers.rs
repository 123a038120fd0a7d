// src/printer/printers.rs

//! Specialized printer struct [`PrinterReport`] and helper functions for
//! printing a [`Report`] to the terminal.
//!
//! [`PrinterReport`]: self::PrinterReport
//! [`Report`]: crate::printer::report::Report

use crate::debug::printers::de_err;
use crate::printer::report::{Report, ReportLine, ReportLineKind};

use std::io::{
    Result,
    Write, // for `std::io::Stdout.flush`
};

#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, WriteColor};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for the lines of passed phases.
///
/// [`Color`]: https://docs.rs/termcolor/1.1.3/termcolor/enum.Color.html
pub const COLOR_PASS: Color = Color::Green;

/// [`Color`] for the lines of failed phases.
///
/// [`Color`]: https://docs.rs/termcolor/1.1.3/termcolor/enum.Color.html
pub const COLOR_FAIL: Color = Color::Red;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterReport
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A printer specialized for [`Report`s]; phase lines are colored by
/// whether the phase passed.
///
/// [`Report`s]: crate::printer::report::Report
pub struct PrinterReport {
    /// termcolor handle to stdout
    stdout_color: termcolor::StandardStream,
    /// termcolor::ColorChoice
    color_choice: ColorChoice,
    color_spec_pass: ColorSpec,
    color_spec_fail: ColorSpec,
}

impl std::fmt::Debug for PrinterReport {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter,
    ) -> std::fmt::Result {
        f.debug_struct("PrinterReport")
            .field("color_choice", &self.color_choice)
            .finish()
    }
}

impl PrinterReport {
    pub fn new(color_choice: ColorChoice) -> PrinterReport {
        let mut color_spec_pass = ColorSpec::new();
        color_spec_pass.set_fg(Some(COLOR_PASS));
        let mut color_spec_fail = ColorSpec::new();
        color_spec_fail.set_fg(Some(COLOR_FAIL));

        PrinterReport {
            stdout_color: termcolor::StandardStream::stdout(color_choice),
            color_choice,
            color_spec_pass,
            color_spec_fail,
        }
    }

    pub fn color_choice(&self) -> ColorChoice {
        self.color_choice
    }

    /// Print `report` to stdout.
    pub fn print_report(
        &mut self,
        report: &Report,
    ) -> Result<()> {
        defñ!("{} lines", report.lines().len());
        let _stderr_lock = std::io::stderr().lock();
        let mut out = self.stdout_color.lock();

        write_report(&mut out, report, &self.color_spec_pass, &self.color_spec_fail)
    }
}

/// Write one line with `color_spec`, or uncolored for `None`.
fn write_line<W: WriteColor>(
    out: &mut W,
    line: &ReportLine,
    color_spec: Option<&ColorSpec>,
) -> Result<()> {
    if let Some(spec) = color_spec {
        if let Err(err) = out.set_color(spec) {
            de_err!("write_line: out.set_color({:?}) returned error {}", spec, err);
            return Err(err);
        }
    }
    out.write_all(line.text.as_bytes())?;
    if color_spec.is_some() {
        out.reset()?;
    }
    out.write_all(b"\n")
}

/// Write `report` to `out`, pass lines with `pass`, fail lines with `fail`.
pub fn write_report<W: WriteColor>(
    out: &mut W,
    report: &Report,
    pass: &ColorSpec,
    fail: &ColorSpec,
) -> Result<()> {
    for line in report.lines() {
        let spec = match line.kind {
            ReportLineKind::Plain => None,
            ReportLineKind::Pass => Some(pass),
            ReportLineKind::Fail => Some(fail),
        };
        write_line(out, line, spec)?;
    }
    out.flush()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Safely write the `buffer` to stdout with help of [`StdoutLock`].
///
/// [`StdoutLock`]: std::io::StdoutLock
pub fn write_stdout(buffer: &[u8]) {
    let stdout = std::io::stdout();
    let mut stdout_lock = stdout.lock();
    let _stderr_lock = std::io::stderr().lock();
    match stdout_lock.write(buffer) {
        Ok(_) => {}
        Err(_err) => {
            // XXX: this will print when this program stdout is truncated, like to due to `head`
            //          Broken pipe (os error 32)
            de_err!("stdout_lock.write(buffer@{:p} (len {})) error {}", buffer, buffer.len(), _err);
        }
    }
    match stdout_lock.flush() {
        Ok(_) => {}
        Err(_err) => {
            de_err!("stdout_lock.flush() error {}", _err);
        }
    }
}
