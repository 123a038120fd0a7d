// src/bin/qcr.rs

//! Driver program _qcr_ drives the [_qcrlib_].
//!
//! Processes user-passed command-line arguments into a [`ReportConfig`].
//! Then enumerates the log files of the log directory of one instrument and
//! one day. Each log file is processed by a [`RunProcessor`]; the run it
//! began is chased through its successor log files.
//!
//! For each run a report is printed to stdout and, unless passed
//! `--no-report-files`, written to the report directory.
//!
//! A log file without a run begin marker is not a run and is skipped.
//! A run that fails to scan is reported as far as it was scanned, and the
//! next log file is processed.
//!
//! [_qcrlib_]: qcrlib
//! [`RunProcessor`]: qcrlib::readers::runprocessor::RunProcessor

#![allow(non_camel_case_types)]

use std::process::ExitCode;

use ::anyhow::Context;
use ::chrono::{Datelike, Duration, Local, NaiveDate};
use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;

use ::qcrlib::common::{FPath, FPaths, PathBuf};
use ::qcrlib::data::datetime::DATE_FORMAT;
use ::qcrlib::data::runrecord::RunRecord;
#[allow(unused_imports)]
use ::qcrlib::debug::printers::{de_err, de_wrn, e_err, e_wrn};
use ::qcrlib::printer::printers::{ColorChoice, PrinterReport, write_stdout};
use ::qcrlib::printer::report::{report_file_names, write_report_files, Report, ReportHeader};
use ::qcrlib::readers::filechain::ChainResolver;
use ::qcrlib::readers::helpers::{fpath_to_path, log_files_in_dir, path_to_fpath};
use ::qcrlib::readers::runprocessor::RunProcessor;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// --------------------
// command-line parsing

const EXIT_ERR: i32 = 1;

/// Root of the uploaded instrument data.
const DATA_ROOT_DEFAULT: &str = "/mnt/lancer/upload/DailyInstrumentData";

/// Format of `--logdate`.
const CLI_LOGDATE_FORMAT: &str = DATE_FORMAT;

#[cfg(debug_assertions)]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "\nDEBUG BUILD";
#[cfg(not(debug_assertions))]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "";

#[cfg(test)]
const CLI_HELP_AFTER_NOTE_TEST: &str = "\nTEST BUILD";
#[cfg(not(test))]
const CLI_HELP_AFTER_NOTE_TEST: &str = "";

/// `--help` _afterword_ message.
const CLI_HELP_AFTER: &str = concatcp!(
    "\
Without --logdir, log files are read from
    <DATA_ROOT>/<INSTR>/gservlog/ucm_logs/<INSTR>_<YYYY><MM>/<DD>
Without --rptdir, report files are written to
    <DATA_ROOT>/<INSTR>/reports/by_date/<LOG>_<BARCODE>_<p|f>.txt
and linked as
    <DATA_ROOT>/<INSTR>/reports/by_bcode/<BARCODE>_<LOG>_<p|f>.txt
",
    CLI_HELP_AFTER_NOTE_DEBUG,
    CLI_HELP_AFTER_NOTE_TEST
);

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.1.3/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "qcr",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(QC Report Chaser)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Instrument host name, e.g. "cct032".
    #[clap(
        required = true,
        short = 'i',
        long = "instr",
        verbatim_doc_comment,
    )]
    instrument: String,

    /// Date of the log files to report, "MM/DD/YYYY".
    /// If not passed then yesterday.
    #[clap(
        short = 'd',
        long = "logdate",
        verbatim_doc_comment,
        value_parser = cli_parse_logdate,
    )]
    logdate: Option<NaiveDate>,

    /// Directory of the log files.
    #[clap(
        short = 'l',
        long = "logdir",
        verbatim_doc_comment,
    )]
    logdir: Option<String>,

    /// Directory report files are written to.
    #[clap(
        short = 'r',
        long = "rptdir",
        verbatim_doc_comment,
    )]
    rptdir: Option<String>,

    /// Root of the instrument data, used for the default --logdir
    /// and --rptdir.
    #[clap(
        long = "data-root",
        verbatim_doc_comment,
        default_value_t = String::from(DATA_ROOT_DEFAULT),
    )]
    data_root: String,

    /// Only print reports, do not write report files.
    #[clap(
        long = "no-report-files",
        verbatim_doc_comment,
        default_value_t = false,
    )]
    no_report_files: bool,

    /// Choose to print using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,
}

/// `clap` argument value parser for `--logdate`.
fn cli_parse_logdate(logdate: &str) -> std::result::Result<NaiveDate, String> {
    match NaiveDate::parse_from_str(logdate, CLI_LOGDATE_FORMAT) {
        Ok(val) => Ok(val),
        Err(err) => Err(format!("Unable to parse {:?} as MM/DD/YYYY; {}", logdate, err)),
    }
}

/// `<data_root>/<instr>/gservlog/ucm_logs/<instr>_<YYYY><MM>/<DD>`
fn default_logdir(
    data_root: &str,
    instrument: &str,
    logdate: &NaiveDate,
) -> FPath {
    let pathb: PathBuf = fpath_to_path(&FPath::from(data_root))
        .join(instrument)
        .join("gservlog")
        .join("ucm_logs")
        .join(format!("{}_{:04}{:02}", instrument, logdate.year(), logdate.month()))
        .join(format!("{:02}", logdate.day()));

    path_to_fpath(pathb.as_path())
}

/// `<data_root>/<instr>/reports`
fn default_rptdir(
    data_root: &str,
    instrument: &str,
) -> FPath {
    let pathb: PathBuf = fpath_to_path(&FPath::from(data_root))
        .join(instrument)
        .join("reports");

    path_to_fpath(pathb.as_path())
}

/// Everything the processing loop needs to know of the command-line.
#[derive(Clone, Debug, Eq, PartialEq)]
struct ReportConfig {
    instrument: String,
    logdate: NaiveDate,
    logdir: FPath,
    rptdir: FPath,
    write_report_files: bool,
    color_choice: ColorChoice,
}

/// Process user-passed CLI argument strings into a [`ReportConfig`].
fn cli_process_args() -> ReportConfig {
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    cli_args_to_config(args)
}

fn cli_args_to_config(args: CLI_Args) -> ReportConfig {
    let logdate: NaiveDate = match args.logdate {
        Some(val) => val,
        None => Local::now().date_naive() - Duration::days(1),
    };
    let logdir: FPath = match args.logdir {
        Some(val) => val,
        None => default_logdir(&args.data_root, &args.instrument, &logdate),
    };
    let rptdir: FPath = match args.rptdir {
        Some(val) => val,
        None => default_rptdir(&args.data_root, &args.instrument),
    };
    // map `CLI_Color_Choice` to `ColorChoice`
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };

    ReportConfig {
        instrument: args.instrument,
        logdate,
        logdir,
        rptdir,
        write_report_files: !args.no_report_files,
        color_choice,
    }
}

// -------------
// report output

/// Write the report files of a completed run.
fn write_files(
    config: &ReportConfig,
    path: &FPath,
    record: &RunRecord,
    report: &Report,
) -> anyhow::Result<()> {
    let names = report_file_names(&config.rptdir, path, record);
    defo!("{:?}", names);
    write_report_files(&names, &report.to_text())
        .with_context(|| format!("writing report {:?} linked as {:?}", names.by_date, names.by_bcode))?;

    Ok(())
}

/// Process the run of one log file, print its report and write the report
/// files. Returns `false` if the run could not be completely processed.
fn process_log_file(
    path: &FPath,
    config: &ReportConfig,
    printer: &mut PrinterReport,
) -> bool {
    defn!("({:?})", path);
    let mut processor = RunProcessor::new(path.clone(), ChainResolver::new(config.logdir.clone()));
    let header = ReportHeader::now(config.instrument.clone());
    let ret: bool;
    match processor.process() {
        Ok(record) => {
            let report = Report::from_record(&header, &record);
            if let Err(err) = printer.print_report(&report) {
                de_err!("print_report {:?}", err);
            }
            ret = match config.write_report_files {
                true => match write_files(config, path, &record, &report) {
                    Ok(_) => true,
                    Err(err) => {
                        e_err!("{:#}", err);
                        false
                    }
                },
                false => true,
            };
        }
        Err(err) if err.is_not_a_run() => {
            de_wrn!("skip {:?}; {}", path, err);
            ret = true;
        }
        Err(err) => {
            e_err!("Incomplete report generated: {}", err);
            let report = Report::assemble(&header, processor.specimen(), processor.phases_done());
            if let Err(err) = printer.print_report(&report) {
                de_err!("print_report {:?}", err);
            }
            ret = false;
        }
    }
    defx!("return {}", ret);

    ret
}

/// Process the user-passed command-line arguments.
/// Process each log file of the log directory.
/// Determine a process return code.
pub fn main() -> ExitCode {
    defn!();
    let config: ReportConfig = cli_process_args();
    defo!("{:?}", config);

    if !fpath_to_path(&config.logdir).is_dir() {
        e_err!("log directory not found {:?} (logdate {})", config.logdir, config.logdate.format(DATE_FORMAT));
        std::process::exit(EXIT_ERR);
    }

    let paths: FPaths = log_files_in_dir(&config.logdir);
    if paths.is_empty() {
        e_wrn!("no log files in {:?}", config.logdir);
    }
    let mut printer = PrinterReport::new(config.color_choice);
    let mut ret: bool = true;
    for path in paths.iter() {
        if !process_log_file(path, &config, &mut printer) {
            ret = false;
        }
        write_stdout(b"\n");
    }
    write_stdout(b"EOF\n");

    let exitcode = if ret { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

// -----
// tests
