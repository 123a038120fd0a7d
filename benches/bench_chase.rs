// bench_chase.rs
//
// benchmark functions of `crate::readers::runprocessor` and the phase scans
//

#![allow(non_snake_case)]

extern crate qcrlib;

use qcrlib::common::FPath;
use qcrlib::readers::filechain::{ChainResolver, ScanCursor};
use qcrlib::readers::helpers::path_to_fpath;
use qcrlib::readers::logbuffer::LogBuffer;
use qcrlib::readers::phases::{scan_find_capillary, CONFIG_PRESSURE_VELOCITY};
use qcrlib::readers::phasescanner::scan_phase;
use qcrlib::readers::runlocator::locate_run_start;
use qcrlib::readers::runprocessor::process_log_file;
use qcrlib::readers::specimen::extract_specimen;

extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// busy lines between the interesting ones
const FILLER_LINES: usize = 2000;

fn logline(
    data: &mut String,
    hms: &str,
    body: &str,
) {
    data.push_str(&format!("Jan  5 {}.000 ucm 0412 cct032_2024-01-05T{} {}\n", hms, hms, body));
}

fn filler(data: &mut String) {
    for i in 0..FILLER_LINES {
        logline(data, "14:00:30", &format!("ucm busy motor=3 step={} temperature=21.5", i));
    }
}

/// One run; the interesting lines far apart.
fn run_log(successor: Option<&str>) -> String {
    let mut data = String::from("ucm log opened\n");
    logline(&mut data, "13:00:00", ":USER: Start");
    filler(&mut data);
    logline(&mut data, "14:00:00", ":USER: Restart");
    logline(&mut data, "14:00:05", "spe specimen");
    logline(&mut data, "14:00:06", "specimencategory=QC disposable=B123456");
    filler(&mut data);
    logline(&mut data, "14:03:00", ":USER: Coarse Focus Control  RESET");
    logline(&mut data, "14:05:00", ":cal success");
    filler(&mut data);
    match successor {
        Some(name) => logline(&mut data, "14:09:59", &format!(":n3d {}", name)),
        None => logline(&mut data, "14:11:00", "Pressure/PumpPos Slope 0.52"),
    }

    data
}

fn successor_log() -> String {
    let mut data = String::from("ucm log opened\n");
    filler(&mut data);
    logline(&mut data, "14:11:00", "Pressure/PumpPos Slope 0.52");
    logline(&mut data, "14:21:00", "cal mode=capcal status=success");
    filler(&mut data);
    logline(&mut data, "14:30:00", ":pse started");

    data
}

fn buffer(data: &[u8]) -> LogBuffer {
    LogBuffer::from_bytes(FPath::from("/bench/ucm_0130.log"), data.to_vec())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[inline(never)]
fn bench_locate_and_extract(buffer: &LogBuffer) {
    let at = locate_run_start(buffer).unwrap();
    let specimen = extract_specimen(buffer, at).unwrap();
    black_box(specimen);
}

#[inline(never)]
fn bench_first_phases(
    data: &[u8],
    resolver: &ChainResolver,
) {
    let at = locate_run_start(&buffer(data)).unwrap();
    let outcome = scan_find_capillary(resolver, ScanCursor::new(buffer(data), at)).unwrap();
    black_box(outcome);
    let outcome = scan_phase(&CONFIG_PRESSURE_VELOCITY, resolver, ScanCursor::new(buffer(data), at)).unwrap();
    black_box(outcome);
}

#[inline(never)]
fn bench_process_log_file(
    path: &FPath,
    logdir: &FPath,
) {
    let record = process_log_file(path, logdir).unwrap();
    black_box(record);
}

fn criterion_benchmark(c: &mut Criterion) {
    let data: Vec<u8> = run_log(None).into_bytes();
    let buffer1 = buffer(&data);
    let resolver = ChainResolver::new(FPath::from("/bench"));
    c.bench_function("locate_run_start extract_specimen", |b| b.iter(|| bench_locate_and_extract(&buffer1)));
    c.bench_function("scan_find_capillary scan_phase", |b| b.iter(|| bench_first_phases(&data, &resolver)));

    let tmpdir = tempfile::tempdir().unwrap();
    let path = tmpdir.path().join("ucm_0130.log");
    std::fs::write(&path, run_log(Some("ucm_0131"))).unwrap();
    std::fs::write(tmpdir.path().join("ucm_0131.log"), successor_log()).unwrap();
    let path = path_to_fpath(&path);
    let logdir = path_to_fpath(tmpdir.path());
    c.bench_function("process_log_file chain of 2", |b| b.iter(|| bench_process_log_file(&path, &logdir)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
