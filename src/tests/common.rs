// src/tests/common.rs

//! Common data and helpers for tests; instrument log lines and log files.

#![allow(non_upper_case_globals)]

use crate::common::FPath;
use crate::data::datetime::Timestamp;
use crate::readers::logbuffer::LogBuffer;

use ::rand::seq::SliceRandom;
use ::rand::rng;

/// The first line of every test log file. Log lines following it can be
/// timestamped; a log line needs a newline before it.
pub const LOG_PREAMBLE: &str = "ucm log opened\n";

/// An instrument log line at `Jan 5 2024 <hms>` with message `body`, e.g.
///
/// ```text
/// Jan  5 14:22:01.000 ucm 0412 cct032_2024-01-05T14:22:01 :USER: Start
/// ```
pub fn logline(
    hms: &str,
    body: &str,
) -> String {
    format!("Jan  5 {}.000 ucm 0412 cct032_2024-01-05T{} {}\n", hms, hms, body)
}

/// A log file; [`LOG_PREAMBLE`] then one [`logline`] per `(hms, body)`.
pub fn logfile(lines: &[(&str, &str)]) -> String {
    let mut data = String::from(LOG_PREAMBLE);
    for (hms, body) in lines.iter() {
        data.push_str(&logline(hms, body));
    }

    data
}

/// In-memory [`LogBuffer`] of `data`.
pub fn logbuffer(data: &str) -> LogBuffer {
    LogBuffer::from_bytes(FPath::from("/test/ucm_0130.log"), data.as_bytes().to_vec())
}

/// `Timestamp` on `Jan 5 2024`, `hms` is `"hh:mm:ss"`.
pub fn ts_jan5(hms: &str) -> Timestamp {
    let mut parts = hms.split(':').map(|part| part.parse::<u32>().unwrap());
    let h = parts.next().unwrap();
    let m = parts.next().unwrap();
    let s = parts.next().unwrap();

    Timestamp::from_ymd_hms(2024, 1, 5, h, m, s).unwrap()
}

/// Offset of the first `needle` in `data`.
pub fn offset_of(
    data: &str,
    needle: &str,
) -> usize {
    match data.find(needle) {
        Some(at) => at,
        None => panic!("{:?} not in test data", needle),
    }
}

/// Randomize the order of `lines`.
pub fn randomize<T>(lines: &mut [T]) {
    lines.shuffle(&mut rng());
}
