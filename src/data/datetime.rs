// src/data/datetime.rs

//! Implements [`Timestamp`] and the extraction of a `Timestamp` from the
//! fixed prefix of an instrument log line.
//!
//! Every instrument log line begins with the same whitespace-separated
//! fields:
//!
//! ```text
//! Jan  5 14:22:01.123 ucm 0412 cct032_2024-01-05T14:22:01 :USER: Start
//! ^^^ ^^ ^^^^^^^^            ^^^^^^^^^^^^^^^^^
//! |   |  |                   field 5, characters 7..11 are the year
//! |   |  time, first 8 characters are hh:mm:ss
//! |   day
//! month
//! ```
//!
//! There is no flexible date parsing; a line without this prefix is a
//! [`ScanError::MalformedLog`].
//!
//! [`Timestamp`]: crate::data::datetime::Timestamp
//! [`ScanError::MalformedLog`]: crate::common::ScanError::MalformedLog

use crate::common::{FileOffset, ResultScan, ScanError};
use crate::readers::logbuffer::LogBuffer;

use std::fmt;

use ::bstr::ByteSlice; // provides `fields` on `&[u8]`
#[doc(hidden)]
pub use ::chrono::{NaiveDate, NaiveTime};
use ::phf::phf_map;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Three-letter month abbreviation to month number.
static MONTH_NUMBERS: phf::Map<&'static str, u32> = phf_map! {
    "Jan" => 1,
    "Feb" => 2,
    "Mar" => 3,
    "Apr" => 4,
    "May" => 5,
    "Jun" => 6,
    "Jul" => 7,
    "Aug" => 8,
    "Sep" => 9,
    "Oct" => 10,
    "Nov" => 11,
    "Dec" => 12,
};

/// Index of the month field.
const FIELD_MONTH: usize = 0;
/// Index of the day field.
const FIELD_DAY: usize = 1;
/// Index of the time field.
const FIELD_TIME: usize = 2;
/// Index of the field that carries the year.
const FIELD_YEAR: usize = 5;
/// Characters of the time field used, `hh:mm:ss`.
const TIME_LEN: usize = 8;
/// Characters of field [`FIELD_YEAR`] that are the year.
const YEAR_RANGE: std::ops::Range<usize> = 7..11;

/// Format of the date as printed in reports.
pub const DATE_FORMAT: &str = "%m/%d/%Y";
/// Format of the time as printed in reports.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// The date and clock time of one log line.
///
/// A fully copied value; it does not refer to the [`LogBuffer`] it was read
/// from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Timestamp {
    date: NaiveDate,
    time: NaiveTime,
}

/// A `Timestamp` or "no anchoring line".
pub type TimestampOpt = Option<Timestamp>;

impl Timestamp {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
    ) -> Timestamp {
        Timestamp { date, time }
    }

    /// Convenience constructor, `None` for an impossible date or time.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Timestamp> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, min, sec)?;

        Some(Timestamp::new(date, time))
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// `MM/DD/YYYY`
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// `hh:mm:ss`
    pub fn time_string(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{} {}", self.date.format(DATE_FORMAT), self.time.format(TIME_FORMAT))
    }
}

/// `&[u8]` field to `&str`, or a `MalformedLog` naming `what`.
fn field_str<'a>(
    buffer: &LogBuffer,
    offset: FileOffset,
    field: &'a [u8],
    what: &str,
) -> ResultScan<&'a str> {
    match std::str::from_utf8(field) {
        Ok(val) => Ok(val),
        Err(_) => Err(ScanError::malformed(buffer.path(), offset, format!("{} field is not text", what))),
    }
}

/// Parse the [`Timestamp`] of the log line that contains `offset`.
///
/// The line begins after the last newline before `offset`. Only the part of
/// the line before `offset` is examined, so `offset` is typically the offset
/// of some marker found on that line.
pub fn timestamp_at(
    buffer: &LogBuffer,
    offset: FileOffset,
) -> ResultScan<Timestamp> {
    defn!("({:?}, {})", buffer.path(), offset);
    let line_beg: FileOffset = match buffer.rfind_newline_before(offset) {
        Some(at) => at,
        None => {
            defx!("no newline before offset {}", offset);
            return Err(ScanError::malformed(buffer.path(), offset, "can't locate beginning of the line"));
        }
    };
    let end: FileOffset = std::cmp::min(offset, buffer.len());
    let segment: &[u8] = buffer.slice(line_beg, end)?;
    let fields: Vec<&[u8]> = segment
        .fields()
        .collect();
    defo!("{} fields", fields.len());
    if fields.len() <= FIELD_YEAR {
        defx!("too few fields {}", fields.len());
        return Err(ScanError::malformed(
            buffer.path(),
            offset,
            format!("line has {} fields before the offset, need {}", fields.len(), FIELD_YEAR + 1),
        ));
    }

    let month_s = field_str(buffer, offset, fields[FIELD_MONTH], "month")?;
    let month: u32 = match MONTH_NUMBERS.get(month_s) {
        Some(val) => *val,
        None => {
            defx!("bad month {:?}", month_s);
            return Err(ScanError::malformed(buffer.path(), offset, format!("unknown month {:?}", month_s)));
        }
    };

    let day_s = field_str(buffer, offset, fields[FIELD_DAY], "day")?;
    let day: u32 = match day_s.parse::<u32>() {
        Ok(val) => val,
        Err(_) => {
            defx!("bad day {:?}", day_s);
            return Err(ScanError::malformed(buffer.path(), offset, format!("bad day {:?}", day_s)));
        }
    };

    let year_field = field_str(buffer, offset, fields[FIELD_YEAR], "year")?;
    let year: i32 = match year_field
        .get(YEAR_RANGE)
        .and_then(|year_s| year_s.parse::<i32>().ok())
    {
        Some(val) => val,
        None => {
            defx!("bad year field {:?}", year_field);
            return Err(ScanError::malformed(buffer.path(), offset, format!("no year in {:?}", year_field)));
        }
    };
    let date: NaiveDate = match NaiveDate::from_ymd_opt(year, month, day) {
        Some(val) => val,
        None => {
            defx!("bad date {}-{}-{}", year, month, day);
            return Err(ScanError::malformed(
                buffer.path(),
                offset,
                format!("impossible date {}-{:02}-{:02}", year, month, day),
            ));
        }
    };

    let time_field = field_str(buffer, offset, fields[FIELD_TIME], "time")?;
    let time: NaiveTime = match time_field
        .get(..TIME_LEN)
        .and_then(|time_s| NaiveTime::parse_from_str(time_s, TIME_FORMAT).ok())
    {
        Some(val) => val,
        None => {
            defx!("bad time field {:?}", time_field);
            return Err(ScanError::malformed(buffer.path(), offset, format!("bad time {:?}", time_field)));
        }
    };

    let ts = Timestamp::new(date, time);
    defx!("return {}", ts);

    Ok(ts)
}
