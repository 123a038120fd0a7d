// src/readers/specimen.rs

//! Extracts the [`Specimen`] a run was declared for.
//!
//! The instrument logs a `spe specimen` entry when a specimen is loaded
//! followed by its attributes as `keyword=value` pairs:
//!
//! ```text
//! Jan  5 14:22:03.000 ucm 0412 cct032_2024-01-05T14:22:03 spe specimen
//! Jan  5 14:22:03.010 ucm 0412 cct032_2024-01-05T14:22:03 specimencategory=QC disposable=B123456
//! ```
//!
//! [`Specimen`]: crate::data::runrecord::Specimen

use crate::common::{is_field_sep, FileOffset, ResultScan, ScanError, SpecimenField};
use crate::data::datetime::{timestamp_at, TimestampOpt};
use crate::data::runrecord::Specimen;
use crate::readers::logbuffer::LogBuffer;

use ::bstr::ByteSlice; // provides `to_str_lossy` on `&[u8]`
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Specimen declaration entry.
pub const MARKER_SPECIMEN: &[u8] = b"spe specimen";
/// Keyword of the specimen category.
pub const KEYWORD_CATEGORY: &[u8] = b"specimencategory=";
/// Keyword of the barcode of the disposable.
pub const KEYWORD_BARCODE: &[u8] = b"disposable=";

/// Offset and value of `keyword=value` found at or after `from`.
fn keyword_value<'a>(
    buffer: &'a LogBuffer,
    keyword: &[u8],
    from: FileOffset,
    field: SpecimenField,
) -> ResultScan<(FileOffset, &'a [u8])> {
    let at: FileOffset = match buffer.find(keyword, from) {
        Some(val) => val,
        None => {
            defo!("no {:?} after {}", keyword.as_bstr(), from);
            return Err(ScanError::MissingField {
                path: buffer.path().clone(),
                field,
            });
        }
    };
    let value_beg: FileOffset = at + keyword.len();
    let value_end: FileOffset = match buffer.as_bytes()[value_beg..]
        .iter()
        .position(|b| is_field_sep(*b))
    {
        Some(len) => value_beg + len,
        None => buffer.len(),
    };

    Ok((value_beg, buffer.slice(value_beg, value_end)?))
}

/// Find the specimen declared for the run that begins at `run_start`.
///
/// The timestamp of the specimen is the timestamp of the line carrying the
/// barcode. A barcode line without the fixed log line prefix is a
/// [`ScanError::MalformedLog`].
pub fn extract_specimen(
    buffer: &LogBuffer,
    run_start: FileOffset,
) -> ResultScan<Specimen> {
    defn!("({:?}, {})", buffer.path(), run_start);
    let decl_at: FileOffset = match buffer.find(MARKER_SPECIMEN, run_start) {
        Some(val) => val,
        None => {
            defx!("no specimen declaration");
            return Err(ScanError::MissingField {
                path: buffer.path().clone(),
                field: SpecimenField::Declaration,
            });
        }
    };
    let attrs_at: FileOffset = buffer.line_end(decl_at);

    let (_, category) = keyword_value(buffer, KEYWORD_CATEGORY, attrs_at, SpecimenField::Category)?;
    let (barcode_at, barcode) = keyword_value(buffer, KEYWORD_BARCODE, attrs_at, SpecimenField::Barcode)?;
    let timestamp: TimestampOpt = Some(timestamp_at(buffer, barcode_at)?);

    let specimen = Specimen {
        barcode: barcode.to_str_lossy().into_owned(),
        category: category.to_str_lossy().into_owned(),
        timestamp,
    };
    defx!("return {:?}", specimen);

    Ok(specimen)
}
