// src/printer/mod.rs

//! The `printer` module is for assembling a QC [`Report`] of a run and
//! printing it with text effects (pass lines green, fail lines red), and
//! for writing the report files.
//!
//! [`Report`]: crate::printer::report::Report

pub mod printers;
pub mod report;
