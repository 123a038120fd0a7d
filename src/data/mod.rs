// src/data/mod.rs

//! The `data` module is specialized data containers for the outcome of
//! scanning an instrument run.
//!
//! ## Definitions of data
//!
//! ### Log line
//!
//! A "log line" is a sequence of bytes that:
//!
//! * begin after a newline `'\n'`.
//! * begin with the fixed instrument prefix "month day time … year".
//!
//! The prefix is parsed into a [`Timestamp`].
//!
//! ### Run
//!
//! A "run" is one instrument execution. It begins at the last run begin
//! marker of a log file and ends implicitly in the last log file of the
//! chain of `:n3d` pointers.
//!
//! ### Phase
//!
//! A "phase" is one of five qualification steps of a run. Each is resolved
//! to a [`PhaseResult`].
//!
//! A run is summarized by a [`RunRecord`].
//!
//! Also see [_Overview of readers_].
//!
//! [_Overview of readers_]: crate::readers
//! [`Timestamp`]: crate::data::datetime::Timestamp
//! [`PhaseResult`]: crate::data::phaseresult::PhaseResult
//! [`RunRecord`]: crate::data::runrecord::RunRecord

pub mod datetime;
pub mod phaseresult;
pub mod runrecord;
