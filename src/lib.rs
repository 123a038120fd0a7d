// src/lib.rs

//! _qcrlib_ chases an analyzer run across chained instrument log files and
//! reports pass or fail for each qualification phase of the run.
//!
//! The library is used by the binary program _qcr_. It is driven per log
//! file by a [`RunProcessor`].
//!
//! [`RunProcessor`]: crate::readers::runprocessor::RunProcessor

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
