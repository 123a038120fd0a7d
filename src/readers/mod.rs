// src/readers/mod.rs

//! "Readers" for _qcrlib_.
//!
//! ## Overview of readers
//!
//! * A [`RunProcessor`] drives the stages of one log file, from the run
//!   start to a [`RunRecord`].
//! * The [`run locator`] and the [`specimen extractor`] read the log file the
//!   run began in.
//! * A [`PhaseScanner`] chases one phase through the log files of the run,
//!   moving a [`ScanCursor`] from file to file as the [`ChainResolver`]
//!   directs. The five phases are configured in [`phases`].
//! * A [`LogBuffer`] only handles `u8` bytes. Text is only decoded for
//!   values that are reported, such as the barcode.
//!
//! <br/>
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! ---
//!
//! The _qcr_ binary program uses a [`RunProcessor`] instance, one per file
//! in the log directory.
//!
//! [_Definitions of data_]: crate::data
//! [`RunRecord`]: crate::data::runrecord::RunRecord
//! [`RunProcessor`]: crate::readers::runprocessor::RunProcessor
//! [`run locator`]: crate::readers::runlocator
//! [`specimen extractor`]: crate::readers::specimen
//! [`PhaseScanner`]: crate::readers::phasescanner::PhaseScanner
//! [`ScanCursor`]: crate::readers::filechain::ScanCursor
//! [`ChainResolver`]: crate::readers::filechain::ChainResolver
//! [`phases`]: crate::readers::phases
//! [`LogBuffer`]: crate::readers::logbuffer::LogBuffer

pub mod filechain;
pub mod helpers;
pub mod logbuffer;
pub mod phases;
pub mod phasescanner;
pub mod runlocator;
pub mod runprocessor;
pub mod specimen;
