//! Domain primitives for the upload-triggered parquet conversion.
//!
//! This crate owns the notification contract, file selection, job launch
//! request construction, and the outcome-to-status mapping. It intentionally
//! excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod outcome;
pub mod selection;
