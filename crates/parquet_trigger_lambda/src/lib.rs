//! AWS-oriented adapters and handlers for the upload-triggered parquet
//! conversion.
//!
//! This crate owns runtime integration details (Lambda handler, storage and
//! batch-job adapters, configuration, log setup) and exposes a single runtime
//! module boundary for the contract, selection, and outcome primitives.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;
