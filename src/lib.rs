// src/lib.rs

//! stripcc regression harness
//!
//! Builds real third-party C packages, runs stripcc against each build and
//! reports how much of the original `.c`/`.h` code survives.
//!
//! # Architecture
//!
//! - `conf`: package script parser (global keys plus `[sections]`)
//! - `package`: the per-package test cycle (extract, build, strip, measure)
//! - `driver`: runs every package under a directory, one after another
//! - `report`: append-only test log

pub mod conf;
pub mod config;
pub mod driver;
mod error;
pub mod package;
pub mod report;

pub use conf::{ConfError, ConfStore};
pub use config::HarnessConfig;
pub use driver::{discover_packages, locate_strip_tool, Driver, PackageResult, RunSummary};
pub use error::{Error, Result};
pub use package::{
    FailureKind, PackageDescriptor, PackageTestRunner, TestFailure, TestOutcome, TestReport,
    TestStage,
};
pub use report::{LogFileSink, MemorySink, ReportEvent, ReportSink};
