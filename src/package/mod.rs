// src/package/mod.rs

//! Package test cycle
//!
//! A package test takes one third-party C package through:
//! - **Load**: read the package script into a [`PackageDescriptor`]
//! - **Reset**: remove a previously extracted tree
//! - **Extract**: unpack the archive with the system `tar`
//! - **Baseline**: count `.c`/`.h` lines
//! - **Pre-build / Build**: run `pre_make`, then `make` and `clean`
//! - **Strip**: run stripcc in fast mode against the built tree
//! - **Measure**: count again and report the remaining percentage
//!
//! Every external command runs in an explicit directory; the process working
//! directory is never changed.

mod archive;
mod command;
mod count;
mod descriptor;
mod outcome;
mod runner;
mod strip;

pub use archive::{extract_archive, ArchiveFormat};
pub use command::{run_shell, run_shell_to_file, CommandOutput};
pub use count::{count_file_lines, count_source_lines};
pub use descriptor::{
    PackageDescriptor, DEFAULT_CLEAN, DEFAULT_MAKE, DEFAULT_PRE_MAKE, KEY_CLEAN, KEY_MAKE,
    KEY_MAKE_DIR, KEY_PACKAGE, KEY_PRE_MAKE, KEY_TOPDIR,
};
pub use outcome::{FailureKind, TestFailure, TestOutcome, TestReport, TestStage};
pub use runner::PackageTestRunner;
pub use strip::StripInvocation;
