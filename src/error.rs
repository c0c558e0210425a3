// src/error.rs

//! Harness-level errors
//!
//! These abort a whole run before any package is tested: a missing strip
//! tool, an unreadable packages directory, or a log that cannot be opened.
//! Write failures on an open log are only reported through `tracing`. Per-package failures never surface here; they are
//! classified as [`crate::package::TestFailure`] and reported as outcomes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Can't locate stripcc: {0}")]
    StripToolNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to write test log: {0}")]
    Report(String),

    #[error("Failed to serialize run summary: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
