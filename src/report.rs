// src/report.rs

//! Append-only test log
//!
//! The driver records one event per package start and one per outcome. The
//! file sink writes the same line format the harness has always used, so old
//! and new runs can share one `autotest.log`:
//!
//! ```text
//! 2026-03-02 10:15:42,118 [INFO]: New test begin
//! 2026-03-02 10:16:03,940 [INFO]: Stripped OK on zlib, Remained/Original code: 61.532100%.
//! 2026-03-02 10:16:09,401 [ERROR]: Failed to strip package: bash (output in bash/stripcc.out)
//! ```

use crate::error::{Error, Result};
use crate::package::FailureKind;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// A recorded event
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    RunStarted,
    PackageStarted { package: String },
    PackageSucceeded { package: String, remaining_ratio: f64 },
    PackageFailed {
        package: String,
        kind: FailureKind,
        message: String,
    },
}

impl ReportEvent {
    fn level(&self) -> &'static str {
        match self {
            Self::PackageFailed { .. } => "ERROR",
            _ => "INFO",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::RunStarted => "New test begin".to_string(),
            Self::PackageStarted { package } => format!("Testing package: {}", package),
            Self::PackageSucceeded {
                package,
                remaining_ratio,
            } => format!(
                "Stripped OK on {}, Remained/Original code: {:.6}%.",
                package, remaining_ratio
            ),
            Self::PackageFailed {
                package,
                kind: FailureKind::StripTool,
                message,
            } => format!("Failed to strip package: {} ({})", package, message),
            Self::PackageFailed {
                package,
                kind,
                message,
            } => format!("Error on package: {}, {}: {}", package, kind, message),
        }
    }
}

/// Destination for test events
pub trait ReportSink {
    fn record(&mut self, event: ReportEvent) -> Result<()>;
}

/// Appends timestamped lines to a writer
pub struct LogFileSink<W: Write> {
    writer: W,
}

impl LogFileSink<File> {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::Report(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> LogFileSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for LogFileSink<W> {
    fn record(&mut self, event: ReportEvent) -> Result<()> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        // Multi-line failure details stay on one log line
        let message = event.message().replace('\n', " | ");

        writeln!(self.writer, "{} [{}]: {}", timestamp, event.level(), message)
            .and_then(|_| self.writer.flush())
            .map_err(|e| Error::Report(e.to_string()))
    }
}

/// Keeps events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<ReportEvent>,
}

impl ReportSink for MemorySink {
    fn record(&mut self, event: ReportEvent) -> Result<()> {
        self.events.push(event);
        Ok(())
    }
}
