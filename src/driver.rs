// src/driver.rs

//! Driver: run every package under a directory
//!
//! A packages directory holds one sub-directory per package, each with a
//! `script` and the archive it names. stripcc lives next to the packages
//! directory by default:
//!
//! ```text
//! stripcc/
//! ├── stripcc
//! └── testing/
//!     ├── autotest.log
//!     ├── zlib/   (script, zlib-1.2.3.tar.gz)
//!     └── lua/    (script, lua-5.1.4.tar.gz)
//! ```
//!
//! Packages run one after another. A failing package is logged and the run
//! moves on, and so does a log write that fails.

use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::package::{FailureKind, PackageTestRunner, TestOutcome, TestStage};
use crate::report::{ReportEvent, ReportSink};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Default strip tool name, looked up in the parent of the packages directory
pub const STRIP_TOOL_NAME: &str = "stripcc";

/// Sub-directories of `root` containing a `script_name` file, sorted by name
pub fn discover_packages(root: &Path, script_name: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotFound(format!(
            "packages directory {}",
            root.display()
        )));
    }

    let mut packages: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && p.join(script_name).is_file())
        .collect();
    packages.sort();
    Ok(packages)
}

/// Find the strip tool
///
/// An explicit path is used as given; a bare name is searched on `PATH`.
/// Without one, `<parent of root>/stripcc` is expected to exist.
pub fn locate_strip_tool(root: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    let candidate = match explicit {
        Some(tool) if tool.components().count() == 1 && !tool.exists() => {
            return which::which(tool)
                .map_err(|e| Error::StripToolNotFound(format!("{}: {}", tool.display(), e)));
        }
        Some(tool) => tool.to_path_buf(),
        None => {
            let root = fs::canonicalize(root)?;
            root.parent()
                .map(|parent| parent.join(STRIP_TOOL_NAME))
                .ok_or_else(|| {
                    Error::StripToolNotFound(format!("{} has no parent", root.display()))
                })?
        }
    };

    if !candidate.is_file() {
        return Err(Error::StripToolNotFound(candidate.display().to_string()));
    }
    Ok(fs::canonicalize(&candidate)?)
}

/// Outcome of one package in a run
#[derive(Debug, Clone, Serialize)]
pub struct PackageResult {
    pub package: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub stage: TestStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_before: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_after: Option<u64>,
}

/// Results of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub strip_tool: PathBuf,
    pub packages: Vec<PackageResult>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.packages.iter().filter(|p| p.success).count()
    }

    pub fn failed(&self) -> usize {
        self.packages.len() - self.succeeded()
    }

    /// Mean remaining ratio over successful packages
    pub fn mean_ratio(&self) -> Option<f64> {
        let ratios: Vec<f64> = self.packages.iter().filter_map(|p| p.remaining_ratio).collect();
        if ratios.is_empty() {
            None
        } else {
            Some(ratios.iter().sum::<f64>() / ratios.len() as f64)
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs packages in sequence and reports each outcome
pub struct Driver<'a> {
    runner: PackageTestRunner,
    strip_tool: PathBuf,
    sink: &'a mut dyn ReportSink,
}

impl<'a> Driver<'a> {
    pub fn new(config: HarnessConfig, strip_tool: PathBuf, sink: &'a mut dyn ReportSink) -> Self {
        Self {
            runner: PackageTestRunner::new(config),
            strip_tool,
            sink,
        }
    }

    /// Run every package under `root`, optionally restricted to `only`
    pub fn run_all(&mut self, root: &Path, only: &[String]) -> Result<RunSummary> {
        let packages = discover_packages(root, &self.runner.config().script_name)?;
        let selected: Vec<PathBuf> = packages
            .into_iter()
            .filter(|p| only.is_empty() || only.iter().any(|name| *name == package_name(p)))
            .collect();

        info!(
            "Testing {} package(s) with {}",
            selected.len(),
            self.strip_tool.display()
        );
        self.record(ReportEvent::RunStarted);

        let mut summary = RunSummary {
            started_at: Utc::now(),
            strip_tool: self.strip_tool.clone(),
            packages: Vec::with_capacity(selected.len()),
        };

        for package_dir in &selected {
            summary.packages.push(self.run_one(package_dir));
        }

        info!(
            "Run finished: {} succeeded, {} failed",
            summary.succeeded(),
            summary.failed()
        );
        Ok(summary)
    }

    /// Run a single package directory and record the outcome
    pub fn run_one(&mut self, package_dir: &Path) -> PackageResult {
        let package = package_name(package_dir);
        info!("Testing package: {}", package);
        self.record(ReportEvent::PackageStarted {
            package: package.clone(),
        });

        let report = self.runner.run_report(package_dir, &self.strip_tool);
        let mut result = PackageResult {
            package: package.clone(),
            success: report.outcome.is_success(),
            remaining_ratio: report.outcome.remaining_ratio(),
            failure: report.outcome.failure_kind(),
            message: None,
            stage: report.stage,
            lines_before: report.lines_before,
            lines_after: report.lines_after,
        };

        let event = match &report.outcome {
            TestOutcome::Success { remaining_ratio } => {
                info!(
                    "Stripped OK on {}, Remained/Original code: {:.2}%",
                    package, remaining_ratio
                );
                ReportEvent::PackageSucceeded {
                    package,
                    remaining_ratio: *remaining_ratio,
                }
            }
            TestOutcome::StripFailure { output } => {
                let message = format!("output in {}", output.display());
                error!("Failed to strip package: {} ({})", package, message);
                result.message = Some(message.clone());
                ReportEvent::PackageFailed {
                    package,
                    kind: FailureKind::StripTool,
                    message,
                }
            }
            TestOutcome::GenericFailure(failure) => {
                let message = failure.to_string();
                error!("Error on package: {}, {}", package, message);
                result.message = Some(message.clone());
                ReportEvent::PackageFailed {
                    package,
                    kind: failure.kind(),
                    message,
                }
            }
        };
        self.record(event);

        result
    }

    fn record(&mut self, event: ReportEvent) {
        if let Err(e) = self.sink.record(event) {
            error!("{}", e);
        }
    }
}

fn package_name(package_dir: &Path) -> String {
    package_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| package_dir.display().to_string())
}
