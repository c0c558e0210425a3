// src/package/outcome.rs

//! Package test results and failure classification

use crate::conf::ConfError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::descriptor::PackageDescriptor;

/// Why a package test stopped
#[derive(Error, Debug)]
pub enum TestFailure {
    #[error("Failed to load package script: {0}")]
    Config(#[from] ConfError),

    #[error("Unknown package type: {0}")]
    UnknownPackageType(String),

    #[error("Failed to decompress {archive}: {detail}")]
    Extraction { archive: String, detail: String },

    #[error("Failed to prepare for make: {0}")]
    Prepare(String),

    #[error("Failed to make: {0}")]
    Build(String),

    /// stripcc itself failed; the package built fine without it
    #[error("Failed to strip ({status}), output in {}", .output.display())]
    StripTool { status: String, output: PathBuf },

    #[error("No source lines found under {}", .0.display())]
    EmptyBaseline(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TestFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Config(_) => FailureKind::Config,
            Self::UnknownPackageType(_) => FailureKind::UnknownPackageType,
            Self::Extraction { .. } => FailureKind::Extraction,
            Self::Prepare(_) => FailureKind::Prepare,
            Self::Build(_) => FailureKind::Build,
            Self::StripTool { .. } => FailureKind::StripTool,
            Self::EmptyBaseline(_) => FailureKind::EmptyBaseline,
            Self::Io(_) => FailureKind::Io,
        }
    }
}

/// Failure classes, as written to the log and the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    Config,
    UnknownPackageType,
    Extraction,
    Prepare,
    Build,
    StripTool,
    EmptyBaseline,
    Io,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::UnknownPackageType => "unknown-package-type",
            Self::Extraction => "extraction",
            Self::Prepare => "prepare",
            Self::Build => "build",
            Self::StripTool => "strip-tool",
            Self::EmptyBaseline => "empty-baseline",
            Self::Io => "io",
        }
    }

    /// True for failures caused by the package's own build
    pub fn is_package_fault(&self) -> bool {
        matches!(
            self,
            Self::UnknownPackageType | Self::Extraction | Self::Prepare | Self::Build
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stages of a package test, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestStage {
    Start,
    DescriptorLoaded,
    WorkspaceReset,
    Extracted,
    BaselineMeasured,
    PreBuilt,
    Built,
    Stripped,
    Measured,
}

impl TestStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::DescriptorLoaded => "descriptor-loaded",
            Self::WorkspaceReset => "workspace-reset",
            Self::Extracted => "extracted",
            Self::BaselineMeasured => "baseline-measured",
            Self::PreBuilt => "pre-built",
            Self::Built => "built",
            Self::Stripped => "stripped",
            Self::Measured => "measured",
        }
    }
}

impl fmt::Display for TestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one package test
#[derive(Debug)]
pub enum TestOutcome {
    /// Remaining/original `.c`/`.h` lines, as a percentage
    Success { remaining_ratio: f64 },
    /// stripcc exited non-zero; its output is in `output`
    StripFailure { output: PathBuf },
    /// Anything else, including the package's own build failures
    GenericFailure(TestFailure),
}

impl TestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn remaining_ratio(&self) -> Option<f64> {
        match self {
            Self::Success { remaining_ratio } => Some(*remaining_ratio),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::StripFailure { .. } => Some(FailureKind::StripTool),
            Self::GenericFailure(failure) => Some(failure.kind()),
        }
    }
}

impl From<Result<f64, TestFailure>> for TestOutcome {
    fn from(result: Result<f64, TestFailure>) -> Self {
        match result {
            Ok(remaining_ratio) => Self::Success { remaining_ratio },
            Err(TestFailure::StripTool { output, .. }) => Self::StripFailure { output },
            Err(failure) => Self::GenericFailure(failure),
        }
    }
}

/// Outcome plus what the runner learned on the way
#[derive(Debug)]
pub struct TestReport {
    pub outcome: TestOutcome,
    /// Last stage completed before the outcome was produced
    pub stage: TestStage,
    pub descriptor: Option<PackageDescriptor>,
    pub lines_before: Option<u64>,
    pub lines_after: Option<u64>,
}
