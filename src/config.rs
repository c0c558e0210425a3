// src/config.rs

//! Harness configuration

use std::path::PathBuf;

/// Name of the per-package build script
pub const DEFAULT_SCRIPT_NAME: &str = "script";

/// File (inside the package directory) receiving the strip tool's output
pub const DEFAULT_STRIP_OUTPUT: &str = "stripcc.out";

/// Append-only test log, relative to the packages directory
pub const DEFAULT_LOG_FILE: &str = "autotest.log";

/// Configuration shared by the driver and the package runner
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Script file looked up in every package directory
    pub script_name: String,
    /// Strip tool output file, written into the package directory
    pub strip_output: String,
    /// File extensions counted as source code
    pub source_extensions: Vec<String>,
    /// Append-only log of test events
    pub log_file: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            strip_output: DEFAULT_STRIP_OUTPUT.to_string(),
            source_extensions: vec!["h".to_string(), "c".to_string()],
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl HarnessConfig {
    /// Default configuration with the log placed under `root`
    pub fn for_root(root: &std::path::Path) -> Self {
        Self {
            log_file: root.join(DEFAULT_LOG_FILE),
            ..Self::default()
        }
    }

    pub fn source_extensions(&self) -> Vec<&str> {
        self.source_extensions.iter().map(String::as_str).collect()
    }
}
