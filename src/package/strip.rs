// src/package/strip.rs

//! stripcc command line composition

use std::path::Path;

use super::descriptor::PackageDescriptor;

/// One stripcc invocation for a package
///
/// stripcc is always run in fast mode (`-f`): the harness checks the line
/// count afterwards, not a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripInvocation {
    tool: String,
    make: Option<String>,
    make_dir: Option<String>,
}

impl StripInvocation {
    pub fn new(tool: &Path, descriptor: &PackageDescriptor) -> Self {
        Self {
            tool: tool.display().to_string(),
            make: (!descriptor.uses_default_make()).then(|| descriptor.make.clone()),
            make_dir: descriptor.make_dir.clone(),
        }
    }

    /// Flags passed after the tool path
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if let Some(make) = &self.make {
            flags.push(format!("-c \"{}\"", make));
        }
        if let Some(dir) = &self.make_dir {
            flags.push(format!("-m \"{}\"", dir));
        }
        flags.push("-f".to_string());
        flags
    }

    /// Full shell command line
    pub fn command_line(&self) -> String {
        let tool = if self.tool.contains(char::is_whitespace) {
            format!("'{}'", self.tool)
        } else {
            self.tool.clone()
        };

        let mut parts = vec![tool];
        parts.extend(self.flags());
        parts.join(" ")
    }
}
