// src/package/runner.rs

//! Runner: one package's full test cycle

use crate::config::HarnessConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::archive::extract_archive;
use super::command::{run_shell, run_shell_to_file};
use super::count::count_source_lines;
use super::descriptor::PackageDescriptor;
use super::outcome::{TestFailure, TestOutcome, TestReport, TestStage};
use super::strip::StripInvocation;

/// Runs package tests
///
/// Stateless between runs; every call to [`run`](Self::run) is independent.
#[derive(Debug, Clone, Default)]
pub struct PackageTestRunner {
    config: HarnessConfig,
}

impl PackageTestRunner {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Test one package against `strip_tool`
    pub fn run(&self, package_dir: &Path, strip_tool: &Path) -> TestOutcome {
        self.run_report(package_dir, strip_tool).outcome
    }

    /// Like [`run`](Self::run), also returning the stage reached and the line
    /// counts
    pub fn run_report(&self, package_dir: &Path, strip_tool: &Path) -> TestReport {
        let mut test = PackageTest::new(&self.config, package_dir, strip_tool);
        let result = test.execute();

        if let Err(e) = &result {
            debug!(
                "Package test in {} stopped after {}: {}",
                test.package_dir.display(),
                test.stage,
                e
            );
        }

        TestReport {
            outcome: result.into(),
            stage: test.stage,
            descriptor: test.descriptor,
            lines_before: test.lines_before,
            lines_after: test.lines_after,
        }
    }
}

/// State of a single package test
struct PackageTest<'a> {
    config: &'a HarnessConfig,
    package_dir: PathBuf,
    strip_tool: PathBuf,
    stage: TestStage,
    descriptor: Option<PackageDescriptor>,
    lines_before: Option<u64>,
    lines_after: Option<u64>,
}

impl<'a> PackageTest<'a> {
    fn new(config: &'a HarnessConfig, package_dir: &Path, strip_tool: &Path) -> Self {
        // Commands run inside the extracted tree, so relative paths given by
        // the caller are pinned to the current directory up front.
        let absolute = |p: &Path| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());

        Self {
            config,
            package_dir: absolute(package_dir),
            strip_tool: absolute(strip_tool),
            stage: TestStage::Start,
            descriptor: None,
            lines_before: None,
            lines_after: None,
        }
    }

    fn execute(&mut self) -> Result<f64, TestFailure> {
        let descriptor = self.load()?;
        if descriptor.archive_format().is_none() {
            return Err(TestFailure::UnknownPackageType(descriptor.package));
        }
        let tree = self.package_dir.join(&descriptor.topdir);

        self.reset(&tree)?;
        self.extract(&descriptor)?;
        let before = self.measure(&tree)?;
        if before == 0 {
            return Err(TestFailure::EmptyBaseline(tree));
        }
        self.lines_before = Some(before);
        self.advance(TestStage::BaselineMeasured);

        self.prepare(&descriptor, &tree)?;
        self.build(&descriptor, &tree)?;
        self.strip(&descriptor, &tree)?;

        let after = self.measure(&tree)?;
        self.lines_after = Some(after);
        self.advance(TestStage::Measured);

        Ok(after as f64 * 100.0 / before as f64)
    }

    fn advance(&mut self, stage: TestStage) {
        debug!("{}: {}", self.package_dir.display(), stage);
        self.stage = stage;
    }

    /// Step 1: read the package script
    fn load(&mut self) -> Result<PackageDescriptor, TestFailure> {
        let script = self.package_dir.join(&self.config.script_name);
        let descriptor = PackageDescriptor::load(&script)?;

        debug!("Descriptor: {:?}", descriptor);
        self.descriptor = Some(descriptor.clone());
        self.advance(TestStage::DescriptorLoaded);
        Ok(descriptor)
    }

    /// Step 2: drop the tree left by an earlier run
    fn reset(&mut self, tree: &Path) -> Result<(), TestFailure> {
        match fs::symlink_metadata(tree) {
            Ok(meta) if meta.is_dir() => {
                info!("Removing previous tree {}", tree.display());
                fs::remove_dir_all(tree)?;
            }
            Ok(_) => {
                return Err(TestFailure::Io(io::Error::other(format!(
                    "{} exists and is not a directory",
                    tree.display()
                ))));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.advance(TestStage::WorkspaceReset);
        Ok(())
    }

    /// Step 3: unpack the archive into the package directory
    fn extract(&mut self, descriptor: &PackageDescriptor) -> Result<(), TestFailure> {
        let format = extract_archive(&descriptor.package, &self.package_dir)?;
        info!("Extracted {} ({})", descriptor.package, format);
        self.advance(TestStage::Extracted);
        Ok(())
    }

    /// Steps 4 and 8: count source lines in the tree
    fn measure(&self, tree: &Path) -> Result<u64, TestFailure> {
        let extensions = self.config.source_extensions();
        let lines = count_source_lines(tree, &extensions)?;
        debug!("{} source lines under {}", lines, tree.display());
        Ok(lines)
    }

    /// Step 5: run `pre_make` in the tree
    fn prepare(&mut self, descriptor: &PackageDescriptor, tree: &Path) -> Result<(), TestFailure> {
        info!("Running pre-build: {}", descriptor.pre_make);
        let output = run_shell(&descriptor.pre_make, tree)
            .map_err(|e| TestFailure::Prepare(format!("'{}': {}", descriptor.pre_make, e)))?;

        if !output.success() {
            return Err(TestFailure::Prepare(output.describe_failure(&descriptor.pre_make)));
        }
        self.advance(TestStage::PreBuilt);
        Ok(())
    }

    /// Step 6: run `make` (in `make_dir` when set), then `clean`
    fn build(&mut self, descriptor: &PackageDescriptor, tree: &Path) -> Result<(), TestFailure> {
        let workdir = match &descriptor.make_dir {
            Some(dir) => tree.join(dir),
            None => tree.to_path_buf(),
        };

        info!("Building: {} (in {})", descriptor.make, workdir.display());
        let output = run_shell(&descriptor.make, &workdir)
            .map_err(|e| TestFailure::Build(format!("'{}': {}", descriptor.make, e)))?;

        if !output.success() {
            return Err(TestFailure::Build(output.describe_failure(&descriptor.make)));
        }

        match run_shell(&descriptor.clean, &workdir) {
            Ok(clean) if !clean.success() => {
                warn!("Clean command '{}' exited with {}", descriptor.clean, clean.status)
            }
            Err(e) => warn!("Clean command '{}' failed: {}", descriptor.clean, e),
            Ok(_) => {}
        }

        self.advance(TestStage::Built);
        Ok(())
    }

    /// Step 7: run stripcc in fast mode, output to the package directory
    fn strip(&mut self, descriptor: &PackageDescriptor, tree: &Path) -> Result<(), TestFailure> {
        let invocation = StripInvocation::new(&self.strip_tool, descriptor);
        let command = invocation.command_line();
        let output = self.package_dir.join(&self.config.strip_output);

        info!("Stripping: {}", command);
        let status = run_shell_to_file(&command, tree, &output)?;

        if !status.success() {
            return Err(TestFailure::StripTool {
                status: status.to_string(),
                output,
            });
        }
        self.advance(TestStage::Stripped);
        Ok(())
    }
}
