// src/commands/run.rs

//! Run command - test every package under a directory

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use stripcc_autotest::{locate_strip_tool, Driver, HarnessConfig, LogFileSink};
use tracing::info;

/// Test all packages under `root`
///
/// # Arguments
/// * `root` - Packages directory
/// * `strip_tool` - stripcc binary (None = `stripcc` next to `root`)
/// * `log_file` - Test log (None = `<root>/autotest.log`)
/// * `only` - Package names to restrict the run to
/// * `summary` - Where to write a JSON summary, if anywhere
/// * `strict` - Fail when any package fails
pub fn cmd_run(
    root: &Path,
    strip_tool: Option<&Path>,
    log_file: Option<&Path>,
    only: &[String],
    summary: Option<&Path>,
    strict: bool,
) -> Result<()> {
    let root = fs::canonicalize(root)
        .with_context(|| format!("Packages directory not found: {}", root.display()))?;

    let strip_tool = locate_strip_tool(&root, strip_tool).context("Can't locate stripcc")?;

    let mut config = HarnessConfig::for_root(&root);
    if let Some(path) = log_file {
        config.log_file = PathBuf::from(path);
    }

    let mut sink = LogFileSink::open(&config.log_file)
        .with_context(|| format!("Failed to open test log {}", config.log_file.display()))?;

    println!("Testing packages in {}", root.display());
    println!("stripcc: {}", strip_tool.display());
    info!("Logging to {}", config.log_file.display());

    let mut driver = Driver::new(config, strip_tool, &mut sink);
    let result = driver.run_all(&root, only)?;

    println!();
    for package in &result.packages {
        match (package.remaining_ratio, package.failure) {
            (Some(ratio), _) => println!("[OK]     {:<24} {:>7.2}% remaining", package.package, ratio),
            (None, Some(kind)) => println!(
                "[FAILED] {:<24} {} (after {}){}",
                package.package,
                kind,
                package.stage,
                if kind.is_package_fault() { " [package]" } else { "" }
            ),
            (None, None) => println!("[??]     {}", package.package),
        }
    }

    println!(
        "\n{} package(s): {} stripped, {} failed",
        result.packages.len(),
        result.succeeded(),
        result.failed()
    );
    if let Some(mean) = result.mean_ratio() {
        println!("Mean remaining code: {:.2}%", mean);
    }

    if let Some(path) = summary {
        fs::write(path, result.to_json()?)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    if strict && result.failed() > 0 {
        bail!("{} package(s) failed", result.failed());
    }

    Ok(())
}
