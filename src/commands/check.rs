// src/commands/check.rs

//! Check command - show how a package would be built and stripped

use anyhow::{Context, Result};
use std::path::Path;
use stripcc_autotest::package::{PackageDescriptor, StripInvocation};
use stripcc_autotest::HarnessConfig;

pub fn cmd_check(package_dir: &Path, strip_tool: &Path) -> Result<()> {
    let config = HarnessConfig::default();
    let script = package_dir.join(&config.script_name);

    let descriptor = PackageDescriptor::load(&script)
        .with_context(|| format!("Failed to load {}", script.display()))?;

    println!("Package:   {}", descriptor.package);
    match descriptor.archive_format() {
        Some(format) => println!("Format:    {}", format),
        None => println!("Format:    unknown (package would be rejected)"),
    }
    println!("Top dir:   {}", descriptor.topdir);
    println!("Pre-build: {}", descriptor.pre_make);
    println!("Build:     {}", descriptor.make);
    println!(
        "Build dir: {}",
        descriptor.make_dir.as_deref().unwrap_or("(top dir)")
    );
    println!("Clean:     {}", descriptor.clean);
    println!(
        "Strip:     {}",
        StripInvocation::new(strip_tool, &descriptor).command_line()
    );

    if !package_dir.join(&descriptor.package).exists() {
        println!("[WARNING] Archive {} not found", descriptor.package);
    }

    Ok(())
}
