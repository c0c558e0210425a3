// src/commands/count.rs

//! Count command - source lines in a tree

use anyhow::{Context, Result};
use std::path::Path;
use stripcc_autotest::package::count_source_lines;
use stripcc_autotest::HarnessConfig;

pub fn cmd_count(dir: &Path) -> Result<()> {
    let config = HarnessConfig::default();
    let lines = count_source_lines(dir, &config.source_extensions())
        .with_context(|| format!("Failed to count lines under {}", dir.display()))?;

    println!("{}", lines);
    Ok(())
}
