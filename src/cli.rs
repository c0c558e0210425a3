// src/cli.rs
//! CLI definitions for the autotest harness
//!
//! The command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autotest")]
#[command(author = "stripcc Contributors")]
#[command(version)]
#[command(about = "Measure how much code stripcc removes from real C packages", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Test every package under the packages directory
    Run {
        /// Directory holding one sub-directory per package
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// stripcc binary (default: stripcc in the parent of the packages directory)
        #[arg(short, long)]
        strip_tool: Option<PathBuf>,

        /// Append-only test log (default: <root>/autotest.log)
        #[arg(short, long)]
        log_file: Option<PathBuf>,

        /// Only test the named package(s)
        #[arg(long)]
        only: Vec<String>,

        /// Write a JSON summary of the run
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Exit non-zero when any package fails
        #[arg(long)]
        strict: bool,
    },

    /// Show the resolved build parameters of a package
    Check {
        /// Package directory containing a script
        package_dir: PathBuf,

        /// stripcc path used to render the command line
        #[arg(short, long, default_value = "stripcc")]
        strip_tool: PathBuf,
    },

    /// Count .c/.h source lines under a directory
    Count {
        /// Directory to count
        dir: PathBuf,
    },
}
