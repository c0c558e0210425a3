// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            root,
            strip_tool,
            log_file,
            only,
            summary,
            strict,
        } => commands::cmd_run(
            &root,
            strip_tool.as_deref(),
            log_file.as_deref(),
            &only,
            summary.as_deref(),
            strict,
        ),
        Commands::Check {
            package_dir,
            strip_tool,
        } => commands::cmd_check(&package_dir, &strip_tool),
        Commands::Count { dir } => commands::cmd_count(&dir),
    }
}
