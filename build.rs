// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: stripcc binary
fn strip_tool_arg() -> Arg {
    Arg::new("strip_tool")
        .short('s')
        .long("strip-tool")
        .value_name("PATH")
        .help("stripcc binary")
}

/// Builder-API mirror of `src/cli.rs`; keep the two in step
fn build_cli() -> Command {
    Command::new("autotest")
        .version(env!("CARGO_PKG_VERSION"))
        .author("stripcc Contributors")
        .about("Measure how much code stripcc removes from real C packages")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enable debug logging (overridden by RUST_LOG)"),
        )
        .subcommand(
            Command::new("run")
                .about("Test every package under the packages directory")
                .arg(
                    Arg::new("root")
                        .short('r')
                        .long("root")
                        .default_value(".")
                        .help("Directory holding one sub-directory per package"),
                )
                .arg(strip_tool_arg())
                .arg(
                    Arg::new("log_file")
                        .short('l')
                        .long("log-file")
                        .help("Append-only test log (default: <root>/autotest.log)"),
                )
                .arg(
                    Arg::new("only")
                        .long("only")
                        .action(clap::ArgAction::Append)
                        .help("Only test the named package(s)"),
                )
                .arg(Arg::new("summary").long("summary").help("Write a JSON summary of the run"))
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(clap::ArgAction::SetTrue)
                        .help("Exit non-zero when any package fails"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Show the resolved build parameters of a package")
                .arg(
                    Arg::new("package_dir")
                        .required(true)
                        .help("Package directory containing a script"),
                )
                .arg(strip_tool_arg().default_value("stripcc")),
        )
        .subcommand(
            Command::new("count")
                .about("Count .c/.h source lines under a directory")
                .arg(Arg::new("dir").required(true).help("Directory to count")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/cli.rs");

    // The man page is a convenience; a failure here must not fail the build
    if let Err(e) = write_man_page() {
        println!("cargo:warning=autotest.1 not generated: {}", e);
    }
}

/// Render `man/autotest.1` in the package root
fn write_man_page() -> std::io::Result<()> {
    let root = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| std::io::Error::other("CARGO_MANIFEST_DIR not set"))?;
    let man_dir = root.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut page = Vec::new();
    Man::new(build_cli()).render(&mut page)?;
    fs::write(man_dir.join("autotest.1"), page)
}
