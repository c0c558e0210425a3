// src/package/command.rs

//! Shell command execution in an explicit directory

use std::fs::File;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Lines of output kept for failure messages
const OUTPUT_TAIL_LINES: usize = 20;

/// Result of a finished shell command
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit status plus the last lines of stderr, for failure messages
    ///
    /// Falls back to stdout for tools that report errors there.
    pub fn describe_failure(&self, command: &str) -> String {
        let (stream, text) = if self.stderr.trim().is_empty() {
            ("stdout", &self.stdout)
        } else {
            ("stderr", &self.stderr)
        };
        let lines: Vec<&str> = text.lines().collect();
        let tail = &lines[lines.len().saturating_sub(OUTPUT_TAIL_LINES)..];

        if tail.is_empty() {
            format!("'{}' exited with {}", command, self.status)
        } else {
            format!(
                "'{}' exited with {}\n{}: {}",
                command,
                self.status,
                stream,
                tail.join("\n")
            )
        }
    }
}

/// Run `command` through `sh -c` with `workdir` as its working directory
pub fn run_shell(command: &str, workdir: &Path) -> io::Result<CommandOutput> {
    debug!("Running '{}' in {}", command, workdir.display());

    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .output()?;

    Ok(CommandOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Run `command` through `sh -c`, sending stdout and stderr to `log`
///
/// `log` is truncated first.
pub fn run_shell_to_file(command: &str, workdir: &Path, log: &Path) -> io::Result<ExitStatus> {
    debug!(
        "Running '{}' in {} (output to {})",
        command,
        workdir.display(),
        log.display()
    );

    let stdout = File::create(log)?;
    let stderr = stdout.try_clone()?;

    Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .status()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_shell_uses_workdir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("marker"), "").unwrap();

        let output = run_shell("ls", dir.path()).unwrap();
        assert!(output.success());
        assert!(output.stdout.contains("marker"));
    }

    #[test]
    fn test_run_shell_failure_description() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_shell("echo boom >&2; exit 2", dir.path()).unwrap();

        assert!(!output.success());
        assert_eq!(output.status.code(), Some(2));
        let msg = output.describe_failure("build");
        assert!(msg.contains("'build'"));
        assert!(msg.contains("stderr: boom"));
    }

    #[test]
    fn test_failure_description_falls_back_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let script = (1..=30).map(|i| format!("echo line{};", i)).collect::<String>();
        let output = run_shell(&format!("{} exit 1", script), dir.path()).unwrap();

        let msg = output.describe_failure("configure");
        assert!(msg.contains("stdout: line11"));
        assert!(msg.contains("line30"));
        assert!(!msg.contains("line10\n"));

        let quiet = run_shell("exit 1", dir.path()).unwrap();
        assert_eq!(quiet.describe_failure("x"), format!("'x' exited with {}", quiet.status));
    }

    #[test]
    fn test_run_shell_to_file_captures_both_streams() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("out.log");

        let status = run_shell_to_file("echo out; echo err >&2", dir.path(), &log).unwrap();
        assert!(status.success());

        let content = fs::read_to_string(&log).unwrap();
        assert!(content.contains("out"));
        assert!(content.contains("err"));
    }

    #[test]
    fn test_run_shell_missing_workdir() {
        let result = run_shell("true", Path::new("/nonexistent/workdir"));
        assert!(result.is_err());
    }
}
