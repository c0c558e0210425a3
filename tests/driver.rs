// tests/driver.rs

//! Whole-run tests: discovery, sequencing, continue-on-failure and logging.

mod common;

use common::*;
use std::fs;
use stripcc_autotest::{
    locate_strip_tool, Driver, FailureKind, HarnessConfig, LogFileSink, MemorySink, ReportEvent,
};

#[test]
fn test_run_continues_after_failures() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("testing");
    fs::create_dir(&root).unwrap();

    write_foo_package(&root, "alpha", "");
    write_foo_package(&root, "beta", "make = exit 1\n");
    write_foo_package(&root, "gamma", "");
    let tool = write_strip_tool(dir.path());

    let mut sink = MemorySink::default();
    let mut driver = Driver::new(HarnessConfig::for_root(&root), tool, &mut sink);
    let summary = driver.run_all(&root, &[]).unwrap();

    let names: Vec<&str> = summary.packages.iter().map(|p| p.package.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.packages[1].failure, Some(FailureKind::Build));
    assert_eq!(summary.mean_ratio(), Some(40.0));

    assert_eq!(sink.events.len(), 7);
    assert_eq!(sink.events[0], ReportEvent::RunStarted);
    assert_eq!(
        sink.events[2],
        ReportEvent::PackageSucceeded {
            package: "alpha".to_string(),
            remaining_ratio: 40.0
        }
    );
    assert!(matches!(
        &sink.events[4],
        ReportEvent::PackageFailed { package, kind: FailureKind::Build, .. } if package == "beta"
    ));
}

#[test]
fn test_only_filter() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("testing");
    fs::create_dir(&root).unwrap();
    write_foo_package(&root, "alpha", "");
    write_foo_package(&root, "beta", "");
    let tool = write_strip_tool(dir.path());

    let mut sink = MemorySink::default();
    let mut driver = Driver::new(HarnessConfig::for_root(&root), tool, &mut sink);
    let summary = driver.run_all(&root, &["beta".to_string()]).unwrap();

    assert_eq!(summary.packages.len(), 1);
    assert_eq!(summary.packages[0].package, "beta");
    assert!(!root.join("alpha/foo-1.0").exists());
}

#[test]
fn test_strip_failure_logged_with_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("testing");
    fs::create_dir(&root).unwrap();
    write_foo_package(&root, "broken", "");
    let tool = write_failing_strip_tool(dir.path());

    let log_path = root.join("autotest.log");
    let mut sink = LogFileSink::open(&log_path).unwrap();
    let mut driver = Driver::new(HarnessConfig::for_root(&root), tool, &mut sink);
    let summary = driver.run_all(&root, &[]).unwrap();

    assert_eq!(summary.packages[0].failure, Some(FailureKind::StripTool));

    let log = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("[INFO]: New test begin"));
    assert!(lines[1].ends_with("[INFO]: Testing package: broken"));
    assert!(lines[2].contains("[ERROR]: Failed to strip package: broken"));
    assert!(lines[2].contains("stripcc.out"));
}

#[test]
fn test_default_strip_tool_next_to_packages() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("testing");
    fs::create_dir(&root).unwrap();
    write_foo_package(&root, "alpha", "");
    write_strip_tool(dir.path());

    let tool = locate_strip_tool(&root, None).unwrap();
    let mut sink = MemorySink::default();
    let mut driver = Driver::new(HarnessConfig::for_root(&root), tool, &mut sink);
    let summary = driver.run_all(&root, &[]).unwrap();

    assert_eq!(summary.packages[0].remaining_ratio, Some(40.0));
}
