// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// `n` lines of C
pub fn c_lines(n: usize) -> String {
    (0..n).map(|i| format!("int v{};\n", i)).collect()
}

/// Write a gzip tarball at `archive` containing `files` (path, content)
pub fn write_tar_gz(archive: &Path, files: &[(&str, String)]) {
    let file = File::create(archive).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(1_700_000_000);
        builder.append_data(&mut header, path, content.as_bytes()).unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap();
}

/// Write a bzip2 tarball at `archive` with the system `tar cjf`
pub fn write_tar_bz2(archive: &Path, files: &[(&str, String)]) {
    let staging = tempfile::tempdir().unwrap();
    let mut top_level = BTreeSet::new();

    for (path, content) in files {
        let target = staging.path().join(path);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, content).unwrap();
        top_level.insert(path.split('/').next().unwrap().to_string());
    }

    let status = Command::new("tar")
        .arg("cjf")
        .arg(archive)
        .arg("-C")
        .arg(staging.path())
        .args(&top_level)
        .status()
        .unwrap();
    assert!(status.success(), "tar cjf failed for {}", archive.display());
}

/// Write an executable shell script
pub fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Package `foo` with 100 source lines: 60 in `src/main.c`, 40 in
/// `include/foo.h`, plus files that must not be counted.
///
/// Build steps are no-ops so the test only depends on `sh` and `tar`.
pub fn write_foo_package(root: &Path, name: &str, extra_script: &str) -> PathBuf {
    let package_dir = root.join(name);
    fs::create_dir_all(&package_dir).unwrap();

    write_tar_gz(
        &package_dir.join("foo-1.0.tar.gz"),
        &[
            ("foo-1.0/src/main.c", c_lines(60)),
            ("foo-1.0/include/foo.h", c_lines(40)),
            ("foo-1.0/README", "read me\n".repeat(7)),
            ("foo-1.0/src/util.cpp", c_lines(25)),
        ],
    );

    fs::write(
        package_dir.join("script"),
        format!(
            "# synthetic package\npackage = foo-1.0.tar.gz\npre_make = true\nmake = true\nclean = true\n{}",
            extra_script
        ),
    )
    .unwrap();

    package_dir
}

/// Strip tool that prints its arguments and empties `src/main.c`
pub fn write_strip_tool(dir: &Path) -> PathBuf {
    let tool = dir.join("stripcc");
    write_script(&tool, "echo \"args: $@\"\n: > src/main.c");
    tool
}

/// Strip tool that complains and exits non-zero without touching the tree
pub fn write_failing_strip_tool(dir: &Path) -> PathBuf {
    let tool = dir.join("stripcc-broken");
    write_script(&tool, "echo 'stripcc: internal error' >&2\nexit 3");
    tool
}
