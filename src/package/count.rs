// src/package/count.rs

//! Source line counting

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use walkdir::WalkDir;

/// Number of lines in a file
///
/// A final line without a trailing newline still counts. Content does not
/// need to be UTF-8.
pub fn count_file_lines(path: &Path) -> io::Result<u64> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(count);
        }
        count += 1;
    }
}

/// Sum of line counts of every regular file under `root` whose extension is
/// one of `extensions`
///
/// Symlinks are not followed and do not count, extensionless files are
/// skipped.
pub fn count_source_lines(root: &Path, extensions: &[&str]) -> io::Result<u64> {
    let mut total = 0;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext));

        if matches {
            total += count_file_lines(entry.path())?;
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const C_EXTS: &[&str] = &["h", "c"];

    #[test]
    fn test_count_file_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.c");

        fs::write(&path, "").unwrap();
        assert_eq!(count_file_lines(&path).unwrap(), 0);

        fs::write(&path, "one\ntwo\n").unwrap();
        assert_eq!(count_file_lines(&path).unwrap(), 2);

        fs::write(&path, "one\ntwo\nthree").unwrap();
        assert_eq!(count_file_lines(&path).unwrap(), 3);

        fs::write(&path, "\n\n\n").unwrap();
        assert_eq!(count_file_lines(&path).unwrap(), 3);
    }

    #[test]
    fn test_count_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.c");
        fs::write(&path, b"/* caf\xe9 */\nint x;\n").unwrap();
        assert_eq!(count_file_lines(&path).unwrap(), 2);
    }

    #[test]
    fn test_count_source_lines_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/sub")).unwrap();
        fs::create_dir_all(root.join("include")).unwrap();

        fs::write(root.join("src/main.c"), "a\nb\nc\n").unwrap();
        fs::write(root.join("src/sub/deep.c"), "a\nb\n").unwrap();
        fs::write(root.join("include/api.h"), "x\n").unwrap();
        fs::write(root.join("src/other.cpp"), "ignored\nignored\n").unwrap();
        fs::write(root.join("Makefile"), "all:\n\ttrue\n").unwrap();
        fs::write(root.join("README"), "docs\n").unwrap();
        fs::write(root.join("notes.C"), "upper case ext\n").unwrap();

        assert_eq!(count_source_lines(root, C_EXTS).unwrap(), 6);
        assert_eq!(count_source_lines(root, &["cpp"]).unwrap(), 2);
    }

    #[test]
    fn test_count_source_lines_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_source_lines(dir.path(), C_EXTS).unwrap(), 0);
    }

    #[test]
    fn test_directory_named_like_source_is_traversed_not_counted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("weird.c")).unwrap();
        fs::write(root.join("weird.c/inner.h"), "1\n2\n").unwrap();

        assert_eq!(count_source_lines(root, C_EXTS).unwrap(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_counted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("real.c"), "1\n2\n3\n").unwrap();
        std::os::unix::fs::symlink(root.join("real.c"), root.join("link.c")).unwrap();

        assert_eq!(count_source_lines(root, C_EXTS).unwrap(), 3);
    }

    #[test]
    fn test_missing_root_is_error() {
        assert!(count_source_lines(Path::new("/nonexistent/tree"), C_EXTS).is_err());
    }
}
