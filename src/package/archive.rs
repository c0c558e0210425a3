// src/package/archive.rs

//! Package archive extraction

use std::fmt;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use super::outcome::TestFailure;

/// Archive types the harness can unpack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// gzip-compressed tar (`.gz`)
    GzipTar,
    /// bzip2-compressed tar (`.bz2`)
    Bzip2Tar,
}

impl ArchiveFormat {
    /// Detect the archive type from the file name suffix
    ///
    /// Only the final suffix matters: `foo.tar.gz` and `foo.gz` are both gzip.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.ends_with(".gz") {
            Some(Self::GzipTar)
        } else if name.ends_with(".bz2") {
            Some(Self::Bzip2Tar)
        } else {
            None
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::GzipTar => ".gz",
            Self::Bzip2Tar => ".bz2",
        }
    }

    /// `tar` flags extracting this format
    pub fn tar_flags(&self) -> &'static str {
        match self {
            Self::GzipTar => "zxf",
            Self::Bzip2Tar => "jxf",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GzipTar => "gzip",
            Self::Bzip2Tar => "bzip2",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Extract `archive` (relative to `dir`) inside `dir`
///
/// The format is checked before anything runs, so an unknown suffix leaves
/// the filesystem untouched.
pub fn extract_archive(archive: &str, dir: &Path) -> Result<ArchiveFormat, TestFailure> {
    let format = ArchiveFormat::from_name(archive)
        .ok_or_else(|| TestFailure::UnknownPackageType(archive.to_string()))?;

    debug!("Extracting {} ({}) in {}", archive, format, dir.display());

    let output = Command::new("tar")
        .arg(format.tar_flags())
        .arg(archive)
        .current_dir(dir)
        .output()
        .map_err(|e| TestFailure::Extraction {
            archive: archive.to_string(),
            detail: format!("tar failed: {}", e),
        })?;

    if !output.status.success() {
        return Err(TestFailure::Extraction {
            archive: archive.to_string(),
            detail: format!(
                "tar exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_from_name() {
        assert_eq!(ArchiveFormat::from_name("a-1.0.tar.gz"), Some(ArchiveFormat::GzipTar));
        assert_eq!(ArchiveFormat::from_name("a-1.0.tar.bz2"), Some(ArchiveFormat::Bzip2Tar));
        assert_eq!(ArchiveFormat::from_name("a.gz"), Some(ArchiveFormat::GzipTar));
        assert_eq!(ArchiveFormat::from_name("a.tgz"), None);
        assert_eq!(ArchiveFormat::from_name("a.tar.xz"), None);
        assert_eq!(ArchiveFormat::from_name("a.zip"), None);
    }

    #[test]
    fn test_format_flags_and_display() {
        assert_eq!(ArchiveFormat::GzipTar.tar_flags(), "zxf");
        assert_eq!(ArchiveFormat::Bzip2Tar.tar_flags(), "jxf");
        assert_eq!(format!("{}", ArchiveFormat::GzipTar), "gzip");
        assert_eq!(format!("{}", ArchiveFormat::Bzip2Tar), "bzip2");
    }

    #[test]
    fn test_extract_unknown_format_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("pkg.zip"), b"not an archive").unwrap();

        let result = extract_archive("pkg.zip", dir.path());
        assert!(matches!(result, Err(TestFailure::UnknownPackageType(name)) if name == "pkg.zip"));

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_extract_corrupt_archive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("pkg.tar.gz"), b"definitely not gzip").unwrap();

        let result = extract_archive("pkg.tar.gz", dir.path());
        assert!(matches!(result, Err(TestFailure::Extraction { .. })));
    }
}
