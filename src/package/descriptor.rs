// src/package/descriptor.rs

//! Typed view of a package script

use crate::conf::{ConfError, ConfStore};
use std::path::{Component, Path};

use super::archive::ArchiveFormat;

pub const KEY_PACKAGE: &str = "package";
pub const KEY_TOPDIR: &str = "topdir";
pub const KEY_PRE_MAKE: &str = "pre_make";
pub const KEY_MAKE: &str = "make";
pub const KEY_MAKE_DIR: &str = "make_dir";
pub const KEY_CLEAN: &str = "clean";

pub const DEFAULT_PRE_MAKE: &str = "./configure";
pub const DEFAULT_MAKE: &str = "make";
pub const DEFAULT_CLEAN: &str = "make clean";

/// Build parameters for one package, with defaults already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Archive file, relative to the package directory
    pub package: String,
    /// Directory the archive unpacks into
    pub topdir: String,
    /// Run once in `topdir` before building
    pub pre_make: String,
    /// Build command, also handed to stripcc when customised
    pub make: String,
    /// Subdirectory of `topdir` the build runs in
    pub make_dir: Option<String>,
    /// Run after a successful build; failures are ignored
    pub clean: String,
}

impl PackageDescriptor {
    /// Resolve a descriptor from the global scope of a script
    ///
    /// Only `package` is required. Empty `topdir` and `make_dir` values count
    /// as absent. Both must name a directory below the package directory,
    /// since the tree at `topdir` is deleted before every run.
    pub fn from_store(store: &ConfStore) -> Result<Self, ConfError> {
        let package = store.get(KEY_PACKAGE, None)?.to_string();

        let topdir = match store.get_global(KEY_TOPDIR) {
            Some(dir) if !dir.is_empty() => dir.to_string(),
            _ => default_topdir(&package),
        };
        check_subdir(KEY_TOPDIR, &topdir)?;

        let make_dir = store
            .get_global(KEY_MAKE_DIR)
            .filter(|dir| !dir.is_empty())
            .map(str::to_string);
        if let Some(dir) = &make_dir {
            check_subdir(KEY_MAKE_DIR, dir)?;
        }

        Ok(Self {
            topdir,
            pre_make: store
                .get_global(KEY_PRE_MAKE)
                .unwrap_or(DEFAULT_PRE_MAKE)
                .to_string(),
            make: store.get_global(KEY_MAKE).unwrap_or(DEFAULT_MAKE).to_string(),
            make_dir,
            clean: store.get_global(KEY_CLEAN).unwrap_or(DEFAULT_CLEAN).to_string(),
            package,
        })
    }

    /// Load a script file and resolve it
    pub fn load(path: &Path) -> Result<Self, ConfError> {
        Self::from_store(&ConfStore::load(path)?)
    }

    /// Archive type implied by the package file name, if recognized
    pub fn archive_format(&self) -> Option<ArchiveFormat> {
        ArchiveFormat::from_name(&self.package)
    }

    /// Whether the build command is the plain default `make`
    pub fn uses_default_make(&self) -> bool {
        self.make == DEFAULT_MAKE
    }
}

/// Reject absolute paths, `..` and paths that resolve to the directory itself
fn check_subdir(key: &str, value: &str) -> Result<(), ConfError> {
    let mut named = false;
    for component in Path::new(value).components() {
        match component {
            Component::Normal(_) => named = true,
            Component::CurDir => {}
            _ => {
                named = false;
                break;
            }
        }
    }

    if named {
        Ok(())
    } else {
        Err(ConfError::InvalidPath {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Archive file name with its extension chain removed
///
/// `foo-1.0.tar.gz` and `foo-1.0.tar.bz2` both become `foo-1.0`. Names
/// without `.tar` only lose a trailing compression suffix.
fn default_topdir(package: &str) -> String {
    let name = Path::new(package)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(package);

    if let Some(pos) = name.find(".tar") {
        return name[..pos].to_string();
    }

    ArchiveFormat::from_name(name)
        .and_then(|format| name.strip_suffix(format.suffix()))
        .unwrap_or(name)
        .to_string()
}
