// src/conf.rs

//! Package script parser
//!
//! Every package directory carries a small `script` file describing how the
//! package is built:
//!
//! ```text
//! # zlib, built from its own makefile
//! package = zlib-1.2.3.tar.gz
//! pre_make = ./configure --static
//!
//! [notes]
//! upstream = https://zlib.net
//! ```
//!
//! Each line is trimmed before it is looked at. Blank lines and lines starting
//! with `#` are skipped (there are no trailing comments). `[name]` opens a
//! section; any other line is `key = value`, split at the first `=`, and lands
//! in the global scope until the first section header is seen.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or querying a package script
#[derive(Error, Debug)]
pub enum ConfError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Duplicated section name: {0}")]
    DuplicateSection(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Key '{key}' not found in {scope}")]
    KeyNotFound { key: String, scope: String },

    /// A line that is neither a comment, a section header nor `key = value`
    #[error("Malformed line {line}: {content}")]
    MalformedLine { line: usize, content: String },

    /// A directory value that would leave the package directory
    #[error("Invalid {key} '{value}': must be a relative path inside the package")]
    InvalidPath { key: String, value: String },
}

/// Parsed contents of a package script. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfStore {
    global: HashMap<String, String>,
    sections: HashMap<String, HashMap<String, String>>,
}

impl ConfStore {
    /// Load and parse a script file
    pub fn load(path: &Path) -> Result<Self, ConfError> {
        let content = fs::read_to_string(path).map_err(|source| ConfError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse script text
    pub fn parse(content: &str) -> Result<Self, ConfError> {
        let mut store = Self::default();
        let mut current: Option<String> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = match rest.split_once(']') {
                    Some((name, _)) => name.trim(),
                    None => {
                        return Err(ConfError::MalformedLine {
                            line: idx + 1,
                            content: line.to_string(),
                        });
                    }
                };

                if store.sections.contains_key(name) {
                    return Err(ConfError::DuplicateSection(name.to_string()));
                }
                store.sections.insert(name.to_string(), HashMap::new());
                current = Some(name.to_string());
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ConfError::MalformedLine {
                line: idx + 1,
                content: line.to_string(),
            })?;

            let scope = match &current {
                Some(section) => store.sections.entry(section.clone()).or_default(),
                None => &mut store.global,
            };
            scope.insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok(store)
    }

    /// Look up `key` in the global scope, or in `section` when one is given
    pub fn get(&self, key: &str, section: Option<&str>) -> Result<&str, ConfError> {
        let scope = match section {
            None => &self.global,
            Some(name) => self
                .sections
                .get(name)
                .ok_or_else(|| ConfError::SectionNotFound(name.to_string()))?,
        };

        scope
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfError::KeyNotFound {
                key: key.to_string(),
                scope: match section {
                    Some(name) => format!("section [{}]", name),
                    None => "global scope".to_string(),
                },
            })
    }

    /// Global lookup that treats a missing key as `None`
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.global.get(key).map(String::as_str)
    }

    /// Names of every section declared in the file
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}
