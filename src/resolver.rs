// src/resolver.rs

//! Layered configuration resolution.
//!
//! Priority, lowest first:
//! 1. compiled-in defaults ([`Defaults`])
//! 2. the mode's section of an optional configuration file
//! 3. explicit command-line flags

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{apply_file_overrides, ConfigSection, Defaults, Mode};
use crate::errors::{Result, SutError};
use crate::fs::FileSystem;

/// A path that referred to an existing regular file when it was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath(PathBuf);

impl ValidatedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ValidatedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ValidatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Check that `raw_path` names an existing regular file.
pub fn resolve_path_argument(fs: &dyn FileSystem, raw_path: &str) -> Result<ValidatedPath> {
    let path = PathBuf::from(raw_path);
    if fs.is_file(&path) {
        Ok(ValidatedPath(path))
    } else if fs.exists(&path) {
        Err(SutError::InvalidArgument(format!(
            "{raw_path} is not a regular file"
        )))
    } else {
        Err(SutError::InvalidArgument(format!("{raw_path} does not exist")))
    }
}

/// Everything the caller knows about one resolution.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub mode: Mode,
    pub configuration_file: Option<ValidatedPath>,
    /// `(option, raw value)` pairs from explicit flags, applied last.
    pub flag_overrides: Vec<(String, String)>,
}

impl ResolveRequest {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            configuration_file: None,
            flag_overrides: Vec::new(),
        }
    }

    pub fn with_configuration_file(mut self, path: Option<ValidatedPath>) -> Self {
        self.configuration_file = path;
        self
    }

    pub fn with_flag(mut self, option: &str, raw: impl Into<String>) -> Self {
        self.flag_overrides.push((option.to_string(), raw.into()));
        self
    }
}

/// Merges defaults, file and flags into one [`ConfigSection`].
#[derive(Debug)]
pub struct ConfigResolver<'a> {
    fs: &'a dyn FileSystem,
    defaults: Defaults,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, defaults: Defaults) -> Self {
        Self { fs, defaults }
    }

    pub fn load_defaults(&self, mode: Mode) -> ConfigSection {
        self.defaults.section(mode)
    }

    pub fn resolve(&self, request: &ResolveRequest) -> Result<ConfigSection> {
        let section = self.load_defaults(request.mode);
        let mut section = apply_file_overrides(
            self.fs,
            section,
            request.configuration_file.as_ref().map(ValidatedPath::as_path),
        )?;

        for (option, raw) in &request.flag_overrides {
            if !section.contains(option) {
                return Err(SutError::InvalidArgument(format!(
                    "no option {option:?} in [{}]",
                    section.name()
                )));
            }
            section.set_raw(option, raw)?;
            info!(section = %section.name(), %option, value = %raw, "value overridden from flag");
        }

        for option in section.options() {
            info!(
                section = %section.name(),
                option = option.name(),
                value = %option.value(),
                default = option.is_default(),
                "resolved option"
            );
        }

        Ok(section)
    }
}
