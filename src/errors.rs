// src/errors.rs

//! Crate-wide error type and `Result` alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SutError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration parse error in {path:?} at line {line}: {message}")]
    ConfigParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Missing section [{section}] in configuration file {path:?}")]
    MissingSection { section: String, path: PathBuf },

    #[error("Section [{section}] has no option named {option:?}")]
    MissingOption { section: String, option: String },

    #[error("Invalid value for [{section}].{option}: {value:?} ({reason})")]
    InvalidValue {
        section: String,
        option: String,
        value: String,
        reason: String,
    },

    #[error("Command `{command}` failed with exit code {code}")]
    SubprocessFailure { command: String, code: i32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML rendering error: {0}")]
    TomlError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SutError>;
