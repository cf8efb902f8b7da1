// src/config/mod.rs

//! Configuration model, defaults and file loading.
//!
//! Responsibilities:
//! - Define sections and options with typed values (`model.rs`).
//! - Provide the compiled-in defaults per mode (`defaults.rs`).
//! - Parse INI configuration files (`ini.rs`).
//! - Overlay a file's section on top of the defaults (`loader.rs`).

pub mod defaults;
pub mod ini;
pub mod loader;
pub mod model;

pub use defaults::{keys, load_defaults, BuildDefaults, Defaults, RunDefaults};
pub use ini::{IniDocument, IniParseError};
pub use loader::{apply_file_overrides, load_from_path};
pub use model::{ConfigOption, ConfigSection, Mode, OptionKind, OptionValue};
