// src/config/ini.rs

//! Minimal INI reader for the SUT configuration files.
//!
//! Supported syntax:
//!
//! ```ini
//! # full-line comments start with '#' or ';'
//! [DEFAULT]
//! connections_per_host = 4
//!
//! [run]
//! cassandra_contact_points = 10.0.0.5
//! metrics_export_graphite_host: graphite.local
//! ```
//!
//! - keys are trimmed and lower-cased, values are trimmed raw strings
//! - `=` and `:` are both accepted as delimiters (the first one wins)
//! - an indented line continues the previous option's value
//! - options in `[DEFAULT]` are visible from every section
//! - a `;` preceded by whitespace starts an inline comment in a value

use std::collections::BTreeMap;

use thiserror::Error;

/// Name of the section whose options every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Syntax error while reading an INI document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct IniParseError {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

impl IniParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// A parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: BTreeMap<String, String>,
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

/// Where the parser is currently writing options to.
enum Cursor {
    None,
    Defaults,
    Section(String),
}

/// Cut a value at its first `;` when that `;` follows whitespace.
///
/// `16 ; per node` becomes `16 `, while `a;b` is kept as is. Only the first
/// `;` is considered.
fn strip_inline_comment(value: &str) -> &str {
    match value.find(';') {
        Some(pos) if value[..pos].ends_with(char::is_whitespace) => &value[..pos],
        _ => value,
    }
}

impl IniDocument {
    pub fn parse(input: &str) -> Result<Self, IniParseError> {
        let mut doc = IniDocument::default();
        let mut cursor = Cursor::None;
        // Option that an indented line would continue.
        let mut last_key: Option<String> = None;

        for (idx, raw_line) in input.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw_line.trim();

            if trimmed.is_empty() {
                last_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw_line.starts_with(char::is_whitespace);
            if indented {
                if let Some(key) = last_key.as_ref() {
                    if let Some(value) = doc.entries_mut(&cursor).and_then(|m| m.get_mut(key)) {
                        value.push('\n');
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if trimmed.starts_with('[') {
                let end = trimmed.find(']').ok_or_else(|| {
                    IniParseError::new(line_no, format!("unterminated section header {trimmed:?}"))
                })?;
                // Surrounding spaces are part of the name: `[ run ]` is not `[run]`.
                let name = &trimmed[1..end];
                if name.is_empty() {
                    return Err(IniParseError::new(line_no, "empty section name"));
                }

                cursor = if name == DEFAULT_SECTION {
                    Cursor::Defaults
                } else {
                    doc.sections.entry(name.to_string()).or_default();
                    Cursor::Section(name.to_string())
                };
                last_key = None;
                continue;
            }

            let Some(delim) = trimmed.find(['=', ':']) else {
                return Err(IniParseError::new(
                    line_no,
                    format!("expected `key = value`, got {trimmed:?}"),
                ));
            };
            let key = trimmed[..delim].trim().to_lowercase();
            let value = strip_inline_comment(&trimmed[delim + 1..]).trim().to_string();
            if key.is_empty() {
                return Err(IniParseError::new(line_no, "option with an empty name"));
            }

            let entries = doc.entries_mut(&cursor).ok_or_else(|| {
                IniParseError::new(
                    line_no,
                    format!("option {key:?} appears before any [section] header"),
                )
            })?;
            entries.insert(key.clone(), value);
            last_key = Some(key);
        }

        Ok(doc)
    }

    fn entries_mut(&mut self, cursor: &Cursor) -> Option<&mut BTreeMap<String, String>> {
        match cursor {
            Cursor::None => None,
            Cursor::Defaults => Some(&mut self.defaults),
            Cursor::Section(name) => self.sections.get_mut(name),
        }
    }

    /// Whether a `[name]` header was present. `DEFAULT` never counts.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Look up `key` in `section`, falling back to `[DEFAULT]`.
    ///
    /// Returns `None` when the section itself does not exist, even if the key
    /// is present in `[DEFAULT]`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let entries = self.sections.get(section)?;
        let key = key.to_lowercase();
        entries
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .map(String::as_str)
    }

    /// All keys visible from `section`, including inherited defaults.
    pub fn keys<'a>(&'a self, section: &str) -> Vec<&'a str> {
        let Some(entries) = self.sections.get(section) else {
            return Vec::new();
        };
        let mut keys: Vec<&str> = entries
            .keys()
            .chain(self.defaults.keys())
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}
