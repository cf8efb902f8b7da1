// src/config/model.rs

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::errors::{Result, SutError};

/// Which of the two SUT workflows is being resolved.
///
/// The mode picks the configuration-file section (`[build]` or `[run]`), the
/// default set, and the shape of the resulting invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Install the driver dependency through the package manager.
    Build,
    /// Launch the SUT server.
    Run,
}

impl Mode {
    pub fn section_name(self) -> &'static str {
        match self {
            Mode::Build => "build",
            Mode::Run => "run",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}

/// Type an option's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Text,
    Integer,
}

/// A resolved (or default) option value.
///
/// Serialized untagged so a section renders as a plain TOML table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Integer(u64),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Text(_) => OptionKind::Text,
            OptionValue::Integer(_) => OptionKind::Integer,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        OptionValue::Integer(value)
    }
}

/// A named setting together with its compiled-in default and its resolved
/// value. The kind of the default fixes the kind of every later value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOption {
    name: String,
    default: OptionValue,
    value: OptionValue,
}

impl ConfigOption {
    pub fn new(name: impl Into<String>, default: impl Into<OptionValue>) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            value: default.clone(),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &OptionValue {
        &self.default
    }

    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    pub fn kind(&self) -> OptionKind {
        self.default.kind()
    }

    pub fn is_default(&self) -> bool {
        self.value == self.default
    }

    /// Interpret a raw string (from a file or a flag) according to this
    /// option's kind. Returns the reason on failure.
    pub fn parse_raw(&self, raw: &str) -> std::result::Result<OptionValue, String> {
        match self.kind() {
            OptionKind::Text => Ok(OptionValue::Text(raw.to_string())),
            OptionKind::Integer => raw
                .trim()
                .parse::<u64>()
                .map(OptionValue::Integer)
                .map_err(|e| format!("expected a non-negative integer: {e}")),
        }
    }
}

/// Ordered set of options belonging to one configuration section.
///
/// Options keep the order they were declared in; names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
    name: String,
    options: Vec<ConfigOption>,
}

impl ConfigSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Declare an option. Declaring the same name twice replaces the earlier
    /// declaration in place.
    pub fn with_option(mut self, name: &str, default: impl Into<OptionValue>) -> Self {
        let option = ConfigOption::new(name, default);
        match self.options.iter_mut().find(|o| o.name == name) {
            Some(existing) => *existing = option,
            None => self.options.push(option),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> impl Iterator<Item = &ConfigOption> {
        self.options.iter()
    }

    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.iter().any(|o| o.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&ConfigOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Resolved value of `name`, or `MissingOption` if the section never
    /// declared it.
    pub fn value(&self, name: &str) -> Result<&OptionValue> {
        self.get(name)
            .map(ConfigOption::value)
            .ok_or_else(|| SutError::MissingOption {
                section: self.name.clone(),
                option: name.to_string(),
            })
    }

    /// Overwrite the value of a declared option from a raw string.
    pub fn set_raw(&mut self, name: &str, raw: &str) -> Result<()> {
        let section = self.name.clone();
        let option = self
            .options
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| SutError::MissingOption {
                section: section.clone(),
                option: name.to_string(),
            })?;

        option.value = option
            .parse_raw(raw)
            .map_err(|reason| SutError::InvalidValue {
                section,
                option: name.to_string(),
                value: raw.to_string(),
                reason,
            })?;
        Ok(())
    }
}

impl Serialize for ConfigSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.options.len()))?;
        for option in &self.options {
            map.serialize_entry(&option.name, &option.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_like() -> ConfigSection {
        ConfigSection::new("run")
            .with_option("contact", "127.0.0.1")
            .with_option("connections", 8u64)
    }

    #[test]
    fn options_keep_declaration_order() {
        let section = run_like().with_option("limit", 50u64);
        let names: Vec<&str> = section.option_names().collect();
        assert_eq!(names, vec!["contact", "connections", "limit"]);
    }

    #[test]
    fn redeclaring_replaces_in_place() {
        let section = run_like().with_option("contact", "10.0.0.1");
        let names: Vec<&str> = section.option_names().collect();
        assert_eq!(names, vec!["contact", "connections"]);
        assert_eq!(section.value("contact").unwrap().to_string(), "10.0.0.1");
    }

    #[test]
    fn set_raw_parses_integers() {
        let mut section = run_like();
        section.set_raw("connections", " 16 ").unwrap();

        let option = section.get("connections").unwrap();
        assert_eq!(option.value(), &OptionValue::Integer(16));
        assert_eq!(option.default_value(), &OptionValue::Integer(8));
        assert!(!option.is_default());
    }

    #[test]
    fn set_raw_rejects_non_numeric_integers() {
        let mut section = run_like();
        let err = section.set_raw("connections", "eight").unwrap_err();
        match err {
            SutError::InvalidValue { option, value, .. } => {
                assert_eq!(option, "connections");
                assert_eq!(value, "eight");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
        assert_eq!(section.value("connections").unwrap(), &OptionValue::Integer(8));
    }

    #[test]
    fn unknown_option_is_missing() {
        let section = run_like();
        assert!(matches!(
            section.value("nope"),
            Err(SutError::MissingOption { .. })
        ));
    }

    #[test]
    fn serializes_as_toml_table() {
        #[derive(Serialize)]
        struct Doc<'a> {
            run: &'a ConfigSection,
        }

        let rendered = toml::to_string(&Doc { run: &run_like() }).unwrap();
        assert!(rendered.contains("[run]"));
        assert!(rendered.contains("contact = \"127.0.0.1\""));
        assert!(rendered.contains("connections = 8"));
    }
}
