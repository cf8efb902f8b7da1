// src/config/defaults.rs

//! Compiled-in defaults for both workflows.
//!
//! The values are plain structs built at startup and handed to the resolver,
//! so tests (or embedders) can resolve against different defaults.

use crate::config::model::{ConfigSection, Mode};

/// Option names shared by the configuration file and the resolver.
pub mod keys {
    pub const DRIVER_BRANCH: &str = "driver_branch";

    pub const CONTACT_POINTS: &str = "cassandra_contact_points";
    pub const GRAPHITE_HOST: &str = "metrics_export_graphite_host";
    pub const QUERIES_PER_HTTP: &str = "cql_queries_per_http_request";
    pub const LIMIT_PER_HTTP: &str = "cql_limit_per_http";
    pub const CONNECTIONS_PER_HOST: &str = "connections_per_host";
}

/// Defaults for `[build]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDefaults {
    pub driver_branch: String,
}

impl Default for BuildDefaults {
    fn default() -> Self {
        Self {
            driver_branch: "master".to_string(),
        }
    }
}

impl BuildDefaults {
    pub fn to_section(&self) -> ConfigSection {
        ConfigSection::new(Mode::Build.section_name())
            .with_option(keys::DRIVER_BRANCH, self.driver_branch.as_str())
    }
}

/// Defaults for `[run]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDefaults {
    pub contact_points: String,
    pub graphite_host: String,
    pub queries_per_http: u64,
    pub limit_per_http: u64,
    pub connections_per_host: u64,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            contact_points: "127.0.0.1".to_string(),
            graphite_host: "127.0.0.1".to_string(),
            queries_per_http: 100,
            limit_per_http: 50,
            connections_per_host: 8,
        }
    }
}

impl RunDefaults {
    /// Options are declared in the server's positional argument order.
    pub fn to_section(&self) -> ConfigSection {
        ConfigSection::new(Mode::Run.section_name())
            .with_option(keys::CONTACT_POINTS, self.contact_points.as_str())
            .with_option(keys::GRAPHITE_HOST, self.graphite_host.as_str())
            .with_option(keys::QUERIES_PER_HTTP, self.queries_per_http)
            .with_option(keys::LIMIT_PER_HTTP, self.limit_per_http)
            .with_option(keys::CONNECTIONS_PER_HOST, self.connections_per_host)
    }
}

/// Both default sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub build: BuildDefaults,
    pub run: RunDefaults,
}

impl Defaults {
    pub fn section(&self, mode: Mode) -> ConfigSection {
        match mode {
            Mode::Build => self.build.to_section(),
            Mode::Run => self.run.to_section(),
        }
    }
}

/// The stock defaults for `mode`.
pub fn load_defaults(mode: Mode) -> ConfigSection {
    Defaults::default().section(mode)
}
