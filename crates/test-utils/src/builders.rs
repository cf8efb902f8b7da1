#![allow(dead_code)]

use std::path::PathBuf;

use driver_sut::cli::{BuildArgs, CliArgs, Command, RunArgs};
use driver_sut::resolver::ValidatedPath;

/// Builder for INI configuration file contents.
pub struct IniFileBuilder {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl IniFileBuilder {
    pub fn new() -> Self {
        Self { sections: Vec::new() }
    }

    /// Start a new `[name]` section; following `option` calls land in it.
    pub fn section(mut self, name: &str) -> Self {
        self.sections.push((name.to_string(), Vec::new()));
        self
    }

    pub fn option(mut self, key: &str, value: &str) -> Self {
        if self.sections.is_empty() {
            self.sections.push(("DEFAULT".to_string(), Vec::new()));
        }
        if let Some((_, options)) = self.sections.last_mut() {
            options.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        for (name, options) in self.sections {
            out.push_str(&format!("[{name}]\n"));
            for (key, value) in options {
                out.push_str(&format!("{key} = {value}\n"));
            }
            out.push('\n');
        }
        out
    }
}

impl Default for IniFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CliArgs`, bypassing clap so tests can point at paths that
/// only exist in a mock filesystem.
pub struct CliArgsBuilder {
    project_dir: PathBuf,
    command: Command,
}

impl CliArgsBuilder {
    pub fn build_mode() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            command: Command::Build(BuildArgs {
                branch: None,
                configuration_file: None,
                dry_run: false,
            }),
        }
    }

    pub fn run_mode() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            command: Command::Run(RunArgs {
                configuration_file: None,
                dry_run: false,
            }),
        }
    }

    pub fn project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = dir.into();
        self
    }

    /// Only meaningful in build mode.
    pub fn branch(mut self, branch: &str) -> Self {
        if let Command::Build(args) = &mut self.command {
            args.branch = Some(branch.to_string());
        }
        self
    }

    pub fn configuration_file(mut self, path: ValidatedPath) -> Self {
        match &mut self.command {
            Command::Build(args) => args.configuration_file = Some(path),
            Command::Run(args) => args.configuration_file = Some(path),
        }
        self
    }

    pub fn dry_run(mut self) -> Self {
        match &mut self.command {
            Command::Build(args) => args.dry_run = true,
            Command::Run(args) => args.dry_run = true,
        }
        self
    }

    pub fn build(self) -> CliArgs {
        CliArgs {
            log_level: None,
            project_dir: self.project_dir,
            command: self.command,
        }
    }
}
