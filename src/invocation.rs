// src/invocation.rs

//! Turning a resolved section into the commands to run.
//!
//! Everything here is pure: the same section and targets always yield the
//! same [`InvocationSpec`]s.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{keys, ConfigSection, Mode};
use crate::errors::Result;

/// Executable plus its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    trace_label: String,
}

impl InvocationSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            trace_label: "Executing command".to_string(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Label of the `# <label>: <command line>` trace printed before running.
    pub fn traced_as(mut self, label: impl Into<String>) -> Self {
        self.trace_label = label.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Space-joined command line, used for trace output and error messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn trace_line(&self) -> String {
        format!("# {}: {}", self.trace_label, self.command_line())
    }
}

impl fmt::Display for InvocationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// External collaborators the invocations target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    /// Working directory for the package manager and root of the server.
    pub project_dir: PathBuf,
    pub package_manager: String,
    pub node: String,
    /// Package spec installed at the resolved branch.
    pub driver_dependency: String,
}

impl Targets {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            package_manager: "npm".to_string(),
            node: "node".to_string(),
            driver_dependency: "datastax/nodejs-driver".to_string(),
        }
    }

    pub fn server_entrypoint(&self) -> PathBuf {
        self.project_dir.join("src").join("server.js")
    }
}

/// Build the ordered list of commands for `mode` from a resolved section.
///
/// - build: `npm install <dependency>#<branch>`, then `npm install`
/// - run: `node <project>/src/server.js <contact_points> <graphite_host>
///   <queries_per_http> <limit_per_http> <connections_per_host>`
pub fn build_invocation(
    mode: Mode,
    section: &ConfigSection,
    targets: &Targets,
) -> Result<Vec<InvocationSpec>> {
    match mode {
        Mode::Build => {
            let branch = section.value(keys::DRIVER_BRANCH)?;
            let install_driver = InvocationSpec::new(&targets.package_manager)
                .arg("install")
                .arg(format!("{}#{}", targets.driver_dependency, branch))
                .current_dir(&targets.project_dir);
            let install_rest = InvocationSpec::new(&targets.package_manager)
                .arg("install")
                .current_dir(&targets.project_dir);
            Ok(vec![install_driver, install_rest])
        }
        Mode::Run => {
            let mut server = InvocationSpec::new(&targets.node)
                .arg(targets.server_entrypoint().to_string_lossy())
                .current_dir(&targets.project_dir)
                .traced_as("Running command");
            for key in [
                keys::CONTACT_POINTS,
                keys::GRAPHITE_HOST,
                keys::QUERIES_PER_HTTP,
                keys::LIMIT_PER_HTTP,
                keys::CONNECTIONS_PER_HOST,
            ] {
                server = server.arg(section.value(key)?.to_string());
            }
            Ok(vec![server])
        }
    }
}
