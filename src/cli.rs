// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::fs::RealFileSystem;
use crate::resolver::{resolve_path_argument, ValidatedPath};

/// Command-line arguments for `driver-sut`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "driver-sut",
    version,
    about = "Build and run the Node.js driver system under test.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DRIVER_SUT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Directory holding the SUT sources (`package.json`, `src/server.js`).
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Install the driver at the requested branch, then the remaining
    /// dependencies.
    Build(BuildArgs),
    /// Launch the SUT server with the resolved settings.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Driver branch to install [default: master].
    ///
    /// Takes precedence over `driver_branch` in the configuration file.
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// INI file with a `[build]` section.
    #[arg(long, value_name = "PATH", value_parser = configuration_file)]
    pub configuration_file: Option<ValidatedPath>,

    /// Print the resolved settings and commands without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// INI file with a `[run]` section.
    #[arg(long, value_name = "PATH", value_parser = configuration_file)]
    pub configuration_file: Option<ValidatedPath>,

    /// Print the resolved settings and command without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Rejects paths that are not existing regular files while arguments are
/// still being parsed.
fn configuration_file(raw: &str) -> Result<ValidatedPath, String> {
    resolve_path_argument(&RealFileSystem, raw).map_err(|e| e.to_string())
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn build_without_flags() {
        let args = CliArgs::try_parse_from(["driver-sut", "build"]).unwrap();
        match args.command {
            Command::Build(build) => {
                assert_eq!(build.branch, None);
                assert_eq!(build.configuration_file, None);
                assert!(!build.dry_run);
            }
            other => panic!("expected build, got {other:?}"),
        }
        assert_eq!(args.project_dir, PathBuf::from("."));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "driver-sut",
            "run",
            "--project-dir",
            "/srv/sut",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.project_dir, PathBuf::from("/srv/sut"));
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
