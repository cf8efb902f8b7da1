// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod invocation;
pub mod logging;
pub mod resolver;

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::{keys, ConfigSection, Defaults, Mode};
use crate::errors::{Result, SutError};
use crate::exec::{execute, execute_all, ExecutorBackend, ProcessExecutor};
use crate::fs::{FileSystem, RealFileSystem};
use crate::invocation::{build_invocation, InvocationSpec, Targets};
use crate::resolver::{ConfigResolver, ResolveRequest};

/// Everything one run of the binary is going to do, fully resolved.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub mode: Mode,
    pub section: ConfigSection,
    pub invocations: Vec<InvocationSpec>,
    pub dry_run: bool,
}

/// High-level entry point used by `main.rs`.
///
/// Returns the exit code the process should terminate with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let mut executor = ProcessExecutor::new();
    run_with(&args, &RealFileSystem, &mut executor).await
}

/// [`run`] with injectable filesystem and executor.
///
/// - build: every command must succeed; the first failure stops the run
///   with `SubprocessFailure`.
/// - run: the server's exit code is returned unchanged.
pub async fn run_with(
    args: &CliArgs,
    fs: &dyn FileSystem,
    executor: &mut dyn ExecutorBackend,
) -> Result<i32> {
    let plan = plan(args, fs)?;

    if plan.dry_run {
        print_dry_run(&plan)?;
        return Ok(0);
    }

    match plan.mode {
        Mode::Build => {
            execute_all(executor, &plan.invocations).await?;
            info!("build finished");
            Ok(0)
        }
        Mode::Run => {
            let mut code = 0;
            for spec in &plan.invocations {
                code = execute(executor, spec).await?;
                if code != 0 {
                    warn!(command = %spec, exit_code = code, "server exited with failure status");
                    break;
                }
            }
            Ok(code)
        }
    }
}

/// Resolve configuration and build the invocations, without executing them.
///
/// Prints the `# Configuration file` and `# Current directory` trace lines.
pub fn plan(args: &CliArgs, fs: &dyn FileSystem) -> Result<LaunchPlan> {
    let (request, dry_run) = match &args.command {
        Command::Build(build) => {
            let mut request = ResolveRequest::new(Mode::Build)
                .with_configuration_file(build.configuration_file.clone());
            if let Some(branch) = &build.branch {
                request = request.with_flag(keys::DRIVER_BRANCH, branch.clone());
            }
            (request, build.dry_run)
        }
        Command::Run(run) => (
            ResolveRequest::new(Mode::Run)
                .with_configuration_file(run.configuration_file.clone()),
            run.dry_run,
        ),
    };

    let project_dir = project_dir(fs, &args.project_dir)?;

    match &request.configuration_file {
        Some(path) => println!("# Configuration file: {path}"),
        None => println!("# Configuration file: None"),
    }
    println!("# Current directory: {}", project_dir.display());

    let resolver = ConfigResolver::new(fs, Defaults::default());
    let section = resolver.resolve(&request)?;
    let invocations = build_invocation(request.mode, &section, &Targets::new(project_dir))?;

    Ok(LaunchPlan {
        mode: request.mode,
        section,
        invocations,
        dry_run,
    })
}

fn project_dir(fs: &dyn FileSystem, raw: &Path) -> Result<std::path::PathBuf> {
    if !fs.is_dir(raw) {
        return Err(SutError::InvalidArgument(format!(
            "project directory {} does not exist",
            raw.display()
        )));
    }
    Ok(fs.canonicalize(raw)?)
}

/// Dry-run output: resolved section as TOML, then the commands.
fn print_dry_run(plan: &LaunchPlan) -> Result<()> {
    println!("driver-sut dry-run ({})", plan.mode);
    println!();

    let doc = BTreeMap::from([(plan.mode.section_name(), &plan.section)]);
    print!("{}", toml::to_string(&doc)?);
    println!();

    println!("commands ({}):", plan.invocations.len());
    for spec in &plan.invocations {
        println!("  - {spec}");
        if let Some(dir) = spec.working_dir() {
            println!("      cwd: {}", dir.display());
        }
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
