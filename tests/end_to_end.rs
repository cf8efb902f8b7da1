// tests/end_to_end.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::Path;

use driver_sut::errors::SutError;
use driver_sut::fs::mock::MockFileSystem;
use driver_sut::resolver::resolve_path_argument;
use driver_sut::{plan, run_with};
use driver_sut_test_utils::builders::{CliArgsBuilder, IniFileBuilder};
use driver_sut_test_utils::fake_executor::FakeExecutor;

type TestResult = Result<(), Box<dyn Error>>;

const PROJECT: &str = "/srv/sut";

fn project_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_dir(PROJECT);
    fs
}

#[tokio::test]
async fn build_without_flags_installs_master_then_dependencies() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let mut executor = FakeExecutor::new();
    let args = CliArgsBuilder::build_mode().project_dir(PROJECT).build();

    let code = run_with(&args, &fs, &mut executor).await?;

    assert_eq!(code, 0);
    assert_eq!(
        executor.executed_command_lines(),
        vec!["npm install datastax/nodejs-driver#master", "npm install"]
    );
    assert!(executor
        .executed()
        .iter()
        .all(|spec| spec.working_dir() == Some(Path::new(PROJECT))));
    Ok(())
}

#[tokio::test]
async fn build_with_branch_flag() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let mut executor = FakeExecutor::new();
    let args = CliArgsBuilder::build_mode()
        .project_dir(PROJECT)
        .branch("NODEJS-42")
        .build();

    run_with(&args, &fs, &mut executor).await?;

    let first = &executor.executed_command_lines()[0];
    assert!(first.contains("NODEJS-42"));
    assert!(!first.contains("master"));
    Ok(())
}

#[tokio::test]
async fn build_branch_flag_beats_configuration_file() -> TestResult {
    init_tracing();
    let fs = project_fs();
    fs.add_file(
        "/etc/sut.ini",
        IniFileBuilder::new()
            .section("build")
            .option("driver_branch", "from-file")
            .build(),
    );
    let path = resolve_path_argument(&fs, "/etc/sut.ini")?;

    let mut executor = FakeExecutor::new();
    let args = CliArgsBuilder::build_mode()
        .project_dir(PROJECT)
        .configuration_file(path.clone())
        .branch("from-flag")
        .build();
    run_with(&args, &fs, &mut executor).await?;
    assert_eq!(
        executor.executed_command_lines()[0],
        "npm install datastax/nodejs-driver#from-flag"
    );

    let mut executor = FakeExecutor::new();
    let args = CliArgsBuilder::build_mode()
        .project_dir(PROJECT)
        .configuration_file(path)
        .build();
    run_with(&args, &fs, &mut executor).await?;
    assert_eq!(
        executor.executed_command_lines()[0],
        "npm install datastax/nodejs-driver#from-file"
    );
    Ok(())
}

#[tokio::test]
async fn failed_install_stops_the_build() {
    init_tracing();
    let fs = project_fs();
    let mut executor = FakeExecutor::with_exit_codes([1]);
    let args = CliArgsBuilder::build_mode().project_dir(PROJECT).build();

    let result = run_with(&args, &fs, &mut executor).await;

    match result {
        Err(SutError::SubprocessFailure { command, code }) => {
            assert_eq!(command, "npm install datastax/nodejs-driver#master");
            assert_eq!(code, 1);
        }
        other => panic!("expected SubprocessFailure, got {other:?}"),
    }
    assert_eq!(executor.executed().len(), 1);
}

#[tokio::test]
async fn run_without_configuration_uses_defaults() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let mut executor = FakeExecutor::new();
    let args = CliArgsBuilder::run_mode().project_dir(PROJECT).build();

    let code = run_with(&args, &fs, &mut executor).await?;

    assert_eq!(code, 0);
    let executed = executor.executed();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].program(), "node");
    assert_eq!(
        executed[0].args(),
        &[
            "/srv/sut/src/server.js",
            "127.0.0.1",
            "127.0.0.1",
            "100",
            "50",
            "8"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn run_with_contact_points_from_file() -> TestResult {
    init_tracing();
    let fs = project_fs();
    fs.add_file(
        "/etc/sut/run.ini",
        "[run]\ncassandra_contact_points = 10.0.0.5\n",
    );
    let path = resolve_path_argument(&fs, "/etc/sut/run.ini")?;

    let mut executor = FakeExecutor::new();
    let args = CliArgsBuilder::run_mode()
        .project_dir(PROJECT)
        .configuration_file(path)
        .build();

    run_with(&args, &fs, &mut executor).await?;

    assert_eq!(
        executor.executed_command_lines(),
        vec!["node /srv/sut/src/server.js 10.0.0.5 127.0.0.1 100 50 8"]
    );
    Ok(())
}

#[tokio::test]
async fn run_passes_the_server_exit_code_through() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let mut executor = FakeExecutor::with_exit_codes([42]);
    let args = CliArgsBuilder::run_mode().project_dir(PROJECT).build();

    let code = run_with(&args, &fs, &mut executor).await?;
    assert_eq!(code, 42);
    Ok(())
}

#[tokio::test]
async fn resolution_errors_run_nothing() {
    init_tracing();
    let fs = project_fs();
    fs.add_file("/etc/sut.ini", "[build]\ndriver_branch = master\n");
    let path = resolve_path_argument(&fs, "/etc/sut.ini").unwrap();

    let mut executor = FakeExecutor::new();
    let args = CliArgsBuilder::run_mode()
        .project_dir(PROJECT)
        .configuration_file(path)
        .build();

    let result = run_with(&args, &fs, &mut executor).await;
    assert!(matches!(result, Err(SutError::MissingSection { .. })));
    assert!(executor.executed().is_empty());
}

#[tokio::test]
async fn missing_project_dir_is_an_invalid_argument() {
    init_tracing();
    let fs = MockFileSystem::new();
    let mut executor = FakeExecutor::new();
    let args = CliArgsBuilder::run_mode().project_dir("/nowhere").build();

    let result = run_with(&args, &fs, &mut executor).await;
    assert!(matches!(result, Err(SutError::InvalidArgument(_))));
    assert!(executor.executed().is_empty());
}

#[tokio::test]
async fn dry_run_executes_nothing() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let mut executor = FakeExecutor::new();
    let args = CliArgsBuilder::build_mode()
        .project_dir(PROJECT)
        .dry_run()
        .build();

    let code = run_with(&args, &fs, &mut executor).await?;
    assert_eq!(code, 0);
    assert!(executor.executed().is_empty());
    Ok(())
}

#[test]
fn plan_is_deterministic() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let args = CliArgsBuilder::run_mode().project_dir(PROJECT).build();

    let first = plan(&args, &fs)?;
    let second = plan(&args, &fs)?;
    assert_eq!(first.section, second.section);
    assert_eq!(first.invocations, second.invocations);
    Ok(())
}
