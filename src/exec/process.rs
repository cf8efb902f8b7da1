// src/exec/process.rs

//! Real process executor.

use anyhow::Context;
use tokio::process::Command;
use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use tracing::{info, warn};

use crate::errors::Result;
use crate::exec::backend::ExecutorBackend;
use crate::invocation::InvocationSpec;

/// Spawns each invocation as a child process with inherited stdio and waits
/// for it to exit.
///
/// No shell is involved: the program and its arguments are passed through
/// exactly as built.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutorBackend for ProcessExecutor {
    fn execute<'a>(
        &'a mut self,
        spec: &'a InvocationSpec,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + 'a>> {
        Box::pin(async move {
            let mut cmd = Command::new(spec.program());
            cmd.args(spec.args())
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
            if let Some(dir) = spec.working_dir() {
                cmd.current_dir(dir);
            }

            let mut child = cmd
                .spawn()
                .with_context(|| format!("spawning `{}`", spec.command_line()))?;

            let status = child
                .wait()
                .await
                .with_context(|| format!("waiting for `{}`", spec.command_line()))?;

            let code = match status.code() {
                Some(code) => code,
                None => {
                    warn!(command = %spec, "process terminated without an exit code");
                    1
                }
            };

            info!(
                command = %spec,
                exit_code = code,
                success = status.success(),
                "process exited"
            );

            Ok(code)
        })
    }
}
