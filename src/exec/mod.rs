// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `ExecutorBackend` trait that tests replace with
//!   a fake implementation.
//! - [`process`] holds `ProcessExecutor`, the `tokio::process` backend used in
//!   production.
//!
//! [`execute`] and [`execute_all`] add the operator trace line and the
//! stop-on-first-failure policy on top of any backend. The `*_traced`
//! variants write the trace to a caller-supplied writer instead of stdout.

pub mod backend;
pub mod process;

pub use backend::ExecutorBackend;
pub use process::ProcessExecutor;

use std::io::Write;

use crate::errors::{Result, SutError};
use crate::invocation::InvocationSpec;

/// Write the `# <label>: <command line>` trace for `spec`.
///
/// Flushed before returning so the line lands ahead of the child's own
/// output on the shared stdout.
pub fn write_trace(out: &mut dyn Write, spec: &InvocationSpec) -> Result<()> {
    writeln!(out, "{}", spec.trace_line())?;
    out.flush()?;
    Ok(())
}

/// Print the trace line for `spec`, run it, and return its exit code.
pub async fn execute(backend: &mut dyn ExecutorBackend, spec: &InvocationSpec) -> Result<i32> {
    execute_traced(&mut std::io::stdout(), backend, spec).await
}

/// Like [`execute`], with the trace line written to `out`.
pub async fn execute_traced(
    out: &mut (dyn Write + Send),
    backend: &mut dyn ExecutorBackend,
    spec: &InvocationSpec,
) -> Result<i32> {
    write_trace(out, spec)?;
    backend.execute(spec).await
}

/// Run `specs` in order, stopping at the first non-zero exit code.
///
/// Commands after a failure are never started; the failure is reported as
/// `SubprocessFailure`.
pub async fn execute_all(
    backend: &mut dyn ExecutorBackend,
    specs: &[InvocationSpec],
) -> Result<()> {
    execute_all_traced(&mut std::io::stdout(), backend, specs).await
}

/// Like [`execute_all`], with the trace lines written to `out`.
pub async fn execute_all_traced(
    out: &mut (dyn Write + Send),
    backend: &mut dyn ExecutorBackend,
    specs: &[InvocationSpec],
) -> Result<()> {
    for spec in specs {
        let code = execute_traced(out, backend, spec).await?;
        if code != 0 {
            return Err(SutError::SubprocessFailure {
                command: spec.command_line(),
                code,
            });
        }
    }
    Ok(())
}
