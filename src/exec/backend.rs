// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The launcher talks to an `ExecutorBackend` instead of spawning processes
//! directly. This makes it easy to swap in a fake executor in tests while
//! keeping the production implementation in [`super::process`].

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::invocation::InvocationSpec;

/// Trait abstracting how an invocation is executed.
///
/// Production code uses [`super::ProcessExecutor`]; tests can provide their
/// own implementation that doesn't spawn real processes.
pub trait ExecutorBackend: Send {
    /// Run `spec` to completion and return its exit code.
    ///
    /// A child terminated without an exit code (e.g. by a signal) reports
    /// `1`. An `Err` means the command could not be run at all.
    fn execute<'a>(
        &'a mut self,
        spec: &'a InvocationSpec,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + 'a>>;
}
