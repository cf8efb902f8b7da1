use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use driver_sut::errors::Result;
use driver_sut::exec::ExecutorBackend;
use driver_sut::invocation::InvocationSpec;

/// A fake executor that:
/// - records every invocation it was asked to run
/// - answers with scripted exit codes, then `0` once the script runs out.
#[derive(Debug, Default, Clone)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<InvocationSpec>>>,
    exit_codes: Arc<Mutex<VecDeque<i32>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_codes(codes: impl IntoIterator<Item = i32>) -> Self {
        let executor = Self::default();
        executor.exit_codes.lock().unwrap().extend(codes);
        executor
    }

    pub fn executed(&self) -> Vec<InvocationSpec> {
        self.executed.lock().unwrap().clone()
    }

    pub fn executed_command_lines(&self) -> Vec<String> {
        self.executed()
            .iter()
            .map(InvocationSpec::command_line)
            .collect()
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute<'a>(
        &'a mut self,
        spec: &'a InvocationSpec,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + 'a>> {
        let executed = Arc::clone(&self.executed);
        let exit_codes = Arc::clone(&self.exit_codes);

        Box::pin(async move {
            executed.lock().unwrap().push(spec.clone());
            let code = exit_codes.lock().unwrap().pop_front().unwrap_or(0);
            Ok(code)
        })
    }
}
