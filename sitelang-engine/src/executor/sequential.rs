//! Sequential execution strategy

use crate::{
    error::Result,
    executor::{ExecutionMode, Executor, WindowJob},
};
use sitelang_core::{Window, WindowText};

/// Sequential single-threaded executor
#[derive(Debug, Clone, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn classify(&self, windows: Vec<WindowText>, job: &WindowJob<'_>) -> Result<Vec<Window>> {
        windows.into_iter().map(|window| job.run(window)).collect()
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
