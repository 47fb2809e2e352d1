//! Parallel execution strategy

use crate::{
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor, WindowJob},
};
use rayon::prelude::*;
use sitelang_core::{Window, WindowText};

/// Parallel multi-threaded executor
#[derive(Debug, Clone, Default)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Create a new parallel executor
    ///
    /// `None` runs on rayon's global pool, `Some(n)` on a dedicated pool of
    /// `n` threads.
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }

    fn classify_on_current_pool(
        windows: Vec<WindowText>,
        job: &WindowJob<'_>,
    ) -> Result<Vec<Window>> {
        // Indexed collect keeps window order
        windows
            .into_par_iter()
            .map(|window| job.run(window))
            .collect()
    }
}

impl Executor for ParallelExecutor {
    fn classify(&self, windows: Vec<WindowText>, job: &WindowJob<'_>) -> Result<Vec<Window>> {
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::ParallelError(e.to_string()))?;
                pool.install(|| Self::classify_on_current_pool(windows, job))
            }
            None => Self::classify_on_current_pool(windows, job),
        }
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
