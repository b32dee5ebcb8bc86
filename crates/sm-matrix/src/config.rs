use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{MatrixError, Result};
use crate::kernel::Kernel;

/// Configuration for [`parallel_multiply_with`](crate::parallel_multiply_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Size of a dedicated worker pool. `None` runs on rayon's global pool,
    /// whose size is chosen by the runtime (see `RAYON_NUM_THREADS`).
    pub num_threads: Option<usize>,
    /// Lower bound on output rows handed to a single worker.
    pub min_rows_per_task: usize,
    /// Dot-product kernel. `None` uses [`Kernel::detect`].
    pub kernel: Option<Kernel>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            num_threads: None,
            min_rows_per_task: 1,
            kernel: None,
        }
    }
}

impl ParallelConfig {
    /// Same as [`ParallelConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs on a dedicated pool of `num_threads` workers.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Sets the minimum number of output rows per worker chunk.
    pub fn with_min_rows_per_task(mut self, rows: usize) -> Self {
        self.min_rows_per_task = rows;
        self
    }

    /// Forces a dot-product kernel instead of detecting one.
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = Some(kernel);
        self
    }

    /// The kernel to run, falling back to detection.
    pub fn kernel(&self) -> Kernel {
        self.kernel.unwrap_or_else(Kernel::detect)
    }

    /// Builds the dedicated pool, or returns `None` to use the global pool.
    ///
    /// # Errors
    /// Returns `ThreadPool` if rayon fails to spawn the workers.
    pub fn build_pool(&self) -> Result<Option<ThreadPool>> {
        let Some(num_threads) = self.num_threads else {
            return Ok(None);
        };
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("sm-matrix-{}", i))
            .build()
            .map(Some)
            .map_err(|e| MatrixError::ThreadPool(e.to_string()))
    }
}
