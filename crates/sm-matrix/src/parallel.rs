//! Data-parallel multiply driver.
//!
//! Output rows are split into contiguous chunks, one per worker. The packed
//! columns of `B` are shared read-only; each worker packs only its own rows of
//! `A` and writes only its own slice of the result, so no locking is needed.

use log::{debug, trace};
use rayon::prelude::*;

use crate::config::ParallelConfig;
use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::kernel::Kernel;
use crate::lanes::pack_columns;
use crate::matrix::Matrix;
use crate::multiply::{check_dimensions, fill_row};

/// Multiplies `a` (m x k) by `b` (k x n) across rayon's global pool.
///
/// Blocks until every worker has finished. Produces the same values as
/// [`multiply`](crate::multiply) up to floating-point tolerance.
///
/// # Errors
/// Returns `DimensionMismatch` if `a.width() != b.height()` and
/// `SizeOverflow` if the result's element count does not fit in `usize`.
pub fn parallel_multiply<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    parallel_multiply_with(a, b, &ParallelConfig::default())
}

/// Same as [`parallel_multiply`] with an explicit configuration.
///
/// # Errors
/// Besides `DimensionMismatch`, returns `KernelUnavailable` or `ThreadPool`
/// when the configuration cannot be honoured. All checks run before any
/// work starts.
pub fn parallel_multiply_with<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    config: &ParallelConfig,
) -> Result<Matrix<T>> {
    check_dimensions(a, b)?;
    let kernel = config.kernel();
    kernel.ensure_available()?;

    match config.build_pool()? {
        Some(pool) => pool.install(|| run(a, b, kernel, config.min_rows_per_task)),
        None => run(a, b, kernel, config.min_rows_per_task),
    }
}

fn run<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    kernel: Kernel,
    min_rows_per_task: usize,
) -> Result<Matrix<T>> {
    let threads = rayon::current_num_threads();
    let rows_per_task = rows_per_task(a.height(), threads, min_rows_per_task);
    debug!(
        "parallel_multiply [{}x{}] @ [{}x{}] ({}, lanes={}, kernel={}, threads={}, rows={})",
        a.height(),
        a.width(),
        b.height(),
        b.width(),
        T::DTYPE,
        T::DTYPE.lane_width(),
        kernel,
        threads,
        rows_per_task
    );

    let mut result = Matrix::try_new(b.width(), a.height())?;
    if result.as_slice().is_empty() {
        return Ok(result);
    }

    let columns = pack_columns(b);
    let columns = columns.as_slice();
    let n = result.width();

    result
        .as_mut_slice()
        .par_chunks_mut(rows_per_task * n)
        .enumerate()
        .try_for_each(|(task, chunk)| {
            let first_row = task * rows_per_task;
            trace!(
                "task {} rows {}..{}",
                task,
                first_row,
                first_row + chunk.len() / n
            );
            for (offset, out) in chunk.chunks_mut(n).enumerate() {
                fill_row(out, a.row_slice(first_row + offset), columns, kernel)?;
            }
            Ok::<(), MatrixError>(())
        })?;

    Ok(result)
}

/// Rows per worker chunk: an even split across `threads`, but never fewer
/// than `min_rows` (or 1).
fn rows_per_task(height: usize, threads: usize, min_rows: usize) -> usize {
    height.div_ceil(threads.max(1)).max(min_rows).max(1)
}
