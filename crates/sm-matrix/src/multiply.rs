use log::debug;

use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::kernel::{self, Kernel};
use crate::lanes::{pack_columns, LanePacked};
use crate::matrix::Matrix;

/// Execution strategy for [`Matrix::matmul`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Single-threaded driver.
    #[default]
    Sequential,
    /// Row-partitioned fork-join over the rayon pool.
    Parallel,
}

/// Multiplies `a` (m x k) by `b` (k x n) on the calling thread.
///
/// The result has `b.width()` columns and `a.height()` rows.
///
/// # Errors
/// Returns `DimensionMismatch` if `a.width() != b.height()` and
/// `SizeOverflow` if the result's element count does not fit in `usize`.
pub fn multiply<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    multiply_with_kernel(a, b, Kernel::detect())
}

/// Same as [`multiply`] but with an explicit dot-product kernel.
///
/// # Errors
/// Returns `KernelUnavailable` if `kernel` cannot run on this CPU.
pub fn multiply_with_kernel<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    kernel: Kernel,
) -> Result<Matrix<T>> {
    check_dimensions(a, b)?;
    kernel.ensure_available()?;
    debug!(
        "multiply [{}x{}] @ [{}x{}] ({}, lanes={}, kernel={})",
        a.height(),
        a.width(),
        b.height(),
        b.width(),
        T::DTYPE,
        T::DTYPE.lane_width(),
        kernel
    );

    let mut result = Matrix::try_new(b.width(), a.height())?;
    if result.as_slice().is_empty() {
        return Ok(result);
    }

    let columns = pack_columns(b);
    let n = result.width();
    for (r, out) in result.as_mut_slice().chunks_mut(n).enumerate() {
        fill_row(out, a.row_slice(r), &columns, kernel)?;
    }
    Ok(result)
}

pub(crate) fn check_dimensions<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<()> {
    if a.width() != b.height() {
        return Err(MatrixError::DimensionMismatch {
            a_height: a.height(),
            a_width: a.width(),
            b_height: b.height(),
            b_width: b.width(),
        });
    }
    Ok(())
}

/// Computes one output row: packs `a_row` once and dots it with every column.
pub(crate) fn fill_row<T: Element>(
    out: &mut [T],
    a_row: &[T],
    columns: &[LanePacked<T>],
    kernel: Kernel,
) -> Result<()> {
    let row = LanePacked::pack(a_row);
    for (cell, column) in out.iter_mut().zip(columns) {
        *cell = kernel::dot_checked(kernel, &row, column)?;
    }
    Ok(())
}
