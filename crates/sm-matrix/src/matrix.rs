use crate::dtype::DType;
use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::multiply::{multiply, Strategy};
use crate::parallel::parallel_multiply;

/// A dense, row-major matrix of `f32` or `f64` elements.
///
/// Dimensions are fixed at construction. Holds exactly `height` rows of
/// `width` elements each.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Element> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Create a zero-filled matrix with `width` columns and `height` rows.
    ///
    /// # Panics
    /// Panics if `width * height` overflows `usize`. Use [`Matrix::try_new`]
    /// to get an error instead.
    pub fn new(width: usize, height: usize) -> Self {
        match Matrix::try_new(width, height) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a zero-filled matrix, failing if the element count overflows.
    ///
    /// # Errors
    /// Returns `SizeOverflow` if `width * height` does not fit in `usize`.
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        let len = element_count(width, height)?;
        Ok(Matrix {
            width,
            height,
            data: vec![T::ZERO; len],
        })
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `SizeOverflow` if `width * height` overflows and `DataLength`
    /// if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        let expected = element_count(width, height)?;
        if data.len() != expected {
            return Err(MatrixError::DataLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix {
            width,
            height,
            data,
        })
    }

    /// Create a matrix from a slice of rows.
    ///
    /// # Errors
    /// Returns `DataLength` if the rows are not all the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(element_count(width, rows.len())?);
        for row in rows {
            if row.len() != width {
                return Err(MatrixError::DataLength {
                    expected: width,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Matrix::from_vec(width, rows.len(), data)
    }

    /// Create an `n x n` identity matrix.
    ///
    /// # Panics
    /// Panics if `n * n` overflows `usize`.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::ONE;
        }
        m
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the matrix's element kind.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Returns the element at (`row`, `col`).
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` unless `row < height` and `col < width`.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        let idx = self.index(row, col)?;
        Ok(self.data[idx])
    }

    /// Overwrites the element at (`row`, `col`).
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` unless `row < height` and `col < width`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let idx = self.index(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Returns row `row` as a slice.
    pub fn row(&self, row: usize) -> Result<&[T]> {
        if row >= self.height {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col: 0,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self.row_slice(row))
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        (0..self.height).map(move |r| self.row_slice(r))
    }

    /// Returns the underlying row-major data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub(crate) fn row_slice(&self, row: usize) -> &[T] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    /// Returns a new `height x width` matrix with rows and columns swapped.
    pub fn transpose(&self) -> Matrix<T> {
        let mut result = Matrix::new(self.height, self.width);
        for r in 0..self.height {
            for c in 0..self.width {
                result.data[c * self.height + r] = self.data[r * self.width + c];
            }
        }
        result
    }

    /// Multiplies `self` (m x k) by `other` (k x n) using `strategy`.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if `self.width() != other.height()`.
    pub fn matmul(&self, other: &Matrix<T>, strategy: Strategy) -> Result<Matrix<T>> {
        match strategy {
            Strategy::Sequential => multiply(self, other),
            Strategy::Parallel => parallel_multiply(self, other),
        }
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.height || col >= self.width {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(row * self.width + col)
    }
}

/// `width * height`, or `SizeOverflow` if the product does not fit in `usize`.
pub(crate) fn element_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or(MatrixError::SizeOverflow { width, height })
}
