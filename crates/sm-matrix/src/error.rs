use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("matmul dimension mismatch: [{a_height}x{a_width}] @ [{b_height}x{b_width}]")]
    DimensionMismatch {
        a_height: usize,
        a_width: usize,
        b_height: usize,
        b_width: usize,
    },
    #[error("index ({row}, {col}) out of bounds for {height}x{width} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
    #[error("matrix size {width}x{height} overflows the addressable element count")]
    SizeOverflow { width: usize, height: usize },
    #[error("data length mismatch: expected {expected} elements, got {got}")]
    DataLength { expected: usize, got: usize },
    #[error("lane sequence length mismatch: {left} vs {right}")]
    LaneMismatch { left: usize, right: usize },
    #[error("kernel {0} is not supported on this CPU")]
    KernelUnavailable(String),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
