//! `sm-matrix` - Dense matrix multiplication over lane-packed SIMD vectors.
//!
//! This crate provides:
//! - A row-major `Matrix<T>` for `f32` and `f64` elements
//! - Lane packing of rows and columns into 256-bit vector lanes
//! - Dot-product kernels (portable, and hardware FMA where available)
//! - A sequential multiply driver and a rayon fork-join parallel driver
//!
//! ```
//! use sm_matrix::{multiply, parallel_multiply, Matrix};
//!
//! let a = Matrix::from_rows(&[vec![1.0f64, 2.0], vec![3.0, 4.0]]).unwrap();
//! let b = Matrix::from_rows(&[vec![5.0f64, 6.0], vec![7.0, 8.0]]).unwrap();
//!
//! let c = multiply(&a, &b).unwrap();
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! assert_eq!(parallel_multiply(&a, &b).unwrap(), c);
//! ```

pub mod config;
pub mod dtype;
pub mod element;
pub mod error;
pub mod kernel;
pub mod lanes;
pub mod matrix;
pub mod multiply;
pub mod parallel;

// Re-export primary types at the crate root for convenience.
pub use config::ParallelConfig;
pub use dtype::DType;
pub use element::{Element, F32x8, F64x4, Lane};
pub use error::{MatrixError, Result};
pub use kernel::{dot, dot_with, is_hardware_accelerated, Kernel};
pub use lanes::{pack_columns, pack_rows, LanePacked};
pub use matrix::Matrix;
pub use multiply::{multiply, multiply_with_kernel, Strategy};
pub use parallel::{parallel_multiply, parallel_multiply_with};
