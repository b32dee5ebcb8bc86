use std::fmt;
use std::ops::{Add, Mul};

use crate::dtype::DType;
use crate::kernel::{portable, Kernel};

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A fixed-width vector lane of scalar elements.
///
/// Lanes are 32-byte aligned so they can be fed directly to 256-bit vector
/// loads.
pub trait Lane<T>: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Number of scalar elements in one lane.
    const WIDTH: usize;

    /// A lane with every element set to zero.
    fn zero() -> Self;

    /// Loads up to `WIDTH` elements from `src`, zero-filling the remainder.
    ///
    /// Elements past `WIDTH` are ignored.
    fn load_padded(src: &[T]) -> Self;

    /// The lane's elements in order.
    fn as_slice(&self) -> &[T];
}

macro_rules! lane_type {
    ($(#[$meta:meta])* $name:ident, $elem:ty, $width:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[repr(C, align(32))]
        pub struct $name(pub [$elem; $width]);

        impl Lane<$elem> for $name {
            const WIDTH: usize = $width;

            #[inline]
            fn zero() -> Self {
                $name([0.0; $width])
            }

            #[inline]
            fn load_padded(src: &[$elem]) -> Self {
                let mut lane = [0.0; $width];
                let n = src.len().min($width);
                lane[..n].copy_from_slice(&src[..n]);
                $name(lane)
            }

            #[inline]
            fn as_slice(&self) -> &[$elem] {
                &self.0
            }
        }
    };
}

lane_type!(
    /// Eight `f32` values, one AVX register.
    F32x8,
    f32,
    8
);
lane_type!(
    /// Four `f64` values, one AVX register.
    F64x4,
    f64,
    4
);

/// Scalar kinds a [`Matrix`](crate::Matrix) can store.
///
/// Sealed: implemented for `f32` and `f64` only.
pub trait Element:
    sealed::Sealed
    + Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Mul<Output = Self>
    + Send
    + Sync
    + 'static
{
    const DTYPE: DType;
    const ZERO: Self;
    const ONE: Self;
    /// Lane width, equal to `Self::Lane::WIDTH`.
    const LANES: usize;

    type Lane: Lane<Self>;

    /// Computes `self * a + b` with a single rounding step.
    fn fused_mul_add(self, a: Self, b: Self) -> Self;

    /// Reduces two equal-length lane sequences with `kernel`.
    ///
    /// Callers must have checked `kernel.is_available()`.
    #[doc(hidden)]
    fn dot_lanes(kernel: Kernel, a: &[Self::Lane], b: &[Self::Lane]) -> Self;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const LANES: usize = F32x8::WIDTH;

    type Lane = F32x8;

    #[inline]
    fn fused_mul_add(self, a: Self, b: Self) -> Self {
        f32::mul_add(self, a, b)
    }

    fn dot_lanes(kernel: Kernel, a: &[F32x8], b: &[F32x8]) -> Self {
        match kernel {
            Kernel::Portable => portable::dot::<f32>(a, b, false),
            #[cfg(target_arch = "x86_64")]
            // SAFETY: `Kernel::Fma` is only dispatched after the AVX2+FMA check.
            Kernel::Fma => unsafe { crate::kernel::x86::dot_f32(a, b) },
            #[cfg(not(target_arch = "x86_64"))]
            Kernel::Fma => portable::dot::<f32>(a, b, true),
        }
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const LANES: usize = F64x4::WIDTH;

    type Lane = F64x4;

    #[inline]
    fn fused_mul_add(self, a: Self, b: Self) -> Self {
        f64::mul_add(self, a, b)
    }

    fn dot_lanes(kernel: Kernel, a: &[F64x4], b: &[F64x4]) -> Self {
        match kernel {
            Kernel::Portable => portable::dot::<f64>(a, b, false),
            #[cfg(target_arch = "x86_64")]
            // SAFETY: `Kernel::Fma` is only dispatched after the AVX2+FMA check.
            Kernel::Fma => unsafe { crate::kernel::x86::dot_f64(a, b) },
            #[cfg(not(target_arch = "x86_64"))]
            Kernel::Fma => portable::dot::<f64>(a, b, true),
        }
    }
}
