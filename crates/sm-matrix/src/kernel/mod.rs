//! Dot-product kernels over lane-packed sequences.
//!
//! Every kernel reduces in the same order: within a lane, the upper half is
//! fused onto the product of the lower half, the resulting half-width vector
//! is summed pairwise, and lane sums are accumulated in ascending lane order.
//! Results therefore agree closely with a naive left-to-right sum but are not
//! bit-identical to it.

pub(crate) mod portable;
#[cfg(target_arch = "x86_64")]
pub(crate) mod x86;

use std::fmt;
use std::sync::OnceLock;

use log::debug;

use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::lanes::LanePacked;

/// Implementation used for the inner dot product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// Plain lane-array arithmetic, available everywhere.
    Portable,
    /// Hardware fused multiply-add (AVX2+FMA on x86_64, NEON on aarch64).
    Fma,
}

impl Kernel {
    /// Returns the fastest kernel the running CPU supports.
    ///
    /// Detection runs once per process.
    pub fn detect() -> Kernel {
        static DETECTED: OnceLock<Kernel> = OnceLock::new();
        *DETECTED.get_or_init(|| {
            let kernel = if Kernel::Fma.is_available() {
                Kernel::Fma
            } else {
                Kernel::Portable
            };
            debug!("dot-product kernel selected: {}", kernel);
            kernel
        })
    }

    /// Returns the name of this kernel (e.g., "portable", "fma").
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::Portable => "portable",
            Kernel::Fma => "fma",
        }
    }

    /// Returns true if the running CPU can execute this kernel.
    pub fn is_available(&self) -> bool {
        match self {
            Kernel::Portable => true,
            Kernel::Fma => fma_supported(),
        }
    }

    /// Fails with `KernelUnavailable` if this kernel cannot run here.
    pub fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(MatrixError::KernelUnavailable(self.name().to_string()))
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(target_arch = "x86_64")]
fn fma_supported() -> bool {
    is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
}

#[cfg(target_arch = "aarch64")]
fn fma_supported() -> bool {
    true
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn fma_supported() -> bool {
    false
}

/// Returns true if dot products run on vector FMA hardware.
pub fn is_hardware_accelerated() -> bool {
    Kernel::detect() == Kernel::Fma
}

/// Dot product of two lane-packed sequences using the detected kernel.
pub fn dot<T: Element>(a: &LanePacked<T>, b: &LanePacked<T>) -> Result<T> {
    dot_with(Kernel::detect(), a, b)
}

/// Dot product of two lane-packed sequences using `kernel`.
///
/// # Errors
/// Returns `LaneMismatch` if the sequences have different logical lengths and
/// `KernelUnavailable` if `kernel` cannot run on this CPU.
pub fn dot_with<T: Element>(kernel: Kernel, a: &LanePacked<T>, b: &LanePacked<T>) -> Result<T> {
    kernel.ensure_available()?;
    dot_checked(kernel, a, b)
}

/// Length-checked dot product for drivers that validated `kernel` up front.
pub(crate) fn dot_checked<T: Element>(
    kernel: Kernel,
    a: &LanePacked<T>,
    b: &LanePacked<T>,
) -> Result<T> {
    if a.len() != b.len() {
        return Err(MatrixError::LaneMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(T::dot_lanes(kernel, a.lanes(), b.lanes()))
}
