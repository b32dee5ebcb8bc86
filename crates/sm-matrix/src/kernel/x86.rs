//! AVX2+FMA dot-product kernels.
//!
//! Each lane is split into its 128-bit halves: the high half is fused onto
//! the product of the low half, then the four (f32) or two (f64) partial sums
//! are reduced pairwise. This is the same order `portable::dot` uses with
//! `fused` set, so both paths give identical results.

use std::arch::x86_64::*;

use crate::element::{F32x8, F64x4};

/// # Safety
///
/// Caller must ensure the CPU supports AVX2 and FMA.
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn dot_f64(a: &[F64x4], b: &[F64x4]) -> f64 {
    let mut acc = 0.0f64;
    for (la, lb) in a.iter().zip(b) {
        let va = _mm256_loadu_pd(la.0.as_ptr());
        let vb = _mm256_loadu_pd(lb.0.as_ptr());

        let lo = _mm_mul_pd(_mm256_castpd256_pd128(va), _mm256_castpd256_pd128(vb));
        let t = _mm_fmadd_pd(
            _mm256_extractf128_pd(va, 1),
            _mm256_extractf128_pd(vb, 1),
            lo,
        );

        // t0 + t1
        let sum = _mm_add_sd(t, _mm_unpackhi_pd(t, t));
        acc += _mm_cvtsd_f64(sum);
    }
    acc
}

/// # Safety
///
/// Caller must ensure the CPU supports AVX2 and FMA.
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn dot_f32(a: &[F32x8], b: &[F32x8]) -> f32 {
    let mut acc = 0.0f32;
    for (la, lb) in a.iter().zip(b) {
        let va = _mm256_loadu_ps(la.0.as_ptr());
        let vb = _mm256_loadu_ps(lb.0.as_ptr());

        let lo = _mm_mul_ps(_mm256_castps256_ps128(va), _mm256_castps256_ps128(vb));
        let t = _mm_fmadd_ps(
            _mm256_extractf128_ps(va, 1),
            _mm256_extractf128_ps(vb, 1),
            lo,
        );

        // (t0 + t2, t1 + t3), then their sum
        let pairs = _mm_add_ps(t, _mm_movehl_ps(t, t));
        let sum = _mm_add_ss(pairs, _mm_shuffle_ps(pairs, pairs, 0b01));
        acc += _mm_cvtss_f32(sum);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Lane;

    #[test]
    fn test_dot_f64_single_lane() {
        if !(is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")) {
            println!("Skipping - AVX2/FMA not available");
            return;
        }
        let a = [F64x4([1.0, 2.0, 3.0, 4.0])];
        let b = [F64x4([5.0, 6.0, 7.0, 8.0])];
        assert_eq!(unsafe { dot_f64(&a, &b) }, 70.0);
    }

    #[test]
    fn test_dot_f32_padded_lane() {
        if !(is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")) {
            println!("Skipping - AVX2/FMA not available");
            return;
        }
        let a = [F32x8([1.0; 8]), F32x8::load_padded(&[1.0, 0.0, 0.0])];
        let b = [F32x8([2.0; 8]), F32x8::load_padded(&[9.0, 8.0, 7.0])];
        assert_eq!(unsafe { dot_f32(&a, &b) }, 25.0);
    }
}
