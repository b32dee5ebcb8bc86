use crate::element::{Element, Lane};

// Widest half-lane across the supported kinds (F32x8 -> 4).
const MAX_HALF: usize = 4;

/// Portable dot product over lane arrays.
///
/// With `fused` set, the half-lane combine uses `mul_add`; only pass it on
/// targets where that lowers to a hardware instruction.
pub(crate) fn dot<T: Element>(a: &[T::Lane], b: &[T::Lane], fused: bool) -> T {
    let mut acc = T::ZERO;
    for (la, lb) in a.iter().zip(b) {
        acc = acc + lane_dot(la.as_slice(), lb.as_slice(), fused);
    }
    acc
}

#[inline]
fn lane_dot<T: Element>(a: &[T], b: &[T], fused: bool) -> T {
    let half = a.len() / 2;
    let mut t = [T::ZERO; MAX_HALF];

    for i in 0..half {
        let lo = a[i] * b[i];
        t[i] = if fused {
            a[half + i].fused_mul_add(b[half + i], lo)
        } else {
            a[half + i] * b[half + i] + lo
        };
    }

    let mut len = half;
    while len > 1 {
        len /= 2;
        for i in 0..len {
            t[i] = t[i] + t[i + len];
        }
    }
    t[0]
}
