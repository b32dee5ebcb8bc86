use crate::element::{Element, Lane};
use crate::matrix::Matrix;

/// A row or column packed into fixed-width vector lanes.
///
/// Holds `ceil(len / T::LANES)` lanes; when `len` is not a multiple of the
/// lane width, the final lane is zero-padded.
#[derive(Debug, Clone, PartialEq)]
pub struct LanePacked<T: Element> {
    lanes: Vec<T::Lane>,
    len: usize,
}

impl<T: Element> LanePacked<T> {
    /// Packs `values` into lanes, zero-padding the last one.
    pub fn pack(values: &[T]) -> Self {
        let mut lanes = Vec::with_capacity(lane_count(values.len(), T::LANES));
        lanes.extend(values.chunks(T::LANES).map(T::Lane::load_padded));
        LanePacked {
            lanes,
            len: values.len(),
        }
    }

    /// Logical length of the packed sequence, excluding padding.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of lanes.
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// The packed lanes, padding included.
    pub fn lanes(&self) -> &[T::Lane] {
        &self.lanes
    }

    /// Unpacks the lanes back into a flat vector of `len()` elements.
    pub fn to_vec(&self) -> Vec<T> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.as_slice().iter().copied())
            .take(self.len)
            .collect()
    }
}

/// Number of lanes needed for `n` elements of width `width`.
pub fn lane_count(n: usize, width: usize) -> usize {
    n.div_ceil(width)
}

/// Packs every row of `matrix`.
pub fn pack_rows<T: Element>(matrix: &Matrix<T>) -> Vec<LanePacked<T>> {
    matrix.rows().map(LanePacked::pack).collect()
}

/// Packs every column of `matrix` by transposing it once and packing the
/// rows of the transpose.
pub fn pack_columns<T: Element>(matrix: &Matrix<T>) -> Vec<LanePacked<T>> {
    pack_rows(&matrix.transpose())
}
