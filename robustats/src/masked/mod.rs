//! Masked N-dimensional arrays and axis-wise reduction.
//!
//! A [`MaskedArray`] pairs an `ArrayD<f64>` with a boolean mask of the same
//! shape; `true` marks an excluded value. Both arrays are kept in standard
//! (row-major) layout so flat indices address the same element in each.

mod lanes;

pub use lanes::Axes;
pub(crate) use lanes::Lanes;

use ndarray::{ArrayD, IxDyn};

use crate::error::Error;

/// An array of values with a congruent exclusion mask.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedArray {
    data: ArrayD<f64>,
    mask: ArrayD<bool>,
}

impl MaskedArray {
    /// Wrap `data` with nothing masked.
    pub fn new(data: ArrayD<f64>) -> Self {
        let data = standard_layout(data);
        let mask = ArrayD::from_elem(data.raw_dim(), false);
        Self { data, mask }
    }

    /// Wrap `data` with an explicit mask. Fails if the shapes differ.
    pub fn with_mask(data: ArrayD<f64>, mask: ArrayD<bool>) -> Result<Self, Error> {
        if data.shape() != mask.shape() {
            return Err(Error::ShapeMismatch {
                data: data.shape().to_vec(),
                mask: mask.shape().to_vec(),
            });
        }
        Ok(Self {
            data: standard_layout(data),
            mask: standard_layout(mask),
        })
    }

    /// Wrap `data`, masking every NaN or infinite value.
    pub fn masked_invalid(data: ArrayD<f64>) -> Self {
        let data = standard_layout(data);
        let mask = data.mapv(|v| !v.is_finite());
        Self { data, mask }
    }

    /// One-dimensional array with nothing masked.
    pub fn from_vec(values: Vec<f64>) -> Self {
        let len = values.len();
        Self::new(from_flat(&[len], values))
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn mask(&self) -> &ArrayD<bool> {
        &self.mask
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of unmasked values.
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&m| !m).count()
    }

    /// Unmasked values in row-major order.
    pub fn compressed(&self) -> Vec<f64> {
        self.data
            .iter()
            .zip(self.mask.iter())
            .filter(|(_, &m)| !m)
            .map(|(&v, _)| v)
            .collect()
    }

    /// Copy of the values with masked slots replaced by `fill`.
    pub fn filled(&self, fill: f64) -> ArrayD<f64> {
        let mut out = self.data.clone();
        out.zip_mut_with(&self.mask, |v, &m| {
            if m {
                *v = fill;
            }
        });
        out
    }

    /// Mask every unmasked value equal to `value`.
    pub fn mask_value(&mut self, value: f64) {
        self.mask.zip_mut_with(&self.data, |m, &v| {
            if v == value {
                *m = true;
            }
        });
    }

    pub fn into_parts(self) -> (ArrayD<f64>, ArrayD<bool>) {
        (self.data, self.mask)
    }

    pub(crate) fn values_flat(&self) -> &[f64] {
        flat(&self.data)
    }

    pub(crate) fn mask_flat(&self) -> &[bool] {
        flat(&self.mask)
    }

    /// Unmasked values of one reduction lane.
    pub(crate) fn lane_values(&self, lane: &[usize]) -> Vec<f64> {
        let values = self.values_flat();
        let mask = self.mask_flat();
        lane.iter()
            .filter(|&&i| !mask[i])
            .map(|&i| values[i])
            .collect()
    }
}

impl From<ArrayD<f64>> for MaskedArray {
    fn from(data: ArrayD<f64>) -> Self {
        Self::new(data)
    }
}

impl From<Vec<f64>> for MaskedArray {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

fn standard_layout<T: Clone>(array: ArrayD<T>) -> ArrayD<T> {
    if array.is_standard_layout() {
        array
    } else {
        array.as_standard_layout().into_owned()
    }
}

// Every constructor routes through `standard_layout`, so the slice view always exists.
fn flat<T>(array: &ArrayD<T>) -> &[T] {
    array
        .as_slice()
        .expect("masked arrays are kept in standard layout")
}

/// Build a standard-layout array from row-major values.
///
/// Callers pass exactly `shape.iter().product()` values.
pub(crate) fn from_flat<T>(shape: &[usize], values: Vec<T>) -> ArrayD<T> {
    ArrayD::from_shape_vec(IxDyn(shape), values).expect("value count matches shape")
}

#[cfg(test)]
mod tests;
