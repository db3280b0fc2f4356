//! Partitioning of an array into independent reduction slices.

use ndarray::{ArrayD, IxDyn};
use rayon::prelude::*;

use crate::error::Error;

/// Which axes a reduction runs over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Axes {
    /// Reduce over every axis (the flattened array), producing a 0-d result.
    #[default]
    Flat,
    /// Reduce over the listed axes; the remaining axes are kept.
    Along(Vec<usize>),
}

impl Axes {
    pub fn along(axis: usize) -> Self {
        Self::Along(vec![axis])
    }

    pub fn along_many(axes: impl IntoIterator<Item = usize>) -> Self {
        Self::Along(axes.into_iter().collect())
    }

    /// Sorted, deduplicated reduction axes for an array of `ndim` dimensions.
    fn resolve(&self, ndim: usize) -> Result<Vec<usize>, Error> {
        match self {
            Axes::Flat => Ok((0..ndim).collect()),
            Axes::Along(axes) => {
                let mut resolved = axes.clone();
                resolved.sort_unstable();
                for pair in resolved.windows(2) {
                    if pair[0] == pair[1] {
                        return Err(Error::DuplicateAxis(pair[0]));
                    }
                }
                if let Some(&axis) = resolved.iter().find(|&&axis| axis >= ndim) {
                    return Err(Error::AxisOutOfBounds { axis, ndim });
                }
                Ok(resolved)
            }
        }
    }
}

impl From<usize> for Axes {
    fn from(axis: usize) -> Self {
        Self::along(axis)
    }
}

/// Flat indices of an array grouped into reduction lanes.
///
/// Lane `i` covers `indices[i * lane_len..(i + 1) * lane_len]`, ordered
/// row-major over the reduced axes. Lanes are listed row-major over the kept
/// axes, which is also the layout of the reduced output.
#[derive(Debug, Clone)]
pub(crate) struct Lanes {
    reduced_shape: Vec<usize>,
    lane_shape: Vec<usize>,
    lane_len: usize,
    indices: Vec<usize>,
}

impl Lanes {
    pub(crate) fn new(shape: &[usize], axes: &Axes) -> Result<Self, Error> {
        let ndim = shape.len();
        let reduced_axes = axes.resolve(ndim)?;
        let kept_axes: Vec<usize> = (0..ndim).filter(|a| !reduced_axes.contains(a)).collect();

        let reduced_shape: Vec<usize> = kept_axes.iter().map(|&a| shape[a]).collect();
        let lane_shape: Vec<usize> = reduced_axes.iter().map(|&a| shape[a]).collect();
        let lane_len = lane_shape.iter().product();

        let total: usize = shape.iter().product();
        let indices = if kept_axes.is_empty() {
            (0..total).collect()
        } else {
            let order: Vec<usize> = kept_axes.iter().chain(&reduced_axes).copied().collect();
            let flat_index = super::from_flat(shape, (0..total).collect());
            flat_index
                .permuted_axes(IxDyn(&order))
                .iter()
                .copied()
                .collect()
        };

        Ok(Self {
            reduced_shape,
            lane_shape,
            lane_len,
            indices,
        })
    }

    pub(crate) fn lane_count(&self) -> usize {
        self.reduced_shape.iter().product()
    }

    pub(crate) fn lane(&self, i: usize) -> &[usize] {
        &self.indices[i * self.lane_len..(i + 1) * self.lane_len]
    }

    /// Shape of one lane, i.e. the extents of the reduced axes.
    pub(crate) fn lane_shape(&self) -> &[usize] {
        &self.lane_shape
    }

    pub(crate) fn reduced_shape(&self) -> &[usize] {
        &self.reduced_shape
    }

    /// Apply `f` to every lane in parallel, preserving lane order.
    pub(crate) fn map<T, F>(&self, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&[usize]) -> T + Sync + Send,
    {
        (0..self.lane_count())
            .into_par_iter()
            .map(|i| f(self.lane(i)))
            .collect()
    }

    /// Reduce every lane to a scalar, shaped like the kept axes.
    pub(crate) fn reduce<F>(&self, f: F) -> ArrayD<f64>
    where
        F: Fn(&[usize]) -> f64 + Sync + Send,
    {
        super::from_flat(&self.reduced_shape, self.map(f))
    }
}
