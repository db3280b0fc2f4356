//! Dilation of rejected positions within a reduction slice.

/// Ball-shaped neighbourhood of a given radius over the slice's axes.
#[derive(Debug, Clone)]
pub(crate) struct Grow {
    shape: Vec<usize>,
    offsets: Vec<Vec<isize>>,
}

impl Grow {
    /// Offsets of every non-zero integer vector within Euclidean `radius`.
    ///
    /// Each axis only reaches as far as the slice extends along it, so a
    /// radius larger than the slice masks the whole slice.
    pub(crate) fn new(radius: f64, shape: &[usize]) -> Self {
        let ndim = shape.len();
        let radius_sq = radius * radius;
        let reach: Vec<isize> = shape
            .iter()
            .map(|&extent| {
                let max = extent.saturating_sub(1) as f64;
                radius.floor().min(max) as isize
            })
            .collect();
        let mut offsets = Vec::new();

        if ndim > 0 && reach.iter().any(|&r| r > 0) {
            let mut offset: Vec<isize> = reach.iter().map(|&r| -r).collect();
            loop {
                let dist_sq: f64 = offset.iter().map(|&o| (o as f64).powi(2)).sum();
                if dist_sq > 0.0 && dist_sq <= radius_sq {
                    offsets.push(offset.clone());
                }

                // Odometer increment over the per-axis reach box.
                let mut axis = ndim;
                loop {
                    if axis == 0 {
                        return Self {
                            shape: shape.to_vec(),
                            offsets,
                        };
                    }
                    axis -= 1;
                    if offset[axis] < reach[axis] {
                        offset[axis] += 1;
                        break;
                    }
                    offset[axis] = -reach[axis];
                }
            }
        }

        Self {
            shape: shape.to_vec(),
            offsets,
        }
    }

    /// Mask every in-bounds neighbour of the `seeds` positions.
    ///
    /// Positions are row-major indices into the slice.
    pub(crate) fn dilate(&self, seeds: &[usize], mask: &mut [bool]) {
        if self.offsets.is_empty() {
            return;
        }

        let mut coords = vec![0usize; self.shape.len()];
        for &seed in seeds {
            self.unravel(seed, &mut coords);
            for offset in &self.offsets {
                if let Some(pos) = self.ravel_offset(&coords, offset) {
                    mask[pos] = true;
                }
            }
        }
    }

    fn unravel(&self, mut pos: usize, coords: &mut [usize]) {
        for (c, &extent) in coords.iter_mut().zip(&self.shape).rev() {
            *c = pos % extent;
            pos /= extent;
        }
    }

    fn ravel_offset(&self, coords: &[usize], offset: &[isize]) -> Option<usize> {
        let mut pos = 0usize;
        for ((&c, &o), &extent) in coords.iter().zip(offset).zip(&self.shape) {
            let shifted = c as isize + o;
            if shifted < 0 || shifted >= extent as isize {
                return None;
            }
            pos = pos * extent + shifted as usize;
        }
        Some(pos)
    }

    #[cfg(test)]
    pub(crate) fn offset_count(&self) -> usize {
        self.offsets.len()
    }
}
