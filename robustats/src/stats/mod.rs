//! Summary statistics over sigma-clipped data.

use std::sync::OnceLock;

use ndarray::ArrayD;

use crate::error::Error;
use crate::masked::{from_flat, Axes, Lanes, MaskedArray};
use crate::math::statistics as stats;
use crate::sigma_clip::{Builtin, ClipResult, SigmaClip, SigmaClipConfig};

/// Parameters for clipped summary statistics.
#[derive(Debug, Clone, Default)]
pub struct StatsConfig {
    pub clip: SigmaClipConfig,
    pub axes: Axes,
    /// Delta degrees of freedom for the reported `std` and `var`.
    pub std_ddof: usize,
    /// Values equal to this are masked before clipping.
    pub mask_value: Option<f64>,
}

impl StatsConfig {
    pub fn new(clip: SigmaClipConfig) -> Self {
        Self {
            clip,
            ..Default::default()
        }
    }

    pub fn with_axes(mut self, axes: Axes) -> Self {
        self.axes = axes;
        self
    }

    pub fn with_std_ddof(mut self, std_ddof: usize) -> Self {
        self.std_ddof = std_ddof;
        self
    }

    pub fn with_mask_value(mut self, value: f64) -> Self {
        self.mask_value = Some(value);
        self
    }
}

/// Clip `data` and return `(mean, median, std)` of the surviving values.
pub fn sigma_clipped_stats(
    data: &MaskedArray,
    config: &StatsConfig,
) -> Result<(ArrayD<f64>, ArrayD<f64>, ArrayD<f64>), Error> {
    let clipped = SigmaClippedStats::new(data, config)?;
    Ok((
        clipped.mean().clone(),
        clipped.median().clone(),
        clipped.std().clone(),
    ))
}

/// Clipped data with lazily computed, memoized statistics.
///
/// Every statistic is reduced over the configured axes using only unmasked
/// values; slices with no survivors report NaN. The mode is the half-sample
/// mode.
#[derive(Debug)]
pub struct SigmaClippedStats {
    result: ClipResult,
    lanes: Lanes,
    std_ddof: usize,
    mean: OnceLock<ArrayD<f64>>,
    median: OnceLock<ArrayD<f64>>,
    std: OnceLock<ArrayD<f64>>,
    var: OnceLock<ArrayD<f64>>,
    mode: OnceLock<ArrayD<f64>>,
    mad_std: OnceLock<ArrayD<f64>>,
    biweight_location: OnceLock<ArrayD<f64>>,
    biweight_scale: OnceLock<ArrayD<f64>>,
    min: OnceLock<ArrayD<f64>>,
    max: OnceLock<ArrayD<f64>>,
    sum: OnceLock<ArrayD<f64>>,
    count: OnceLock<ArrayD<usize>>,
}

impl SigmaClippedStats {
    pub fn new(data: &MaskedArray, config: &StatsConfig) -> Result<Self, Error> {
        let clipper = SigmaClip::new(config.clip.clone())?;
        let lanes = Lanes::new(data.shape(), &config.axes)?;

        let result = match config.mask_value {
            Some(value) => {
                let mut masked = data.clone();
                masked.mask_value(value);
                clipper.apply(&masked, &config.axes)?
            }
            None => clipper.apply(data, &config.axes)?,
        };

        Ok(Self {
            result,
            lanes,
            std_ddof: config.std_ddof,
            mean: OnceLock::new(),
            median: OnceLock::new(),
            std: OnceLock::new(),
            var: OnceLock::new(),
            mode: OnceLock::new(),
            mad_std: OnceLock::new(),
            biweight_location: OnceLock::new(),
            biweight_scale: OnceLock::new(),
            min: OnceLock::new(),
            max: OnceLock::new(),
            sum: OnceLock::new(),
            count: OnceLock::new(),
        })
    }

    pub fn clip_result(&self) -> &ClipResult {
        &self.result
    }

    pub fn mean(&self) -> &ArrayD<f64> {
        self.mean.get_or_init(|| self.reduce(stats::mean))
    }

    pub fn median(&self) -> &ArrayD<f64> {
        self.median.get_or_init(|| self.reduce(stats::median))
    }

    pub fn std(&self) -> &ArrayD<f64> {
        self.std.get_or_init(|| self.var().mapv(f64::sqrt))
    }

    pub fn var(&self) -> &ArrayD<f64> {
        let ddof = self.std_ddof;
        self.var
            .get_or_init(|| self.reduce(move |values| stats::variance(values, ddof)))
    }

    /// Half-sample mode of the clipped values.
    pub fn mode(&self) -> &ArrayD<f64> {
        self.mode.get_or_init(|| self.reduce(stats::half_sample_mode))
    }

    pub fn mad_std(&self) -> &ArrayD<f64> {
        self.mad_std.get_or_init(|| self.reduce_builtin(Builtin::MadStd))
    }

    pub fn biweight_location(&self) -> &ArrayD<f64> {
        self.biweight_location
            .get_or_init(|| self.reduce_builtin(Builtin::BiweightLocation))
    }

    pub fn biweight_scale(&self) -> &ArrayD<f64> {
        self.biweight_scale
            .get_or_init(|| self.reduce_builtin(Builtin::BiweightScale))
    }

    pub fn min(&self) -> &ArrayD<f64> {
        self.min.get_or_init(|| {
            self.reduce(|values| {
                values
                    .iter()
                    .copied()
                    .reduce(f64::min)
                    .unwrap_or(f64::NAN)
            })
        })
    }

    pub fn max(&self) -> &ArrayD<f64> {
        self.max.get_or_init(|| {
            self.reduce(|values| {
                values
                    .iter()
                    .copied()
                    .reduce(f64::max)
                    .unwrap_or(f64::NAN)
            })
        })
    }

    /// Sum of the clipped values; NaN for a slice with no survivors.
    pub fn sum(&self) -> &ArrayD<f64> {
        self.sum.get_or_init(|| {
            self.reduce(|values| {
                if values.is_empty() {
                    f64::NAN
                } else {
                    values.iter().sum()
                }
            })
        })
    }

    /// Number of values surviving the clip in each slice.
    pub fn count(&self) -> &ArrayD<usize> {
        self.count.get_or_init(|| {
            let mask = self.result.data().mask_flat();
            let counts = self
                .lanes
                .map(|lane| lane.iter().filter(|&&i| !mask[i]).count());
            from_flat(self.lanes.reduced_shape(), counts)
        })
    }

    fn reduce_builtin(&self, builtin: Builtin) -> ArrayD<f64> {
        self.reduce(|values| {
            let mut scratch = Vec::with_capacity(values.len());
            builtin.eval(values, &mut scratch)
        })
    }

    fn reduce<F>(&self, f: F) -> ArrayD<f64>
    where
        F: Fn(&[f64]) -> f64 + Sync + Send,
    {
        let data = self.result.data();
        self.lanes.reduce(|lane| f(&data.lane_values(lane)))
    }
}
