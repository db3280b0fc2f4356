//! Robust location and scale estimators with axis-wise reduction.
//!
//! Masked entries are always excluded. NaN among unmasked values poisons its
//! slice unless `ignore_nan` is set. A slice with nothing left to reduce
//! yields NaN, or [`Error::AllInvalid`] in strict mode.

use ndarray::ArrayD;

use crate::error::Error;
use crate::masked::{from_flat, Axes, Lanes, MaskedArray};
use crate::math::statistics as stats;
use crate::sigma_clip::{StatFn, BIWEIGHT_LOCATION_C, BIWEIGHT_SCALE_C};

/// Options for [`median_absolute_deviation`] and [`mad_std`].
#[derive(Debug, Clone, Default)]
pub struct MadConfig {
    /// Drop NaN values instead of propagating them.
    pub ignore_nan: bool,
    /// Report empty slices as an error instead of NaN.
    pub strict: bool,
    /// Replacement for the median, used for both the center and the
    /// deviation reduction.
    pub func: Option<StatFn>,
}

impl MadConfig {
    pub fn ignore_nan() -> Self {
        Self {
            ignore_nan: true,
            ..Default::default()
        }
    }
}

/// Options for the biweight estimators.
#[derive(Debug, Clone, PartialEq)]
pub struct BiweightConfig {
    /// Tuning constant.
    pub c: f64,
    /// Initial center. Defaults to the slice median.
    pub m: Option<f64>,
    /// Count only values with `|u| < 1` as the sample size (scale only).
    pub modify_sample_size: bool,
    pub ignore_nan: bool,
    pub strict: bool,
}

impl BiweightConfig {
    /// Defaults for biweight location (`c = 6`).
    pub fn location() -> Self {
        Self {
            c: BIWEIGHT_LOCATION_C,
            m: None,
            modify_sample_size: false,
            ignore_nan: false,
            strict: false,
        }
    }

    /// Defaults for biweight scale and midvariance (`c = 9`).
    pub fn scale() -> Self {
        Self {
            c: BIWEIGHT_SCALE_C,
            ..Self::location()
        }
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_m(mut self, m: f64) -> Self {
        self.m = Some(m);
        self
    }

    pub fn with_modify_sample_size(mut self, modify_sample_size: bool) -> Self {
        self.modify_sample_size = modify_sample_size;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.c.is_finite() && self.c > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidTuningConstant(self.c))
        }
    }
}

/// `median(|a - median(a)|)` for each slice.
pub fn median_absolute_deviation(
    data: &MaskedArray,
    axes: &Axes,
    config: &MadConfig,
) -> Result<ArrayD<f64>, Error> {
    reduce_lanes(
        data,
        axes,
        config.ignore_nan,
        config.strict,
        |values, scratch| match &config.func {
            None => {
                let median = stats::median_with_scratch(values, scratch);
                stats::mad_with_scratch(values, median, scratch)
            }
            Some(func) => {
                let center = func.eval(values, scratch);
                let deviations: Vec<f64> = values.iter().map(|&v| (v - center).abs()).collect();
                func.eval(&deviations, scratch)
            }
        },
    )
}

/// MAD scaled to be consistent with the standard deviation of a normal
/// distribution.
pub fn mad_std(data: &MaskedArray, axes: &Axes, config: &MadConfig) -> Result<ArrayD<f64>, Error> {
    Ok(median_absolute_deviation(data, axes, config)?.mapv(stats::mad_to_sigma))
}

/// Tukey biweight location for each slice.
pub fn biweight_location(
    data: &MaskedArray,
    axes: &Axes,
    config: &BiweightConfig,
) -> Result<ArrayD<f64>, Error> {
    config.validate()?;
    reduce_lanes(
        data,
        axes,
        config.ignore_nan,
        config.strict,
        |values, scratch| stats::biweight_location_of(values, config.c, config.m, scratch),
    )
}

/// Tukey biweight midvariance for each slice.
pub fn biweight_midvariance(
    data: &MaskedArray,
    axes: &Axes,
    config: &BiweightConfig,
) -> Result<ArrayD<f64>, Error> {
    config.validate()?;
    reduce_lanes(
        data,
        axes,
        config.ignore_nan,
        config.strict,
        |values, scratch| {
            stats::biweight_midvariance_of(
                values,
                config.c,
                config.m,
                config.modify_sample_size,
                scratch,
            )
        },
    )
}

/// Tukey biweight scale (square root of the midvariance) for each slice.
pub fn biweight_scale(
    data: &MaskedArray,
    axes: &Axes,
    config: &BiweightConfig,
) -> Result<ArrayD<f64>, Error> {
    Ok(biweight_midvariance(data, axes, config)?.mapv(f64::sqrt))
}

fn reduce_lanes<F>(
    data: &MaskedArray,
    axes: &Axes,
    ignore_nan: bool,
    strict: bool,
    reduce: F,
) -> Result<ArrayD<f64>, Error>
where
    F: Fn(&[f64], &mut Vec<f64>) -> f64 + Sync + Send,
{
    let lanes = Lanes::new(data.shape(), axes)?;

    let results = lanes.map(|lane| {
        let mut values = data.lane_values(lane);
        if values.iter().any(|v| v.is_nan()) {
            if !ignore_nan {
                return Ok(f64::NAN);
            }
            values.retain(|v| !v.is_nan());
        }
        if values.is_empty() {
            return if strict {
                Err(Error::AllInvalid)
            } else {
                Ok(f64::NAN)
            };
        }
        let mut scratch = Vec::with_capacity(values.len());
        Ok(reduce(&values, &mut scratch))
    });

    let reduced = results.into_iter().collect::<Result<Vec<f64>, Error>>()?;
    Ok(from_flat(lanes.reduced_shape(), reduced))
}
