//! Iterative sigma clipping.
//!
//! Repeatedly computes a center and spread over the unmasked values of each
//! reduction slice and masks values outside
//! `[center - sigma_lower * spread, center + sigma_upper * spread]`, until the
//! mask stops changing or the iteration cap is reached.
//!
//! # Examples
//!
//! ```
//! use robustats::{Axes, MaskedArray, SigmaClip, SigmaClipConfig};
//!
//! let mut values = vec![1.0; 20];
//! values.push(50.0);
//! let data = MaskedArray::from_vec(values);
//!
//! let clipper = SigmaClip::new(SigmaClipConfig::new(3.0)).unwrap();
//! let result = clipper.apply(&data, &Axes::Flat).unwrap();
//! assert_eq!(result.data().count(), 20);
//! ```

mod engine;
mod grow;
mod stat_fn;

pub use stat_fn::{Builtin, CustomFn, StatFn, BIWEIGHT_LOCATION_C, BIWEIGHT_SCALE_C};

use ndarray::ArrayD;
use strum_macros::Display;

use crate::error::Error;
use crate::masked::{from_flat, Axes, Lanes, MaskedArray};
use engine::LaneOutcome;
use grow::Grow;

/// Clipping parameters. Validated once by [`SigmaClip::new`].
#[derive(Debug, Clone)]
pub struct SigmaClipConfig {
    /// Threshold below the center, in units of spread.
    pub sigma_lower: f64,
    /// Threshold above the center, in units of spread.
    pub sigma_upper: f64,
    /// Iteration cap. `None` iterates until the mask stops changing.
    pub maxiters: Option<u32>,
    /// Center estimate.
    pub cenfunc: StatFn,
    /// Spread estimate.
    pub stdfunc: StatFn,
    /// Also mask neighbours within this radius of each rejected value.
    pub grow: Option<f64>,
}

impl Default for SigmaClipConfig {
    fn default() -> Self {
        Self {
            sigma_lower: 3.0,
            sigma_upper: 3.0,
            maxiters: Some(5),
            cenfunc: StatFn::Builtin(Builtin::Median),
            stdfunc: StatFn::Builtin(Builtin::Std),
            grow: None,
        }
    }
}

impl SigmaClipConfig {
    /// Symmetric clipping at `sigma`.
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma_lower: sigma,
            sigma_upper: sigma,
            ..Default::default()
        }
    }

    /// Separate lower and upper thresholds.
    pub fn asymmetric(sigma_lower: f64, sigma_upper: f64) -> Self {
        Self {
            sigma_lower,
            sigma_upper,
            ..Default::default()
        }
    }

    pub fn with_sigma_lower(mut self, sigma_lower: f64) -> Self {
        self.sigma_lower = sigma_lower;
        self
    }

    pub fn with_sigma_upper(mut self, sigma_upper: f64) -> Self {
        self.sigma_upper = sigma_upper;
        self
    }

    pub fn with_maxiters(mut self, maxiters: Option<u32>) -> Self {
        self.maxiters = maxiters;
        self
    }

    pub fn with_cenfunc(mut self, cenfunc: impl Into<StatFn>) -> Self {
        self.cenfunc = cenfunc.into();
        self
    }

    pub fn with_stdfunc(mut self, stdfunc: impl Into<StatFn>) -> Self {
        self.stdfunc = stdfunc.into();
        self
    }

    pub fn with_grow(mut self, grow: f64) -> Self {
        self.grow = Some(grow);
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_sigma("sigma_lower", self.sigma_lower)?;
        check_sigma("sigma_upper", self.sigma_upper)?;
        if let Some(grow) = self.grow {
            if !grow.is_finite() || grow < 0.0 {
                return Err(Error::InvalidGrow(grow));
            }
        }
        Ok(())
    }
}

fn check_sigma(name: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidSigma { name, value })
    }
}

/// How a clipping run ended. Ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ClipStatus {
    /// An iteration masked nothing new.
    Converged,
    /// Every value of a slice ended up masked; its statistics are NaN.
    Degenerate,
    /// The iteration cap stopped a slice that was still changing.
    MaxItersReached,
}

/// Per-run diagnostics, shaped like the reduced (kept) axes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipDiagnostics {
    /// Largest iteration count over all slices.
    pub iterations: u32,
    /// Most severe slice status.
    pub status: ClipStatus,
    /// Center from the last iteration of each slice.
    pub center: ArrayD<f64>,
    /// Spread from the last iteration of each slice.
    pub spread: ArrayD<f64>,
    /// Lower rejection bound from the last iteration of each slice.
    pub lower_bound: ArrayD<f64>,
    /// Upper rejection bound from the last iteration of each slice.
    pub upper_bound: ArrayD<f64>,
}

/// Clipped values: the input values with the final mask, plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipResult {
    data: MaskedArray,
    diagnostics: ClipDiagnostics,
}

impl ClipResult {
    pub fn data(&self) -> &MaskedArray {
        &self.data
    }

    pub fn mask(&self) -> &ArrayD<bool> {
        self.data.mask()
    }

    pub fn iterations(&self) -> u32 {
        self.diagnostics.iterations
    }

    pub fn status(&self) -> ClipStatus {
        self.diagnostics.status
    }

    pub fn diagnostics(&self) -> &ClipDiagnostics {
        &self.diagnostics
    }

    /// Plain array with every masked slot set to NaN.
    pub fn filled(&self) -> ArrayD<f64> {
        self.data.filled(f64::NAN)
    }

    pub fn into_masked(self) -> MaskedArray {
        self.data
    }

    pub fn into_parts(self) -> (MaskedArray, ClipDiagnostics) {
        (self.data, self.diagnostics)
    }
}

/// A validated, reusable clipping configuration.
///
/// Holds no per-call state: each application starts from the given sample's
/// own mask.
#[derive(Debug, Clone)]
pub struct SigmaClip {
    config: SigmaClipConfig,
}

impl SigmaClip {
    pub fn new(config: SigmaClipConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SigmaClipConfig {
        &self.config
    }

    /// Clip a copy of `data`. Non-finite values are masked before clipping.
    pub fn apply(&self, data: &MaskedArray, axes: &Axes) -> Result<ClipResult, Error> {
        let initial_mask: Vec<bool> = data
            .values_flat()
            .iter()
            .zip(data.mask_flat())
            .map(|(v, &m)| m || !v.is_finite())
            .collect();

        let (mask, diagnostics) = self.run(data.shape(), data.values_flat(), initial_mask, axes)?;
        let mask = from_flat(data.shape(), mask);
        let data = MaskedArray::with_mask(data.data().clone(), mask)?;

        Ok(ClipResult { data, diagnostics })
    }

    /// Clip `data` in place, overwriting rejected values with NaN.
    pub fn apply_inplace(
        &self,
        data: &mut ArrayD<f64>,
        axes: &Axes,
    ) -> Result<ClipDiagnostics, Error> {
        // Flat indices below assume standard layout.
        if !data.is_standard_layout() {
            *data = data.as_standard_layout().into_owned();
        }
        let shape = data.shape().to_vec();
        let values = data
            .as_slice_mut()
            .expect("array was converted to standard layout");

        let initial_mask: Vec<bool> = values.iter().map(|v| !v.is_finite()).collect();
        let (mask, diagnostics) = self.run(&shape, values, initial_mask, axes)?;

        for (v, masked) in values.iter_mut().zip(mask) {
            if masked {
                *v = f64::NAN;
            }
        }

        Ok(diagnostics)
    }

    fn run(
        &self,
        shape: &[usize],
        values: &[f64],
        initial_mask: Vec<bool>,
        axes: &Axes,
    ) -> Result<(Vec<bool>, ClipDiagnostics), Error> {
        let lanes = Lanes::new(shape, axes)?;
        let grow = self
            .config
            .grow
            .map(|radius| Grow::new(radius, lanes.lane_shape()));

        let outcomes: Vec<LaneOutcome> = lanes.map(|lane| {
            engine::clip_lane(&self.config, values, &initial_mask, lane, grow.as_ref())
        });

        let mut mask = initial_mask;
        let mut rejected = 0usize;
        for outcome in &outcomes {
            rejected += outcome.rejected.len();
            for &i in &outcome.rejected {
                mask[i] = true;
            }
        }

        let iterations = outcomes.iter().map(|o| o.iterations).max().unwrap_or(0);
        let status = outcomes
            .iter()
            .map(|o| o.status)
            .max()
            .unwrap_or(ClipStatus::Converged);

        let reduced = lanes.reduced_shape();
        let collect = |f: fn(&LaneOutcome) -> f64| -> ArrayD<f64> {
            from_flat(reduced, outcomes.iter().map(f).collect())
        };
        let diagnostics = ClipDiagnostics {
            iterations,
            status,
            center: collect(|o| o.center),
            spread: collect(|o| o.spread),
            lower_bound: collect(|o| o.lower),
            upper_bound: collect(|o| o.upper),
        };

        tracing::debug!(
            "Sigma clip: {} of {} values rejected across {} slice(s), {} iteration(s), {}",
            rejected,
            values.len(),
            outcomes.len(),
            iterations,
            status
        );

        Ok((mask, diagnostics))
    }
}

/// One-shot clipping: validate `config` and apply it to `data`.
pub fn sigma_clip(
    data: &MaskedArray,
    config: &SigmaClipConfig,
    axes: &Axes,
) -> Result<ClipResult, Error> {
    SigmaClip::new(config.clone())?.apply(data, axes)
}
