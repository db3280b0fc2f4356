//! Pluggable center and spread functions for the clipping engine.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use strum_macros::{Display, EnumString};

use crate::error::Error;
use crate::math::statistics as stats;

/// Default biweight tuning constant for location.
pub const BIWEIGHT_LOCATION_C: f64 = 6.0;
/// Default biweight tuning constant for scale.
pub const BIWEIGHT_SCALE_C: f64 = 9.0;

/// Caller-supplied reduction over the valid values of one slice.
pub type CustomFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Named built-in statistics, parseable from their snake_case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Builtin {
    Mean,
    Median,
    /// Population standard deviation (ddof = 0).
    Std,
    MadStd,
    BiweightLocation,
    BiweightScale,
}

/// A center or spread function: a built-in or an arbitrary closure.
///
/// Custom functions receive the unmasked values of a single reduction slice
/// and return its statistic; the engine handles axes.
#[derive(Clone)]
pub enum StatFn {
    Builtin(Builtin),
    Custom(CustomFn),
}

impl StatFn {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub(crate) fn eval(&self, values: &[f64], scratch: &mut Vec<f64>) -> f64 {
        match self {
            StatFn::Builtin(builtin) => builtin.eval(values, scratch),
            StatFn::Custom(f) => f(values),
        }
    }
}

impl Builtin {
    pub(crate) fn eval(self, values: &[f64], scratch: &mut Vec<f64>) -> f64 {
        match self {
            Builtin::Mean => stats::mean(values),
            Builtin::Median => stats::median_with_scratch(values, scratch),
            Builtin::Std => stats::std_dev(values, 0),
            Builtin::MadStd => {
                let median = stats::median_with_scratch(values, scratch);
                stats::mad_to_sigma(stats::mad_with_scratch(values, median, scratch))
            }
            Builtin::BiweightLocation => {
                stats::biweight_location_of(values, BIWEIGHT_LOCATION_C, None, scratch)
            }
            Builtin::BiweightScale => {
                stats::biweight_midvariance_of(values, BIWEIGHT_SCALE_C, None, false, scratch)
                    .sqrt()
            }
        }
    }
}

impl From<Builtin> for StatFn {
    fn from(builtin: Builtin) -> Self {
        Self::Builtin(builtin)
    }
}

impl FromStr for StatFn {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Builtin::from_str(name)
            .map(StatFn::Builtin)
            .map_err(|_| Error::UnknownFunction(name.to_string()))
    }
}

impl fmt::Debug for StatFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatFn::Builtin(builtin) => write!(f, "{builtin}"),
            StatFn::Custom(_) => write!(f, "custom"),
        }
    }
}
