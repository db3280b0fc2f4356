//! Robustats - sigma clipping and robust statistics for N-dimensional data.
//!
//! This library provides:
//! - Iterative sigma clipping with per-axis reduction and mask growing
//! - Median absolute deviation and its normal-consistent scaling (`mad_std`)
//! - Tukey biweight location, midvariance and scale
//! - Memoized summary statistics over sigma-clipped data
//!
//! # Quick Start
//!
//! ```rust
//! use robustats::{sigma_clipped_stats, MaskedArray, StatsConfig};
//!
//! let data = MaskedArray::from_vec(vec![1.0, 2.0, 2.0, 3.0, 2.0, 1.0, 3.0, 2.0, 250.0]);
//! let (mean, median, std) = sigma_clipped_stats(&data, &StatsConfig::default())?;
//!
//! assert_eq!(median.first(), Some(&2.0));
//! assert!(mean.first().unwrap() < &3.0);
//! assert!(std.first().unwrap() < &1.0);
//! # Ok::<(), robustats::Error>(())
//! ```

mod error;
mod estimators;
pub(crate) mod masked;
pub(crate) mod math;
mod sigma_clip;
mod stats;

#[cfg(test)]
pub mod testing;

pub mod prelude;

// ============================================================================
// Core types
// ============================================================================

pub use error::Error;
pub use masked::{Axes, MaskedArray};
pub use math::statistics::MAD_TO_SIGMA;

// ============================================================================
// Sigma clipping
// ============================================================================

pub use sigma_clip::{
    sigma_clip, Builtin, ClipDiagnostics, ClipResult, ClipStatus, CustomFn, SigmaClip,
    SigmaClipConfig, StatFn, BIWEIGHT_LOCATION_C, BIWEIGHT_SCALE_C,
};

// ============================================================================
// Robust estimators
// ============================================================================

pub use estimators::{
    biweight_location, biweight_midvariance, biweight_scale, mad_std,
    median_absolute_deviation, BiweightConfig, MadConfig,
};

// ============================================================================
// Clipped statistics
// ============================================================================

pub use stats::{sigma_clipped_stats, SigmaClippedStats, StatsConfig};
