//! Prelude module for convenient imports.
//!
//! ```rust
//! use robustats::prelude::*;
//! ```

// Core types
pub use crate::{Axes, Error, MaskedArray};

// Sigma clipping
pub use crate::{sigma_clip, ClipResult, ClipStatus, SigmaClip, SigmaClipConfig, StatFn};

// Estimators
pub use crate::{biweight_location, biweight_scale, mad_std, median_absolute_deviation};

// Clipped statistics
pub use crate::{sigma_clipped_stats, SigmaClippedStats, StatsConfig};
