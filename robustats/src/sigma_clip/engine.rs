//! Iterative clipping of a single reduction slice.

use super::grow::Grow;
use super::{ClipStatus, SigmaClipConfig};

/// Result of clipping one slice.
#[derive(Debug, Clone)]
pub(crate) struct LaneOutcome {
    /// Flat indices masked by this run (not part of the initial mask).
    pub rejected: Vec<usize>,
    pub iterations: u32,
    pub status: ClipStatus,
    pub center: f64,
    pub spread: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Clip the values addressed by `lane` until the mask stops changing, the
/// iteration cap is hit, or no valid value is left.
///
/// The mask only ever grows. Values exactly on a bound are kept.
pub(crate) fn clip_lane(
    config: &SigmaClipConfig,
    values: &[f64],
    initial_mask: &[bool],
    lane: &[usize],
    grow: Option<&Grow>,
) -> LaneOutcome {
    let mut mask: Vec<bool> = lane.iter().map(|&i| initial_mask[i]).collect();
    let mut valid = Vec::with_capacity(lane.len());
    let mut scratch = Vec::with_capacity(lane.len());
    let mut newly = Vec::new();

    let mut iterations = 0u32;
    let mut center = f64::NAN;
    let mut spread = f64::NAN;
    let mut lower = f64::NAN;
    let mut upper = f64::NAN;

    let status = loop {
        valid.clear();
        valid.extend(
            lane.iter()
                .zip(&mask)
                .filter(|(_, &m)| !m)
                .map(|(&i, _)| values[i]),
        );

        if valid.is_empty() {
            tracing::trace!("Slice fully masked after {} iteration(s)", iterations);
            break ClipStatus::Degenerate;
        }
        if config.maxiters.is_some_and(|max| iterations >= max) {
            break ClipStatus::MaxItersReached;
        }
        iterations += 1;

        center = config.cenfunc.eval(&valid, &mut scratch);
        spread = config.stdfunc.eval(&valid, &mut scratch);
        lower = center - config.sigma_lower * spread;
        upper = center + config.sigma_upper * spread;

        newly.clear();
        for (pos, &i) in lane.iter().enumerate() {
            if mask[pos] {
                continue;
            }
            let v = values[i];
            if v < lower || v > upper {
                newly.push(pos);
            }
        }

        if newly.is_empty() {
            break ClipStatus::Converged;
        }

        for &pos in &newly {
            mask[pos] = true;
        }
        if let Some(grow) = grow {
            grow.dilate(&newly, &mut mask);
        }
    };

    let rejected = lane
        .iter()
        .zip(&mask)
        .filter(|(&i, &m)| m && !initial_mask[i])
        .map(|(&i, _)| i)
        .collect();

    LaneOutcome {
        rejected,
        iterations,
        status,
        center,
        spread,
        lower,
        upper,
    }
}
