//! Statistical kernels over slices of valid values: median, MAD, moments,
//! biweight and half-sample mode.
//!
//! Every kernel returns NaN for an empty slice. Callers are expected to have
//! removed masked entries already.

/// MAD (Median Absolute Deviation) to standard deviation conversion factor.
///
/// For a normal distribution, σ ≈ 1.4826 × MAD.
/// This is the exact value: 1 / Φ⁻¹(3/4) where Φ⁻¹ is the inverse CDF.
pub const MAD_TO_SIGMA: f64 = 1.482602218505602;

/// Convert MAD to standard deviation (assuming normal distribution).
#[inline]
pub fn mad_to_sigma(mad: f64) -> f64 {
    mad * MAD_TO_SIGMA
}

/// Replaces each value with |value - center|.
#[inline]
fn abs_deviation_inplace(values: &mut [f64], center: f64) {
    for v in values.iter_mut() {
        *v = (*v - center).abs();
    }
}

/// Calculate the median of f64 values in-place.
///
/// Mutates the input buffer (partial sort via quickselect).
#[inline]
pub fn median_f64_mut(data: &mut [f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }

    let len = data.len();
    let mid = len / 2;

    let (left_part, median, _) = data.select_nth_unstable_by(mid, f64::total_cmp);
    let right = *median;
    if len & 1 == 1 {
        return right;
    }
    let left = left_part.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (left + right) * 0.5
}

/// Median of `values` computed in a reusable scratch buffer.
pub fn median_with_scratch(values: &[f64], scratch: &mut Vec<f64>) -> f64 {
    scratch.clear();
    scratch.extend_from_slice(values);
    median_f64_mut(scratch)
}

/// Median of `values` without touching the input.
pub fn median(values: &[f64]) -> f64 {
    median_with_scratch(values, &mut Vec::with_capacity(values.len()))
}

/// Compute MAD around `center` using a scratch buffer.
///
/// MAD = median(|x_i - center|)
#[inline]
pub fn mad_with_scratch(values: &[f64], center: f64, scratch: &mut Vec<f64>) -> f64 {
    scratch.clear();
    scratch.extend_from_slice(values);
    abs_deviation_inplace(scratch, center);
    median_f64_mut(scratch)
}

/// Compute median and MAD together. Mutates the input buffer.
pub fn median_and_mad_f64_mut(data: &mut [f64]) -> (f64, f64) {
    let median = median_f64_mut(data);
    abs_deviation_inplace(data, median);
    let mad = median_f64_mut(data);
    (median, mad)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance with `ddof` delta degrees of freedom (divisor `n - ddof`).
///
/// NaN when `n <= ddof`.
pub fn variance(values: &[f64], ddof: usize) -> f64 {
    let n = values.len();
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq = values
        .iter()
        .map(|&v| {
            let d = v - m;
            d * d
        })
        .sum::<f64>();
    sum_sq / (n - ddof) as f64
}

pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    variance(values, ddof).sqrt()
}

/// Biweight location of a slice.
///
/// `u = (x - M) / (c * MAD)` where MAD is taken around the median. Values with
/// `|u| >= 1` get zero weight. When MAD is zero the result collapses to `M`.
/// This is a single reweighting pass, not a fixed-point iteration.
pub fn biweight_location_of(values: &[f64], c: f64, m: Option<f64>, scratch: &mut Vec<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let median = median_with_scratch(values, scratch);
    let m = m.unwrap_or(median);
    let mad = mad_with_scratch(values, median, scratch);
    if mad == 0.0 {
        return m;
    }

    let scale = c * mad;
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for &v in values {
        let d = v - m;
        let u = d / scale;
        if u.abs() < 1.0 {
            let one_minus_u2 = 1.0 - u * u;
            let w = one_minus_u2 * one_minus_u2;
            numerator += w * d;
            denominator += w;
        }
    }

    if denominator == 0.0 {
        return f64::NAN;
    }
    m + numerator / denominator
}

/// Biweight midvariance of a slice; its square root is the biweight scale.
///
/// `n * Σ d²(1-u²)⁴ / (Σ (1-u²)(1-5u²))²` with sums over `|u| < 1`. `n` counts
/// all values, or only those with `|u| < 1` when `modify_sample_size` is set.
/// Zero MAD yields 0.0.
pub fn biweight_midvariance_of(
    values: &[f64],
    c: f64,
    m: Option<f64>,
    modify_sample_size: bool,
    scratch: &mut Vec<f64>,
) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let median = median_with_scratch(values, scratch);
    let m = m.unwrap_or(median);
    let mad = mad_with_scratch(values, median, scratch);
    if mad == 0.0 {
        return 0.0;
    }

    let scale = c * mad;
    let mut f1 = 0.0;
    let mut f2 = 0.0;
    let mut inliers = 0usize;
    for &v in values {
        let d = v - m;
        let u = d / scale;
        if u.abs() < 1.0 {
            let u2 = u * u;
            let one_minus_u2 = 1.0 - u2;
            f1 += d * d * one_minus_u2.powi(4);
            f2 += one_minus_u2 * (1.0 - 5.0 * u2);
            inliers += 1;
        }
    }

    if f2 == 0.0 {
        return f64::NAN;
    }
    let n = if modify_sample_size {
        inliers
    } else {
        values.len()
    };
    n as f64 * f1 / (f2 * f2)
}

/// Half-sample mode (Bickel & Frühwirth).
///
/// Repeatedly keeps the densest half of the sorted sample (the window of
/// `ceil(n/2)` consecutive values with the smallest range) until at most three
/// values remain. Ties pick the lowest window.
pub fn half_sample_mode(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let mut window = sorted.as_slice();
    while window.len() > 3 {
        let half = window.len().div_ceil(2);
        let mut best_start = 0;
        let mut best_width = f64::INFINITY;
        for start in 0..=window.len() - half {
            let width = window[start + half - 1] - window[start];
            if width < best_width {
                best_width = width;
                best_start = start;
            }
        }
        window = &window[best_start..best_start + half];
    }

    match *window {
        [x] => x,
        [a, b] => (a + b) * 0.5,
        [a, b, c] => {
            let low = b - a;
            let high = c - b;
            if low < high {
                (a + b) * 0.5
            } else if low > high {
                (b + c) * 0.5
            } else {
                b
            }
        }
        _ => unreachable!("window shrinks to at most three values"),
    }
}

#[cfg(test)]
mod tests;
