//! Tests for statistical kernels.

use super::*;

// ---------------------------------------------------------------------------
// Median tests
// ---------------------------------------------------------------------------

#[test]
fn test_median_odd() {
    let mut values = [1.0, 3.0, 2.0, 5.0, 4.0];
    assert_eq!(median_f64_mut(&mut values), 3.0);
}

#[test]
fn test_median_even() {
    let mut values = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(median_f64_mut(&mut values), 2.5);
}

#[test]
fn test_median_single() {
    let mut values = [42.0];
    assert_eq!(median_f64_mut(&mut values), 42.0);
}

#[test]
fn test_median_negative() {
    let mut values = [-5.0, -3.0, -1.0, 2.0, 4.0];
    assert_eq!(median_f64_mut(&mut values), -1.0);
}

#[test]
fn test_median_empty_is_nan() {
    let mut values: [f64; 0] = [];
    assert!(median_f64_mut(&mut values).is_nan());
}

#[test]
fn test_median_does_not_reorder_input() {
    let values = [5.0, 1.0, 4.0, 2.0, 3.0];
    assert_eq!(median(&values), 3.0);
    assert_eq!(values, [5.0, 1.0, 4.0, 2.0, 3.0]);
}

// ---------------------------------------------------------------------------
// MAD tests
// ---------------------------------------------------------------------------

#[test]
fn test_median_and_mad_odd() {
    let mut values = [2.0, 4.0, 3.0];
    let (median, mad) = median_and_mad_f64_mut(&mut values);
    assert_eq!(median, 3.0);
    assert_eq!(mad, 1.0);
}

#[test]
fn test_median_and_mad_uniform() {
    let mut values = [3.5; 5];
    let (median, mad) = median_and_mad_f64_mut(&mut values);
    assert_eq!(median, 3.5);
    assert_eq!(mad, 0.0);
}

#[test]
fn test_mad_with_scratch() {
    let values = [1.0, 1.0, 2.0, 2.0, 4.0, 6.0, 9.0];
    let mut scratch = Vec::new();
    // median = 2, deviations = [1, 1, 0, 0, 2, 4, 7] -> median 1
    assert_eq!(mad_with_scratch(&values, 2.0, &mut scratch), 1.0);
}

#[test]
fn test_mad_with_scratch_empty() {
    let mut scratch = Vec::new();
    assert!(mad_with_scratch(&[], 0.0, &mut scratch).is_nan());
}

#[test]
fn test_mad_to_sigma() {
    assert!((mad_to_sigma(1.0) - 1.482602218505602).abs() < 1e-15);
}

// ---------------------------------------------------------------------------
// Moments
// ---------------------------------------------------------------------------

#[test]
fn test_mean_and_variance() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_eq!(mean(&values), 5.0);
    assert_eq!(variance(&values, 0), 4.0);
    assert_eq!(std_dev(&values, 0), 2.0);
    assert!((variance(&values, 1) - 32.0 / 7.0).abs() < 1e-12);
}

#[test]
fn test_variance_insufficient_samples() {
    assert!(variance(&[1.0], 1).is_nan());
    assert!(mean(&[]).is_nan());
    assert!(std_dev(&[], 0).is_nan());
}

// ---------------------------------------------------------------------------
// Biweight tests
// ---------------------------------------------------------------------------

#[test]
fn test_biweight_location_symmetric() {
    let values = [-2.0, -1.0, 0.0, 1.0, 2.0];
    let mut scratch = Vec::new();
    let loc = biweight_location_of(&values, 6.0, None, &mut scratch);
    assert!(loc.abs() < 1e-12);
}

#[test]
fn test_biweight_location_resists_outlier() {
    let values = [1.0, 1.1, 0.9, 1.0, 1.05, 0.95, 1.0, 100.0];
    let mut scratch = Vec::new();
    let loc = biweight_location_of(&values, 6.0, None, &mut scratch);
    assert!((loc - 1.0).abs() < 0.05, "location {loc}");
}

#[test]
fn test_biweight_location_constant_collapses() {
    let values = [7.5; 10];
    let mut scratch = Vec::new();
    assert_eq!(biweight_location_of(&values, 6.0, None, &mut scratch), 7.5);
    assert_eq!(biweight_midvariance_of(&values, 9.0, None, false, &mut scratch), 0.0);
}

#[test]
fn test_biweight_location_zero_mad_returns_given_center() {
    let values = [3.0; 4];
    let mut scratch = Vec::new();
    assert_eq!(biweight_location_of(&values, 6.0, Some(2.0), &mut scratch), 2.0);
}

#[test]
fn test_biweight_midvariance_hand_computed() {
    // median = 0, MAD = 1, c = 9 -> u = x / 9.
    let values = [-1.0, 0.0, 1.0];
    let mut scratch = Vec::new();
    let u2: f64 = 1.0 / 81.0;
    let f1 = 2.0 * (1.0 - u2).powi(4);
    let f2 = 1.0 + 2.0 * (1.0 - u2) * (1.0 - 5.0 * u2);
    let expected = 3.0 * f1 / (f2 * f2);
    let got = biweight_midvariance_of(&values, 9.0, None, false, &mut scratch);
    assert!((got - expected).abs() < 1e-12, "got {got}, expected {expected}");
}

#[test]
fn test_biweight_modify_sample_size_excludes_rejected() {
    let values = [-1.0, 0.0, 1.0, 0.5, -0.5, 1000.0];
    let mut scratch = Vec::new();
    let full = biweight_midvariance_of(&values, 9.0, None, false, &mut scratch);
    let modified = biweight_midvariance_of(&values, 9.0, None, true, &mut scratch);
    // 1000 is far outside c * MAD, so only the sample size changes: 6 vs 5.
    assert!((full / modified - 6.0 / 5.0).abs() < 1e-12);
}

#[test]
fn test_biweight_empty_is_nan() {
    let mut scratch = Vec::new();
    assert!(biweight_location_of(&[], 6.0, None, &mut scratch).is_nan());
    assert!(biweight_midvariance_of(&[], 9.0, None, false, &mut scratch).is_nan());
}

// ---------------------------------------------------------------------------
// Half-sample mode
// ---------------------------------------------------------------------------

#[test]
fn test_half_sample_mode_small() {
    assert_eq!(half_sample_mode(&[4.0]), 4.0);
    assert_eq!(half_sample_mode(&[1.0, 3.0]), 2.0);
    assert_eq!(half_sample_mode(&[1.0, 2.0, 10.0]), 1.5);
    assert_eq!(half_sample_mode(&[1.0, 9.0, 10.0]), 9.5);
    assert_eq!(half_sample_mode(&[1.0, 2.0, 3.0]), 2.0);
}

#[test]
fn test_half_sample_mode_finds_dense_cluster() {
    let values = [0.0, 10.0, 5.0, 5.1, 5.05, 4.95, 5.02, 20.0, -3.0];
    let mode = half_sample_mode(&values);
    assert!((mode - 5.0).abs() < 0.1, "mode {mode}");
}

#[test]
fn test_half_sample_mode_constant() {
    assert_eq!(half_sample_mode(&[2.0; 9]), 2.0);
    assert!(half_sample_mode(&[]).is_nan());
}
