//! Shared helpers for unit tests.

use rand::prelude::*;

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Deterministic normal samples via Box-Muller.
pub fn normal_samples(n: usize, mean: f64, sigma: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let u1: f64 = rng.random_range(1e-12..1.0);
            let u2: f64 = rng.random_range(0.0..1.0);
            let r = (-2.0 * u1.ln()).sqrt();
            mean + sigma * r * (2.0 * std::f64::consts::PI * u2).cos()
        })
        .collect()
}

/// A tight cluster around 0 (std 0.2) mixed with broad outliers
/// (mean 3.0, std 5.0) making up `outlier_fraction` of the sample.
pub fn contaminated_samples(n: usize, outlier_fraction: f64, seed: u64) -> Vec<f64> {
    let outliers = (n as f64 * outlier_fraction).round() as usize;
    let mut values = normal_samples(n - outliers, 0.0, 0.2, seed);
    values.extend(normal_samples(outliers, 3.0, 5.0, seed.wrapping_add(1)));
    values
}
