//! Quantile computation using Type 2 quantiles (inverse empirical CDF with averaging).
//!
//! **Type 2 formula** (for sorted sample x of size n at probability p):
//! ```text
//! h = n * p + 0.5
//! q = (x[floor(h)] + x[ceil(h)]) / 2
//! ```
//!
//! Ordering uses IEEE 754 `total_cmp`, so infinities sort to the ends and
//! positive NaN sorts above `+inf`. A lift distribution containing NaN
//! therefore reports NaN in its upper quantiles instead of hiding it.
//!
//! # Reference
//!
//! Hyndman, R. J. & Fan, Y. (1996). "Sample quantiles in statistical packages."
//! The American Statistician 50(4):361–365.

/// Compute several quantiles, sorting a copy of `data` once.
///
/// Returns `(p, q)` pairs in the order the probabilities were given.
///
/// # Panics
///
/// Panics if `data` is empty or any probability is outside [0, 1].
pub fn compute_quantiles(data: &[f64], probabilities: &[f64]) -> Vec<(f64, f64)> {
    assert!(!data.is_empty(), "Cannot compute quantile of empty slice");

    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    probabilities
        .iter()
        .map(|&p| (p, quantile_sorted(&sorted, p)))
        .collect()
}

/// Type 2 quantile of data that is already sorted ascending.
///
/// The caller must ensure the data is sorted. No verification is performed.
///
/// # Panics
///
/// Panics if `sorted` is empty or if `p` is outside [0, 1].
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );

    let (floor_idx, ceil_idx) = type2_indices(sorted.len(), p);
    (sorted[floor_idx] + sorted[ceil_idx]) / 2.0
}

/// Equal-tailed interval holding `level` of the mass: the
/// `(1 - level) / 2` and `(1 + level) / 2` quantiles.
///
/// # Panics
///
/// Panics if `data` is empty or `level` is outside [0, 1].
pub fn equal_tailed_interval(data: &[f64], level: f64) -> (f64, f64) {
    assert!((0.0..=1.0).contains(&level), "Interval level must be in [0, 1]");
    let tail = (1.0 - level) / 2.0;
    let q = compute_quantiles(data, &[tail, 1.0 - tail]);
    (q[0].1, q[1].1)
}

/// 0-based indices of the two order statistics averaged by Type 2.
fn type2_indices(n: usize, p: f64) -> (usize, usize) {
    // Indices are 1-based in the formula.
    let h = n as f64 * p + 0.5;
    let floor_idx = (h.floor() as usize).saturating_sub(1).min(n - 1);
    let ceil_idx = (h.ceil() as usize).saturating_sub(1).min(n - 1);
    (floor_idx, ceil_idx)
}
