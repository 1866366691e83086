//! Statistical building blocks used by the posterior and lift layers:
//! - Type 2 quantiles and equal-tailed intervals
//! - Counter-based seeding so parallel and sequential runs draw alike

mod quantile;
mod seed;

pub use quantile::{compute_quantiles, equal_tailed_interval, quantile_sorted};
pub use seed::{counter_rng_seed, seeded_rng, RngAlgo};

/// Arithmetic mean. NaN and infinities propagate; empty input gives NaN.
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn mean_propagates_non_finite() {
        assert!(mean(&[1.0, f64::NAN]).is_nan());
        assert_eq!(mean(&[1.0, f64::INFINITY]), f64::INFINITY);
    }
}
