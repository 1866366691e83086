//! Bayesian comparison of experiment arms.
//!
//! 1. **Posterior sampling** ([`posterior`]): Beta-Bernoulli update per arm, N Monte Carlo draws
//! 2. **Relative lift** ([`lift`]): paired `(B - A) / A`, P(B > A), quantiles

pub mod lift;
pub mod posterior;

pub use lift::{
    compare_samples, probability_greater, relative_lift, LiftSummary, NumericAnomaly,
};
pub use posterior::{
    generate_posteriors, posterior_shape, sample_posterior, PosteriorSample, PosteriorSummary,
    Posteriors,
};
