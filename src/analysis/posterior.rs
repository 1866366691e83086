//! Monte Carlo sampling of per-arm Beta posteriors.
//!
//! ## Model
//!
//! Each arm has an unknown conversion probability θ.
//!
//! - Prior: θ ~ Beta(α₀, β₀)
//! - Likelihood: successes ~ Binomial(participants, θ)
//! - Posterior: θ | data ~ Beta(α₀ + successes, β₀ + failures)
//!
//! The posterior is closed form; sampling exists so that non-linear
//! functionals of two arms (relative lift, P(B > A)) can be read off paired
//! draws. Arms are independent: no shape parameter depends on another arm.
//!
//! ## Reproducibility
//!
//! One base seed per call. Arm `X` draws from the stream
//! `counter_rng_seed(base, index(X))`, so the draws for an arm are the same
//! whether arms are sampled sequentially or on the rayon pool.

use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::Config;
use crate::error::{ConfigurationError, UnsupportedOperation};
use crate::statistics::{self, seeded_rng};
use crate::types::{ArmLabel, ArmSummary};

use super::lift::{compare_samples, LiftSummary};

/// N posterior draws for one arm.
///
/// Created fresh by every sampler call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorSample {
    label: ArmLabel,
    alpha: f64,
    beta: f64,
    draws: Vec<f64>,
}

impl PosteriorSample {
    #[cfg(test)]
    pub(crate) fn from_parts(label: ArmLabel, alpha: f64, beta: f64, draws: Vec<f64>) -> Self {
        Self {
            label,
            alpha,
            beta,
            draws,
        }
    }

    /// Arm the draws belong to.
    pub fn label(&self) -> ArmLabel {
        self.label
    }

    /// Posterior shape α = successes + α₀.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Posterior shape β = failures + β₀.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// The draws, in trial order.
    pub fn draws(&self) -> &[f64] {
        &self.draws
    }

    /// Take ownership of the draws.
    pub fn into_draws(self) -> Vec<f64> {
        self.draws
    }

    /// Number of draws.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// True when no draws were taken.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Monte Carlo estimate of E[θ].
    pub fn mean(&self) -> f64 {
        statistics::mean(&self.draws)
    }

    /// Closed-form E[θ] = α / (α + β).
    pub fn analytic_mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Equal-tailed credible interval from the draws.
    ///
    /// # Panics
    ///
    /// Panics if the sample is empty or `level` is outside [0, 1].
    pub fn credible_interval(&self, level: f64) -> (f64, f64) {
        statistics::equal_tailed_interval(&self.draws, level)
    }

    /// Serializable digest of the sample (the draws themselves are dropped).
    pub fn summary(&self, level: f64) -> PosteriorSummary {
        PosteriorSummary {
            label: self.label,
            alpha: self.alpha,
            beta: self.beta,
            draws: self.len(),
            mean: self.mean(),
            analytic_mean: self.analytic_mean(),
            credible_level: level,
            credible_interval: self.credible_interval(level),
        }
    }
}

/// Digest of one arm's posterior for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorSummary {
    /// Arm identifier.
    pub label: ArmLabel,
    /// Posterior shape α.
    pub alpha: f64,
    /// Posterior shape β.
    pub beta: f64,
    /// Number of draws summarized.
    pub draws: usize,
    /// Monte Carlo mean.
    pub mean: f64,
    /// α / (α + β).
    pub analytic_mean: f64,
    /// Mass of `credible_interval`.
    pub credible_level: f64,
    /// Equal-tailed credible interval.
    pub credible_interval: (f64, f64),
}

/// Posterior draws for every arm from one sampler call.
///
/// All samples share the same length and base seed, which is what paired
/// comparison requires.
#[derive(Debug, Clone)]
pub struct Posteriors {
    samples: BTreeMap<ArmLabel, PosteriorSample>,
    simulations: usize,
    seed: u64,
    quantiles: Vec<f64>,
}

impl Posteriors {
    /// Sample for one arm.
    pub fn get(&self, label: ArmLabel) -> Option<&PosteriorSample> {
        self.samples.get(&label)
    }

    /// Number of arms.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no arm was sampled.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Labels in order.
    pub fn labels(&self) -> impl Iterator<Item = ArmLabel> + '_ {
        self.samples.keys().copied()
    }

    /// Samples in label order.
    pub fn iter(&self) -> impl Iterator<Item = &PosteriorSample> {
        self.samples.values()
    }

    /// Draws per arm.
    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// Base seed the arm streams were derived from. Passing it back through
    /// `Config::seed` reproduces these draws exactly.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Summaries for every arm.
    pub fn summaries(&self, level: f64) -> Vec<PosteriorSummary> {
        self.iter().map(|s| s.summary(level)).collect()
    }

    /// Relative lift of `challenger` over `baseline`.
    ///
    /// # Errors
    ///
    /// [`UnsupportedOperation::UnknownArm`] if either label has no sample,
    /// [`UnsupportedOperation::SameArm`] if both labels are equal.
    pub fn compare(
        &self,
        baseline: ArmLabel,
        challenger: ArmLabel,
    ) -> Result<LiftSummary, UnsupportedOperation> {
        let a = self
            .get(baseline)
            .ok_or(UnsupportedOperation::UnknownArm { label: baseline })?;
        let b = self
            .get(challenger)
            .ok_or(UnsupportedOperation::UnknownArm { label: challenger })?;
        compare_samples(a, b, &self.quantiles)
    }

    /// Compare the only two arms, lower label as baseline.
    ///
    /// # Errors
    ///
    /// [`UnsupportedOperation::NotPairwise`] unless exactly two arms exist.
    pub fn compare_pair(&self) -> Result<LiftSummary, UnsupportedOperation> {
        let labels: Vec<ArmLabel> = self.labels().collect();
        match labels.as_slice() {
            [baseline, challenger] => self.compare(*baseline, *challenger),
            _ => Err(UnsupportedOperation::NotPairwise {
                arm_count: labels.len(),
            }),
        }
    }

    /// Keep only the named arms, e.g. to reduce a three-arm run to a pair.
    ///
    /// # Errors
    ///
    /// [`UnsupportedOperation::UnknownArm`] for a label with no sample.
    pub fn select(&self, labels: &[ArmLabel]) -> Result<Posteriors, UnsupportedOperation> {
        let mut samples = BTreeMap::new();
        for &label in labels {
            let sample = self
                .get(label)
                .ok_or(UnsupportedOperation::UnknownArm { label })?;
            samples.insert(label, sample.clone());
        }
        Ok(Posteriors {
            samples,
            simulations: self.simulations,
            seed: self.seed,
            quantiles: self.quantiles.clone(),
        })
    }
}

/// Posterior shape parameters, rejecting anything Beta cannot take.
pub fn posterior_shape(summary: &ArmSummary) -> Result<(f64, f64), ConfigurationError> {
    let (alpha, beta) = summary.posterior_shape();
    if !(alpha > 0.0 && beta > 0.0 && alpha.is_finite() && beta.is_finite()) {
        return Err(ConfigurationError::NonPositiveShape {
            label: summary.label,
            alpha,
            beta,
        });
    }
    Ok((alpha, beta))
}

/// Draw `simulations` samples from one arm's posterior.
pub fn sample_posterior<R: Rng + ?Sized>(
    summary: &ArmSummary,
    simulations: usize,
    rng: &mut R,
) -> Result<PosteriorSample, ConfigurationError> {
    let (alpha, beta) = posterior_shape(summary)?;
    let dist = Beta::new(alpha, beta).map_err(|_| ConfigurationError::NonPositiveShape {
        label: summary.label,
        alpha,
        beta,
    })?;

    let draws: Vec<f64> = (0..simulations).map(|_| dist.sample(&mut *rng)).collect();

    debug!(
        arm = %summary.label,
        alpha,
        beta,
        simulations,
        "sampled posterior"
    );

    Ok(PosteriorSample {
        label: summary.label,
        alpha,
        beta,
        draws,
    })
}

fn sample_arm(
    summary: &ArmSummary,
    simulations: usize,
    base_seed: u64,
) -> Result<(ArmLabel, PosteriorSample), ConfigurationError> {
    let mut rng = seeded_rng(base_seed, summary.label.index());
    sample_posterior(summary, simulations, &mut rng).map(|s| (summary.label, s))
}

/// Sample every arm's posterior.
///
/// Shapes are validated for all arms before any drawing starts, so a bad
/// arm fails the call without wasted work.
///
/// # Errors
///
/// [`ConfigurationError::NonPositiveShape`] for an arm with a zero shape,
/// [`ConfigurationError::InvalidConfig`] for an invalid `config`.
pub fn generate_posteriors(
    arms: &[ArmSummary],
    config: &Config,
) -> Result<Posteriors, ConfigurationError> {
    config.validate()?;
    for arm in arms {
        posterior_shape(arm)?;
    }

    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let simulations = config.simulations;
    debug!(
        seed = base_seed,
        arms = arms.len(),
        simulations,
        "generating posteriors"
    );

    #[cfg(feature = "parallel")]
    let samples: Result<BTreeMap<_, _>, _> = arms
        .par_iter()
        .map(|arm| sample_arm(arm, simulations, base_seed))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let samples: Result<BTreeMap<_, _>, _> = arms
        .iter()
        .map(|arm| sample_arm(arm, simulations, base_seed))
        .collect();

    Ok(Posteriors {
        samples: samples?,
        simulations,
        seed: base_seed,
        quantiles: config.quantiles.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BetaPrior;

    fn arm(label: ArmLabel, s: u64, f: u64) -> ArmSummary {
        ArmSummary::from_counts(label, s, f)
    }

    fn config(n: usize) -> Config {
        Config::new().simulations(n).seed(42)
    }

    #[test]
    fn draws_have_requested_length_and_range() {
        let posteriors =
            generate_posteriors(&[arm(ArmLabel::A, 3, 7), arm(ArmLabel::B, 0, 0)], &config(5_000))
                .unwrap();
        for sample in posteriors.iter() {
            assert_eq!(sample.len(), 5_000);
            assert!(sample.draws().iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn shape_is_counts_plus_prior() {
        let summary = arm(ArmLabel::A, 50, 50).with_prior(BetaPrior::symmetric(2.0));
        let sample = sample_posterior(&summary, 10, &mut seeded_rng(1, 0)).unwrap();
        assert_eq!((sample.alpha(), sample.beta()), (52.0, 52.0));
        assert!((sample.analytic_mean() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_shape_fails_fast() {
        let empty = arm(ArmLabel::B, 0, 5).with_prior(BetaPrior::symmetric(0.0));
        let err = generate_posteriors(&[arm(ArmLabel::A, 1, 1), empty], &config(10)).unwrap_err();
        assert!(matches!(err, ConfigurationError::NonPositiveShape { alpha, .. } if alpha == 0.0));
    }

    #[test]
    fn zero_prior_with_observations_is_fine() {
        let summary = arm(ArmLabel::A, 4, 6).with_prior(BetaPrior::symmetric(0.0));
        assert_eq!(posterior_shape(&summary), Ok((4.0, 6.0)));
    }

    #[test]
    fn seeded_runs_repeat() {
        let arms = [arm(ArmLabel::A, 10, 90), arm(ArmLabel::B, 12, 88)];
        let first = generate_posteriors(&arms, &config(1_000)).unwrap();
        let second = generate_posteriors(&arms, &config(1_000)).unwrap();
        assert_eq!(first.seed(), 42);
        for label in [ArmLabel::A, ArmLabel::B] {
            assert_eq!(first.get(label), second.get(label));
        }
    }

    #[test]
    fn arm_draws_do_not_depend_on_other_arms() {
        let c = ArmLabel::from_letter('c').unwrap();
        let two = generate_posteriors(&[arm(ArmLabel::A, 5, 5), arm(ArmLabel::B, 6, 4)], &config(500))
            .unwrap();
        let three = generate_posteriors(
            &[arm(c, 1, 1), arm(ArmLabel::B, 6, 4), arm(ArmLabel::A, 5, 5)],
            &config(500),
        )
        .unwrap();
        assert_eq!(two.get(ArmLabel::A), three.get(ArmLabel::A));
        assert_eq!(two.get(ArmLabel::B), three.get(ArmLabel::B));
    }

    fn parity_arms() -> Vec<ArmSummary> {
        let c = ArmLabel::from_letter('c').unwrap();
        vec![arm(ArmLabel::A, 5, 5), arm(ArmLabel::B, 6, 4), arm(c, 2, 9)]
    }

    #[test]
    fn generated_draws_match_per_arm_streams() {
        let arms = parity_arms();
        let posteriors = generate_posteriors(&arms, &config(300)).unwrap();
        for summary in arms.iter().rev() {
            let (label, sample) = sample_arm(summary, 300, 42).unwrap();
            assert_eq!(posteriors.get(label), Some(&sample));
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn rayon_and_sequential_sampling_agree() {
        use rayon::prelude::*;

        let arms = parity_arms();
        let sequential: BTreeMap<_, _> = arms
            .iter()
            .map(|a| sample_arm(a, 300, 42).unwrap())
            .collect();
        let parallel: BTreeMap<_, _> = arms
            .par_iter()
            .rev()
            .map(|a| sample_arm(a, 300, 42).unwrap())
            .collect();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn arms_are_not_identical_streams() {
        let posteriors = generate_posteriors(
            &[arm(ArmLabel::A, 5, 5), arm(ArmLabel::B, 5, 5)],
            &config(100),
        )
        .unwrap();
        assert_ne!(
            posteriors.get(ArmLabel::A).unwrap().draws(),
            posteriors.get(ArmLabel::B).unwrap().draws()
        );
    }

    #[test]
    fn compare_pair_requires_two_arms() {
        let c = ArmLabel::from_letter('c').unwrap();
        let posteriors = generate_posteriors(
            &[arm(ArmLabel::A, 5, 5), arm(ArmLabel::B, 5, 5), arm(c, 5, 5)],
            &config(100),
        )
        .unwrap();
        assert_eq!(
            posteriors.compare_pair().unwrap_err(),
            UnsupportedOperation::NotPairwise { arm_count: 3 }
        );
        assert!(posteriors.compare(ArmLabel::A, c).is_ok());

        let pair = posteriors.select(&[ArmLabel::A, c]).unwrap();
        let lift = pair.compare_pair().unwrap();
        assert_eq!((lift.baseline, lift.challenger), (ArmLabel::A, c));
    }

    #[test]
    fn compare_unknown_label() {
        let posteriors =
            generate_posteriors(&[arm(ArmLabel::A, 5, 5), arm(ArmLabel::B, 5, 5)], &config(100))
                .unwrap();
        let z = ArmLabel::from_letter('z').unwrap();
        assert_eq!(
            posteriors.compare(ArmLabel::A, z).unwrap_err(),
            UnsupportedOperation::UnknownArm { label: z }
        );
        assert!(posteriors.select(&[z]).is_err());
    }

    #[test]
    fn summary_reports_interval_around_mean() {
        let posteriors =
            generate_posteriors(&[arm(ArmLabel::A, 30, 70)], &config(20_000)).unwrap();
        let summary = posteriors.get(ArmLabel::A).unwrap().summary(0.95);
        assert_eq!(summary.draws, 20_000);
        assert!(summary.credible_interval.0 < summary.mean);
        assert!(summary.mean < summary.credible_interval.1);
        assert!((summary.mean - summary.analytic_mean).abs() < 0.005);
    }
}
