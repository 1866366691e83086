//! Main `ConversionOracle` entry point.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use crate::analysis::{self, LiftSummary, Posteriors};
use crate::config::Config;
use crate::error::{ConfigurationError, Result, UnsupportedOperation};
use crate::output;
use crate::registry::PriorRegistry;
use crate::types::{ArmLabel, ArmSummary, BetaPrior};

/// Bayesian comparison of experiment arms on a binary outcome.
///
/// Binds a [`PriorRegistry`] to one [`ArmSummary`] per registered arm.
/// The arm table is fixed at construction; only sampling settings can be
/// adjusted afterwards.
///
/// # Example
///
/// ```
/// use conversion_oracle::{ArmLabel, ArmSummary, ConversionOracle, PriorRegistry};
///
/// let oracle = ConversionOracle::new(
///     PriorRegistry::default(),
///     [
///         ArmSummary::from_counts(ArmLabel::A, 50, 50),
///         ArmSummary::from_counts(ArmLabel::B, 70, 30),
///     ],
/// )?
/// .simulations(20_000)
/// .seed(7);
///
/// let lift = oracle.compare_pair()?;
/// assert!(lift.p_b_beats_a > 0.99);
/// # Ok::<(), conversion_oracle::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConversionOracle {
    config: Config,
    registry: PriorRegistry,
    arms: Vec<ArmSummary>,
}

impl ConversionOracle {
    /// Bind summaries to a registry using the default configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnregisteredSummary`] for a summary whose label
    ///   is not in the registry
    /// - [`ConfigurationError::DuplicateSummary`] for two summaries of one arm
    /// - [`ConfigurationError::MissingSummary`] for a registered arm with no data
    /// - [`ConfigurationError::PriorMismatch`] for a summary whose own
    ///   non-uniform prior differs from the registered one
    pub fn new<I>(registry: PriorRegistry, summaries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ArmSummary>,
    {
        Self::with_config(Config::default(), registry, summaries)
    }

    /// Bind summaries to a registry with an explicit configuration.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new), plus [`ConfigurationError::InvalidConfig`].
    pub fn with_config<I>(config: Config, registry: PriorRegistry, summaries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ArmSummary>,
    {
        config.validate()?;
        let arms = bind_summaries(&registry, summaries)?;
        Ok(Self {
            config,
            registry,
            arms,
        })
    }

    /// Set draws per arm.
    pub fn simulations(mut self, n: usize) -> Self {
        self.config = self.config.simulations(n);
        self
    }

    /// Fix the sampling seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.seed(seed);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The arm/prior table.
    pub fn registry(&self) -> &PriorRegistry {
        &self.registry
    }

    /// Bound arms in label order, priors applied.
    pub fn arms(&self) -> &[ArmSummary] {
        &self.arms
    }

    /// One bound arm.
    pub fn arm(&self, label: ArmLabel) -> Option<&ArmSummary> {
        self.arms.iter().find(|arm| arm.label == label)
    }

    /// Sample every arm's posterior with the configured draw count.
    pub fn generate_posteriors(&self) -> Result<Posteriors> {
        Ok(analysis::generate_posteriors(&self.arms, &self.config)?)
    }

    /// Sample every arm's posterior with `simulations` draws.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidConfig`] if `simulations` is zero.
    pub fn generate_posteriors_with(&self, simulations: usize) -> Result<Posteriors> {
        let config = Config {
            simulations,
            ..self.config.clone()
        };
        Ok(analysis::generate_posteriors(&self.arms, &config)?)
    }

    /// Sample two arms and compute the lift of `challenger` over `baseline`.
    ///
    /// Only the two named arms are sampled. Their draws are the same as in
    /// a full [`generate_posteriors`](Self::generate_posteriors) call under
    /// the same seed.
    ///
    /// # Errors
    ///
    /// [`UnsupportedOperation`] for an unregistered or repeated label.
    pub fn compare(&self, baseline: ArmLabel, challenger: ArmLabel) -> Result<LiftSummary> {
        for label in [baseline, challenger] {
            if !self.registry.contains(label) {
                return Err(UnsupportedOperation::UnknownArm { label }.into());
            }
        }
        if baseline == challenger {
            return Err(UnsupportedOperation::SameArm { label: baseline }.into());
        }

        let pair: Vec<ArmSummary> = self
            .arms
            .iter()
            .filter(|arm| arm.label == baseline || arm.label == challenger)
            .cloned()
            .collect();
        let posteriors = analysis::generate_posteriors(&pair, &self.config)?;
        Ok(posteriors.compare(baseline, challenger)?)
    }

    /// Compare the two arms of a two-arm experiment.
    ///
    /// # Errors
    ///
    /// [`UnsupportedOperation::NotPairwise`] when more than two arms are
    /// registered; use [`compare`](Self::compare) to name a pair.
    pub fn compare_pair(&self) -> Result<LiftSummary> {
        match self.registry.labels().collect::<Vec<_>>().as_slice() {
            [baseline, challenger] => self.compare(*baseline, *challenger),
            labels => Err(UnsupportedOperation::NotPairwise {
                arm_count: labels.len(),
            }
            .into()),
        }
    }

    /// One-line description of the configuration, e.g.
    /// `ConversionOracle(simulations=1000000, prior_a=1, prior_b=1)`.
    pub fn describe(&self) -> String {
        format!(
            "ConversionOracle(simulations={}, {})",
            self.config.simulations, self.registry
        )
    }
}

impl fmt::Display for ConversionOracle {
    /// Per-arm counts, one line per arm.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&output::format_arms(&self.arms))
    }
}

fn bind_summaries<I>(
    registry: &PriorRegistry,
    summaries: I,
) -> std::result::Result<Vec<ArmSummary>, ConfigurationError>
where
    I: IntoIterator<Item = ArmSummary>,
{
    let mut bound: BTreeMap<ArmLabel, ArmSummary> = BTreeMap::new();
    for summary in summaries {
        let label = summary.label;
        let prior = registry
            .prior(label)
            .ok_or(ConfigurationError::UnregisteredSummary { label })?;
        if bound.contains_key(&label) {
            return Err(ConfigurationError::DuplicateSummary { label });
        }
        // A uniform prior on the summary means "not set"; anything else must
        // agree with the registry.
        if summary.prior != BetaPrior::uniform() && summary.prior != prior {
            return Err(ConfigurationError::PriorMismatch {
                label,
                supplied: summary.prior,
                registered: prior,
            });
        }
        if !summary.is_consistent() {
            warn!(
                arm = %label,
                participants = summary.participants,
                successes = summary.successes,
                failures = summary.failures,
                "successes + failures does not match participants"
            );
        }
        bound.insert(label, summary.with_prior(prior));
    }

    if let Some(label) = registry.labels().find(|l| !bound.contains_key(l)) {
        return Err(ConfigurationError::MissingSummary { label });
    }

    Ok(bound.into_values().collect())
}
