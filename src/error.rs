//! Error types.
//!
//! Two families of failure exist and both are raised eagerly at the API
//! boundary:
//!
//! - [`ConfigurationError`]: the arm set, a prior, or the engine settings
//!   cannot produce a valid posterior.
//! - [`UnsupportedOperation`]: a comparison was requested over an arm set
//!   it is not defined for.
//!
//! Floating-point pathologies in lift values are not errors; they are
//! reported through [`crate::NumericAnomaly`] on the comparison result.

use thiserror::Error;

use crate::types::{ArmLabel, BetaPrior};

/// Invalid arm registration, prior, summary, or engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Registration key is not of the form `prior_<letter>`.
    #[error("unknown key included as an argument: {key}")]
    UnknownKey {
        /// The offending key, verbatim.
        key: String,
    },

    /// The same arm label was registered twice.
    #[error("arm {label} is already registered (key {key})")]
    DuplicateLabel {
        /// Label that collided.
        label: ArmLabel,
        /// Key of the rejected registration.
        key: String,
    },

    /// Prior pseudo-count is negative or not finite.
    #[error("prior for arm {label} must be finite and >= 0, got {value}")]
    InvalidPrior {
        /// Arm the prior was meant for.
        label: ArmLabel,
        /// Rejected value.
        value: f64,
    },

    /// No summary was supplied for a registered arm.
    #[error("no summary supplied for registered arm {label}")]
    MissingSummary {
        /// Registered arm without data.
        label: ArmLabel,
    },

    /// A summary names an arm that was never registered.
    #[error("summary supplied for unregistered arm {label}")]
    UnregisteredSummary {
        /// Label carried by the stray summary.
        label: ArmLabel,
    },

    /// Two summaries were supplied for the same arm.
    #[error("more than one summary supplied for arm {label}")]
    DuplicateSummary {
        /// Label carried by both summaries.
        label: ArmLabel,
    },

    /// A summary carries its own prior and it disagrees with the registry.
    #[error(
        "summary for arm {label} carries prior ({}, {}) but the registry has ({}, {})",
        .supplied.alpha0, .supplied.beta0, .registered.alpha0, .registered.beta0
    )]
    PriorMismatch {
        /// Arm the summary is for.
        label: ArmLabel,
        /// Prior set on the summary.
        supplied: BetaPrior,
        /// Prior registered for the arm.
        registered: BetaPrior,
    },

    /// Beta shape parameter would be zero (or otherwise invalid).
    #[error("arm {label} has non-positive Beta shape parameters ({alpha}, {beta})")]
    NonPositiveShape {
        /// Arm whose posterior is undefined.
        label: ArmLabel,
        /// successes + alpha0
        alpha: f64,
        /// failures + beta0
        beta: f64,
    },

    /// Engine settings are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A comparison that is not defined for the requested arms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnsupportedOperation {
    /// Relative lift is pairwise; an implicit pair needs exactly two arms.
    #[error(
        "this method can only handle two posteriors, found {arm_count}; \
         name the two arms to compare"
    )]
    NotPairwise {
        /// Number of arms present.
        arm_count: usize,
    },

    /// A requested label has no posterior.
    #[error("arm {label} is not registered")]
    UnknownArm {
        /// Requested label.
        label: ArmLabel,
    },

    /// Both sides of the comparison are the same arm.
    #[error("cannot compare arm {label} with itself")]
    SameArm {
        /// The repeated label.
        label: ArmLabel,
    },

    /// Paired draws require equal sample lengths.
    #[error("sample lengths differ: baseline has {baseline}, challenger has {challenger}")]
    LengthMismatch {
        /// Baseline draw count.
        baseline: usize,
        /// Challenger draw count.
        challenger: usize,
    },
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// See [`ConfigurationError`].
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// See [`UnsupportedOperation`].
    #[error(transparent)]
    UnsupportedOperation(#[from] UnsupportedOperation),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
