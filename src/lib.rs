//! # conversion-oracle
//!
//! Bayesian comparison of experiment arms on a binary outcome.
//!
//! Given per-arm counts of successes and failures, this crate forms the Beta
//! posterior of each arm's conversion probability, draws a Monte Carlo sample
//! from it, and reduces two arms to a relative-lift distribution:
//! - `P(B > A)` over paired draws
//! - Mean relative lift `(B - A) / A`
//! - Quantiles of the lift distribution
//! - Per-arm posterior means and credible intervals
//!
//! Loading raw records and plotting are left to the caller; the crate only
//! consumes aggregated counts.
//!
//! ## Quick Start
//!
//! ```
//! use conversion_oracle::{ArmLabel, ArmSummary, ConversionOracle, PriorRegistry};
//!
//! let registry = PriorRegistry::builder().with("prior_c", 1.0)?.build();
//! let oracle = ConversionOracle::new(
//!     registry,
//!     [
//!         ArmSummary::new(ArmLabel::A, 100, 50, 50),
//!         ArmSummary::new(ArmLabel::B, 100, 70, 30),
//!         ArmSummary::new(ArmLabel::parse("C").unwrap(), 100, 55, 45),
//!     ],
//! )?
//! .simulations(50_000)
//! .seed(42);
//!
//! let posteriors = oracle.generate_posteriors()?;
//! assert_eq!(posteriors.len(), 3);
//!
//! let lift = posteriors.compare(ArmLabel::A, ArmLabel::B)?;
//! println!("P(B > A) = {:.3}", lift.p_b_beats_a);
//!
//! // Three arms: a pair must be named explicitly.
//! assert!(posteriors.compare_pair().is_err());
//! # Ok::<(), conversion_oracle::Error>(())
//! ```
//!
//! ## Reproducibility
//!
//! Each arm draws from its own RNG stream derived from a base seed and the
//! arm's letter. A fixed seed gives bit-identical samples regardless of arm
//! order or whether the `parallel` feature is enabled. Without a seed the
//! base seed is drawn fresh and reported by [`Posteriors::seed`].

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod oracle;
mod registry;
mod types;

// Functional modules
pub mod analysis;
pub mod constants;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use analysis::{LiftSummary, NumericAnomaly, PosteriorSample, PosteriorSummary, Posteriors};
pub use config::Config;
pub use constants::{DEFAULT_PRIOR, DEFAULT_QUANTILES, DEFAULT_SEED, DEFAULT_SIMULATIONS};
pub use error::{ConfigurationError, Error, Result, UnsupportedOperation};
pub use oracle::ConversionOracle;
pub use registry::{parse_prior_key, PriorRegistry, PriorRegistryBuilder};
pub use types::{ArmLabel, ArmSummary, BetaPrior, BusinessMetrics};
