//! JSON serialization of experiment results.

use serde::{Deserialize, Serialize};

use crate::analysis::{LiftSummary, PosteriorSummary, Posteriors};
use crate::types::ArmSummary;

/// Everything worth persisting from one run. Raw draws are left out.
///
/// Non-finite lift statistics serialize as `null` and read back as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Arm counts with priors applied.
    pub arms: Vec<ArmSummary>,
    /// Draws per arm.
    pub simulations: usize,
    /// Base seed; feeding it back reproduces the run.
    pub seed: u64,
    /// Per-arm posterior digests.
    pub posteriors: Vec<PosteriorSummary>,
    /// Pairwise comparison, if one was made.
    pub lift: Option<LiftSummary>,
}

impl Report {
    /// Assemble a report from one sampler call.
    pub fn new(
        arms: &[ArmSummary],
        posteriors: &Posteriors,
        credible_level: f64,
        lift: Option<LiftSummary>,
    ) -> Self {
        Self {
            arms: arms.to_vec(),
            simulations: posteriors.simulations(),
            seed: posteriors.seed(),
            posteriors: posteriors.summaries(credible_level),
            lift,
        }
    }
}

/// Serialize a report to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for Report).
pub fn to_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a report to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for Report).
pub fn to_json_pretty(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
