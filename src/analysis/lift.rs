//! Relative lift between two arms' posterior draws.
//!
//! Draw `i` of each arm belongs to the same Monte Carlo trial, so the two
//! samples are paired by index:
//!
//! ```text
//! lift[i] = (b[i] - a[i]) / a[i]
//! P(B > A) ≈ #{i : b[i] > a[i]} / N
//! ```
//!
//! A zero baseline draw gives an infinite or NaN lift. Such values stay in
//! the sample, flow into the mean, and are counted in [`NumericAnomaly`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::UnsupportedOperation;
use crate::statistics;
use crate::types::ArmLabel;

use super::posterior::PosteriorSample;

/// Count of non-finite lift values.
///
/// Non-fatal: a continuous Beta almost never yields an exact zero, but when
/// it does the caller decides what to do with the affected trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumericAnomaly {
    /// Lifts that are NaN (0 / 0).
    pub nan: usize,
    /// Lifts that are ±inf (x / 0 with x ≠ 0).
    pub infinite: usize,
}

impl NumericAnomaly {
    /// Tally the non-finite values in `lift`.
    pub fn scan(lift: &[f64]) -> Self {
        lift.iter().fold(Self::default(), |mut acc, x| {
            if x.is_nan() {
                acc.nan += 1;
            } else if x.is_infinite() {
                acc.infinite += 1;
            }
            acc
        })
    }

    /// Total non-finite values.
    pub fn total(&self) -> usize {
        self.nan + self.infinite
    }

    /// True when every lift is finite.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Result of comparing a challenger arm against a baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftSummary {
    /// Arm in the denominator (A).
    pub baseline: ArmLabel,
    /// Arm in the numerator (B).
    pub challenger: ArmLabel,
    /// Per-trial relative lift. Not serialized.
    #[serde(skip)]
    pub lift_samples: Vec<f64>,
    /// Fraction of trials where the challenger draw beats the baseline draw.
    pub p_b_beats_a: f64,
    /// Mean relative lift. NaN or ±inf if any lift is.
    ///
    /// JSON has no non-finite numbers: these are written as `null` and read
    /// back as NaN. `anomalies` keeps the NaN/inf split.
    #[serde(deserialize_with = "null_as_nan::value")]
    pub mean_lift: f64,
    /// `(p, q)` pairs of the lift distribution. Non-finite `q` round-trips
    /// through JSON like `mean_lift`.
    #[serde(deserialize_with = "null_as_nan::pairs")]
    pub quantiles: Vec<(f64, f64)>,
    /// Non-finite lift values.
    pub anomalies: NumericAnomaly,
    /// Number of paired trials.
    pub trials: usize,
}

impl LiftSummary {
    /// Quantile at exactly `p`, if it was requested.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        self.quantiles
            .iter()
            .find(|(prob, _)| (*prob - p).abs() < 1e-12)
            .map(|(_, q)| *q)
    }

    /// `P(A > B)`, the complement ignoring exact ties.
    pub fn p_a_beats_b(&self) -> f64 {
        1.0 - self.p_b_beats_a
    }
}

/// serde_json writes non-finite floats as `null`; read them back as NaN.
mod null_as_nan {
    use serde::{Deserialize, Deserializer};

    pub(super) fn value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }

    pub(super) fn pairs<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(f64, f64)>, D::Error> {
        let pairs = Vec::<(f64, Option<f64>)>::deserialize(deserializer)?;
        Ok(pairs
            .into_iter()
            .map(|(p, q)| (p, q.unwrap_or(f64::NAN)))
            .collect())
    }
}

/// Elementwise `(b - a) / a` over paired draws.
///
/// # Errors
///
/// [`UnsupportedOperation::LengthMismatch`] if the slices differ in length.
pub fn relative_lift(baseline: &[f64], challenger: &[f64]) -> Result<Vec<f64>, UnsupportedOperation> {
    if baseline.len() != challenger.len() {
        return Err(UnsupportedOperation::LengthMismatch {
            baseline: baseline.len(),
            challenger: challenger.len(),
        });
    }
    Ok(baseline
        .iter()
        .zip(challenger)
        .map(|(a, b)| (b - a) / a)
        .collect())
}

/// Fraction of paired trials where `challenger[i] > baseline[i]`.
///
/// Returns NaN for empty input. Lengths are assumed equal.
pub fn probability_greater(baseline: &[f64], challenger: &[f64]) -> f64 {
    let wins = baseline
        .iter()
        .zip(challenger)
        .filter(|(a, b)| b > a)
        .count();
    wins as f64 / baseline.len() as f64
}

/// Compare two posterior samples.
///
/// # Errors
///
/// - [`UnsupportedOperation::SameArm`] if both samples are for one arm
/// - [`UnsupportedOperation::LengthMismatch`] if the draw counts differ
pub fn compare_samples(
    baseline: &PosteriorSample,
    challenger: &PosteriorSample,
    quantiles: &[f64],
) -> Result<LiftSummary, UnsupportedOperation> {
    if baseline.label() == challenger.label() {
        return Err(UnsupportedOperation::SameArm {
            label: baseline.label(),
        });
    }

    let a = baseline.draws();
    let b = challenger.draws();
    let lift = relative_lift(a, b)?;

    let p_b_beats_a = probability_greater(a, b);
    let mean_lift = statistics::mean(&lift);
    let quantiles = if lift.is_empty() {
        quantiles.iter().map(|&p| (p, f64::NAN)).collect()
    } else {
        statistics::compute_quantiles(&lift, quantiles)
    };
    let anomalies = NumericAnomaly::scan(&lift);

    info!(
        baseline = %baseline.label(),
        challenger = %challenger.label(),
        p_b_beats_a,
        mean_lift,
        "compared arms"
    );
    if !anomalies.is_clean() {
        warn!(
            baseline = %baseline.label(),
            nan = anomalies.nan,
            infinite = anomalies.infinite,
            "non-finite relative lift from zero baseline draws"
        );
    }

    Ok(LiftSummary {
        baseline: baseline.label(),
        challenger: challenger.label(),
        trials: lift.len(),
        lift_samples: lift,
        p_b_beats_a,
        mean_lift,
        quantiles,
        anomalies,
    })
}
