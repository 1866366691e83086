//! Arm identifiers, priors, and per-arm aggregated counts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PRIOR, PRIOR_KEY_PREFIX};

/// Identifier of one experiment arm: a single ASCII letter, shown uppercase.
///
/// Labels are derived from registration keys (`prior_c` → `C`), so the
/// mapping between the two is one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct ArmLabel(char);

impl ArmLabel {
    /// Built-in control arm.
    pub const A: ArmLabel = ArmLabel('A');
    /// Built-in treatment arm.
    pub const B: ArmLabel = ArmLabel('B');

    /// Create a label from an ASCII letter of either case.
    pub fn from_letter(letter: char) -> Option<Self> {
        letter
            .is_ascii_alphabetic()
            .then(|| ArmLabel(letter.to_ascii_uppercase()))
    }

    /// Parse a one-letter label such as `"C"` or `"c"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_letter(c),
            _ => None,
        }
    }

    /// The uppercase letter.
    pub fn as_char(self) -> char {
        self.0
    }

    /// Registration key for this arm, e.g. `prior_c`.
    pub fn prior_key(self) -> String {
        format!("{PRIOR_KEY_PREFIX}{}", self.0.to_ascii_lowercase())
    }

    /// Zero-based position in the alphabet. Used to derive per-arm seeds.
    pub fn index(self) -> u64 {
        u64::from(self.0 as u8 - b'A')
    }
}

impl fmt::Display for ArmLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for ArmLabel {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        ArmLabel::from_letter(c).ok_or_else(|| format!("invalid arm label {c:?}"))
    }
}

impl From<ArmLabel> for char {
    fn from(label: ArmLabel) -> char {
        label.0
    }
}

/// Beta prior pseudo-counts for one arm.
///
/// The registry sets both shapes from one scalar, but they are kept apart so
/// the posterior update reads as the textbook one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaPrior {
    /// Pseudo-successes.
    pub alpha0: f64,
    /// Pseudo-failures.
    pub beta0: f64,
}

impl BetaPrior {
    /// Beta(1, 1): every conversion rate equally likely.
    pub fn uniform() -> Self {
        Self::symmetric(DEFAULT_PRIOR)
    }

    /// Beta(p, p).
    pub fn symmetric(pseudo_count: f64) -> Self {
        Self {
            alpha0: pseudo_count,
            beta0: pseudo_count,
        }
    }

    /// True when both pseudo-counts are equal, i.e. expressible as one scalar.
    pub fn is_symmetric(&self) -> bool {
        self.alpha0 == self.beta0
    }
}

impl Default for BetaPrior {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Business figures carried alongside the counts for reporting.
///
/// The statistical engine never reads these.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessMetrics {
    /// Distinct converting customers.
    pub customers: u64,
    /// Units sold (tickets, packages, ...).
    pub units: u64,
    /// Revenue attributed to converting customers.
    pub revenue: f64,
}

/// Aggregated outcome counts for one arm.
///
/// Produced by an ingestion step outside this crate. The prior is attached
/// when the summary is bound to a [`crate::PriorRegistry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmSummary {
    /// Arm identifier.
    pub label: ArmLabel,
    /// Units exposed to the arm.
    pub participants: u64,
    /// Units that converted.
    pub successes: u64,
    /// Units that did not convert.
    pub failures: u64,
    /// Prior pseudo-counts. Left uniform, binding fills in the registry's
    /// prior; any other value must equal it.
    pub prior: BetaPrior,
    /// Optional reporting figures.
    pub metrics: Option<BusinessMetrics>,
}

impl ArmSummary {
    /// Create a summary from explicit counts.
    pub fn new(label: ArmLabel, participants: u64, successes: u64, failures: u64) -> Self {
        Self {
            label,
            participants,
            successes,
            failures,
            prior: BetaPrior::uniform(),
            metrics: None,
        }
    }

    /// Create a summary where every participant is either a success or a failure.
    ///
    /// `participants` saturates at `u64::MAX`; such a summary reports itself
    /// as inconsistent.
    pub fn from_counts(label: ArmLabel, successes: u64, failures: u64) -> Self {
        Self::new(label, successes.saturating_add(failures), successes, failures)
    }

    /// Attach reporting figures.
    pub fn with_metrics(mut self, metrics: BusinessMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub(crate) fn with_prior(mut self, prior: BetaPrior) -> Self {
        self.prior = prior;
        self
    }

    /// Whether `successes + failures == participants`.
    pub fn is_consistent(&self) -> bool {
        self.successes.checked_add(self.failures) == Some(self.participants)
    }

    /// Observed conversion rate, `None` without participants.
    pub fn observed_rate(&self) -> Option<f64> {
        (self.participants > 0).then(|| self.successes as f64 / self.participants as f64)
    }

    /// Posterior Beta shape parameters `(successes + alpha0, failures + beta0)`.
    pub fn posterior_shape(&self) -> (f64, f64) {
        (
            self.successes as f64 + self.prior.alpha0,
            self.failures as f64 + self.prior.beta0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_letter_uppercases() {
        assert_eq!(ArmLabel::from_letter('c'), ArmLabel::from_letter('C'));
        assert_eq!(ArmLabel::from_letter('c').map(ArmLabel::as_char), Some('C'));
        assert_eq!(ArmLabel::from_letter('1'), None);
        assert_eq!(ArmLabel::from_letter('é'), None);
    }

    #[test]
    fn label_parse_rejects_multichar() {
        assert_eq!(ArmLabel::parse("a"), Some(ArmLabel::A));
        assert_eq!(ArmLabel::parse("AB"), None);
        assert_eq!(ArmLabel::parse(""), None);
    }

    #[test]
    fn label_key_roundtrip() {
        let label = ArmLabel::from_letter('d').unwrap();
        assert_eq!(label.prior_key(), "prior_d");
        assert_eq!(label.to_string(), "D");
        assert_eq!(label.index(), 3);
    }

    #[test]
    fn summary_consistency() {
        let ok = ArmSummary::from_counts(ArmLabel::A, 3, 7);
        assert_eq!(ok.participants, 10);
        assert!(ok.is_consistent());

        let bad = ArmSummary::new(ArmLabel::A, 12, 3, 7);
        assert!(!bad.is_consistent());
    }

    #[test]
    fn from_counts_saturates_on_huge_counts() {
        let huge = ArmSummary::from_counts(ArmLabel::A, u64::MAX, 2);
        assert_eq!(huge.participants, u64::MAX);
        assert!(!huge.is_consistent());
    }

    #[test]
    fn posterior_shape_adds_prior() {
        let summary =
            ArmSummary::from_counts(ArmLabel::B, 70, 30).with_prior(BetaPrior::symmetric(2.5));
        assert_eq!(summary.posterior_shape(), (72.5, 32.5));
    }

    #[test]
    fn observed_rate_empty_arm() {
        assert_eq!(ArmSummary::from_counts(ArmLabel::A, 0, 0).observed_rate(), None);
        assert_eq!(
            ArmSummary::from_counts(ArmLabel::A, 1, 3).observed_rate(),
            Some(0.25)
        );
    }

    #[test]
    fn label_serializes_as_letter() {
        let json = serde_json::to_string(&ArmLabel::B).unwrap();
        assert_eq!(json, "\"B\"");
        let back: ArmLabel = serde_json::from_str("\"c\"").unwrap();
        assert_eq!(back.as_char(), 'C');
        assert!(serde_json::from_str::<ArmLabel>("\"7\"").is_err());
    }
}
