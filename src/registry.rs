//! Arm registration and prior validation.
//!
//! Arms are named by registration keys of the form `prior_<letter>`. The
//! built-in arms `A` and `B` always exist with a uniform prior; further arms
//! are added with their own key. Everything is validated while building, so
//! a [`PriorRegistry`] in hand is always well-formed and never changes.
//!
//! ```
//! use conversion_oracle::{ArmLabel, PriorRegistry};
//!
//! let registry = PriorRegistry::builder()
//!     .with("prior_b", 2.0)?
//!     .with("prior_c", 1.0)?
//!     .build();
//!
//! assert_eq!(registry.len(), 3);
//! assert_eq!(registry.prior(ArmLabel::B).map(|p| p.alpha0), Some(2.0));
//! # Ok::<(), conversion_oracle::ConfigurationError>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::constants::PRIOR_KEY_PREFIX;
use crate::error::ConfigurationError;
use crate::types::{ArmLabel, BetaPrior};

/// Parse a registration key into the arm label it names.
///
/// Accepts exactly `prior_` followed by one lowercase ASCII letter.
pub fn parse_prior_key(key: &str) -> Result<ArmLabel, ConfigurationError> {
    let unknown = || ConfigurationError::UnknownKey {
        key: key.to_string(),
    };

    let rest = key.strip_prefix(PRIOR_KEY_PREFIX).ok_or_else(unknown)?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => ArmLabel::from_letter(c).ok_or_else(unknown),
        _ => Err(unknown()),
    }
}

fn validate_prior(label: ArmLabel, value: f64) -> Result<BetaPrior, ConfigurationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigurationError::InvalidPrior { label, value });
    }
    Ok(BetaPrior::symmetric(value))
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    prior: BetaPrior,
    /// Set once a key has named this arm; a second key is a duplicate.
    claimed: bool,
}

/// Accumulates validated registrations.
///
/// A rejected registration leaves the builder exactly as it was.
#[derive(Debug, Clone)]
pub struct PriorRegistryBuilder {
    slots: BTreeMap<ArmLabel, Slot>,
}

impl Default for PriorRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorRegistryBuilder {
    /// Start with the built-in arms `A` and `B` under a uniform prior.
    pub fn new() -> Self {
        let builtin = Slot {
            prior: BetaPrior::uniform(),
            claimed: false,
        };
        let slots = [(ArmLabel::A, builtin), (ArmLabel::B, builtin)]
            .into_iter()
            .collect();
        Self { slots }
    }

    /// Register one arm by key.
    ///
    /// `prior_a` and `prior_b` replace the built-in priors; every other
    /// letter adds an arm. Each letter may be named at most once.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnknownKey`] if `key` is not `prior_<letter>`
    /// - [`ConfigurationError::DuplicateLabel`] if the letter was already named
    /// - [`ConfigurationError::InvalidPrior`] if `prior` is negative or not finite
    pub fn register(&mut self, key: &str, prior: f64) -> Result<&mut Self, ConfigurationError> {
        let label = parse_prior_key(key)?;
        if self.slots.get(&label).is_some_and(|slot| slot.claimed) {
            return Err(ConfigurationError::DuplicateLabel {
                label,
                key: key.to_string(),
            });
        }
        let prior = validate_prior(label, prior)?;
        self.slots.insert(
            label,
            Slot {
                prior,
                claimed: true,
            },
        );
        Ok(self)
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with(mut self, key: &str, prior: f64) -> Result<Self, ConfigurationError> {
        self.register(key, prior)?;
        Ok(self)
    }

    /// Number of arms registered so far, built-ins included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: the built-in arms are present from the start.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Freeze the arm table.
    pub fn build(self) -> PriorRegistry {
        PriorRegistry {
            arms: self
                .slots
                .into_iter()
                .map(|(label, slot)| (label, slot.prior))
                .collect(),
        }
    }
}

/// Immutable table of arms and their priors, ordered by label.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorRegistry {
    arms: BTreeMap<ArmLabel, BetaPrior>,
}

impl Default for PriorRegistry {
    /// Arms `A` and `B` with uniform priors.
    fn default() -> Self {
        PriorRegistryBuilder::new().build()
    }
}

impl PriorRegistry {
    /// Start building a registry.
    pub fn builder() -> PriorRegistryBuilder {
        PriorRegistryBuilder::new()
    }

    /// Build a registry from `(key, prior)` pairs in one step.
    ///
    /// Stops at the first invalid pair.
    pub fn from_priors<'a, I>(priors: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut builder = PriorRegistryBuilder::new();
        for (key, prior) in priors {
            builder.register(key, prior)?;
        }
        Ok(builder.build())
    }

    /// Number of arms.
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Whether `label` is registered.
    pub fn contains(&self, label: ArmLabel) -> bool {
        self.arms.contains_key(&label)
    }

    /// Prior of one arm.
    pub fn prior(&self, label: ArmLabel) -> Option<BetaPrior> {
        self.arms.get(&label).copied()
    }

    /// Registered labels in order.
    pub fn labels(&self) -> impl Iterator<Item = ArmLabel> + '_ {
        self.arms.keys().copied()
    }

    /// `(label, prior)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (ArmLabel, BetaPrior)> + '_ {
        self.arms.iter().map(|(label, prior)| (*label, *prior))
    }
}

impl fmt::Display for PriorRegistry {
    /// Renders `prior_a=1, prior_b=1, ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, prior)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if prior.is_symmetric() {
                write!(f, "{}={}", label.prior_key(), prior.alpha0)?;
            } else {
                write!(f, "{}=({}, {})", label.prior_key(), prior.alpha0, prior.beta0)?;
            }
        }
        Ok(())
    }
}
