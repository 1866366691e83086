//! Tests for arm registration.
//!
//! Keys must be `prior_<letter>`, each letter at most once, with finite
//! non-negative priors. A rejected key must leave the registry untouched.

use conversion_oracle::{
    parse_prior_key, ArmLabel, ArmSummary, ConfigurationError, ConversionOracle, Error,
    PriorRegistry, PriorRegistryBuilder,
};

// =============================================================================
// KEY FORMAT
// =============================================================================

#[test]
fn bias_key_rejected_and_registry_unchanged() {
    let mut builder = PriorRegistryBuilder::new();
    builder.register("prior_c", 1.0).unwrap();
    let before = builder.clone().build();

    let err = builder.register("bias_a", 1.0).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::UnknownKey {
            key: "bias_a".to_string()
        }
    );
    assert_eq!(err.to_string(), "unknown key included as an argument: bias_a");

    assert_eq!(builder.build(), before);
}

#[test]
fn malformed_keys_rejected() {
    for key in ["prior_", "prior_ab", "prior_A", "prior_1", "prior-c", "PRIOR_c", ""] {
        assert!(
            matches!(parse_prior_key(key), Err(ConfigurationError::UnknownKey { .. })),
            "key {key:?} should be rejected"
        );
    }
}

#[test]
fn every_lowercase_letter_accepted() {
    for letter in 'a'..='z' {
        let label = parse_prior_key(&format!("prior_{letter}")).unwrap();
        assert_eq!(label.as_char(), letter.to_ascii_uppercase());
    }
}

// =============================================================================
// DUPLICATES AND VALUES
// =============================================================================

#[test]
fn duplicate_letter_rejected() {
    let mut builder = PriorRegistry::builder();
    builder.register("prior_d", 1.0).unwrap();
    let err = builder.register("prior_d", 2.0).unwrap_err();
    assert!(matches!(err, ConfigurationError::DuplicateLabel { .. }));
    assert_eq!(builder.build().prior(ArmLabel::parse("D").unwrap()).unwrap().alpha0, 1.0);
}

#[test]
fn builtin_arm_overridable_once() {
    let mut builder = PriorRegistry::builder();
    builder.register("prior_a", 0.5).unwrap();
    assert!(builder.register("prior_a", 0.7).is_err());
    let registry = builder.build();
    assert_eq!(registry.prior(ArmLabel::A).unwrap().alpha0, 0.5);
    assert_eq!(registry.prior(ArmLabel::B).unwrap().alpha0, 1.0);
}

#[test]
fn bad_prior_values_rejected() {
    for value in [-0.1, f64::NAN, f64::INFINITY] {
        let mut builder = PriorRegistry::builder();
        assert!(matches!(
            builder.register("prior_c", value),
            Err(ConfigurationError::InvalidPrior { .. })
        ));
        assert_eq!(builder.len(), 2);
    }
}

#[test]
fn zero_prior_is_registrable() {
    let registry = PriorRegistry::from_priors([("prior_c", 0.0)]).unwrap();
    assert_eq!(registry.prior(ArmLabel::parse("C").unwrap()).unwrap().alpha0, 0.0);
}

#[test]
fn zero_shape_fails_at_sampling() {
    let registry = PriorRegistry::from_priors([("prior_a", 0.0)]).unwrap();
    let oracle = ConversionOracle::new(
        registry,
        [
            ArmSummary::from_counts(ArmLabel::A, 0, 10),
            ArmSummary::from_counts(ArmLabel::B, 5, 5),
        ],
    )
    .unwrap()
    .simulations(100);

    assert!(matches!(
        oracle.generate_posteriors(),
        Err(Error::Configuration(ConfigurationError::NonPositiveShape { .. }))
    ));
}

// =============================================================================
// ORDERING AND DISPLAY
// =============================================================================

#[test]
fn labels_iterate_in_order() {
    let registry = PriorRegistry::from_priors([("prior_e", 1.0), ("prior_c", 2.0)]).unwrap();
    let labels: String = registry.labels().map(|l| l.as_char()).collect();
    assert_eq!(labels, "ABCE");
}

#[test]
fn describe_lists_all_priors() {
    let registry = PriorRegistry::from_priors([("prior_c", 0.5)]).unwrap();
    let oracle = ConversionOracle::new(
        registry,
        [
            ArmSummary::from_counts(ArmLabel::A, 1, 1),
            ArmSummary::from_counts(ArmLabel::B, 1, 1),
            ArmSummary::from_counts(ArmLabel::parse("C").unwrap(), 1, 1),
        ],
    )
    .unwrap();
    assert_eq!(
        oracle.describe(),
        "ConversionOracle(simulations=1000000, prior_a=1, prior_b=1, prior_c=0.5)"
    );
}
