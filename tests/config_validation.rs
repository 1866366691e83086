//! Tests for configuration validation.
//!
//! These tests verify that invalid configuration values are rejected
//! by the builder methods with appropriate panic messages.

use conversion_oracle::{
    ArmLabel, ArmSummary, Config, ConfigurationError, ConversionOracle, Error, PriorRegistry,
};

fn arms() -> [ArmSummary; 2] {
    [
        ArmSummary::from_counts(ArmLabel::A, 10, 10),
        ArmSummary::from_counts(ArmLabel::B, 12, 8),
    ]
}

fn oracle() -> ConversionOracle {
    ConversionOracle::new(PriorRegistry::default(), arms()).unwrap()
}

// =============================================================================
// SIMULATION COUNT VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "simulations must be positive")]
fn simulations_zero_panics() {
    let _ = oracle().simulations(0);
}

#[test]
fn simulations_one_valid() {
    let oracle = oracle().simulations(1);
    assert_eq!(oracle.config().simulations, 1);
    let lift = oracle.compare_pair().unwrap();
    assert_eq!(lift.trials, 1);
}

#[test]
fn presets() {
    assert_eq!(Config::quick().simulations, 10_000);
    assert_eq!(Config::balanced().simulations, 100_000);
    assert_eq!(Config::thorough(), Config::default());
    assert_eq!(Config::new().seed, None);
}

// =============================================================================
// QUANTILE AND CREDIBLE LEVEL VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "quantiles must be in [0, 1]")]
fn quantile_above_one_panics() {
    let _ = Config::new().quantiles(&[0.5, 1.5]);
}

#[test]
fn quantile_endpoints_valid() {
    let config = Config::new().quantiles(&[0.0, 1.0]);
    assert!(config.validate().is_ok());
}

#[test]
#[should_panic(expected = "credible_level must be in (0, 1)")]
fn credible_level_one_panics() {
    let _ = Config::new().credible_level(1.0);
}

// =============================================================================
// STRUCT LITERALS
// =============================================================================

#[test]
fn literal_config_validated_at_construction() {
    let config = Config {
        quantiles: vec![-0.1],
        ..Config::default()
    };
    let err = ConversionOracle::with_config(config, PriorRegistry::default(), arms()).unwrap_err();
    assert!(matches!(
        err,
        Error::Configuration(ConfigurationError::InvalidConfig(_))
    ));
}

#[test]
fn literal_credible_level_rejected() {
    let config = Config {
        credible_level: f64::NAN,
        ..Config::default()
    };
    assert!(config.validate().is_err());
}
