//! Environment overrides for `Config`.
//!
//! Kept to a single test so no other test in this binary races on the
//! process environment.

use conversion_oracle::constants::{ENV_SEED, ENV_SIMULATIONS};
use conversion_oracle::Config;

#[test]
fn env_overrides_and_fallbacks() {
    std::env::remove_var(ENV_SIMULATIONS);
    std::env::remove_var(ENV_SEED);
    assert_eq!(Config::from_env_or(Config::quick()), Config::quick());

    std::env::set_var(ENV_SIMULATIONS, "2500");
    std::env::set_var(ENV_SEED, " 99 ");
    let config = Config::from_env_or(Config::default());
    assert_eq!(config.simulations, 2500);
    assert_eq!(config.seed, Some(99));

    // Zero and garbage are ignored.
    std::env::set_var(ENV_SIMULATIONS, "0");
    std::env::set_var(ENV_SEED, "not-a-seed");
    let config = Config::from_env_or(Config::balanced());
    assert_eq!(config.simulations, 100_000);
    assert_eq!(config.seed, None);

    std::env::remove_var(ENV_SIMULATIONS);
    std::env::remove_var(ENV_SEED);
}
