//! Default values shared across the crate.

/// Default deterministic seed for callers that want reproducible runs
/// without picking their own.
///
/// The value `0x6162746573` is "abtes" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x6162746573;

/// Default number of Monte Carlo draws per arm.
pub const DEFAULT_SIMULATIONS: usize = 1_000_000;

/// Default prior pseudo-count. Beta(1, 1) is uniform on [0, 1].
pub const DEFAULT_PRIOR: f64 = 1.0;

/// Default lift quantiles: equal-tailed 95% interval plus the median.
pub const DEFAULT_QUANTILES: [f64; 3] = [0.025, 0.5, 0.975];

/// Default mass of per-arm credible intervals.
pub const DEFAULT_CREDIBLE_LEVEL: f64 = 0.95;

/// Prefix every arm registration key must carry.
pub const PRIOR_KEY_PREFIX: &str = "prior_";

/// Environment variable overriding [`DEFAULT_SIMULATIONS`].
pub const ENV_SIMULATIONS: &str = "CONVERSION_ORACLE_SIMULATIONS";

/// Environment variable supplying a fixed sampling seed.
pub const ENV_SEED: &str = "CONVERSION_ORACLE_SEED";
