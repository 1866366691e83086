//! Concert ticket landing page experiment: two page variants plus a third
//! arm with a weaker prior.
//!
//! Run with `RUST_LOG=debug` to see per-arm sampling, and set
//! `CONVERSION_ORACLE_SEED` to replay a run.

use conversion_oracle::output::{format_comparison, series_color, to_json_pretty, Report};
use conversion_oracle::{
    ArmLabel, ArmSummary, BusinessMetrics, Config, ConversionOracle, PriorRegistry,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("conversion-oracle concert example\n");

    let arm_c = ArmLabel::parse("C").ok_or("bad label")?;
    let registry = PriorRegistry::builder().with("prior_c", 0.5)?.build();
    let config = Config::from_env_or(Config::balanced());

    let oracle = ConversionOracle::with_config(
        config.clone(),
        registry,
        [
            ArmSummary::new(ArmLabel::A, 100, 50, 50).with_metrics(BusinessMetrics {
                customers: 50,
                units: 104,
                revenue: 6240.0,
            }),
            ArmSummary::new(ArmLabel::B, 100, 70, 30).with_metrics(BusinessMetrics {
                customers: 70,
                units: 152,
                revenue: 9120.0,
            }),
            ArmSummary::new(arm_c, 80, 44, 36),
        ],
    )?;

    println!("{}", oracle.describe());
    print!("{oracle}");

    let posteriors = oracle.generate_posteriors()?;
    let summaries = posteriors.summaries(config.credible_level);
    for (i, summary) in summaries.iter().enumerate() {
        println!(
            "arm {} ({}): mean {:.4}",
            summary.label,
            series_color(i),
            summary.mean
        );
    }

    // Three arms: every comparison names its pair.
    for challenger in [ArmLabel::B, arm_c] {
        let lift = posteriors.compare(ArmLabel::A, challenger)?;
        println!("\n{}", format_comparison(&lift, &summaries));
    }

    let lift = posteriors.compare(ArmLabel::A, ArmLabel::B)?;
    let report = Report::new(oracle.arms(), &posteriors, config.credible_level, Some(lift));
    println!("{}", to_json_pretty(&report)?);

    Ok(())
}
