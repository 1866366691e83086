//! Plain-text listing of per-arm counts.

use std::fmt::Write;

use crate::types::ArmSummary;

/// Render each arm's counts on its own line, in the order given.
///
/// Output is stable across runs and carries no statistics, e.g.
///
/// ```text
/// experiment_a: participants=100, successes=50, failures=50
/// experiment_b: participants=100, successes=70, failures=30, customers=70, units=152, revenue=9120.00
/// ```
pub fn format_arms(arms: &[ArmSummary]) -> String {
    let mut out = String::new();
    for arm in arms {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "experiment_{}: participants={}, successes={}, failures={}",
            arm.label.as_char().to_ascii_lowercase(),
            arm.participants,
            arm.successes,
            arm.failures
        );
        if let Some(m) = &arm.metrics {
            let _ = write!(
                out,
                ", customers={}, units={}, revenue={:.2}",
                m.customers, m.units, m.revenue
            );
        }
        out.push('\n');
    }
    out
}
