//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::analysis::{LiftSummary, PosteriorSummary};

/// Format a comparison for human-readable terminal output.
///
/// `posteriors` should hold the digests of the two compared arms; any
/// other entries are ignored.
pub fn format_comparison(lift: &LiftSummary, posteriors: &[PosteriorSummary]) -> String {
    let mut output = String::new();

    let header = format!(
        "{} vs {}",
        format!("Arm {}", lift.challenger).bold(),
        format!("Arm {}", lift.baseline).bold()
    );
    output.push_str(&format_box_top());
    output.push_str(&format_box_line(&header));
    output.push_str(&format_box_separator());

    for label in [lift.baseline, lift.challenger] {
        if let Some(p) = posteriors.iter().find(|p| p.label == label) {
            let line = format!(
                "Arm {}: Beta({:.0}, {:.0})  mean {:.4}  {:.0}% CI [{:.4}, {:.4}]",
                p.label,
                p.alpha,
                p.beta,
                p.mean,
                p.credible_level * 100.0,
                p.credible_interval.0,
                p.credible_interval.1
            );
            output.push_str(&format_box_line(&line));
        }
    }
    output.push_str(&format_box_separator());

    let prob_pct = lift.p_b_beats_a * 100.0;
    let prob_str = format!(
        "P({} > {}): {:.2}%",
        lift.challenger, lift.baseline, prob_pct
    );
    let prob_colored = if prob_pct >= 95.0 {
        prob_str.green().bold()
    } else if prob_pct <= 5.0 {
        prob_str.red().bold()
    } else {
        prob_str.yellow()
    };
    output.push_str(&format_box_line(&prob_colored.to_string()));

    let mean_str = format!("Mean lift: {}", format_percent(lift.mean_lift));
    output.push_str(&format_box_line(&mean_str));

    for (p, q) in &lift.quantiles {
        let line = format!("  q{:<6} {}", p, format_percent(*q));
        output.push_str(&format_box_line(&line));
    }

    let trials_str = format!("Trials: {}", lift.trials);
    output.push_str(&format_box_line(&trials_str));

    if !lift.anomalies.is_clean() {
        output.push_str(&format_box_separator());
        let anomaly_str = format!(
            "{} {} NaN, {} infinite lift values",
            "\u{26A0}".yellow().bold(),
            lift.anomalies.nan,
            lift.anomalies.infinite
        );
        output.push_str(&format_box_line(&anomaly_str));
    }

    output.push_str(&format_box_bottom());
    output
}

/// Relative lift as a signed percentage.
fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:+.2}%", value * 100.0)
    } else {
        format!("{}", value).dimmed().to_string()
    }
}

// Box drawing helpers

const BOX_WIDTH: usize = 70;

fn format_box_top() -> String {
    format!("\u{250C}{}\u{2510}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_bottom() -> String {
    format!("\u{2514}{}\u{2518}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_separator() -> String {
    format!("\u{251C}{}\u{2524}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_line(content: &str) -> String {
    const INNER: usize = BOX_WIDTH - 2;

    // Strip ANSI codes for length calculation
    let plain = strip_ansi_codes(content);
    let visible_len = plain.chars().count();
    if visible_len > INNER {
        // Overlong lines lose their colour and end in an ellipsis.
        let cut: String = plain.chars().take(INNER - 1).collect();
        return format!("\u{2502} {}\u{2026} \u{2502}\n", cut);
    }
    let padding = INNER - visible_len;
    format!("\u{2502} {}{} \u{2502}\n", content, " ".repeat(padding))
}

/// Strip ANSI escape codes for accurate length calculation.
fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of ANSI sequence)
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}
