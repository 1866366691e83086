//! Output formatting for experiment results.
//!
//! - Text: stable plain-text listing of per-arm counts
//! - Terminal: human-readable comparison with colors and box drawing
//! - JSON: machine-readable report of posterior and lift summaries
//! - Palette: series colours for plotting collaborators

mod json;
mod palette;
mod terminal;
mod text;

pub use json::{to_json, to_json_pretty, Report};
pub use palette::{series_color, PALETTE};
pub use terminal::format_comparison;
pub use text::format_arms;
