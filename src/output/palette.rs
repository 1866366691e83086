//! Colours for plotted series.

/// Colour names understood by common plotting front ends.
pub const PALETTE: [&str; 9] = [
    "blue", "red", "green", "gold", "gray", "orange", "orchid", "teal", "snow",
];

/// Colour for the `index`-th series. Wraps around after the last entry.
pub fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
