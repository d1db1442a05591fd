//! Plain-text beatmaps: one onset time in seconds per line

/// Format onset times as newline-separated seconds with 4 decimals
///
/// No header and no trailing newline; empty input gives an empty string.
pub fn encode_plain_timestamps(onsets: &[f64]) -> String {
    onsets
        .iter()
        .map(|t| format!("{:.4}", t))
        .collect::<Vec<_>>()
        .join("\n")
}
