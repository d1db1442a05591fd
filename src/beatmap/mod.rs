//! Beatmap encoding and output
//!
//! Two encodings of the same onset sequence:
//! - Keyed JSON: random home-row key per onset, times in milliseconds
//! - Plain text: one time in seconds per line

pub mod keyed;
pub mod keys;
pub mod plain;
pub mod writer;

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::error::BeatmapError;

pub use keyed::{encode_keyed_timestamps, seconds_to_millis, KeyedBeatmap, PressedKey};
pub use keys::KeySymbol;
pub use plain::encode_plain_timestamps;
pub use writer::{derive_output_path, write_output};

/// Output encoding of a beatmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Keyed JSON (`<stem>.json`)
    KeyedJson,
    /// Plain-text timestamps (`<stem>.beatmap.txt`)
    PlainText,
}

impl OutputFormat {
    /// Suffix replacing the input file's extension
    pub fn suffix(&self) -> &'static str {
        match self {
            OutputFormat::KeyedJson => ".json",
            OutputFormat::PlainText => ".beatmap.txt",
        }
    }

    /// Encode onset times in this format
    ///
    /// `source_path` is recorded in keyed output; `rng` picks keyed output's keys.
    pub fn encode<R: Rng + ?Sized>(
        &self,
        onsets: &[f64],
        source_path: &str,
        rng: &mut R,
    ) -> Result<String, BeatmapError> {
        match self {
            OutputFormat::KeyedJson => encode_keyed_timestamps(onsets, source_path, rng).to_json_pretty(),
            OutputFormat::PlainText => Ok(encode_plain_timestamps(onsets)),
        }
    }
}

/// Encode onset times and write them next to the input file
///
/// # Returns
///
/// Path of the written beatmap
pub fn write_beatmap<R: Rng + ?Sized>(
    onsets: &[f64],
    input: &Path,
    format: OutputFormat,
    rng: &mut R,
) -> Result<PathBuf, BeatmapError> {
    let contents = format.encode(onsets, &input.to_string_lossy(), rng)?;
    let output = derive_output_path(input, format.suffix());
    write_output(&output, &contents)?;
    Ok(output)
}
