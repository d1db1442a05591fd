//! # Onset Beatmap
//!
//! Turns an audio file into a rhythm-game beatmap: detect onsets (moments of
//! rhythmic attack), then write their times out in one of two encodings.
//!
//! ## Features
//!
//! - **Decoding**: any container/codec Symphonia supports, downmixed to mono
//! - **Onset Detection**: resampled to 22.05 kHz, then log-mel spectral flux with
//!   moving-window peak picking
//! - **Keyed JSON**: a random home-row key (`A S D J K L`) per onset, times in ms
//! - **Plain Text**: one onset time in seconds per line
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use onset_beatmap::{generate_beatmap, OutputFormat, SpectralFluxDetector};
//!
//! let detector = SpectralFluxDetector::default();
//! let output = generate_beatmap(
//!     Path::new("song.wav"),
//!     OutputFormat::KeyedJson,
//!     &detector,
//!     &mut rand::thread_rng(),
//! )?;
//! println!("wrote {}", output.display());
//! # Ok::<(), onset_beatmap::BeatmapError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Audio File → Decoder → OnsetDetector → Encoder (JSON | text) → Writer
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod beatmap;
pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

use std::path::{Path, PathBuf};

use rand::Rng;

// Re-export main types
pub use beatmap::{write_beatmap, KeySymbol, KeyedBeatmap, OutputFormat, PressedKey};
pub use config::OnsetConfig;
pub use error::BeatmapError;
pub use features::onset::{OnsetDetector, SpectralFluxDetector};

/// Main pipeline function
///
/// Decodes `input`, detects onsets with `detector`, encodes them in `format`
/// and writes the result next to the input file.
///
/// # Arguments
///
/// * `input` - Path to the audio file
/// * `format` - Output encoding
/// * `detector` - Onset source for the decoded waveform
/// * `rng` - Random source for keyed output
///
/// # Returns
///
/// Path of the written beatmap
///
/// # Errors
///
/// Returns `BeatmapError::DecodingError` if the audio cannot be decoded, a
/// detection error from `detector`, or `BeatmapError::WriteError` if the output
/// cannot be written
pub fn generate_beatmap<D, R>(
    input: &Path,
    format: OutputFormat,
    detector: &D,
    rng: &mut R,
) -> Result<PathBuf, BeatmapError>
where
    D: OnsetDetector + ?Sized,
    R: Rng + ?Sized,
{
    use std::time::Instant;
    let start_time = Instant::now();

    let (samples, sample_rate) = io::decoder::decode_audio(input)?;
    let onsets = detector.detect(&samples, sample_rate)?;
    let output = write_beatmap(&onsets, input, format, rng)?;

    log::debug!(
        "Beatmap pipeline finished in {:.2} ms ({} onsets)",
        start_time.elapsed().as_secs_f64() * 1000.0,
        onsets.len()
    );

    Ok(output)
}
