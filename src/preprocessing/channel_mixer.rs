//! Channel mixing utilities (multi-channel to mono conversion)

use crate::error::BeatmapError;

/// Downmix interleaved multi-channel samples to mono by averaging channels
///
/// # Arguments
///
/// * `interleaved` - Samples laid out as `[f0c0, f0c1, ..., f1c0, f1c1, ...]`
/// * `channels` - Number of interleaved channels
///
/// # Returns
///
/// One mono sample per frame. A trailing partial frame is dropped.
///
/// # Errors
///
/// Returns `BeatmapError::InvalidInput` if `channels` is zero
pub fn downmix_interleaved(interleaved: &[f32], channels: usize) -> Result<Vec<f32>, BeatmapError> {
    if channels == 0 {
        return Err(BeatmapError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }

    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    let scale = 1.0 / channels as f32;
    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect())
}
