//! Spectral flux onset strength
//!
//! Detects onsets by finding increases in a log-power mel spectrogram.
//!
//! Algorithm:
//! 1. Centered STFT power spectrogram (n_fft, hop_length)
//! 2. Project onto mel bands and convert to dB
//! 3. Flux: `env[t] = mean_m max(0, S[m][t] - S[m][t - lag])`
//! 4. Shift right by `lag + n_fft / (2 * hop_length)` frames so each value
//!    lines up with the frame where the attack starts
//!
//! # Reference
//!
//! Böck, S., & Widmer, G. (2013). Maximum Filter Vibrato Suppression for Onset Detection.
//! *Proceedings of the 16th International Conference on Digital Audio Effects (DAFx)*.

use crate::config::OnsetConfig;
use crate::error::BeatmapError;

use super::mel::{apply_filterbank, mel_filterbank, power_to_db};
use super::stft::power_spectrogram;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Compute the onset strength envelope of a mono signal
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `config` - STFT and mel parameters
///
/// # Returns
///
/// One strength value per STFT frame (`1 + samples.len() / hop_length` values),
/// empty for empty input
///
/// # Errors
///
/// Returns `BeatmapError::InvalidInput` if the sample rate, STFT or mel
/// parameters are invalid
pub fn onset_strength(
    samples: &[f32],
    sample_rate: u32,
    config: &OnsetConfig,
) -> Result<Vec<f32>, BeatmapError> {
    if sample_rate == 0 {
        return Err(BeatmapError::InvalidInput("Invalid sample rate".to_string()));
    }
    if config.lag == 0 {
        return Err(BeatmapError::InvalidInput("Lag must be >= 1".to_string()));
    }

    let power = power_spectrogram(samples, config.n_fft, config.hop_length)?;
    if power.is_empty() {
        return Ok(Vec::new());
    }

    let filterbank = mel_filterbank(sample_rate, config.n_fft, config.n_mels)?;
    let mut mel = apply_filterbank(&power, &filterbank);
    power_to_db(&mut mel, config.top_db);

    let n_frames = mel.len();
    let lag = config.lag;
    let pad = lag + config.n_fft / (2 * config.hop_length);

    let mut envelope = vec![0.0f32; n_frames];
    for t in lag..n_frames {
        let target = t - lag + pad;
        if target >= n_frames {
            break;
        }

        let (prev, curr) = (&mel[t - lag], &mel[t]);
        let sum: f32 = curr
            .iter()
            .zip(prev)
            .map(|(&c, &p)| (c - p).max(0.0))
            .sum();
        envelope[target] = sum / config.n_mels as f32;
    }

    log::debug!(
        "Onset strength: {} frames, max={:.4}",
        envelope.len(),
        envelope.iter().copied().fold(0.0f32, f32::max)
    );

    Ok(envelope)
}

/// Rescale an envelope to [0, 1] in place
///
/// Returns `false` when the envelope is empty or flat, in which case it
/// carries no onsets.
pub fn normalize_envelope(envelope: &mut [f32]) -> bool {
    let Some(min) = envelope.iter().copied().reduce(f32::min) else {
        return false;
    };
    let max = envelope.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;

    if range <= EPSILON {
        return false;
    }

    for value in envelope.iter_mut() {
        *value = (*value - min) / range;
    }
    true
}
