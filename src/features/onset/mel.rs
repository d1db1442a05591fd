//! Mel filterbank and dB scaling
//!
//! Slaney-style mel scale: linear below 1 kHz, logarithmic above, with
//! area-normalized triangular filters.

use crate::error::BeatmapError;

const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Convert Hz to mels (Slaney scale)
pub fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}

/// Convert mels to Hz (Slaney scale)
pub fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

/// Build a mel filterbank
///
/// # Arguments
///
/// * `sample_rate` - Sample rate in Hz
/// * `n_fft` - FFT size the spectrogram was computed with
/// * `n_mels` - Number of mel bands
///
/// # Returns
///
/// Filter weights (`n_mels × (n_fft / 2 + 1)`), spanning 0 Hz to Nyquist
///
/// # Errors
///
/// Returns `BeatmapError::InvalidInput` for a zero sample rate, FFT size or band count
pub fn mel_filterbank(
    sample_rate: u32,
    n_fft: usize,
    n_mels: usize,
) -> Result<Vec<Vec<f32>>, BeatmapError> {
    if sample_rate == 0 || n_fft == 0 || n_mels == 0 {
        return Err(BeatmapError::InvalidInput(format!(
            "Invalid mel filterbank parameters: sr={}, n_fft={}, n_mels={}",
            sample_rate, n_fft, n_mels
        )));
    }

    let n_bins = n_fft / 2 + 1;
    let fft_freqs: Vec<f64> = (0..n_bins)
        .map(|k| k as f64 * sample_rate as f64 / n_fft as f64)
        .collect();

    let mel_max = hz_to_mel(sample_rate as f64 / 2.0);
    let mel_freqs: Vec<f64> = (0..n_mels + 2)
        .map(|i| mel_to_hz(mel_max * i as f64 / (n_mels + 1) as f64))
        .collect();

    let mut weights = Vec::with_capacity(n_mels);
    for m in 0..n_mels {
        let (lo, center, hi) = (mel_freqs[m], mel_freqs[m + 1], mel_freqs[m + 2]);
        let enorm = 2.0 / (hi - lo);

        let row: Vec<f32> = fft_freqs
            .iter()
            .map(|&f| {
                let lower = (f - lo) / (center - lo);
                let upper = (hi - f) / (hi - center);
                (lower.min(upper).max(0.0) * enorm) as f32
            })
            .collect();
        weights.push(row);
    }

    Ok(weights)
}

/// Project a power spectrogram onto mel bands
///
/// Returns a mel spectrogram laid out `n_frames × n_mels`.
pub fn apply_filterbank(power_frames: &[Vec<f32>], filterbank: &[Vec<f32>]) -> Vec<Vec<f32>> {
    power_frames
        .iter()
        .map(|frame| {
            filterbank
                .iter()
                .map(|filter| filter.iter().zip(frame).map(|(&w, &p)| w * p).sum::<f32>())
                .collect()
        })
        .collect()
}

/// Convert power values to dB in place
///
/// `10 * log10(max(amin, x))`, then floored at `max - top_db` across the whole
/// spectrogram.
pub fn power_to_db(frames: &mut [Vec<f32>], top_db: f32) {
    const AMIN: f32 = 1e-10;

    let mut max_db = f32::NEG_INFINITY;
    for frame in frames.iter_mut() {
        for value in frame.iter_mut() {
            *value = 10.0 * value.max(AMIN).log10();
            max_db = max_db.max(*value);
        }
    }

    if top_db >= 0.0 && max_db.is_finite() {
        let floor = max_db - top_db;
        for frame in frames.iter_mut() {
            for value in frame.iter_mut() {
                *value = value.max(floor);
            }
        }
    }
}
